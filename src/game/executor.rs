//! Dispatch of a command to the guarded operation of the current phase.

use crate::core::{CommandKind, GameError};
use crate::phase::Phase;

/// Run `kind` for `username` against `phase`.
///
/// Pure: returns the successor phase or the reason the command was refused.
/// Checks happen in a fixed order: phase kind, then actor, then arguments.
pub fn execute(phase: &Phase, username: &str, kind: &CommandKind) -> Result<Phase, GameError> {
    match (phase, kind) {
        (_, CommandKind::Leave) => phase.leave(username),

        (Phase::Lobby(lobby), CommandKind::Join) => lobby.join(username),

        (Phase::Prepare(prepare), CommandKind::ChooseMage { mage }) => prepare.choose_mage(username, *mage),

        (Phase::Planning(planning), CommandKind::PlayAssistant { value }) => {
            planning.play_assistant(username, *value)
        }

        (Phase::StudentMove(action), CommandKind::MoveStudent { color, destination }) => {
            action.move_student(username, *color, *destination)
        }

        (Phase::MnMove(action), CommandKind::MoveMotherNature { steps }) => {
            action.move_mother_nature(username, *steps)
        }

        (Phase::CloudPick(action), CommandKind::PickCloud { cloud }) => action.pick_cloud(username, *cloud),

        (Phase::StudentMove(action), CommandKind::PlayCharacter { character, steps }) => {
            action.play_character(Phase::StudentMove, username, *character, steps)
        }
        (Phase::MnMove(action), CommandKind::PlayCharacter { character, steps }) => {
            action.play_character(Phase::MnMove, username, *character, steps)
        }
        (Phase::CloudPick(action), CommandKind::PlayCharacter { character, steps }) => {
            action.play_character(Phase::CloudPick, username, *character, steps)
        }

        (phase, kind) => Err(GameError::unsupported(phase.name(), kind.name())),
    }
}
