//! Command representation: who does what to which match.
//!
//! Commands arrive already decoded from the transport. Each carries the
//! match id, the acting username, and a kind-specific payload. The core never
//! trusts a payload: every argument is re-validated by the phase that
//! receives it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::{Color, Mage};
use crate::board::IslandId;
use crate::characters::{CharacterKind, Step};

/// Identifier of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Where a student leaving the entrance goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// The mover's own hall.
    Hall,
    /// An island (any member of a group addresses the group).
    Island(IslandId),
}

/// Ordered character parameters. Most cards take 0-2 steps.
pub type Steps = SmallVec<[Step; 4]>;

/// Kind-specific command payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    Join,
    Leave,
    ChooseMage { mage: Mage },
    PlayAssistant { value: u8 },
    MoveStudent { color: Color, destination: Destination },
    MoveMotherNature { steps: u8 },
    PickCloud { cloud: usize },
    PlayCharacter { character: CharacterKind, steps: Steps },
}

impl CommandKind {
    /// Operation name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            CommandKind::Join => "JOIN",
            CommandKind::Leave => "LEAVE",
            CommandKind::ChooseMage { .. } => "CHOOSE_MAGE",
            CommandKind::PlayAssistant { .. } => "PLAY_ASSISTANT",
            CommandKind::MoveStudent { .. } => "MOVE_STUDENT",
            CommandKind::MoveMotherNature { .. } => "MOVE_MN",
            CommandKind::PickCloud { .. } => "PICK_CLOUD",
            CommandKind::PlayCharacter { .. } => "PLAY_CHARACTER",
        }
    }
}

/// A complete command.
///
/// ## Example
///
/// ```
/// use archipelago::core::{Command, CommandKind, GameId};
///
/// let join = Command::new(GameId(1), "alice", CommandKind::Join);
/// assert_eq!(join.kind.name(), "JOIN");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Target match.
    pub game_id: GameId,
    /// Acting username.
    pub username: String,
    /// Payload.
    pub kind: CommandKind,
}

impl Command {
    /// Create a command.
    #[must_use]
    pub fn new(game_id: GameId, username: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            game_id,
            username: username.into(),
            kind,
        }
    }

    /// Create a PLAY_CHARACTER command from string steps.
    #[must_use]
    pub fn play_character(
        game_id: GameId,
        username: impl Into<String>,
        character: CharacterKind,
        steps: &[&str],
    ) -> Self {
        Self::new(
            game_id,
            username,
            CommandKind::PlayCharacter {
                character,
                steps: steps.iter().map(|s| Step::new(*s)).collect(),
            },
        )
    }
}
