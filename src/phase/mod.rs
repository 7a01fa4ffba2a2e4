//! The phase state machine.
//!
//! A match is always in exactly one [`Phase`]. Every legal command consumes
//! the current phase by reference and returns a brand new one; the previous
//! value is never touched, so a failed command leaves nothing to roll back
//! and two phases can always be compared.
//!
//! ```text
//! Lobby ─► Prepare ─► Planning ─► StudentMove ─► MnMove ─► CloudPick ─┐
//!                        ▲             ▲            │                 │
//!                        │             └────────────┴── next player ◄─┤
//!                        └───────────────────────── round done ◄──────┤
//!                                       Endgame ◄── win / last round ◄┘
//! ```
//!
//! ## Key Types
//!
//! - `Phase`: the tagged state
//! - `Table`: board state shared by every phase after the lobby
//! - `ActionPhase`: backs the three action stages
//! - `EndgamePhase`: terminal state with [`GameResult`] and [`EndReason`]

mod action;
mod endgame;
mod lobby;
mod planning;
mod prepare;
mod table;

pub use action::{ActionPhase, TurnEffects};
pub use endgame::{EndReason, EndgamePhase, GameResult};
pub use lobby::LobbyPhase;
pub use planning::PlanningPhase;
pub use prepare::PreparePhase;
pub use table::{Player, Resolution, Table};

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameError, PlayerId};

/// Phase discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    Lobby,
    Prepare,
    Planning,
    StudentMove,
    MnMove,
    CloudPick,
    Endgame,
}

impl PhaseName {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PhaseName::Lobby => "LOBBY",
            PhaseName::Prepare => "PREPARE",
            PhaseName::Planning => "PLANNING",
            PhaseName::StudentMove => "STUDENT_MOVE",
            PhaseName::MnMove => "MN_MOVE",
            PhaseName::CloudPick => "CLOUD_PICK",
            PhaseName::Endgame => "ENDGAME",
        }
    }
}

impl std::fmt::Display for PhaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete state of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Lobby(LobbyPhase),
    Prepare(PreparePhase),
    Planning(PlanningPhase),
    StudentMove(ActionPhase),
    MnMove(ActionPhase),
    CloudPick(ActionPhase),
    Endgame(EndgamePhase),
}

impl Phase {
    /// An empty lobby for `config`.
    #[must_use]
    pub fn lobby(config: GameConfig) -> Self {
        Phase::Lobby(LobbyPhase::new(config))
    }

    #[must_use]
    pub fn name(&self) -> PhaseName {
        match self {
            Phase::Lobby(_) => PhaseName::Lobby,
            Phase::Prepare(_) => PhaseName::Prepare,
            Phase::Planning(_) => PhaseName::Planning,
            Phase::StudentMove(_) => PhaseName::StudentMove,
            Phase::MnMove(_) => PhaseName::MnMove,
            Phase::CloudPick(_) => PhaseName::CloudPick,
            Phase::Endgame(_) => PhaseName::Endgame,
        }
    }

    /// The table, once the lobby is over.
    #[must_use]
    pub fn table(&self) -> Option<&Table> {
        match self {
            Phase::Lobby(_) => None,
            Phase::Prepare(p) => Some(p.table()),
            Phase::Planning(p) => Some(p.table()),
            Phase::StudentMove(a) | Phase::MnMove(a) | Phase::CloudPick(a) => Some(a.table()),
            Phase::Endgame(e) => Some(e.table()),
        }
    }

    /// The action phase backing an action stage.
    #[must_use]
    pub fn action(&self) -> Option<&ActionPhase> {
        match self {
            Phase::StudentMove(a) | Phase::MnMove(a) | Phase::CloudPick(a) => Some(a),
            _ => None,
        }
    }

    /// Seat expected to act next, if any.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match self {
            Phase::Lobby(_) | Phase::Endgame(_) => None,
            Phase::Prepare(p) => Some(p.current_player()),
            Phase::Planning(p) => Some(p.current_player()),
            Phase::StudentMove(a) | Phase::MnMove(a) | Phase::CloudPick(a) => Some(a.current_player()),
        }
    }

    /// Username of the seat expected to act next.
    #[must_use]
    pub fn current_username(&self) -> Option<&str> {
        let seat = self.current_player()?;
        self.table().map(|t| t.player(seat).username.as_str())
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::Endgame(_))
    }

    /// A player leaves. In the lobby this frees the seat; afterwards the
    /// match is abandoned.
    pub fn leave(&self, username: &str) -> Result<Phase, GameError> {
        match self {
            Phase::Lobby(lobby) => lobby.leave(username),
            Phase::Endgame(_) => Err(GameError::unsupported(PhaseName::Endgame, "LEAVE")),
            other => {
                let table = other
                    .table()
                    .ok_or_else(|| GameError::illegal("phase without a table"))?;
                let seat = table.require_seat(username)?;
                Ok(Phase::Endgame(EndgamePhase::new(
                    table.clone(),
                    EndReason::Abandoned(seat),
                )))
            }
        }
    }
}
