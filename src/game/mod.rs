//! The match shell: one owner of the current phase.
//!
//! [`Game`] runs a command through the pure [`executor`], swaps in the new
//! phase on success and hands back the [`PhaseDiff`]. On failure the phase is
//! left exactly as it was.

pub mod executor;

mod actor;
mod snapshot;

pub use actor::GameHandle;
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};

use tracing::{debug, error, info, warn};

use crate::core::{Command, ConfigError, GameConfig, GameError, GameId};
use crate::diff::PhaseDiff;
use crate::phase::Phase;

/// A single match.
///
/// ## Example
///
/// ```
/// use archipelago::core::{Command, CommandKind, GameConfig, GameId};
/// use archipelago::game::Game;
/// use archipelago::phase::PhaseName;
///
/// let mut game = Game::new(GameId(1), GameConfig::new(2)).unwrap();
/// game.execute(&Command::new(GameId(1), "alice", CommandKind::Join)).unwrap();
/// let diff = game
///     .execute(&Command::new(GameId(1), "bob", CommandKind::Join))
///     .unwrap();
///
/// assert_eq!(game.phase().name(), PhaseName::Prepare);
/// assert_eq!(diff.islands.len(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    phase: Phase,
}

impl Game {
    /// Open a lobby for `config`.
    pub fn new(id: GameId, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(%id, players = config.player_count, expert = config.expert, "game created");
        Ok(Self {
            id,
            phase: Phase::lobby(config),
        })
    }

    /// Continue a match from a snapshot.
    #[must_use]
    pub fn resume(snapshot: Snapshot) -> Self {
        info!(id = %snapshot.game_id, phase = %snapshot.phase.name(), "game resumed");
        Self {
            id: snapshot.game_id,
            phase: snapshot.phase,
        }
    }

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.id, self.phase.clone())
    }

    /// Full state for a client joining late.
    #[must_use]
    pub fn initial_diff(&self) -> PhaseDiff {
        PhaseDiff::initial(&self.phase)
    }

    /// Run one command to completion.
    pub fn execute(&mut self, command: &Command) -> Result<PhaseDiff, GameError> {
        let operation = command.kind.name();
        if command.game_id != self.id {
            let err = GameError::invalid(format!("command for {} sent to {}", command.game_id, self.id));
            warn!(id = %self.id, operation, %err, "command rejected");
            return Err(err);
        }

        match executor::execute(&self.phase, &command.username, &command.kind) {
            Ok(next) => {
                let diff = PhaseDiff::compare(&self.phase, &next);
                debug!(
                    id = %self.id,
                    user = %command.username,
                    operation,
                    from = %self.phase.name(),
                    to = %next.name(),
                    "command applied"
                );
                self.phase = next;
                Ok(diff)
            }
            Err(err) if err.is_recoverable() => {
                warn!(id = %self.id, user = %command.username, operation, %err, "command rejected");
                Err(err)
            }
            Err(err) => {
                error!(id = %self.id, user = %command.username, operation, %err, "illegal state");
                Err(err)
            }
        }
    }
}
