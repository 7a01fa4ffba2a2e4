use serde::{Deserialize, Serialize};
use tracing::info;

use super::prepare::PreparePhase;
use super::table::Table;
use super::Phase;
use crate::core::{GameConfig, GameError};

/// Waiting for seats to fill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyPhase {
    config: GameConfig,
    players: Vec<String>,
}

impl LobbyPhase {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            players: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Usernames in join (seat) order.
    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Seats still free.
    #[must_use]
    pub fn open_seats(&self) -> usize {
        self.config.player_count.saturating_sub(self.players.len())
    }

    /// Take the next seat. The last seat starts the match.
    pub fn join(&self, username: &str) -> Result<Phase, GameError> {
        if username.trim().is_empty() {
            return Err(GameError::invalid("username must not be empty"));
        }
        if self.players.iter().any(|p| p == username) {
            return Err(GameError::invalid(format!("username '{username}' already taken")));
        }

        let mut next = self.clone();
        next.players.push(username.to_string());

        if next.open_seats() > 0 {
            return Ok(Phase::Lobby(next));
        }

        info!(players = ?next.players, "lobby full");
        let table = Table::setup(&next.config, &next.players)?;
        Ok(Phase::Prepare(PreparePhase::new(table)))
    }

    /// Free the seat of `username`.
    pub fn leave(&self, username: &str) -> Result<Phase, GameError> {
        let mut next = self.clone();
        let seat = next
            .players
            .iter()
            .position(|p| p == username)
            .ok_or_else(|| GameError::invalid_player(username))?;
        next.players.remove(seat);
        Ok(Phase::Lobby(next))
    }
}
