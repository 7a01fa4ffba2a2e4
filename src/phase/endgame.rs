use serde::{Deserialize, Serialize};
use tracing::info;

use super::table::Table;
use crate::core::PlayerId;

/// Why the match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// This player placed their last tower.
    NoTowersLeft(PlayerId),
    /// Three or fewer island groups remain.
    FewIslandGroups,
    /// The last round (sack or assistants exhausted) was completed.
    LastRoundOver,
    /// This player left the match.
    Abandoned(PlayerId),
}

/// Final outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Shared victory.
    Winners(Vec<PlayerId>),
    NoWinner,
}

impl GameResult {
    /// Whether `player` is among the winners.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::NoWinner => false,
        }
    }
}

/// Terminal phase. Accepts no command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndgamePhase {
    table: Table,
    reason: EndReason,
    result: GameResult,
}

impl EndgamePhase {
    /// Close the match on `table`. An abandoned match has no winner.
    #[must_use]
    pub fn new(table: Table, reason: EndReason) -> Self {
        let result = match reason {
            EndReason::Abandoned(_) => GameResult::NoWinner,
            _ => table.standings(),
        };
        info!(?reason, ?result, "match over");
        Self {
            table,
            reason,
            result,
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn reason(&self) -> EndReason {
        self.reason
    }

    #[must_use]
    pub fn result(&self) -> &GameResult {
        &self.result
    }
}
