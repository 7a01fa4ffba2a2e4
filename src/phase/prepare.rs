use serde::{Deserialize, Serialize};

use super::planning::PlanningPhase;
use super::table::Table;
use super::Phase;
use crate::core::{GameError, Mage, PlayerId};

/// Players pick their mage in seat order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparePhase {
    table: Table,
    turn: PlayerId,
}

impl PreparePhase {
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            table,
            turn: PlayerId::new(0),
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Seat expected to choose next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn
    }

    /// Choose a mage. The last choice starts the first planning round.
    pub fn choose_mage(&self, username: &str, mage: Mage) -> Result<Phase, GameError> {
        let seat = self.table.require_seat(username)?;
        if seat != self.turn {
            return Err(GameError::invalid_player(username));
        }
        if self.table.players.iter().any(|p| p.mage == Some(mage)) {
            return Err(GameError::invalid(format!("mage {mage:?} already chosen")));
        }

        let mut next = self.clone();
        next.table.player_mut(seat).mage = Some(mage);

        if seat.index() + 1 < next.table.player_count() {
            next.turn = seat.next(next.table.player_count());
            return Ok(Phase::Prepare(next));
        }
        Ok(Phase::Planning(PlanningPhase::begin(next.table, PlayerId::new(0))))
    }
}
