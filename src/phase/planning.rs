use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::ActionPhase;
use super::table::Table;
use super::Phase;
use crate::core::{GameError, PlayerId};
use crate::pieces::Assistant;

/// Every player plays one assistant, clockwise from the round's first player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningPhase {
    table: Table,
    order: Vec<PlayerId>,
    turn: usize,
}

impl PlanningPhase {
    /// Start a new round led by `first`: refill the clouds and clear last
    /// round's assistants.
    #[must_use]
    pub fn begin(mut table: Table, first: PlayerId) -> Self {
        table.round += 1;
        table.clear_assistants();
        table.fill_clouds();

        let count = table.player_count();
        let order = std::iter::successors(Some(first), |p| Some(p.next(count)))
            .take(count)
            .collect();
        debug!(round = table.round, %first, "planning round started");

        Self {
            table,
            order,
            turn: 0,
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Planning order of this round.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.order[self.turn]
    }

    /// Play the assistant worth `value`.
    ///
    /// A card another player already used this round is refused unless every
    /// card left in the actor's hand was already used. The last player's card
    /// fixes the action order: ascending value, ties by planning position.
    pub fn play_assistant(&self, username: &str, value: u8) -> Result<Phase, GameError> {
        let seat = self.table.require_seat(username)?;
        if seat != self.current_player() {
            return Err(GameError::invalid_player(username));
        }

        let card = Assistant::new(value)
            .ok_or_else(|| GameError::invalid(format!("no assistant with value {value}")))?;
        let player = self.table.player(seat);
        if !player.deck.contains(card) {
            return Err(GameError::invalid(format!("assistant {value} is not in hand")));
        }

        let used: Vec<Assistant> = self
            .order
            .iter()
            .filter_map(|&p| self.table.player(p).played)
            .collect();
        if used.contains(&card) && !player.deck.iter().all(|c| used.contains(&c)) {
            return Err(GameError::invalid(format!(
                "assistant {value} was already played this round"
            )));
        }

        let mut next = self.clone();
        let player = next.table.player_mut(seat);
        player.deck.take(card);
        player.played = Some(card);
        if player.deck.is_empty() {
            next.table.last_round = true;
        }

        if next.turn + 1 < next.order.len() {
            next.turn += 1;
            return Ok(Phase::Planning(next));
        }

        let mut ranked: Vec<(u8, usize, PlayerId)> = next
            .order
            .iter()
            .enumerate()
            .map(|(pos, &p)| (next.table.player(p).played.map_or(0, Assistant::value), pos, p))
            .collect();
        ranked.sort_unstable();
        let action_order = ranked.into_iter().map(|(_, _, p)| p).collect();

        Ok(Phase::StudentMove(ActionPhase::begin(next.table, action_order)))
    }
}
