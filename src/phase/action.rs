//! The action phase: move students, move mother nature, pick a cloud.
//!
//! One [`ActionPhase`] value backs the three action stages; the [`Phase`]
//! variant wrapping it says which stage the current player is in.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::endgame::{EndReason, EndgamePhase};
use super::planning::PlanningPhase;
use super::table::{Resolution, Table};
use super::Phase;
use crate::board::IslandId;
use crate::characters::{CharacterKind, CharacterRegistry, Step};
use crate::containers::StudentContainer;
use crate::core::{Color, Destination, GameError, PlayerId, ResourceError};
use crate::influence::{InfluenceCalculator, TieBreak};

/// Rule changes that last until the end of the current player's turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEffects {
    /// Influence modifiers.
    pub calculator: InfluenceCalculator,
    /// Professor tie rule.
    pub professor_rule: TieBreak,
    /// Mother nature steps on top of the assistant's.
    pub extra_mn_moves: u8,
}

/// State of the action phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPhase {
    pub(crate) table: Table,
    order: Vec<PlayerId>,
    turn: usize,
    students_moved: u8,
    pub(crate) effects: TurnEffects,
    character_played: bool,
}

impl ActionPhase {
    /// First turn of the action phase, in `order`.
    #[must_use]
    pub fn begin(table: Table, order: Vec<PlayerId>) -> Self {
        Self {
            table,
            order,
            turn: 0,
            students_moved: 0,
            effects: TurnEffects::default(),
            character_played: false,
        }
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Action order of this round.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.order[self.turn]
    }

    /// Students moved so far this turn.
    #[must_use]
    pub fn students_moved(&self) -> u8 {
        self.students_moved
    }

    #[must_use]
    pub fn effects(&self) -> &TurnEffects {
        &self.effects
    }

    /// Whether a character was played this turn.
    #[must_use]
    pub fn character_played(&self) -> bool {
        self.character_played
    }

    /// Seat of `username` if it is their turn.
    fn actor(&self, username: &str) -> Result<PlayerId, GameError> {
        let seat = self.table.require_seat(username)?;
        if seat == self.current_player() {
            Ok(seat)
        } else {
            Err(GameError::invalid_player(username))
        }
    }

    /// Mother nature steps allowed this turn.
    pub fn max_mn_steps(&self) -> Result<u8, GameError> {
        let played = self
            .table
            .player(self.current_player())
            .played
            .ok_or_else(|| GameError::illegal("current player has no assistant in play"))?;
        Ok(played.mother_nature_moves() + self.effects.extra_mn_moves)
    }

    // === Stages ===

    /// Move one entrance student to the hall or an island.
    pub fn move_student(&self, username: &str, color: Color, destination: Destination) -> Result<Phase, GameError> {
        let seat = self.actor(username)?;
        let mut next = self.clone();

        match destination {
            Destination::Hall => {
                next.table.move_to_hall(seat, color, next.effects.professor_rule)?;
            }
            Destination::Island(island) => {
                next.table.islands.check(island)?;
                let student = next.table.player_mut(seat).entrance.remove_color(color)?;
                next.table.islands.add_student(island, student);
            }
        }
        next.students_moved += 1;
        debug!(%seat, %color, ?destination, moved = next.students_moved, "student moved");

        let entrance_empty = next.table.player(seat).entrance.is_empty();
        if next.students_moved >= next.table.rules.students_per_turn || entrance_empty {
            Ok(Phase::MnMove(next))
        } else {
            Ok(Phase::StudentMove(next))
        }
    }

    /// Move mother nature and resolve the group she lands on.
    pub fn move_mother_nature(&self, username: &str, steps: u8) -> Result<Phase, GameError> {
        self.actor(username)?;
        let max = self.max_mn_steps()?;
        if steps == 0 || steps > max {
            return Err(GameError::invalid(format!(
                "mother nature may move 1..={max} steps, not {steps}"
            )));
        }

        let mut next = self.clone();
        let landing = next.table.mother_nature.advance(steps, &next.table.islands)?;
        let resolution = next.table.resolve(landing, &next.effects.calculator);
        log_resolution(landing, &resolution);

        if let Some(reason) = next.table.game_over() {
            return Ok(Phase::Endgame(EndgamePhase::new(next.table, reason)));
        }
        if next.table.sack_exhausted {
            return Ok(next.next_turn());
        }
        Ok(Phase::CloudPick(next))
    }

    /// Take every student on `cloud` into the entrance and end the turn.
    pub fn pick_cloud(&self, username: &str, cloud: usize) -> Result<Phase, GameError> {
        let seat = self.actor(username)?;
        if cloud >= self.table.clouds.len() {
            return Err(GameError::invalid(format!("cloud {cloud} does not exist")));
        }
        if self.table.clouds[cloud].is_empty() {
            return Err(GameError::invalid(format!("cloud {cloud} is empty")));
        }

        let mut next = self.clone();
        let students = next.table.clouds[cloud].take_all();
        let entrance = &mut next.table.player_mut(seat).entrance;
        for student in students.students() {
            entrance.add(student)?;
        }
        debug!(%seat, cloud, "cloud picked");

        Ok(next.next_turn())
    }

    /// Activate a character card.
    ///
    /// `stage` rewraps the result in the stage the command arrived in.
    pub fn play_character(
        &self,
        stage: fn(ActionPhase) -> Phase,
        username: &str,
        kind: CharacterKind,
        steps: &[Step],
    ) -> Result<Phase, GameError> {
        let seat = self.actor(username)?;
        if !self.table.config.expert {
            return Err(GameError::invalid("characters are only available in expert mode"));
        }
        let slot = self
            .table
            .characters
            .iter()
            .position(|c| c.kind() == kind)
            .ok_or_else(|| GameError::invalid(format!("character {kind} is not in play")))?;
        if self.character_played {
            return Err(GameError::invalid("a character was already played this turn"));
        }

        let definition = CharacterRegistry::standard()
            .get(kind)
            .ok_or_else(|| GameError::illegal(format!("character {kind} has no definition")))?;
        definition.check_step_count(steps.len())?;

        let card = self.table.characters[slot].clone();
        let cost = card.cost();
        let (mut next, mut card) = (definition.effect)(self.clone(), card, steps)?;

        let coins = self.table.player(seat).coins;
        if coins < cost {
            return Err(ResourceError::Coins {
                needed: cost,
                available: coins,
            }
            .into());
        }

        let to_bank = card.charge();
        next.table.player_mut(seat).coins -= cost;
        next.table.bank += to_bank;
        next.table.characters[slot] = card;
        next.character_played = true;
        info!(%seat, character = %kind, cost, "character played");

        if let Some(reason) = next.table.game_over() {
            return Ok(Phase::Endgame(EndgamePhase::new(next.table, reason)));
        }
        Ok(stage(next))
    }

    // === Turn rotation ===

    /// Hand over to the next player, or close the round.
    fn next_turn(self) -> Phase {
        if self.turn + 1 < self.order.len() {
            let next = Self {
                turn: self.turn + 1,
                students_moved: 0,
                effects: TurnEffects::default(),
                character_played: false,
                ..self
            };
            debug!(player = %next.current_player(), "turn passed");
            return Phase::StudentMove(next);
        }

        if self.table.last_round {
            return Phase::Endgame(EndgamePhase::new(self.table, EndReason::LastRoundOver));
        }
        let first = self.order[0];
        Phase::Planning(PlanningPhase::begin(self.table, first))
    }
}

fn log_resolution(island: IslandId, resolution: &Resolution) {
    match resolution {
        Resolution::Conquered { player, conquest } => {
            info!(%island, %player, merges = conquest.merges, "island conquered");
        }
        other => debug!(%island, ?other, "island resolved"),
    }
}
