//! Effect functions of the twelve characters.
//!
//! Each function receives owned copies of the action phase and the card and
//! returns both updated. Parameters are parsed first, then checked against
//! the board, then applied.

use super::card::Character;
use super::kind::CharacterKind;
use super::step::{self, Step, StepError};
use crate::containers::StudentContainer;
use crate::core::{GameError, ResourceError};
use crate::influence::{Modifier, TieBreak};
use crate::phase::{ActionPhase, Table};
use crate::pieces::BlockCard;

type EffectResult = Result<(ActionPhase, Character), GameError>;

/// Students a thief takes from each hall.
const THIEF_LIMIT: u8 = 3;

/// Influence bonus granted by the knight.
const KNIGHT_BONUS: u8 = 2;

/// Extra mother nature steps granted by the mailman.
const MAILMAN_STEPS: u8 = 2;

fn stock_missing(kind: CharacterKind) -> GameError {
    GameError::illegal(format!("{kind} has no student stock"))
}

/// Top the card's stock back up from the sack, if the sack allows.
fn refill(table: &mut Table, card: &mut Character) {
    if let Some(stock) = card.students_mut() {
        let room = stock.capacity_left();
        table.sack.draw_into(stock, room, &mut table.rng);
    }
}

/// Card student of a color onto an island.
pub(super) fn monk(mut phase: ActionPhase, mut card: Character, steps: &[Step]) -> EffectResult {
    let color = step::color(steps, 0)?;
    let island = step::island(steps, 1, &phase.table.islands)?;

    let kind = card.kind();
    let stock = card.students_mut().ok_or_else(|| stock_missing(kind))?;
    let student = stock
        .remove_color(color)
        .map_err(|_| step::at(0, StepError::Unavailable(color)))?;
    phase.table.islands.add_student(island, student);
    refill(&mut phase.table, &mut card);

    Ok((phase, card))
}

/// Professor ties go to the actor for the rest of the turn.
pub(super) fn farmer(mut phase: ActionPhase, card: Character, _steps: &[Step]) -> EffectResult {
    let rule = TieBreak::Inclusive(phase.current_player());
    phase.effects.professor_rule = rule;
    phase.table.refresh_professors(rule);
    Ok((phase, card))
}

/// Resolve an island as if mother nature had stopped there.
pub(super) fn herald(mut phase: ActionPhase, card: Character, steps: &[Step]) -> EffectResult {
    let island = step::island(steps, 0, &phase.table.islands)?;
    phase.table.resolve(island, &phase.effects.calculator);
    Ok((phase, card))
}

pub(super) fn mailman(mut phase: ActionPhase, card: Character, _steps: &[Step]) -> EffectResult {
    phase.effects.extra_mn_moves += MAILMAN_STEPS;
    Ok((phase, card))
}

/// Put one of the card's blocks on an island group.
pub(super) fn grandma(mut phase: ActionPhase, mut card: Character, steps: &[Step]) -> EffectResult {
    let island = step::island(steps, 0, &phase.table.islands)?;
    if !card.take_block() {
        return Err(ResourceError::Blocks.into());
    }
    phase.table.islands.place_block(island, BlockCard::new(card.kind()));
    Ok((phase, card))
}

pub(super) fn centaur(mut phase: ActionPhase, card: Character, _steps: &[Step]) -> EffectResult {
    phase.effects.calculator.push(Modifier::IgnoreTowers);
    Ok((phase, card))
}

/// Swap up to three card students with entrance students.
///
/// Parameters come in pairs: card color, entrance color.
pub(super) fn jester(mut phase: ActionPhase, mut card: Character, steps: &[Step]) -> EffectResult {
    let pairs = step::color_pairs(steps)?;
    let actor = phase.current_player();
    let kind = card.kind();
    let stock = card.students_mut().ok_or_else(|| stock_missing(kind))?;
    let entrance = &mut phase.table.player_mut(actor).entrance;

    for (i, (from_card, from_entrance)) in pairs.into_iter().enumerate() {
        let card_student = stock
            .remove_color(from_card)
            .map_err(|_| step::at(2 * i, StepError::Unavailable(from_card)))?;
        let entrance_student = entrance
            .remove_color(from_entrance)
            .map_err(|_| step::at(2 * i + 1, StepError::Unavailable(from_entrance)))?;
        stock.add(entrance_student)?;
        entrance.add(card_student)?;
    }

    Ok((phase, card))
}

pub(super) fn knight(mut phase: ActionPhase, card: Character, _steps: &[Step]) -> EffectResult {
    let player = phase.current_player();
    phase.effects.calculator.push(Modifier::ExtraPoints {
        player,
        points: KNIGHT_BONUS,
    });
    Ok((phase, card))
}

pub(super) fn mushroom(mut phase: ActionPhase, card: Character, steps: &[Step]) -> EffectResult {
    let color = step::color(steps, 0)?;
    phase.effects.calculator.push(Modifier::ExcludeColor(color));
    Ok((phase, card))
}

/// Swap up to two entrance students with hall students.
///
/// Parameters come in pairs: entrance color, hall color.
pub(super) fn minstrel(mut phase: ActionPhase, card: Character, steps: &[Step]) -> EffectResult {
    let pairs = step::color_pairs(steps)?;
    let actor = phase.current_player();
    let rule = phase.effects.professor_rule;

    for (i, (from_entrance, from_hall)) in pairs.into_iter().enumerate() {
        let player = phase.table.player_mut(actor);
        let entrance_student = player
            .entrance
            .remove_color(from_entrance)
            .map_err(|_| step::at(2 * i, StepError::Unavailable(from_entrance)))?;
        let hall_student = player
            .hall
            .remove_color(from_hall)
            .map_err(|_| step::at(2 * i + 1, StepError::Unavailable(from_hall)))?;
        player.entrance.add(hall_student)?;
        phase.table.add_to_hall(actor, entrance_student, rule)?;
        phase.table.refresh_professor(from_hall, rule);
    }

    Ok((phase, card))
}

/// Card student of a color into the actor's hall.
pub(super) fn princess(mut phase: ActionPhase, mut card: Character, steps: &[Step]) -> EffectResult {
    let color = step::color(steps, 0)?;
    let actor = phase.current_player();

    let kind = card.kind();
    let stock = card.students_mut().ok_or_else(|| stock_missing(kind))?;
    let student = stock
        .remove_color(color)
        .map_err(|_| step::at(0, StepError::Unavailable(color)))?;
    phase.table.add_to_hall(actor, student, phase.effects.professor_rule)?;
    refill(&mut phase.table, &mut card);

    Ok((phase, card))
}

/// Every player returns up to three hall students of a color to the sack.
pub(super) fn thief(mut phase: ActionPhase, card: Character, steps: &[Step]) -> EffectResult {
    let color = step::color(steps, 0)?;
    let table = &mut phase.table;

    for player in table.players.iter_mut() {
        let taken = player.hall.count(color).min(THIEF_LIMIT);
        for _ in 0..taken {
            let student = player.hall.remove_color(color)?;
            table.sack.add(student)?;
        }
    }
    table.refresh_professor(color, phase.effects.professor_rule);

    Ok((phase, card))
}
