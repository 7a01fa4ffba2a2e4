use serde::{Deserialize, Serialize};

use super::kind::CharacterKind;
use crate::containers::{CardStock, Sack, StudentContainer};
use crate::core::GameRng;

/// A character card in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    kind: CharacterKind,
    cost: u8,
    used: bool,
    students: Option<CardStock>,
    blocks: u8,
}

impl Character {
    /// A fresh, unused card with empty inventories.
    #[must_use]
    pub fn new(kind: CharacterKind) -> Self {
        Self {
            kind,
            cost: kind.base_cost(),
            used: false,
            students: kind.stock_size().map(CardStock::new),
            blocks: kind.block_count(),
        }
    }

    /// A fresh card whose student stock is filled from `sack`.
    #[must_use]
    pub fn setup(kind: CharacterKind, sack: &mut Sack, rng: &mut GameRng) -> Self {
        let mut card = Self::new(kind);
        if let Some(stock) = card.students.as_mut() {
            let room = stock.capacity_left();
            sack.draw_into(stock, room, rng);
        }
        card
    }

    #[must_use]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    /// Current activation cost.
    #[must_use]
    pub fn cost(&self) -> u8 {
        self.cost
    }

    /// Whether the card was activated at least once this match.
    #[must_use]
    pub fn used(&self) -> bool {
        self.used
    }

    #[must_use]
    pub fn students(&self) -> Option<&CardStock> {
        self.students.as_ref()
    }

    pub(crate) fn students_mut(&mut self) -> Option<&mut CardStock> {
        self.students.as_mut()
    }

    /// Block cards still on the card.
    #[must_use]
    pub fn blocks(&self) -> u8 {
        self.blocks
    }

    pub(crate) fn take_block(&mut self) -> bool {
        if self.blocks == 0 {
            return false;
        }
        self.blocks -= 1;
        true
    }

    pub(crate) fn return_block(&mut self) {
        self.blocks += 1;
    }

    /// Record an activation. Returns the coins that go to the bank: the
    /// first activation keeps one coin on the card as its cost marker.
    pub(crate) fn charge(&mut self) -> u8 {
        if self.used {
            self.cost
        } else {
            let to_bank = self.cost.saturating_sub(1);
            self.used = true;
            self.cost += 1;
            to_bank
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_inventories() {
        let monk = Character::new(CharacterKind::Monk);
        assert_eq!(monk.cost(), 1);
        assert!(monk.students().is_some_and(StudentContainer::is_empty));

        let grandma = Character::new(CharacterKind::Grandma);
        assert_eq!(grandma.blocks(), 4);
        assert!(grandma.students().is_none());
    }

    #[test]
    fn test_setup_fills_stock() {
        let mut sack = Sack::after_setup();
        let mut rng = GameRng::new(4);

        let jester = Character::setup(CharacterKind::Jester, &mut sack, &mut rng);

        assert_eq!(jester.students().map(StudentContainer::len), Some(6));
        assert_eq!(sack.len(), 120 - 6);
    }

    #[test]
    fn test_charge_raises_cost_once() {
        let mut knight = Character::new(CharacterKind::Knight);
        assert_eq!(knight.cost(), 2);

        assert_eq!(knight.charge(), 1);
        assert!(knight.used());
        assert_eq!(knight.cost(), 3);

        assert_eq!(knight.charge(), 3);
        assert_eq!(knight.cost(), 3);
    }

    #[test]
    fn test_blocks_are_returnable() {
        let mut grandma = Character::new(CharacterKind::Grandma);
        for _ in 0..4 {
            assert!(grandma.take_block());
        }
        assert!(!grandma.take_block());

        grandma.return_block();
        assert_eq!(grandma.blocks(), 1);
    }
}
