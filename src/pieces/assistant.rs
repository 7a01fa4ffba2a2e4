use serde::{Deserialize, Serialize};

/// Highest assistant value.
pub const MAX_ASSISTANT: u8 = 10;

/// An assistant card played during planning.
///
/// The value sets the turn order (lowest first); the card also caps how far
/// mother nature may travel that turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assistant {
    value: u8,
}

impl Assistant {
    /// Create an assistant. Returns `None` outside `1..=10`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (1..=MAX_ASSISTANT).contains(&value).then_some(Self { value })
    }

    /// Turn-order value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Maximum mother-nature steps granted by this card.
    #[must_use]
    pub const fn mother_nature_moves(self) -> u8 {
        self.value.div_ceil(2)
    }
}

/// Assistants still in a player's hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantDeck {
    cards: Vec<Assistant>,
}

impl Default for AssistantDeck {
    fn default() -> Self {
        Self::full()
    }
}

impl AssistantDeck {
    /// All ten assistants.
    #[must_use]
    pub fn full() -> Self {
        Self {
            cards: (1..=MAX_ASSISTANT).map(|value| Assistant { value }).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, card: Assistant) -> bool {
        self.cards.contains(&card)
    }

    /// Remove `card` from the hand. Returns false if it was not there.
    pub fn take(&mut self, card: Assistant) -> bool {
        match self.cards.iter().position(|&c| c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Assistant> + '_ {
        self.cards.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_range() {
        assert!(Assistant::new(0).is_none());
        assert!(Assistant::new(11).is_none());
        assert_eq!(Assistant::new(10).map(Assistant::value), Some(10));
    }

    #[test]
    fn test_mother_nature_moves_round_up() {
        let moves: Vec<_> = (1..=10)
            .filter_map(Assistant::new)
            .map(Assistant::mother_nature_moves)
            .collect();
        assert_eq!(moves, vec![1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn test_deck_take() {
        let mut deck = AssistantDeck::full();
        let four = Assistant::new(4).unwrap();

        assert_eq!(deck.len(), 10);
        assert!(deck.take(four));
        assert!(!deck.take(four));
        assert!(!deck.contains(four));
        assert_eq!(deck.len(), 9);
    }
}
