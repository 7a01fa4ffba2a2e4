//! Turning a score map into a single controller.
//!
//! Used for island control and for professors. The tie rule can be swapped
//! for the rest of a turn by a character card.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Rule deciding a winner among equal maxima.
///
/// ```
/// use archipelago::core::PlayerId;
/// use archipelago::influence::TieBreak;
///
/// let (a, b) = (PlayerId::new(0), PlayerId::new(1));
/// let tied = [(a, 3), (b, 3)];
///
/// assert_eq!(TieBreak::Exclusive.winner(tied), None);
/// assert_eq!(TieBreak::Inclusive(b).winner(tied), Some(b));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// A tie at the top means no winner.
    #[default]
    Exclusive,
    /// A tie at the top that includes this player goes to them.
    Inclusive(PlayerId),
}

impl TieBreak {
    /// Pick the single winner of `values`.
    ///
    /// A maximum of zero never wins anything.
    pub fn winner<I>(self, values: I) -> Option<PlayerId>
    where
        I: IntoIterator<Item = (PlayerId, u32)>,
    {
        let mut best = 0;
        let mut leaders: SmallVec<[PlayerId; 3]> = SmallVec::new();

        for (player, value) in values {
            if value > best {
                best = value;
                leaders.clear();
                leaders.push(player);
            } else if value == best && value > 0 {
                leaders.push(player);
            }
        }

        match (leaders.as_slice(), self) {
            ([only], _) => Some(*only),
            ([], _) => None,
            (tied, TieBreak::Inclusive(privileged)) if tied.contains(&privileged) => Some(privileged),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);
    const C: PlayerId = PlayerId::new(2);

    #[test]
    fn test_single_maximum_wins() {
        assert_eq!(TieBreak::Exclusive.winner([(A, 1), (B, 4), (C, 2)]), Some(B));
    }

    #[test]
    fn test_all_zero_has_no_winner() {
        assert_eq!(TieBreak::Exclusive.winner([(A, 0), (B, 0)]), None);
        assert_eq!(TieBreak::Inclusive(A).winner([(A, 0), (B, 0)]), None);
    }

    #[test]
    fn test_inclusive_only_helps_when_tied_at_top() {
        let values = [(A, 2), (B, 3), (C, 3)];
        assert_eq!(TieBreak::Inclusive(A).winner(values), None);
        assert_eq!(TieBreak::Inclusive(C).winner(values), Some(C));
        assert_eq!(TieBreak::Inclusive(A).winner([(A, 1), (B, 3)]), Some(B));
    }
}
