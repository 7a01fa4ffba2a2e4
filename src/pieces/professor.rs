use serde::{Deserialize, Serialize};

use crate::core::{Color, PlayerId};

/// A professor and the player currently dominating its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Professor {
    pub color: Color,
    pub owner: Option<PlayerId>,
}

/// The five professors, indexed by color.
///
/// A professor has at most one owner; ownership only changes through
/// [`ProfessorTable::assign`], which the board calls at its checkpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfessorTable {
    owners: [Option<PlayerId>; Color::COUNT],
}

impl ProfessorTable {
    /// All professors unowned.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner of `color`.
    #[must_use]
    pub fn owner(&self, color: Color) -> Option<PlayerId> {
        self.owners[color.index()]
    }

    /// Hand `color` to `owner`.
    pub fn assign(&mut self, color: Color, owner: PlayerId) {
        self.owners[color.index()] = Some(owner);
    }

    /// Number of professors held by `player`.
    #[must_use]
    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.owners.iter().filter(|o| **o == Some(player)).count()
    }

    /// Iterate over the professors in color order.
    pub fn iter(&self) -> impl Iterator<Item = Professor> + '_ {
        Color::ALL.iter().map(|&color| Professor {
            color,
            owner: self.owner(color),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_count() {
        let mut table = ProfessorTable::new();
        assert_eq!(table.owner(Color::Red), None);

        table.assign(Color::Red, PlayerId::new(1));
        table.assign(Color::Blue, PlayerId::new(1));
        table.assign(Color::Blue, PlayerId::new(0));

        assert_eq!(table.owner(Color::Red), Some(PlayerId::new(1)));
        assert_eq!(table.count_owned(PlayerId::new(1)), 1);
        assert_eq!(table.count_owned(PlayerId::new(0)), 1);
        assert_eq!(table.iter().count(), 5);
    }
}
