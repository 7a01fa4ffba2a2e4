use serde::{Deserialize, Serialize};

/// The twelve character cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CharacterKind {
    Monk,
    Farmer,
    Herald,
    Mailman,
    Grandma,
    Centaur,
    Jester,
    Knight,
    Mushroom,
    Minstrel,
    Princess,
    Thief,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 12] = [
        CharacterKind::Monk,
        CharacterKind::Farmer,
        CharacterKind::Herald,
        CharacterKind::Mailman,
        CharacterKind::Grandma,
        CharacterKind::Centaur,
        CharacterKind::Jester,
        CharacterKind::Knight,
        CharacterKind::Mushroom,
        CharacterKind::Minstrel,
        CharacterKind::Princess,
        CharacterKind::Thief,
    ];

    /// Wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CharacterKind::Monk => "MONK",
            CharacterKind::Farmer => "FARMER",
            CharacterKind::Herald => "HERALD",
            CharacterKind::Mailman => "MAILMAN",
            CharacterKind::Grandma => "GRANDMA",
            CharacterKind::Centaur => "CENTAUR",
            CharacterKind::Jester => "JESTER",
            CharacterKind::Knight => "KNIGHT",
            CharacterKind::Mushroom => "MUSHROOM",
            CharacterKind::Minstrel => "MINSTREL",
            CharacterKind::Princess => "PRINCESS",
            CharacterKind::Thief => "THIEF",
        }
    }

    /// Activation cost before the first use.
    #[must_use]
    pub const fn base_cost(self) -> u8 {
        match self {
            CharacterKind::Monk
            | CharacterKind::Mailman
            | CharacterKind::Jester
            | CharacterKind::Minstrel => 1,
            CharacterKind::Farmer
            | CharacterKind::Grandma
            | CharacterKind::Knight
            | CharacterKind::Princess => 2,
            CharacterKind::Herald
            | CharacterKind::Centaur
            | CharacterKind::Mushroom
            | CharacterKind::Thief => 3,
        }
    }

    /// Students kept on the card, for cards that hold any.
    #[must_use]
    pub const fn stock_size(self) -> Option<u8> {
        match self {
            CharacterKind::Monk | CharacterKind::Princess => Some(4),
            CharacterKind::Jester => Some(6),
            _ => None,
        }
    }

    /// Block cards owned by the card.
    #[must_use]
    pub const fn block_count(self) -> u8 {
        match self {
            CharacterKind::Grandma => 4,
            _ => 0,
        }
    }
}

impl std::fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CharacterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown character '{wanted}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("knight".parse::<CharacterKind>(), Ok(CharacterKind::Knight));
        assert_eq!(" THIEF ".parse::<CharacterKind>(), Ok(CharacterKind::Thief));
        assert!("wizard".parse::<CharacterKind>().is_err());
    }

    #[test]
    fn test_inventories() {
        assert_eq!(CharacterKind::Jester.stock_size(), Some(6));
        assert_eq!(CharacterKind::Knight.stock_size(), None);
        assert_eq!(CharacterKind::Grandma.block_count(), 4);
        assert_eq!(CharacterKind::Monk.block_count(), 0);
    }
}
