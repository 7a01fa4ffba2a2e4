//! Colors of the board: student/professor colors, tower colors, mages.
//!
//! Every student and professor carries one of the five [`Color`]s. Towers use
//! a separate palette ([`TowerColor`]) assigned by seat, and each player picks
//! a [`Mage`] (the back of their assistant deck) during preparation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Student and professor color.
///
/// Colors are ordered; `Color::index()` is the stable slot used by
/// per-color arrays such as [`crate::containers::StudentCounts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Yellow,
    Blue,
    Green,
    Red,
    Pink,
}

impl Color {
    /// All colors, in index order.
    pub const ALL: [Color; 5] = [
        Color::Yellow,
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Pink,
    ];

    /// Number of colors.
    pub const COUNT: usize = 5;

    /// Stable array slot for this color.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color for an array slot.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Upper-case wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Yellow => "YELLOW",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Red => "RED",
            Color::Pink => "PINK",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a color.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown color '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseColorError(trimmed.to_string()))
    }
}

/// Tower color, assigned by seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerColor {
    White,
    Black,
    Grey,
}

impl TowerColor {
    /// Tower colors in seat order.
    pub const SEATS: [TowerColor; 3] = [TowerColor::White, TowerColor::Black, TowerColor::Grey];

    /// Tower color of the player in seat `seat`.
    #[must_use]
    pub fn for_seat(seat: usize) -> Option<Self> {
        Self::SEATS.get(seat).copied()
    }
}

/// Assistant deck back chosen during preparation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mage {
    Druid,
    Witch,
    Sage,
    King,
}

impl Mage {
    /// All mages.
    pub const ALL: [Mage; 4] = [Mage::Druid, Mage::Witch, Mage::Sage, Mage::King];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_round_trip() {
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.index()), Some(color));
        }
        assert_eq!(Color::from_index(5), None);
    }

    #[test]
    fn test_color_parse_is_case_insensitive() {
        assert_eq!("red".parse::<Color>(), Ok(Color::Red));
        assert_eq!(" PINK ".parse::<Color>(), Ok(Color::Pink));
        assert_eq!(
            "purple".parse::<Color>(),
            Err(ParseColorError("purple".to_string()))
        );
    }

    #[test]
    fn test_tower_color_for_seat() {
        assert_eq!(TowerColor::for_seat(0), Some(TowerColor::White));
        assert_eq!(TowerColor::for_seat(2), Some(TowerColor::Grey));
        assert_eq!(TowerColor::for_seat(3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Color::Green), "GREEN");
    }
}
