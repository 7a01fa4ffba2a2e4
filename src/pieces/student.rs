use serde::{Deserialize, Serialize};

use crate::core::Color;

/// A single student disc.
///
/// Students are plain values; containers only track how many of each color
/// they hold, so moving a student is always "remove from one, add to other".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    pub color: Color,
}

impl Student {
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl From<Color> for Student {
    fn from(color: Color) -> Self {
        Self { color }
    }
}
