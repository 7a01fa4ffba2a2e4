use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, TowerColor};

/// A tower standing on an island.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tower {
    pub color: TowerColor,
    pub owner: PlayerId,
}

impl Tower {
    #[must_use]
    pub const fn new(color: TowerColor, owner: PlayerId) -> Self {
        Self { color, owner }
    }
}
