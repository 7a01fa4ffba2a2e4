use serde::{Deserialize, Serialize};

use crate::characters::CharacterKind;

/// A no-entry tile.
///
/// Each block remembers the card it came from so that it can be returned
/// there once mother nature consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockCard {
    pub origin: CharacterKind,
}

impl BlockCard {
    #[must_use]
    pub const fn new(origin: CharacterKind) -> Self {
        Self { origin }
    }
}
