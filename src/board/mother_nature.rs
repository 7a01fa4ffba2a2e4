//! The mother nature token.

use serde::{Deserialize, Serialize};

use super::archipelago::Archipelago;
use super::island::IslandId;
use crate::core::GameError;

/// Mother nature's position.
///
/// Stored as an island identity rather than a group index: after any merge
/// the stored slot still resolves to its (possibly new) group through
/// [`Archipelago::root`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotherNature {
    island: IslandId,
}

impl MotherNature {
    #[must_use]
    pub const fn new(island: IslandId) -> Self {
        Self { island }
    }

    /// The slot mother nature was placed on.
    #[must_use]
    pub const fn island(self) -> IslandId {
        self.island
    }

    /// Root of the group mother nature is on.
    #[must_use]
    pub fn group(self, islands: &Archipelago) -> IslandId {
        islands.root(self.island)
    }

    /// Advance by `steps` distinct groups and return the landing group root.
    pub fn advance(&mut self, steps: u8, islands: &Archipelago) -> Result<IslandId, GameError> {
        if steps == 0 {
            return Err(GameError::invalid("mother nature must move at least one step"));
        }
        let landing = islands
            .ring_from(self.island)
            .nth(usize::from(steps) - 1)
            .ok_or_else(|| GameError::illegal("island ring is empty"))?;
        self.island = landing;
        Ok(landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_counts_groups() {
        let mut islands = Archipelago::new();
        islands.merge(IslandId(1), IslandId(2));
        islands.merge(IslandId(2), IslandId(3));

        let mut mn = MotherNature::new(IslandId(0));
        assert_eq!(mn.advance(2, &islands), Ok(IslandId(4)));
        assert_eq!(mn.island(), IslandId(4));
    }

    #[test]
    fn test_advance_wraps() {
        let islands = Archipelago::new();
        let mut mn = MotherNature::new(IslandId(11));
        assert_eq!(mn.advance(1, &islands), Ok(IslandId(0)));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let islands = Archipelago::new();
        let mut mn = MotherNature::new(IslandId(3));
        assert!(matches!(mn.advance(0, &islands), Err(GameError::InvalidParameter(_))));
        assert_eq!(mn.island(), IslandId(3));
    }

    #[test]
    fn test_position_survives_merge() {
        let mut islands = Archipelago::new();
        let mn = MotherNature::new(IslandId(7));

        islands.merge(IslandId(6), IslandId(7));

        assert_eq!(mn.island(), IslandId(7));
        assert_eq!(mn.group(&islands), IslandId(6));
    }
}
