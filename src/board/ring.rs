//! Cyclic walk over island groups.

use super::archipelago::Archipelago;
use super::island::IslandId;

/// Endless iterator over group roots in ring order.
///
/// Starting from any slot, each call to `next` walks forward past the rest
/// of the current group and yields the root of the group it enters. Merged
/// siblings are never separate stops. With a single group left the walk
/// keeps yielding that group.
///
/// ```
/// use archipelago::board::{Archipelago, IslandId};
///
/// let mut islands = Archipelago::new();
/// islands.merge(IslandId(1), IslandId(2));
///
/// let stops: Vec<_> = islands.ring_from(IslandId(0)).take(3).collect();
/// assert_eq!(stops, vec![IslandId(1), IslandId(3), IslandId(4)]);
/// ```
#[derive(Clone, Debug)]
pub struct GroupRing<'a> {
    islands: &'a Archipelago,
    position: IslandId,
}

impl<'a> GroupRing<'a> {
    pub(super) fn new(islands: &'a Archipelago, start: IslandId) -> Self {
        Self {
            islands,
            position: start,
        }
    }
}

impl Iterator for GroupRing<'_> {
    type Item = IslandId;

    fn next(&mut self) -> Option<IslandId> {
        let len = self.islands.len();
        let current = self.islands.root(self.position);

        let mut slot = self.position.index();
        for _ in 0..len {
            slot = (slot + 1) % len;
            let candidate = IslandId(slot as u8);
            if self.islands.root(candidate) != current {
                self.position = candidate;
                return Some(self.islands.root(candidate));
            }
        }

        Some(current)
    }
}
