//! The ring of islands and the merge algorithm.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::island::{Island, IslandId};
use super::ring::GroupRing;
use crate::containers::StudentCounts;
use crate::core::config::ISLAND_COUNT;
use crate::core::{GameError, PlayerId, TowerColor};
use crate::pieces::{BlockCard, Student, Tower};

/// Aggregate view of an island group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupView {
    /// Root slot of the group.
    pub root: IslandId,
    /// Member slots in ring order (root included).
    pub members: SmallVec<[IslandId; ISLAND_COUNT]>,
    /// Students on the whole group.
    pub students: StudentCounts,
    /// Members with a tower placed.
    pub towers: usize,
    /// Owner of the towers, if any.
    pub controller: Option<PlayerId>,
    /// Blocks waiting on the group.
    pub blocks: usize,
}

impl GroupView {
    /// Number of slots in the group.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Outcome of a conquest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conquest {
    /// Towers placed by the conqueror.
    pub placed: u8,
    /// Towers handed back, per previous owner.
    pub displaced: SmallVec<[(PlayerId, u8); 2]>,
    /// Merges performed by the scrub that followed.
    pub merges: usize,
}

impl Conquest {
    /// Whether anything changed on the board.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.placed > 0 || !self.displaced.is_empty()
    }
}

/// The twelve-slot island ring.
///
/// ## Usage
///
/// ```
/// use archipelago::board::{Archipelago, IslandId};
/// use archipelago::core::{PlayerId, TowerColor};
///
/// let mut islands = Archipelago::new();
/// let alice = PlayerId::new(0);
///
/// islands.conquer(IslandId(1), alice, TowerColor::White, 8);
/// islands.conquer(IslandId(0), alice, TowerColor::White, 7);
///
/// // Adjacent islands with the same controller were merged.
/// assert_eq!(islands.root(IslandId(1)), islands.root(IslandId(0)));
/// assert_eq!(islands.num_towers(IslandId(0)), Some(2));
/// assert_eq!(islands.group_count(), 11);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archipelago {
    islands: Vector<Island>,
}

impl Default for Archipelago {
    fn default() -> Self {
        Self::new()
    }
}

impl Archipelago {
    /// A fresh ring of twelve unmerged islands.
    #[must_use]
    pub fn new() -> Self {
        Self {
            islands: (0..ISLAND_COUNT as u8).map(|i| Island::new(IslandId(i))).collect(),
        }
    }

    /// Number of slots (always twelve).
    #[must_use]
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Validate a client-supplied island index.
    pub fn parse_id(&self, index: usize) -> Result<IslandId, GameError> {
        if index < self.len() {
            Ok(IslandId(index as u8))
        } else {
            Err(GameError::invalid(format!(
                "island {index} out of range (0..{})",
                self.len()
            )))
        }
    }

    /// Check an island id is in range.
    pub fn check(&self, id: IslandId) -> Result<IslandId, GameError> {
        self.parse_id(id.index())
    }

    /// Slot by id.
    #[must_use]
    pub fn island(&self, id: IslandId) -> &Island {
        &self.islands[id.index()]
    }

    /// Iterate over all slots in ring order.
    pub fn iter(&self) -> impl Iterator<Item = &Island> {
        self.islands.iter()
    }

    // === Union-find ===

    /// Root of the group containing `id`.
    #[must_use]
    pub fn root(&self, id: IslandId) -> IslandId {
        self.island(id).parent().unwrap_or(id)
    }

    /// Whether two slots belong to the same group.
    #[must_use]
    pub fn are_related(&self, a: IslandId, b: IslandId) -> bool {
        self.root(a) == self.root(b)
    }

    /// Members of the group containing `id`, in ring order.
    pub fn members(&self, id: IslandId) -> impl Iterator<Item = IslandId> + '_ {
        let root = self.root(id);
        self.islands
            .iter()
            .map(Island::id)
            .filter(move |&i| self.root(i) == root)
    }

    /// Group roots in ring order of first appearance.
    #[must_use]
    pub fn groups(&self) -> Vec<IslandId> {
        let mut roots: Vec<IslandId> = Vec::new();
        for island in &self.islands {
            let root = self.root(island.id());
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    /// Number of groups left on the board.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.islands.iter().filter(|i| i.is_root()).count()
    }

    /// Cyclic walk over group roots starting after the group of `start`.
    #[must_use]
    pub fn ring_from(&self, start: IslandId) -> GroupRing<'_> {
        GroupRing::new(self, start)
    }

    // === Aggregates ===

    /// Aggregate of the group containing `id`.
    #[must_use]
    pub fn group(&self, id: IslandId) -> GroupView {
        let root = self.root(id);
        let members: SmallVec<[IslandId; ISLAND_COUNT]> = self.members(root).collect();
        let towers = members
            .iter()
            .filter(|m| self.island(**m).tower().is_some())
            .count();
        let root_island = self.island(root);

        GroupView {
            root,
            controller: self.controller(root),
            students: *root_island.students(),
            blocks: root_island.blocks().len(),
            towers,
            members,
        }
    }

    /// Owner of the towers on the group, if any member has one.
    #[must_use]
    pub fn controller(&self, id: IslandId) -> Option<PlayerId> {
        self.members(id)
            .find_map(|m| self.island(m).tower())
            .map(|t| t.owner)
    }

    /// Members carrying a tower. Only meaningful for a controlled group.
    ///
    /// Transiently this may be lower than the group size (the conqueror ran
    /// out of towers); callers re-check win conditions instead of assuming
    /// full coverage.
    #[must_use]
    pub fn num_towers(&self, id: IslandId) -> Option<usize> {
        self.controller(id)?;
        Some(
            self.members(id)
                .filter(|m| self.island(*m).tower().is_some())
                .count(),
        )
    }

    // === Mutation ===

    /// Put a student on the group containing `id`.
    pub fn add_student(&mut self, id: IslandId, student: Student) {
        let root = self.root(id);
        self.islands[root.index()].students.add(student.color);
    }

    /// Put a block on the group containing `id`.
    pub fn place_block(&mut self, id: IslandId, block: BlockCard) {
        let root = self.root(id);
        self.islands[root.index()].blocks.push(block);
    }

    /// Remove one block from the group containing `id`.
    pub fn take_block(&mut self, id: IslandId) -> Option<BlockCard> {
        let root = self.root(id);
        self.islands[root.index()].blocks.pop()
    }

    /// Union of the groups of `a` and `b`.
    ///
    /// No-op (returns false) when they already share a group. Otherwise the
    /// lower root absorbs the other root's children, students and blocks.
    pub fn merge(&mut self, a: IslandId, b: IslandId) -> bool {
        let (ra, rb) = (self.root(a), self.root(b));
        if ra == rb {
            return false;
        }
        let (keep, absorbed) = if ra < rb { (ra, rb) } else { (rb, ra) };

        let children: Vec<IslandId> = self.members(absorbed).collect();
        for child in children {
            self.islands[child.index()].set_parent(keep);
        }

        let mut moved_students = std::mem::take(&mut self.islands[absorbed.index()].students);
        let moved_blocks = std::mem::take(&mut self.islands[absorbed.index()].blocks);
        let target = &mut self.islands[keep.index()];
        target.students.absorb(&mut moved_students);
        target.blocks.extend(moved_blocks);

        debug!(%keep, %absorbed, "merged island groups");
        true
    }

    /// Merge every pair of adjacent groups sharing a controller.
    ///
    /// Idempotent: on an already scrubbed ring it changes nothing. Returns
    /// the number of merges performed.
    pub fn scrub(&mut self) -> usize {
        let len = self.len();
        let mut merges = 0;

        loop {
            let mut changed = false;
            for i in 0..len {
                if self.group_count() <= 1 {
                    return merges;
                }
                let a = IslandId(i as u8);
                let b = IslandId(((i + 1) % len) as u8);
                if self.are_related(a, b) {
                    continue;
                }
                let owner = self.controller(a);
                if owner.is_some() && owner == self.controller(b) && self.merge(a, b) {
                    merges += 1;
                    changed = true;
                }
            }
            if !changed {
                return merges;
            }
        }
    }

    /// Hand the group containing `id` to `owner`.
    ///
    /// No-op when `owner` already controls it. Otherwise every member's tower
    /// is replaced (the old ones are reported in [`Conquest::displaced`]),
    /// placing at most `budget` new towers, and the ring is scrubbed.
    pub fn conquer(
        &mut self,
        id: IslandId,
        owner: PlayerId,
        color: TowerColor,
        budget: u8,
    ) -> Conquest {
        if self.controller(id) == Some(owner) {
            return Conquest::default();
        }

        let mut outcome = Conquest::default();
        let members: Vec<IslandId> = self.members(id).collect();
        for member in members {
            let slot = &mut self.islands[member.index()];
            if let Some(old) = slot.tower.take() {
                match outcome.displaced.iter_mut().find(|(p, _)| *p == old.owner) {
                    Some((_, n)) => *n += 1,
                    None => outcome.displaced.push((old.owner, 1)),
                }
            }
            if outcome.placed < budget {
                slot.tower = Some(Tower::new(color, owner));
                outcome.placed += 1;
            }
        }

        info!(island = %self.root(id), %owner, placed = outcome.placed, "island group conquered");
        outcome.merges = self.scrub();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn id(i: u8) -> IslandId {
        IslandId(i)
    }

    #[test]
    fn test_new_ring() {
        let islands = Archipelago::new();
        assert_eq!(islands.len(), 12);
        assert_eq!(islands.group_count(), 12);
        assert!(islands.iter().all(Island::is_root));
    }

    #[test]
    fn test_parse_id() {
        let islands = Archipelago::new();
        assert_eq!(islands.parse_id(11), Ok(id(11)));
        assert!(matches!(islands.parse_id(12), Err(GameError::InvalidParameter(_))));
    }

    #[test]
    fn test_merge_absorbs_students_and_blocks() {
        let mut islands = Archipelago::new();
        islands.add_student(id(3), Student::new(Color::Red));
        islands.add_student(id(4), Student::new(Color::Blue));
        islands.place_block(id(4), BlockCard::new(crate::characters::CharacterKind::Grandma));

        assert!(islands.merge(id(4), id(3)));

        let group = islands.group(id(4));
        assert_eq!(group.root, id(3));
        assert_eq!(group.students.total(), 2);
        assert_eq!(group.blocks, 1);
        assert!(islands.island(id(4)).students().is_empty());
        assert_eq!(islands.island(id(4)).parent(), Some(id(3)));
    }

    #[test]
    fn test_merge_related_is_noop() {
        let mut islands = Archipelago::new();
        assert!(islands.merge(id(0), id(1)));
        assert!(!islands.merge(id(1), id(0)));
        assert!(!islands.merge(id(0), id(0)));
        assert_eq!(islands.group_count(), 11);
    }

    #[test]
    fn test_merge_keeps_paths_shallow() {
        let mut islands = Archipelago::new();
        islands.merge(id(5), id(6));
        islands.merge(id(6), id(7));
        islands.merge(id(4), id(7));

        for i in 4..=7 {
            assert_eq!(islands.root(id(i)), id(4));
            let parent = islands.island(id(i)).parent();
            assert!(parent.is_none() || parent == Some(id(4)));
        }
    }

    #[test]
    fn test_conquer_then_scrub_merges_neighbours() {
        let mut islands = Archipelago::new();

        let first = islands.conquer(id(1), A, TowerColor::White, 8);
        assert_eq!(first.placed, 1);
        assert_eq!(first.merges, 0);

        let second = islands.conquer(id(0), A, TowerColor::White, 7);
        assert_eq!(second.merges, 1);
        assert!(islands.are_related(id(0), id(1)));
        assert_eq!(islands.controller(id(1)), Some(A));
        assert_eq!(islands.num_towers(id(0)), Some(2));
    }

    #[test]
    fn test_conquer_own_group_is_noop() {
        let mut islands = Archipelago::new();
        islands.conquer(id(2), A, TowerColor::White, 8);

        let again = islands.conquer(id(2), A, TowerColor::White, 7);

        assert!(!again.changed());
        assert_eq!(islands.num_towers(id(2)), Some(1));
    }

    #[test]
    fn test_conquer_displaces_every_member_tower() {
        let mut islands = Archipelago::new();
        islands.conquer(id(5), A, TowerColor::White, 8);
        islands.conquer(id(6), A, TowerColor::White, 7);
        assert!(islands.are_related(id(5), id(6)));

        let outcome = islands.conquer(id(6), B, TowerColor::Black, 8);

        assert_eq!(outcome.placed, 2);
        assert_eq!(outcome.displaced.as_slice(), &[(A, 2)]);
        assert_eq!(islands.controller(id(5)), Some(B));
    }

    #[test]
    fn test_conquer_with_short_budget_leaves_gap() {
        let mut islands = Archipelago::new();
        islands.conquer(id(8), A, TowerColor::White, 8);
        islands.conquer(id(9), A, TowerColor::White, 7);

        let outcome = islands.conquer(id(8), B, TowerColor::Black, 1);

        assert_eq!(outcome.placed, 1);
        assert_eq!(islands.controller(id(9)), Some(B));
        assert_eq!(islands.num_towers(id(9)), Some(1));
        assert_eq!(islands.group(id(9)).size(), 2);
    }

    #[test]
    fn test_num_towers_without_controller() {
        let islands = Archipelago::new();
        assert_eq!(islands.num_towers(id(0)), None);
    }

    #[test]
    fn test_scrub_is_idempotent() {
        let mut islands = Archipelago::new();
        islands.conquer(id(10), A, TowerColor::White, 8);
        islands.conquer(id(11), A, TowerColor::White, 7);
        islands.conquer(id(0), A, TowerColor::White, 6);

        let snapshot = islands.clone();
        assert_eq!(islands.scrub(), 0);
        assert_eq!(islands, snapshot);
    }

    #[test]
    fn test_scrub_merges_across_wrap() {
        let mut islands = Archipelago::new();
        islands.conquer(id(11), A, TowerColor::White, 8);
        islands.conquer(id(0), A, TowerColor::White, 7);

        assert!(islands.are_related(id(11), id(0)));
        assert_eq!(islands.group_count(), 11);
    }

    #[test]
    fn test_groups_in_ring_order() {
        let mut islands = Archipelago::new();
        islands.merge(id(1), id(2));
        let groups = islands.groups();
        assert_eq!(groups.len(), 11);
        assert_eq!(&groups[..3], &[id(0), id(1), id(3)]);
    }
}
