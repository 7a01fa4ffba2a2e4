//! A single island slot.

use serde::{Deserialize, Serialize};

use crate::containers::StudentCounts;
use crate::pieces::{BlockCard, Tower};

/// Stable identity of an island slot (0..12).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IslandId(pub u8);

impl IslandId {
    /// Get the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for IslandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Island({})", self.0)
    }
}

/// One island slot.
///
/// A root island carries the students and blocks of its whole group; a
/// merged child only keeps its parent link and its own tower.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Island {
    id: IslandId,
    parent: Option<IslandId>,
    pub(super) students: StudentCounts,
    pub(super) tower: Option<Tower>,
    pub(super) blocks: Vec<BlockCard>,
}

impl Island {
    pub(super) fn new(id: IslandId) -> Self {
        Self {
            id,
            parent: None,
            students: StudentCounts::new(),
            tower: None,
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> IslandId {
        self.id
    }

    /// Parent link, `None` for a root.
    #[must_use]
    pub fn parent(&self) -> Option<IslandId> {
        self.parent
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Students held directly by this slot.
    #[must_use]
    pub fn students(&self) -> &StudentCounts {
        &self.students
    }

    #[must_use]
    pub fn tower(&self) -> Option<Tower> {
        self.tower
    }

    /// Blocks held directly by this slot.
    #[must_use]
    pub fn blocks(&self) -> &[BlockCard] {
        &self.blocks
    }

    pub(super) fn set_parent(&mut self, parent: IslandId) {
        self.parent = Some(parent);
    }
}
