//! Board topology: islands, island groups, and mother nature.
//!
//! Islands live in a fixed arena of twelve slots addressed by [`IslandId`].
//! Merging never moves or deletes a slot; it records a parent link (a
//! shallow union-find, every path has length at most one) so any member id
//! keeps addressing its whole group.
//!
//! ## Key Types
//!
//! - `Island`: one slot (parent link, students, tower, blocks)
//! - `Archipelago`: the ring of slots plus merge / scrub / conquer
//! - `GroupRing`: cyclic iterator over group roots, skipping merged siblings
//! - `GroupView`: aggregate of a group (students, towers, controller)
//! - `MotherNature`: position token bound to an island identity

mod archipelago;
mod island;
mod mother_nature;
mod ring;

pub use archipelago::{Archipelago, Conquest, GroupView};
pub use island::{Island, IslandId};
pub use mother_nature::MotherNature;
pub use ring::GroupRing;
