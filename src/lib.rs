//! # archipelago
//!
//! Rules core of an island-conquest board game server for 2 or 3 players.
//!
//! ## Design Principles
//!
//! 1. **Phases are values**: every legal command turns the current
//!    [`Phase`] into a new one. Nothing is mutated in place, so a rejected
//!    command needs no rollback and two phases can always be diffed.
//!
//! 2. **Stable island identities**: the twelve islands live in a fixed arena
//!    and merge through a shallow union-find. Any member id keeps addressing
//!    its group, and mother nature never loses her island.
//!
//! 3. **Turn-scoped rules as data**: character cards push influence
//!    modifiers or a professor tie rule into the current turn; a fresh turn
//!    starts without them.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) phase cloning via `im-rs`.
//!
//! - **Deterministic RNG**: the seeded ChaCha8 stream lives inside the
//!   phase, so a restored snapshot draws the same students.
//!
//! - **Actor per match**: [`game::GameHandle`] owns a game on its own thread
//!   and serializes commands through a channel.
//!
//! ## Modules
//!
//! - `core`: colors, seats, RNG, configuration, commands, errors
//! - `pieces`: students, professors, towers, blocks, assistants
//! - `containers`: sack, hall, entrance, cloud, card stock
//! - `board`: islands, union-find merging, mother nature
//! - `influence`: score sheets, modifiers, tie-break rules
//! - `characters`: the twelve character cards
//! - `phase`: the phase state machine
//! - `diff`: phase deltas for the network layer
//! - `game`: match shell, executor, actor, snapshots

pub mod core;
pub mod pieces;
pub mod containers;
pub mod board;
pub mod influence;
pub mod characters;
pub mod phase;
pub mod diff;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Color, Command, CommandKind, Destination, GameConfig, GameError, GameId, GameRng, Mage,
    PlayerId, PlayerMap, RuleSet, TowerColor,
};

pub use crate::pieces::{Assistant, BlockCard, Professor, Student, Tower};

pub use crate::containers::{ContainerError, StudentContainer, StudentCounts};

pub use crate::board::{Archipelago, IslandId, MotherNature};

pub use crate::influence::{InfluenceCalculator, Modifier, TieBreak};

pub use crate::characters::{Character, CharacterKind, CharacterRegistry, Step};

pub use crate::phase::{ActionPhase, EndReason, GameResult, Phase, PhaseName, Table};

pub use crate::diff::PhaseDiff;

pub use crate::game::{Game, GameHandle, Snapshot, SnapshotError};
