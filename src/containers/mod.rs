//! Bounded student containers.
//!
//! Containers are **counting** containers: they remember how many students
//! of each color they hold, nothing else. Every container implements
//! [`StudentContainer`], which provides add / remove-by-color /
//! remove-random and fails explicitly instead of silently clamping.
//!
//! ## Key Types
//!
//! - `StudentCounts`: per-color tally, the storage behind every container
//! - `Sack`: unbounded bag students are drawn from
//! - `Hall`: at most 10 students per color
//! - `Entrance`: bounded total (7 or 9)
//! - `Cloud`: bounded total (3 or 4), emptied in one go
//! - `CardStock`: students parked on a character card

mod counts;
mod pool;

pub use counts::StudentCounts;
pub use pool::{
    transfer, Capacity, CardStock, Cloud, ContainerError, Entrance, Hall, Sack, StudentContainer,
};
