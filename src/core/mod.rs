//! Core types: colors, seats, RNG, configuration, commands, errors.
//!
//! These are the leaves every other module builds on. None of them know
//! about phases or the board layout.

pub mod color;
pub mod player;
pub mod rng;
pub mod config;
pub mod command;
pub mod error;

pub use color::{Color, Mage, ParseColorError, TowerColor};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, GameConfig, RuleSet};
pub use command::{Command, CommandKind, Destination, GameId, Steps};
pub use error::{GameError, ResourceError};
