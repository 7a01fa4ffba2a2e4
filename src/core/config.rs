//! Match configuration and derived rule constants.
//!
//! `GameConfig` is what a lobby is created with: seat count, expert mode,
//! RNG seed, plus a couple of optional overrides. Everything that depends on
//! the seat count (entrance size, tower count, ...) is derived into a
//! [`RuleSet`] so the phase code never branches on `player_count` itself.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::characters::CharacterKind;

/// Number of islands on a fresh board.
pub const ISLAND_COUNT: usize = 12;

/// The match ends immediately when this few island groups remain.
pub const MIN_ISLAND_GROUPS: usize = 3;

/// Students of each color in a full sack (including the ten set on islands).
pub const STUDENTS_PER_COLOR: u8 = 26;

/// Students of each color drawn for the initial island setup.
pub const SETUP_STUDENTS_PER_COLOR: u8 = 2;

/// Maximum students of one color in a hall.
pub const HALL_CAPACITY: u8 = 10;

/// Coins in the bank at the start of an expert match (before hand-out).
pub const BANK_COINS: u8 = 20;

/// Active character cards in an expert match.
pub const ACTIVE_CHARACTERS: usize = 3;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported player count {0} (expected 2 or 3)")]
    UnsupportedPlayerCount(usize),

    #[error("expected exactly {expected} characters, got {got}")]
    CharacterCount { expected: usize, got: usize },

    #[error("character {0:?} listed twice")]
    DuplicateCharacter(CharacterKind),

    #[error("starting coins {0} exceed the bank")]
    StartingCoins(u8),

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Match configuration.
///
/// ## Example
///
/// ```
/// use archipelago::core::GameConfig;
///
/// let config = GameConfig::new(3).with_expert(true).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.rules().entrance_size, 9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (2 or 3).
    pub player_count: usize,

    /// Expert mode: character cards and coins.
    #[serde(default)]
    pub expert: bool,

    /// Seed for the board RNG.
    #[serde(default)]
    pub seed: u64,

    /// Forced character selection. `None` draws three at random.
    #[serde(default)]
    pub characters: Option<Vec<CharacterKind>>,

    /// Coins each player starts with in expert mode.
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u8,
}

fn default_starting_coins() -> u8 {
    1
}

impl GameConfig {
    /// Create a standard (non-expert) configuration.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            expert: false,
            seed: 0,
            characters: None,
            starting_coins: default_starting_coins(),
        }
    }

    /// Enable or disable expert mode.
    #[must_use]
    pub fn with_expert(mut self, expert: bool) -> Self {
        self.expert = expert;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Force the three active characters. Implies expert mode.
    #[must_use]
    pub fn with_characters(mut self, characters: Vec<CharacterKind>) -> Self {
        self.expert = true;
        self.characters = Some(characters);
        self
    }

    /// Set the coins each player starts with.
    #[must_use]
    pub fn with_starting_coins(mut self, coins: u8) -> Self {
        self.starting_coins = coins;
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=3).contains(&self.player_count) {
            return Err(ConfigError::UnsupportedPlayerCount(self.player_count));
        }

        if let Some(characters) = &self.characters {
            if characters.len() != ACTIVE_CHARACTERS {
                return Err(ConfigError::CharacterCount {
                    expected: ACTIVE_CHARACTERS,
                    got: characters.len(),
                });
            }
            for (i, kind) in characters.iter().enumerate() {
                if characters[..i].contains(kind) {
                    return Err(ConfigError::DuplicateCharacter(*kind));
                }
            }
        }

        if self.expert && usize::from(self.starting_coins) * self.player_count > usize::from(BANK_COINS) {
            return Err(ConfigError::StartingCoins(self.starting_coins));
        }

        Ok(())
    }

    /// Rule constants for this seat count.
    #[must_use]
    pub fn rules(&self) -> RuleSet {
        RuleSet::for_players(self.player_count)
    }
}

/// Rule constants derived from the seat count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Students in a full entrance.
    pub entrance_size: u8,
    /// Students moved out of the entrance each turn.
    pub students_per_turn: u8,
    /// Students placed on each cloud.
    pub cloud_size: u8,
    /// Towers each player starts with.
    pub towers: u8,
}

impl RuleSet {
    /// Constants for `player_count` seats. Three-seat values are used for
    /// anything other than two.
    #[must_use]
    pub const fn for_players(player_count: usize) -> Self {
        if player_count == 2 {
            Self {
                entrance_size: 7,
                students_per_turn: 3,
                cloud_size: 3,
                towers: 8,
            }
        } else {
            Self {
                entrance_size: 9,
                students_per_turn: 4,
                cloud_size: 4,
                towers: 6,
            }
        }
    }
}
