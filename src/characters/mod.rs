//! Character cards (expert mode).
//!
//! Cards are plain data ([`Character`]) keyed by [`CharacterKind`]; their
//! behavior lives in a lookup table of pure effect functions
//! ([`CharacterRegistry`]). Playing a card validates, in order:
//!
//! 1. the phase accepts characters and the actor is the current player
//! 2. the parameter count is within the card's bounds
//! 3. each parameter parses to its expected type ([`StepError`])
//! 4. the parsed values are legal on the board
//!
//! and only then applies the effect to a copy of the action phase.

mod card;
mod effects;
mod kind;
mod registry;
mod step;

pub use card::Character;
pub use kind::CharacterKind;
pub use registry::{CharacterDefinition, CharacterRegistry, EffectFn};
pub use step::{Step, StepError};
