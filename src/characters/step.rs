//! Typed parsing of character parameters.

use serde::{Deserialize, Serialize};

use crate::board::{Archipelago, IslandId};
use crate::core::{Color, GameError, ParseColorError};

/// Why a single parameter was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Color(#[from] ParseColorError),

    #[error("'{0}' is not an island index")]
    NotAnIsland(String),

    #[error("island {index} out of range (0..{len})")]
    IslandOutOfRange { index: usize, len: usize },

    #[error("no {0} student available")]
    Unavailable(Color),
}

/// One raw parameter of a PLAY_CHARACTER command.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step(String);

impl Step {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Tag a step failure with its position.
pub(crate) fn at(index: usize, source: StepError) -> GameError {
    GameError::InvalidCharacterParameter { index, source }
}

/// Parse `steps[index]` as a color.
pub(crate) fn color(steps: &[Step], index: usize) -> Result<Color, GameError> {
    let step = steps
        .get(index)
        .ok_or_else(|| GameError::invalid(format!("missing parameter #{index}")))?;
    step.0
        .parse::<Color>()
        .map_err(|err| at(index, StepError::from(err)))
}

/// Parse `steps[index]` as an island index valid on `islands`.
pub(crate) fn island(steps: &[Step], index: usize, islands: &Archipelago) -> Result<IslandId, GameError> {
    let step = steps
        .get(index)
        .ok_or_else(|| GameError::invalid(format!("missing parameter #{index}")))?;
    let raw: usize = step
        .0
        .trim()
        .parse()
        .map_err(|_| at(index, StepError::NotAnIsland(step.0.clone())))?;
    if raw >= islands.len() {
        return Err(at(
            index,
            StepError::IslandOutOfRange {
                index: raw,
                len: islands.len(),
            },
        ));
    }
    Ok(IslandId(raw as u8))
}

/// Parse every step as a color, pairing them up in order.
pub(crate) fn color_pairs(steps: &[Step]) -> Result<Vec<(Color, Color)>, GameError> {
    if steps.len() % 2 != 0 {
        return Err(GameError::invalid("parameters must come in pairs"));
    }
    (0..steps.len())
        .step_by(2)
        .map(|i| Ok((color(steps, i)?, color(steps, i + 1)?)))
        .collect()
}
