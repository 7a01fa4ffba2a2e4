//! Lookup table from character kind to its definition.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::card::Character;
use super::effects;
use super::kind::CharacterKind;
use super::step::Step;
use crate::core::GameError;
use crate::phase::ActionPhase;

/// Effect of a character: takes the action phase and the card, returns the
/// new phase and the updated card. Runs on owned copies, so a failure
/// leaves the caller's phase untouched.
pub type EffectFn = fn(ActionPhase, Character, &[Step]) -> Result<(ActionPhase, Character), GameError>;

/// Static description of a character.
#[derive(Clone)]
pub struct CharacterDefinition {
    pub kind: CharacterKind,
    pub name: &'static str,
    pub min_steps: usize,
    pub max_steps: usize,
    pub effect: EffectFn,
}

impl std::fmt::Debug for CharacterDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterDefinition")
            .field("kind", &self.kind)
            .field("min_steps", &self.min_steps)
            .field("max_steps", &self.max_steps)
            .finish_non_exhaustive()
    }
}

impl CharacterDefinition {
    /// A definition taking no parameters.
    #[must_use]
    pub fn new(kind: CharacterKind, effect: EffectFn) -> Self {
        Self {
            kind,
            name: kind.name(),
            min_steps: 0,
            max_steps: 0,
            effect,
        }
    }

    /// Set the accepted parameter count range.
    #[must_use]
    pub fn with_steps(mut self, min: usize, max: usize) -> Self {
        self.min_steps = min;
        self.max_steps = max;
        self
    }

    /// Reject a parameter count outside the declared range.
    pub fn check_step_count(&self, count: usize) -> Result<(), GameError> {
        if (self.min_steps..=self.max_steps).contains(&count) {
            Ok(())
        } else {
            Err(GameError::invalid(format!(
                "{} takes {}..={} parameters, got {count}",
                self.name, self.min_steps, self.max_steps
            )))
        }
    }
}

/// Registry of character definitions.
///
/// ## Example
///
/// ```
/// use archipelago::characters::{CharacterKind, CharacterRegistry};
///
/// let registry = CharacterRegistry::standard();
/// let jester = registry.get(CharacterKind::Jester).unwrap();
/// assert_eq!((jester.min_steps, jester.max_steps), (2, 6));
/// assert_eq!(registry.len(), 12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CharacterRegistry {
    definitions: FxHashMap<CharacterKind, CharacterDefinition>,
}

impl CharacterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The twelve standard characters, built once.
    #[must_use]
    pub fn standard() -> &'static CharacterRegistry {
        static STANDARD: OnceLock<CharacterRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            use CharacterKind::*;

            let mut registry = CharacterRegistry::new();
            registry.register(CharacterDefinition::new(Monk, effects::monk).with_steps(2, 2));
            registry.register(CharacterDefinition::new(Farmer, effects::farmer));
            registry.register(CharacterDefinition::new(Herald, effects::herald).with_steps(1, 1));
            registry.register(CharacterDefinition::new(Mailman, effects::mailman));
            registry.register(CharacterDefinition::new(Grandma, effects::grandma).with_steps(1, 1));
            registry.register(CharacterDefinition::new(Centaur, effects::centaur));
            registry.register(CharacterDefinition::new(Jester, effects::jester).with_steps(2, 6));
            registry.register(CharacterDefinition::new(Knight, effects::knight));
            registry.register(CharacterDefinition::new(Mushroom, effects::mushroom).with_steps(1, 1));
            registry.register(CharacterDefinition::new(Minstrel, effects::minstrel).with_steps(2, 4));
            registry.register(CharacterDefinition::new(Princess, effects::princess).with_steps(1, 1));
            registry.register(CharacterDefinition::new(Thief, effects::thief).with_steps(1, 1));
            registry
        })
    }

    /// Register a definition, replacing any previous one for the same kind.
    pub fn register(&mut self, definition: CharacterDefinition) {
        self.definitions.insert(definition.kind, definition);
    }

    #[must_use]
    pub fn get(&self, kind: CharacterKind) -> Option<&CharacterDefinition> {
        self.definitions.get(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterDefinition> {
        self.definitions.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_every_kind() {
        let registry = CharacterRegistry::standard();
        for kind in CharacterKind::ALL {
            let definition = registry.get(kind).unwrap();
            assert_eq!(definition.kind, kind);
            assert_eq!(definition.name, kind.name());
        }
    }

    #[test]
    fn test_step_count_bounds() {
        let registry = CharacterRegistry::standard();
        let monk = registry.get(CharacterKind::Monk).unwrap();
        assert!(monk.check_step_count(2).is_ok());
        assert!(matches!(monk.check_step_count(1), Err(GameError::InvalidParameter(_))));

        let knight = registry.get(CharacterKind::Knight).unwrap();
        assert!(knight.check_step_count(0).is_ok());
        assert!(knight.check_step_count(1).is_err());
    }
}
