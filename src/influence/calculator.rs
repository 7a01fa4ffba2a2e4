//! Base influence and the modifier list.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::extractor::TieBreak;
use crate::board::{Archipelago, GroupView, IslandId};
use crate::core::{Color, PlayerId, PlayerMap};
use crate::pieces::ProfessorTable;

/// One player's influence on a group, kept broken down by source so that
/// modifiers can drop a single component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Points per student color (only colors whose professor the player owns).
    pub students: [u32; Color::COUNT],
    /// Points from towers on the group.
    pub towers: u32,
    /// Flat bonus points.
    pub bonus: u32,
}

impl PlayerScore {
    /// Sum of every component.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.students.iter().sum::<u32>() + self.towers + self.bonus
    }
}

/// Per-player influence on one group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    scores: PlayerMap<PlayerScore>,
}

impl ScoreSheet {
    /// Base influence of `group`: one point per student of a color whose
    /// professor a player owns, plus one per tower for the controller.
    #[must_use]
    pub fn base(group: &GroupView, professors: &ProfessorTable, player_count: usize) -> Self {
        let mut scores = PlayerMap::<PlayerScore>::with_default(player_count);

        for (color, n) in group.students.iter() {
            if let Some(owner) = professors.owner(color) {
                if owner.index() < player_count {
                    scores[owner].students[color.index()] = u32::from(n);
                }
            }
        }

        if let Some(controller) = group.controller {
            if controller.index() < player_count {
                scores[controller].towers = group.towers as u32;
            }
        }

        Self { scores }
    }

    /// Score of `player`.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> &PlayerScore {
        &self.scores[player]
    }

    /// Total influence of `player`.
    #[must_use]
    pub fn total(&self, player: PlayerId) -> u32 {
        self.scores[player].total()
    }

    /// Totals in seat order.
    pub fn totals(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        self.scores.iter().map(|(p, s)| (p, s.total()))
    }

    /// The player holding the single highest total under `tie_break`.
    #[must_use]
    pub fn leader(&self, tie_break: TieBreak) -> Option<PlayerId> {
        tie_break.winner(self.totals())
    }

    fn apply(&mut self, modifier: &Modifier) {
        match *modifier {
            Modifier::IgnoreTowers => {
                for (_, score) in self.scores.iter_mut() {
                    score.towers = 0;
                }
            }
            Modifier::ExcludeColor(color) => {
                for (_, score) in self.scores.iter_mut() {
                    score.students[color.index()] = 0;
                }
            }
            Modifier::ExtraPoints { player, points } => {
                if player.index() < self.scores.player_count() {
                    self.scores[player].bonus += u32::from(points);
                }
            }
        }
    }
}

/// A turn-scoped change to influence computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modifier {
    /// Towers give no points.
    IgnoreTowers,
    /// Students of this color give no points.
    ExcludeColor(Color),
    /// Flat bonus for one player.
    ExtraPoints { player: PlayerId, points: u8 },
}

/// Result of evaluating a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Influence {
    /// The group carries a block; nothing is computed.
    Blocked,
    /// Computed scores.
    Scores(ScoreSheet),
}

impl Influence {
    /// The scores, if the group was not blocked.
    #[must_use]
    pub fn scores(&self) -> Option<&ScoreSheet> {
        match self {
            Influence::Blocked => None,
            Influence::Scores(sheet) => Some(sheet),
        }
    }
}

/// Base calculator plus an ordered list of modifiers.
///
/// Modifiers are kept sorted and deduplicated, and each one touches a
/// separate component of [`PlayerScore`], so the order cards were played in
/// never changes the outcome.
///
/// ## Example
///
/// ```
/// use archipelago::board::{Archipelago, IslandId};
/// use archipelago::core::{Color, PlayerId};
/// use archipelago::influence::{InfluenceCalculator, Modifier};
/// use archipelago::pieces::{ProfessorTable, Student};
///
/// let mut islands = Archipelago::new();
/// islands.add_student(IslandId(4), Student::new(Color::Red));
///
/// let mut professors = ProfessorTable::new();
/// professors.assign(Color::Red, PlayerId::new(0));
///
/// let knight = InfluenceCalculator::new().with(Modifier::ExtraPoints {
///     player: PlayerId::new(1),
///     points: 2,
/// });
///
/// let influence = knight.evaluate(&islands, IslandId(4), &professors, 2);
/// let sheet = influence.scores().unwrap();
/// assert_eq!(sheet.total(PlayerId::new(0)), 1);
/// assert_eq!(sheet.total(PlayerId::new(1)), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluenceCalculator {
    modifiers: SmallVec<[Modifier; 3]>,
}

impl InfluenceCalculator {
    /// The base calculator with no modifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a modifier. Adding one that is already present does nothing.
    #[must_use]
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.push(modifier);
        self
    }

    /// In-place form of [`with`](Self::with).
    pub fn push(&mut self, modifier: Modifier) {
        if let Err(pos) = self.modifiers.binary_search(&modifier) {
            self.modifiers.insert(pos, modifier);
        }
    }

    /// Active modifiers in application order.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Scores for an already aggregated group.
    #[must_use]
    pub fn score(&self, group: &GroupView, professors: &ProfessorTable, player_count: usize) -> ScoreSheet {
        let mut sheet = ScoreSheet::base(group, professors, player_count);
        for modifier in &self.modifiers {
            sheet.apply(modifier);
        }
        sheet
    }

    /// Evaluate the group containing `island`.
    ///
    /// A blocked group yields [`Influence::Blocked`]; removing the block is
    /// left to the caller.
    #[must_use]
    pub fn evaluate(
        &self,
        islands: &Archipelago,
        island: IslandId,
        professors: &ProfessorTable,
        player_count: usize,
    ) -> Influence {
        let group = islands.group(island);
        if group.blocks > 0 {
            trace!(island = %group.root, "influence blocked");
            return Influence::Blocked;
        }

        let sheet = self.score(&group, professors, player_count);
        trace!(island = %group.root, scores = ?sheet.totals().collect::<Vec<_>>(), "influence computed");
        Influence::Scores(sheet)
    }
}
