//! Per-color student tally.

use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::pieces::Student;

/// How many students of each color a container holds.
///
/// ```
/// use archipelago::containers::StudentCounts;
/// use archipelago::core::Color;
///
/// let mut counts = StudentCounts::new();
/// counts.add(Color::Red);
/// counts.add(Color::Red);
/// assert_eq!(counts.get(Color::Red), 2);
/// assert_eq!(counts.total(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentCounts([u8; Color::COUNT]);

impl StudentCounts {
    /// No students.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; Color::COUNT])
    }

    /// `n` students of every color.
    #[must_use]
    pub const fn uniform(n: u8) -> Self {
        Self([n; Color::COUNT])
    }

    /// Build from a list of colors.
    #[must_use]
    pub fn from_colors(colors: &[Color]) -> Self {
        let mut counts = Self::new();
        for &color in colors {
            counts.add(color);
        }
        counts
    }

    /// Students of `color`.
    #[must_use]
    pub const fn get(&self, color: Color) -> u8 {
        self.0[color.index()]
    }

    /// Total students.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().map(|&n| usize::from(n)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Add one student of `color`.
    pub fn add(&mut self, color: Color) {
        self.0[color.index()] += 1;
    }

    /// Remove one student of `color`. Returns false if there was none.
    pub fn remove(&mut self, color: Color) -> bool {
        let slot = &mut self.0[color.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Move everything from `other` into `self`, leaving `other` empty.
    pub fn absorb(&mut self, other: &mut StudentCounts) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter_mut()) {
            *mine += *theirs;
            *theirs = 0;
        }
    }

    /// Counts as draw weights, in color order.
    #[must_use]
    pub fn weights(&self) -> [u32; Color::COUNT] {
        self.0.map(u32::from)
    }

    /// Iterate over (color, count) pairs, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (Color, u8)> + '_ {
        Color::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Iterate over individual students in color order.
    pub fn students(&self) -> impl Iterator<Item = Student> + '_ {
        self.iter()
            .flat_map(|(color, n)| std::iter::repeat(Student::new(color)).take(usize::from(n)))
    }
}
