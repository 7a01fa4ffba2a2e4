//! The container trait and the concrete containers.

use serde::{Deserialize, Serialize};

use super::counts::StudentCounts;
use crate::core::config::{HALL_CAPACITY, SETUP_STUDENTS_PER_COLOR, STUDENTS_PER_COLOR};
use crate::core::{Color, GameRng};
use crate::pieces::Student;

/// Why a container refused an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ContainerError {
    #[error("no room for a {color} student")]
    Full { color: Color },

    #[error("container is empty")]
    Empty,

    #[error("no {color} student to remove")]
    MissingColor { color: Color },
}

/// Capacity rule of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capacity {
    /// No limit.
    Unbounded,
    /// At most this many students overall.
    Total(u8),
    /// At most this many students of each color.
    PerColor(u8),
}

/// Shared behavior of every student container.
///
/// Implementors only expose their tally and capacity; the operations are
/// provided. No operation mutates on failure.
pub trait StudentContainer {
    /// Current tally.
    fn counts(&self) -> &StudentCounts;

    /// Mutable tally. Bypasses capacity checks; use the provided methods.
    fn counts_mut(&mut self) -> &mut StudentCounts;

    /// Capacity rule.
    fn capacity(&self) -> Capacity;

    /// Students of `color`.
    fn count(&self, color: Color) -> u8 {
        self.counts().get(color)
    }

    /// Total students.
    fn len(&self) -> usize {
        self.counts().total()
    }

    fn is_empty(&self) -> bool {
        self.counts().is_empty()
    }

    /// Whether one more student of `color` fits.
    fn has_room_for(&self, color: Color) -> bool {
        match self.capacity() {
            Capacity::Unbounded => true,
            Capacity::Total(max) => self.len() < usize::from(max),
            Capacity::PerColor(max) => self.count(color) < max,
        }
    }

    /// How many more students fit, ignoring color.
    fn capacity_left(&self) -> usize {
        match self.capacity() {
            Capacity::Unbounded => usize::MAX,
            Capacity::Total(max) => usize::from(max).saturating_sub(self.len()),
            Capacity::PerColor(max) => Color::ALL
                .iter()
                .map(|&c| usize::from(max.saturating_sub(self.count(c))))
                .sum(),
        }
    }

    /// Whether the container holds as many students as it may.
    fn is_full(&self) -> bool {
        match self.capacity() {
            Capacity::Unbounded => false,
            Capacity::Total(max) => self.len() >= usize::from(max),
            Capacity::PerColor(max) => Color::ALL.iter().all(|&c| self.count(c) >= max),
        }
    }

    /// Add a student.
    fn add(&mut self, student: Student) -> Result<(), ContainerError> {
        if !self.has_room_for(student.color) {
            return Err(ContainerError::Full {
                color: student.color,
            });
        }
        self.counts_mut().add(student.color);
        Ok(())
    }

    /// Remove one student of `color`.
    fn remove_color(&mut self, color: Color) -> Result<Student, ContainerError> {
        if self.counts_mut().remove(color) {
            Ok(Student::new(color))
        } else {
            Err(ContainerError::MissingColor { color })
        }
    }

    /// Remove a student chosen at random, weighted by how many of each color
    /// are present.
    fn remove_random(&mut self, rng: &mut GameRng) -> Result<Student, ContainerError> {
        let index = rng
            .choose_weighted(&self.counts().weights())
            .ok_or(ContainerError::Empty)?;
        let color = Color::from_index(index).ok_or(ContainerError::Empty)?;
        self.remove_color(color)
    }
}

/// Move one student of `color` from `from` to `to`.
///
/// Checks both ends first so that a failure leaves both containers untouched.
pub fn transfer<A, B>(from: &mut A, to: &mut B, color: Color) -> Result<(), ContainerError>
where
    A: StudentContainer + ?Sized,
    B: StudentContainer + ?Sized,
{
    if from.count(color) == 0 {
        return Err(ContainerError::MissingColor { color });
    }
    if !to.has_room_for(color) {
        return Err(ContainerError::Full { color });
    }
    let student = from.remove_color(color)?;
    to.add(student)
}

macro_rules! container {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            students: StudentCounts,
            capacity: Capacity,
        }

        impl StudentContainer for $name {
            fn counts(&self) -> &StudentCounts {
                &self.students
            }

            fn counts_mut(&mut self) -> &mut StudentCounts {
                &mut self.students
            }

            fn capacity(&self) -> Capacity {
                self.capacity
            }
        }
    };
}

container!(
    /// The bag students are drawn from.
    Sack
);

container!(
    /// The dining hall of a school board: up to 10 students per color.
    Hall
);

container!(
    /// The entrance of a school board.
    Entrance
);

container!(
    /// A cloud refilled every planning round.
    Cloud
);

container!(
    /// Students kept on a character card.
    CardStock
);

impl Sack {
    /// An empty sack.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_counts(StudentCounts::new())
    }

    /// A sack with the given content.
    #[must_use]
    pub fn with_counts(students: StudentCounts) -> Self {
        Self {
            students,
            capacity: Capacity::Unbounded,
        }
    }

    /// The sack after the ten island-setup students were taken out.
    #[must_use]
    pub fn after_setup() -> Self {
        Self::with_counts(StudentCounts::uniform(
            STUDENTS_PER_COLOR - SETUP_STUDENTS_PER_COLOR,
        ))
    }

    /// The ten-student bag used to seed the islands.
    #[must_use]
    pub fn setup_bag() -> Self {
        Self::with_counts(StudentCounts::uniform(SETUP_STUDENTS_PER_COLOR))
    }

    /// Draw `n` students into `target` until either the sack runs dry or the
    /// target is full. Returns how many were moved.
    pub fn draw_into<C: StudentContainer + ?Sized>(
        &mut self,
        target: &mut C,
        n: usize,
        rng: &mut GameRng,
    ) -> usize {
        let mut moved = 0;
        while moved < n && !target.is_full() {
            let Ok(student) = self.remove_random(rng) else {
                break;
            };
            if target.add(student).is_err() {
                // Put it back; the target filled up for this color.
                self.students.add(student.color);
                break;
            }
            moved += 1;
        }
        moved
    }
}

impl Hall {
    /// An empty hall.
    #[must_use]
    pub fn new() -> Self {
        Self {
            students: StudentCounts::new(),
            capacity: Capacity::PerColor(HALL_CAPACITY),
        }
    }
}

impl Default for Hall {
    fn default() -> Self {
        Self::new()
    }
}

impl Entrance {
    /// An empty entrance holding at most `size` students.
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self {
            students: StudentCounts::new(),
            capacity: Capacity::Total(size),
        }
    }
}

impl Cloud {
    /// An empty cloud holding at most `size` students.
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self {
            students: StudentCounts::new(),
            capacity: Capacity::Total(size),
        }
    }

    /// Take every student off the cloud.
    pub fn take_all(&mut self) -> StudentCounts {
        std::mem::take(&mut self.students)
    }
}

impl CardStock {
    /// An empty stock holding at most `size` students.
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self {
            students: StudentCounts::new(),
            capacity: Capacity::Total(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hall_rejects_eleventh_of_a_color() {
        let mut hall = Hall::new();
        for _ in 0..10 {
            hall.add(Student::new(Color::Red)).unwrap();
        }

        assert_eq!(
            hall.add(Student::new(Color::Red)),
            Err(ContainerError::Full { color: Color::Red })
        );
        assert!(hall.add(Student::new(Color::Blue)).is_ok());
        assert_eq!(hall.count(Color::Red), 10);
    }

    #[test]
    fn test_entrance_total_capacity() {
        let mut entrance = Entrance::new(2);
        entrance.add(Student::new(Color::Red)).unwrap();
        entrance.add(Student::new(Color::Blue)).unwrap();

        assert!(entrance.is_full());
        assert_eq!(
            entrance.add(Student::new(Color::Green)),
            Err(ContainerError::Full { color: Color::Green })
        );
    }

    #[test]
    fn test_remove_missing_color() {
        let mut entrance = Entrance::new(7);
        assert_eq!(
            entrance.remove_color(Color::Pink),
            Err(ContainerError::MissingColor { color: Color::Pink })
        );
    }

    #[test]
    fn test_remove_random_from_empty() {
        let mut sack = Sack::empty();
        let mut rng = GameRng::new(1);
        assert_eq!(sack.remove_random(&mut rng), Err(ContainerError::Empty));
    }

    #[test]
    fn test_remove_random_takes_present_color() {
        let mut sack = Sack::with_counts(StudentCounts::from_colors(&[Color::Green, Color::Green]));
        let mut rng = GameRng::new(5);

        assert_eq!(sack.remove_random(&mut rng), Ok(Student::new(Color::Green)));
        assert_eq!(sack.len(), 1);
    }

    #[test]
    fn test_transfer_is_atomic() {
        let mut entrance = Entrance::new(7);
        entrance.add(Student::new(Color::Red)).unwrap();
        let mut hall = Hall::new();
        for _ in 0..10 {
            hall.add(Student::new(Color::Red)).unwrap();
        }

        assert_eq!(
            transfer(&mut entrance, &mut hall, Color::Red),
            Err(ContainerError::Full { color: Color::Red })
        );
        assert_eq!(entrance.count(Color::Red), 1);
        assert_eq!(hall.count(Color::Red), 10);
    }

    #[test]
    fn test_transfer_moves_one() {
        let mut entrance = Entrance::new(7);
        entrance.add(Student::new(Color::Blue)).unwrap();
        let mut hall = Hall::new();

        transfer(&mut entrance, &mut hall, Color::Blue).unwrap();

        assert!(entrance.is_empty());
        assert_eq!(hall.count(Color::Blue), 1);
    }

    #[test]
    fn test_draw_into_stops_when_target_full() {
        let mut sack = Sack::after_setup();
        let mut cloud = Cloud::new(3);
        let mut rng = GameRng::new(11);

        let moved = sack.draw_into(&mut cloud, 10, &mut rng);

        assert_eq!(moved, 3);
        assert_eq!(cloud.len(), 3);
        assert_eq!(sack.len(), 120 - 3);
    }

    #[test]
    fn test_draw_into_stops_when_sack_empty() {
        let mut sack = Sack::with_counts(StudentCounts::from_colors(&[Color::Yellow]));
        let mut entrance = Entrance::new(7);
        let mut rng = GameRng::new(3);

        assert_eq!(sack.draw_into(&mut entrance, 7, &mut rng), 1);
        assert!(sack.is_empty());
    }

    #[test]
    fn test_cloud_take_all() {
        let mut cloud = Cloud::new(3);
        cloud.add(Student::new(Color::Pink)).unwrap();

        let taken = cloud.take_all();

        assert_eq!(taken.get(Color::Pink), 1);
        assert!(cloud.is_empty());
        assert_eq!(cloud.capacity(), Capacity::Total(3));
    }
}
