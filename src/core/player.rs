//! Seats and per-seat tables.
//!
//! A [`PlayerId`] is the seat a username was given when it joined the lobby
//! (0-based, join order). Seat order is also the clockwise order used by
//! planning and by tie-breaks, so per-seat data lives in a [`PlayerMap`]
//! whose iteration order is always seat order.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat of a player in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next seat clockwise at a table of `player_count`.
    ///
    /// ```
    /// use archipelago::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// One value per seat, indexed by [`PlayerId`].
///
/// ## Example
///
/// ```
/// use archipelago::core::{PlayerId, PlayerMap};
///
/// let mut influence: PlayerMap<u32> = PlayerMap::with_default(3);
/// influence[PlayerId::new(2)] += 4;
/// assert_eq!(influence.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec![0, 0, 4]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map by calling `factory` for every seat.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            seats: (0..player_count as u8).map(|i| factory(PlayerId(i))).collect(),
        }
    }

    /// A map with `T::default()` in every seat.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.seats.get_mut(player.index())
    }

    /// Seat-ordered pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.seats
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_seat_wraps() {
        assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
        assert_eq!(PlayerId::new(1).next(3), PlayerId::new(2));
        assert_eq!(PlayerId::new(2).to_string(), "Seat 2");
    }

    #[test]
    fn test_map_is_seat_ordered() {
        let mut map = PlayerMap::new(3, |p| p.index() * 10);
        map[PlayerId::new(1)] += 1;

        let values: Vec<_> = map.iter().map(|(p, v)| (p.0, *v)).collect();
        assert_eq!(values, vec![(0, 0), (1, 11), (2, 20)]);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut map: PlayerMap<u8> = PlayerMap::with_default(2);
        assert_eq!(map.get(PlayerId::new(1)), Some(&0));
        assert!(map.get(PlayerId::new(2)).is_none());
        assert!(map.get_mut(PlayerId::new(5)).is_none());
    }

    #[test]
    fn test_iter_mut_touches_every_seat() {
        let mut map: PlayerMap<u32> = PlayerMap::with_default(3);
        for (seat, value) in map.iter_mut() {
            *value = u32::from(seat.0) + 1;
        }
        assert_eq!(map[PlayerId::new(2)], 3);
        assert_eq!(map.player_count(), 3);
    }
}
