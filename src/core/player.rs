//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! The game always has exactly two seats: the human at seat 0 and the
//! automated opponent at seat 1.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by a fixed `[T; 2]`, indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const SEAT_COUNT: usize = 2;

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The human player, who drives the board through pointer events.
    pub const HUMAN: PlayerId = PlayerId(0);

    /// The automated opponent.
    pub const OPPONENT: PlayerId = PlayerId(1);

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    /// Check whether this is the human seat.
    #[must_use]
    pub const fn is_human(self) -> bool {
        self.0 == 0
    }

    /// Both seats, human first.
    ///
    /// ```
    /// use tile_rummy::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(seats, vec![PlayerId::HUMAN, PlayerId::OPPONENT]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId::HUMAN, PlayerId::OPPONENT].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use tile_rummy::core::{PlayerId, PlayerMap};
///
/// let mut hand_sizes: PlayerMap<usize> = PlayerMap::with_value(15);
/// hand_sizes[PlayerId::OPPONENT] += 1;
///
/// assert_eq!(hand_sizes[PlayerId::HUMAN], 15);
/// assert_eq!(hand_sizes[PlayerId::OPPONENT], 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEAT_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::HUMAN), factory(PlayerId::OPPONENT)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Build a map from the human's and the opponent's entry.
    pub fn from_pair(human: T, opponent: T) -> Self {
        Self {
            data: [human, opponent],
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all().zip(self.data.iter_mut())
    }

    /// Transform every entry, keeping the seat association.
    pub fn map<U>(self, mut f: impl FnMut(PlayerId, T) -> U) -> PlayerMap<U> {
        let [human, opponent] = self.data;
        PlayerMap {
            data: [f(PlayerId::HUMAN, human), f(PlayerId::OPPONENT, opponent)],
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
