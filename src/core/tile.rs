//! Tile identity.
//!
//! A `Tile` is a plain value: color, number and instance. Each
//! (color, number) pair exists exactly twice, told apart by `instance`.
//! Tiles are created once, when the pool is built, and are only ever
//! relocated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::EngineError;

/// Lowest tile number.
pub const MIN_NUMBER: u8 = 1;

/// Highest tile number.
pub const MAX_NUMBER: u8 = 15;

/// Copies of every (color, number) pair.
pub const INSTANCES: u8 = 2;

/// Size of a full tile set.
pub const POOL_SIZE: usize = Color::ALL.len() * MAX_NUMBER as usize * INSTANCES as usize;

/// Tile color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Black,
    Blue,
    Green,
    Red,
    Yellow,
}

impl Color {
    /// Every color, in scan order.
    pub const ALL: [Color; 5] = [
        Color::Black,
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Yellow,
    ];

    /// Upper-case display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Red => "RED",
            Color::Yellow => "YELLOW",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One physical tile.
///
/// Ordering is by color, then number, then instance.
///
/// ```
/// use tile_rummy::core::{Color, Tile};
///
/// let first = Tile::new(Color::Red, 5, 0).unwrap();
/// let second = Tile::new(Color::Red, 5, 1).unwrap();
///
/// assert_ne!(first, second);
/// assert!(first.same_face(second));
/// assert!(Tile::new(Color::Red, 16, 0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Tile {
    color: Color,
    number: u8,
    instance: u8,
}

impl Tile {
    /// Create a tile, checking number and instance ranges.
    pub fn new(color: Color, number: u8, instance: u8) -> Result<Self, EngineError> {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) || instance >= INSTANCES {
            return Err(EngineError::InvalidTile { number, instance });
        }
        Ok(Self {
            color,
            number,
            instance,
        })
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.number
    }

    #[must_use]
    pub const fn instance(self) -> u8 {
        self.instance
    }

    /// Even-numbered tile.
    #[must_use]
    pub const fn is_even(self) -> bool {
        self.number % 2 == 0
    }

    /// Same color and number, ignoring instance.
    #[must_use]
    pub fn same_face(self, other: Tile) -> bool {
        self.color == other.color && self.number == other.number
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.color, self.number)?;
        if self.instance > 0 {
            write!(f, "#{}", self.instance + 1)?;
        }
        Ok(())
    }
}

/// Build the full tile set: two instances of every (color, number).
///
/// Order is color, then number, then instance; callers must not rely on it.
#[must_use]
pub fn create_initial_pool() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(POOL_SIZE);
    for color in Color::ALL {
        for number in MIN_NUMBER..=MAX_NUMBER {
            for instance in 0..INSTANCES {
                tiles.push(Tile {
                    color,
                    number,
                    instance,
                });
            }
        }
    }
    tiles
}
