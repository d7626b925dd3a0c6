//! Game configuration.
//!
//! The presentation layer supplies board and rack geometry in pixels; the
//! engine never hardcodes screen layout. Everything here is plain data with
//! builder helpers, loadable from JSON, and checked once by
//! [`GameConfig::validate`] before a session starts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::EngineError;
use super::tile::{Tile, POOL_SIZE};
use crate::rules::MIN_MELD_LEN;

/// Tile width in pixels of the stock tile artwork.
pub const DEFAULT_TILE_WIDTH: u32 = 52;

/// Tile height in pixels of the stock tile artwork.
pub const DEFAULT_TILE_HEIGHT: u32 = 73;

/// Opening hand size.
pub const DEFAULT_HAND_SIZE: usize = 15;

/// Board grid geometry in board-local pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub origin_x: i32,
    pub origin_y: i32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub rows: u16,
    pub cols: u16,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            origin_x: 120,
            origin_y: 60,
            cell_width: DEFAULT_TILE_WIDTH,
            cell_height: DEFAULT_TILE_HEIGHT,
            rows: 6,
            cols: 18,
        }
    }
}

impl BoardConfig {
    /// Grid of `rows` x `cols` cells at the origin with default tile size.
    #[must_use]
    pub fn grid(rows: u16, cols: u16) -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Move the grid origin.
    #[must_use]
    pub fn at(mut self, origin_x: i32, origin_y: i32) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Set the cell size.
    #[must_use]
    pub fn with_cell_size(mut self, width: u32, height: u32) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }
}

/// Human rack geometry: slots laid out left to right, wrapping every
/// `slots_per_row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackConfig {
    pub origin_x: i32,
    pub origin_y: i32,
    pub slot_width: u32,
    pub slot_height: u32,
    pub slots_per_row: u16,
    pub rows: u16,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            origin_x: 120,
            origin_y: 560,
            slot_width: DEFAULT_TILE_WIDTH + 10,
            slot_height: DEFAULT_TILE_HEIGHT + 10,
            slots_per_row: 14,
            rows: 3,
        }
    }
}

impl RackConfig {
    /// Number of slots on the rack.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots_per_row as usize * self.rows as usize
    }

    /// Move the rack origin.
    #[must_use]
    pub fn at(mut self, origin_x: i32, origin_y: i32) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Set the slot grid shape.
    #[must_use]
    pub fn with_shape(mut self, slots_per_row: u16, rows: u16) -> Self {
        self.slots_per_row = slots_per_row;
        self.rows = rows;
        self
    }
}

/// How the automated opponent chooses its play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentStrategy {
    /// Same-color chains stepping by two within one number parity.
    #[default]
    ParityRuns,
    /// First legal Group or Run in the rack.
    Melds,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub rack: RackConfig,
    /// Tiles dealt to each seat at the start.
    pub hand_size: usize,
    /// Seed for the deal and every later draw.
    pub seed: u64,
    pub opponent: OpponentStrategy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            rack: RackConfig::default(),
            hand_size: DEFAULT_HAND_SIZE,
            seed: 0,
            opponent: OpponentStrategy::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_rack(mut self, rack: RackConfig) -> Self {
        self.rack = rack;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_opponent(mut self, opponent: OpponentStrategy) -> Self {
        self.opponent = opponent;
        self
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// ```
    /// use tile_rummy::core::{GameConfig, OpponentStrategy};
    ///
    /// let config = GameConfig::from_json(r#"{"seed": 9, "opponent": "melds"}"#).unwrap();
    /// assert_eq!(config.seed, 9);
    /// assert_eq!(config.opponent, OpponentStrategy::Melds);
    /// assert_eq!(config.hand_size, 15);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can hold a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        for (field, value) in [
            ("board.cell_width", board.cell_width as usize),
            ("board.cell_height", board.cell_height as usize),
            ("board.rows", board.rows as usize),
            ("board.cols", board.cols as usize),
            ("rack.slot_width", self.rack.slot_width as usize),
            ("rack.slot_height", self.rack.slot_height as usize),
            ("rack.slots_per_row", self.rack.slots_per_row as usize),
            ("rack.rows", self.rack.rows as usize),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { field });
            }
        }

        let rack = &self.rack;
        let per_row = u32::from(rack.slots_per_row);
        // Slots past the configured rows keep wrapping downwards.
        let last_rack_row = u32::from(u16::MAX) / per_row + 1;
        for (field, origin, step, count) in [
            ("board width", board.origin_x, board.cell_width, u32::from(board.cols)),
            ("board height", board.origin_y, board.cell_height, u32::from(board.rows)),
            ("rack width", rack.origin_x, rack.slot_width, per_row),
            ("rack height", rack.origin_y, rack.slot_height, last_rack_row),
        ] {
            let end = i64::from(origin) + i64::from(step) * i64::from(count);
            if end > i64::from(i32::MAX) {
                return Err(ConfigError::PixelRangeExceeded { field });
            }
        }

        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }

        if (board.cols as usize) < MIN_MELD_LEN {
            return Err(ConfigError::BoardTooNarrow { cols: board.cols });
        }

        if self.rack.capacity() < self.hand_size {
            return Err(ConfigError::RackTooSmall {
                capacity: self.rack.capacity(),
                hand_size: self.hand_size,
            });
        }

        if self.hand_size * 2 > POOL_SIZE {
            return Err(ConfigError::HandsExceedPool {
                hand_size: self.hand_size,
            });
        }

        Ok(())
    }
}

/// Startup configuration errors. These abort session creation.
#[derive(Debug)]
pub enum ConfigError {
    /// A size or count is zero.
    ZeroDimension { field: &'static str },
    /// The board or rack reaches past the `i32` pixel range.
    PixelRangeExceeded { field: &'static str },
    /// An opening hand holds no tiles.
    EmptyHand,
    /// The board cannot hold even the shortest meld in one row.
    BoardTooNarrow { cols: u16 },
    /// The rack has fewer slots than the opening hand.
    RackTooSmall { capacity: usize, hand_size: usize },
    /// Two opening hands need more tiles than exist.
    HandsExceedPool { hand_size: usize },
    /// A prearranged hand lists the same tile twice.
    DuplicateTile { tile: Tile },
    /// The JSON document could not be parsed.
    Json(serde_json::Error),
    /// The opening deal could not be made.
    Deal(EngineError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { field } => write!(f, "{field} must be > 0"),
            Self::PixelRangeExceeded { field } => {
                write!(f, "{field} extends past the pixel coordinate range")
            }
            Self::EmptyHand => write!(f, "opening hands must hold at least one tile"),
            Self::BoardTooNarrow { cols } => write!(
                f,
                "board has {cols} columns, at least {MIN_MELD_LEN} are needed for a meld"
            ),
            Self::RackTooSmall {
                capacity,
                hand_size,
            } => write!(
                f,
                "rack holds {capacity} tiles but the opening hand is {hand_size}"
            ),
            Self::HandsExceedPool { hand_size } => write!(
                f,
                "two hands of {hand_size} exceed the {POOL_SIZE}-tile pool"
            ),
            Self::DuplicateTile { tile } => write!(f, "tile {tile} is dealt twice"),
            Self::Json(error) => write!(f, "invalid configuration JSON: {error}"),
            Self::Deal(error) => write!(f, "opening deal failed: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(error) => Some(error),
            Self::Deal(error) => Some(error),
            _ => None,
        }
    }
}
