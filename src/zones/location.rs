//! Where a tile is.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::PlayerId;

/// A board grid cell. Orders row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// The cell `offset` columns to the right.
    #[must_use]
    pub const fn right(self, offset: u16) -> Self {
        Self {
            row: self.row,
            col: self.col + offset,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Location of a tile in play: exactly one rack slot or one board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Rack { player: PlayerId, slot: u16 },
    Board { cell: Cell },
}

impl Location {
    #[must_use]
    pub const fn rack(player: PlayerId, slot: u16) -> Self {
        Location::Rack { player, slot }
    }

    #[must_use]
    pub const fn board(row: u16, col: u16) -> Self {
        Location::Board {
            cell: Cell::new(row, col),
        }
    }

    /// The board cell, if on the board.
    #[must_use]
    pub const fn cell(self) -> Option<Cell> {
        match self {
            Location::Board { cell } => Some(cell),
            Location::Rack { .. } => None,
        }
    }

    /// The rack owner, if on a rack.
    #[must_use]
    pub const fn rack_owner(self) -> Option<PlayerId> {
        match self {
            Location::Rack { player, .. } => Some(player),
            Location::Board { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_board(self) -> bool {
        matches!(self, Location::Board { .. })
    }
}

impl From<Cell> for Location {
    fn from(cell: Cell) -> Self {
        Location::Board { cell }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Rack { player, slot } => write!(f, "rack of {player}, slot {slot}"),
            Location::Board { cell } => write!(f, "board cell {cell}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_order_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 5), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 5), Cell::new(1, 0)]);
    }

    #[test]
    fn test_location_accessors() {
        let on_board = Location::board(2, 3);
        assert_eq!(on_board.cell(), Some(Cell::new(2, 3)));
        assert!(on_board.is_board());
        assert_eq!(on_board.rack_owner(), None);

        let on_rack = Location::rack(PlayerId::OPPONENT, 4);
        assert_eq!(on_rack.cell(), None);
        assert_eq!(on_rack.rack_owner(), Some(PlayerId::OPPONENT));
        assert_eq!(on_rack.to_string(), "rack of Player 2, slot 4");
    }

    #[test]
    fn test_location_serialization() {
        let json = serde_json::to_string(&Location::board(1, 2)).unwrap();
        assert_eq!(json, r#"{"kind":"board","cell":{"row":1,"col":2}}"#);
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Location::board(1, 2));
    }
}
