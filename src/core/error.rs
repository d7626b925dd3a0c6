//! Engine error taxonomy.
//!
//! Every variant is recoverable: the caller picks another target, cancels,
//! or lets the turn end. Configuration problems are reported separately by
//! [`ConfigError`](super::config::ConfigError) and abort startup.

use std::fmt;

use super::player::PlayerId;
use super::tile::Tile;
use crate::zones::{Cell, Location};

/// Errors raised by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A draw or deal asked for more tiles than the pool holds.
    ExhaustedPool { requested: usize, remaining: usize },
    /// The destination board cell already holds another tile.
    CellOccupied { cell: Cell, occupant: Tile },
    /// The destination rack slot already holds another tile.
    SlotOccupied {
        player: PlayerId,
        slot: u16,
        occupant: Tile,
    },
    /// The destination cell lies outside the board grid.
    OutOfBounds { cell: Cell },
    /// The tile is not in play (still in the pool, or never created).
    UnknownTile { tile: Tile },
    /// The tile is already in play and cannot be put into play again.
    TileInPlay { tile: Tile, at: Location },
    /// Color/number/instance outside the tile set.
    InvalidTile { number: u8, instance: u8 },
    /// A drag is active; only pointer events are accepted until it ends.
    DragInProgress,
    /// The game has ended.
    GameOver { winner: PlayerId },
    /// The session was closed by a quit request.
    SessionClosed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExhaustedPool {
                requested,
                remaining,
            } => write!(
                f,
                "tile pool exhausted: requested {requested}, {remaining} remaining"
            ),
            Self::CellOccupied { cell, occupant } => {
                write!(f, "board cell {cell} is occupied by {occupant}")
            }
            Self::SlotOccupied {
                player,
                slot,
                occupant,
            } => write!(f, "rack slot {slot} of {player} is occupied by {occupant}"),
            Self::OutOfBounds { cell } => write!(f, "board cell {cell} is outside the grid"),
            Self::UnknownTile { tile } => write!(f, "tile {tile} is not in play"),
            Self::TileInPlay { tile, at } => write!(f, "tile {tile} is already in play at {at}"),
            Self::InvalidTile { number, instance } => write!(
                f,
                "no such tile: number {number} (expected 1-15), instance {instance} (expected 0-1)"
            ),
            Self::DragInProgress => write!(f, "a drag is in progress"),
            Self::GameOver { winner } => write!(f, "game over, {winner} won"),
            Self::SessionClosed => write!(f, "session closed"),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_display_messages() {
        let err = EngineError::ExhaustedPool {
            requested: 3,
            remaining: 1,
        };
        assert_eq!(
            err.to_string(),
            "tile pool exhausted: requested 3, 1 remaining"
        );

        let tile = Tile::new(Color::Red, 5, 0).unwrap();
        let err = EngineError::CellOccupied {
            cell: Cell::new(1, 2),
            occupant: tile,
        };
        assert_eq!(err.to_string(), "board cell (1, 2) is occupied by RED-5");

        let err = EngineError::GameOver {
            winner: PlayerId::OPPONENT,
        };
        assert_eq!(err.to_string(), "game over, Player 2 won");
    }
}
