//! Requests into a session and the report it returns for each step.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Tile};
use crate::play::{DragTransition, OpponentMove};
use crate::rules::ValidationFailure;

/// Non-pointer input from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", content = "value", rename_all = "snake_case")]
pub enum Request {
    /// Start the human's turn, discarding any unvalidated moves.
    BeginTurn,
    /// Check the board and commit or roll back this turn's moves.
    Validate,
    SortByGroups,
    SortByRuns,
    /// Lay down every meld the rack holds.
    AutoPlay,
    /// Draw a tile instead of playing; ends the human's turn.
    DrawTile,
    /// Put this turn's moves back.
    Rollback,
    /// Show or hide the opponent's rack.
    RevealOpponent(bool),
    /// Close the session, cancelling any drag.
    Quit,
}

/// What happened to the human's transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub validated: bool,
    pub rolled_back: bool,
    /// Tiles moved from the rack onto the board and committed.
    pub tiles_played: usize,
    /// Why validation failed, when it did.
    pub failure: Option<ValidationFailure>,
}

/// Result of the human's draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawOutcome {
    Drew { tile: Tile },
    /// The pool was empty; the turn ended without a tile.
    PoolExhausted,
}

/// Sent once, when a committed rack becomes empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameEnd {
    pub winner: PlayerId,
}

/// Everything one step changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub drag: Option<DragTransition>,
    pub turn: Option<TurnOutcome>,
    pub draw: Option<DrawOutcome>,
    pub opponent: Option<OpponentMove>,
    pub game_end: Option<GameEnd>,
}
