//! # tile-rummy
//!
//! A two-player tile placement engine in the Rummikub family.
//!
//! ## Design Principles
//!
//! 1. **Transactional Turns**: Every move a player makes during a turn is
//!    tentative. Validation commits the whole turn or rolls all of it back.
//!
//! 2. **Presentation-Free**: The engine consumes pointer events and requests
//!    and produces `Frame` snapshots. It never draws anything.
//!
//! 3. **Deterministic**: All randomness flows through one seeded `GameRng`.
//!    Same seed, same inputs, same game.
//!
//! ## Architecture
//!
//! - **Snapshot + Pending**: The committed placement is a persistent map
//!   (`im-rs`), so taking a snapshot is an O(1) clone.
//!
//! - **Explicit Drag FSM**: `Idle → Dragging → Snapped | Cancelled`, one
//!   transition per pointer event.
//!
//! - **Pure Clustering**: Adjacency grouping is a free function over
//!   `(Cell, Tile)` pairs, so the validator and the opponent share it.
//!
//! ## Modules
//!
//! - `core`: Tiles, players, pool, RNG, configuration, state, errors
//! - `zones`: Board and rack geometry, locations, placement map
//! - `rules`: Clustering, meld classification, validation
//! - `play`: Drag transaction, opponent policies, layout assistant
//! - `game`: Session, builder, requests, frames

pub mod core;
pub mod zones;
pub mod rules;
pub mod play;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, Color, ConfigError, EngineError, GameConfig, GameRng, GameState,
    OpponentStrategy, PlayerId, PlayerMap, RackConfig, Tile, TilePool,
};

pub use crate::zones::{BoardGrid, Cell, Location, PixelRect, Placement};

pub use crate::rules::{validate, Commit, Meld, MeldKind, ValidationFailure};

pub use crate::play::{
    CancelReason, DragEffect, DragMachine, DragState, DragTransition, OpponentMove,
    OpponentPolicy, PointerEvent, PointerKind,
};

pub use crate::game::{
    DrawOutcome, Frame, GameBuilder, GameEnd, Request, Session, StepReport, TileView,
    TurnOutcome,
};
