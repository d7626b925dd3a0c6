//! Drag-and-drop of one tile at a time.
//!
//! ```text
//! Idle -> Dragging -> Snapped
//!             \-----> Cancelled
//! ```
//!
//! Pointer-down over a draggable tile starts a drag and records the
//! pointer-to-centre offset. Moves track the pointer minus that offset.
//! On release the tile centre is mapped to a board cell; a successful snap
//! records a pending move in the game state, anything else leaves the tile
//! where it was. `Snapped` and `Cancelled` accept a new pointer-down just
//! like `Idle`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{EngineError, GameState, PlayerId, Tile};
use crate::zones::{Cell, Location};

/// Pointer button phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// One pointer event in board-local pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: i32,
    pub y: i32,
}

impl PointerEvent {
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
        }
    }

    #[must_use]
    pub const fn move_to(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
        }
    }

    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Up,
            x,
            y,
        }
    }
}

/// Why a drag ended without a snap. The tile stays where it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CancelReason {
    /// The tile centre was released outside the board.
    OutsideBoard,
    /// The target cell holds another tile.
    CellOccupied { cell: Cell, occupant: Tile },
    /// The state refused the move.
    Rejected,
    /// The session was quit mid-drag.
    Quit,
}

/// Pointer events that were safely ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    NoTileUnderPointer,
    /// Committed board tiles cannot be picked up.
    TileLocked,
    NotDragging,
    DragAlreadyActive,
}

/// Drag lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        tile: Tile,
        origin: Location,
        /// Pointer minus tile centre at pick-up.
        offset: (i32, i32),
        /// Current tile centre.
        center: (i32, i32),
    },
    Snapped {
        tile: Tile,
        cell: Cell,
    },
    Cancelled {
        tile: Tile,
        reason: CancelReason,
    },
}

/// Effect of one pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Picked { tile: Tile, from: Location },
    Moved { tile: Tile, center: (i32, i32) },
    Snapped { tile: Tile, cell: Cell },
    Cancelled { tile: Tile, reason: CancelReason },
    Noop { reason: DragNoopReason },
}

/// One state-machine step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DragTransition {
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

/// The human's drag state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The tile being dragged and its current centre.
    #[must_use]
    pub const fn dragged(&self) -> Option<(Tile, (i32, i32))> {
        match self.state {
            DragState::Dragging { tile, center, .. } => Some((tile, center)),
            _ => None,
        }
    }

    /// Feed one pointer event.
    pub fn apply(&mut self, game: &mut GameState, event: PointerEvent) -> DragTransition {
        let from = self.state;
        let effect = match (self.state, event.kind) {
            (DragState::Dragging { .. }, PointerKind::Down) => DragEffect::Noop {
                reason: DragNoopReason::DragAlreadyActive,
            },
            (_, PointerKind::Down) => self.pick(game, event.x, event.y),
            (
                DragState::Dragging {
                    tile,
                    origin,
                    offset,
                    ..
                },
                PointerKind::Move,
            ) => {
                let center = (event.x - offset.0, event.y - offset.1);
                self.state = DragState::Dragging {
                    tile,
                    origin,
                    offset,
                    center,
                };
                DragEffect::Moved { tile, center }
            }
            (DragState::Dragging { tile, offset, .. }, PointerKind::Up) => {
                self.release(game, tile, (event.x - offset.0, event.y - offset.1))
            }
            (_, PointerKind::Move | PointerKind::Up) => DragEffect::Noop {
                reason: DragNoopReason::NotDragging,
            },
        };

        let transition = DragTransition {
            from,
            to: self.state,
            effect,
        };
        if !matches!(effect, DragEffect::Moved { .. }) {
            debug!(?effect, "drag transition");
        }
        transition
    }

    /// Abort an active drag.
    pub fn cancel(&mut self, reason: CancelReason) -> Option<DragTransition> {
        let from = self.state;
        let DragState::Dragging { tile, .. } = from else {
            return None;
        };
        self.state = DragState::Cancelled { tile, reason };
        debug!(%tile, ?reason, "drag cancelled");
        Some(DragTransition {
            from,
            to: self.state,
            effect: DragEffect::Cancelled { tile, reason },
        })
    }

    fn pick(&mut self, game: &GameState, x: i32, y: i32) -> DragEffect {
        let placement = game.placement();
        let rack = placement
            .rack(PlayerId::HUMAN)
            .iter()
            .map(|(slot, tile)| (tile, Location::rack(PlayerId::HUMAN, slot)));
        let board = placement
            .board_tiles()
            .map(|(cell, tile)| (tile, Location::from(cell)));

        for (tile, location) in rack.chain(board) {
            let Some(rect) = game.location_rect(location) else {
                continue;
            };
            if !rect.contains(x, y) {
                continue;
            }
            if location.is_board() && !game.is_tentative(tile) {
                return DragEffect::Noop {
                    reason: DragNoopReason::TileLocked,
                };
            }

            let center = rect.center();
            self.state = DragState::Dragging {
                tile,
                origin: location,
                offset: (x - center.0, y - center.1),
                center,
            };
            return DragEffect::Picked {
                tile,
                from: location,
            };
        }

        DragEffect::Noop {
            reason: DragNoopReason::NoTileUnderPointer,
        }
    }

    fn release(&mut self, game: &mut GameState, tile: Tile, center: (i32, i32)) -> DragEffect {
        let outcome = match game.board().cell_at(center.0, center.1) {
            None => Err(CancelReason::OutsideBoard),
            Some(cell) => match game.relocate(tile, Location::from(cell)) {
                Ok(_) => Ok(cell),
                Err(EngineError::CellOccupied { cell, occupant }) => {
                    Err(CancelReason::CellOccupied { cell, occupant })
                }
                Err(error) => {
                    warn!(%error, %tile, "drop rejected");
                    Err(CancelReason::Rejected)
                }
            },
        };

        match outcome {
            Ok(cell) => {
                self.state = DragState::Snapped { tile, cell };
                DragEffect::Snapped { tile, cell }
            }
            Err(reason) => {
                self.state = DragState::Cancelled { tile, reason };
                DragEffect::Cancelled { tile, reason }
            }
        }
    }
}
