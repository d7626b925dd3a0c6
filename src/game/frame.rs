//! Read-only view of a session for rendering.

use serde::Serialize;

use crate::core::{GameState, PlayerId, Tile};
use crate::play::{DragMachine, DragState};
use crate::zones::{Location, PixelRect};

/// One visible tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub tile: Tile,
    pub location: Location,
    /// Where to draw it. A dragged tile reports its live position; opponent
    /// rack tiles have no layout and report `None`.
    pub rect: Option<PixelRect>,
    /// Moved this turn and not yet validated.
    pub tentative: bool,
    pub dragging: bool,
}

/// Everything the presentation layer needs after a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Board tiles row-major, then the human rack, then the opponent rack
    /// when revealed.
    pub tiles: Vec<TileView>,
    pub opponent_rack_len: usize,
    pub opponent_revealed: bool,
    pub pool_remaining: usize,
    pub active_player: PlayerId,
    pub turn_number: u32,
    pub drag: DragState,
    pub winner: Option<PlayerId>,
}

impl Frame {
    /// Build the frame for the current state.
    #[must_use]
    pub fn capture(state: &GameState, drag: &DragMachine, reveal_opponent: bool) -> Self {
        let placement = state.placement();
        let dragged = drag.dragged();

        let view = |tile: Tile, location: Location| {
            let mut rect = state.location_rect(location);
            let mut dragging = false;
            if let Some((dragged_tile, (cx, cy))) = dragged {
                if dragged_tile == tile {
                    dragging = true;
                    rect = rect.map(|r| {
                        r.moved_to(
                            cx.saturating_sub((r.width / 2) as i32),
                            cy.saturating_sub((r.height / 2) as i32),
                        )
                    });
                }
            }
            TileView {
                tile,
                location,
                rect,
                tentative: state.is_tentative(tile),
                dragging,
            }
        };

        let mut tiles: Vec<TileView> = placement
            .board_tiles()
            .map(|(cell, tile)| view(tile, Location::from(cell)))
            .collect();
        tiles.extend(
            placement
                .rack(PlayerId::HUMAN)
                .iter()
                .map(|(slot, tile)| view(tile, Location::rack(PlayerId::HUMAN, slot))),
        );
        if reveal_opponent {
            tiles.extend(
                placement
                    .rack(PlayerId::OPPONENT)
                    .iter()
                    .map(|(slot, tile)| view(tile, Location::rack(PlayerId::OPPONENT, slot))),
            );
        }

        Self {
            tiles,
            opponent_rack_len: placement.rack(PlayerId::OPPONENT).len(),
            opponent_revealed: reveal_opponent,
            pool_remaining: state.pool().remaining(),
            active_player: state.active_player(),
            turn_number: state.turn_number(),
            drag: drag.state(),
            winner: state.winner(),
        }
    }

    /// View of one tile, if visible.
    #[must_use]
    pub fn tile(&self, tile: Tile) -> Option<&TileView> {
        self.tiles.iter().find(|v| v.tile == tile)
    }
}
