//! Board grid geometry.
//!
//! Converts between board-local pixels and grid cells, and finds free
//! row spans for melds placed by the engine itself.

use serde::{Deserialize, Serialize};

use super::location::Cell;
use crate::core::BoardConfig;

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Point-in-rect test, right/bottom edges exclusive.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && i64::from(x) < i64::from(self.x) + i64::from(self.width)
            && i64::from(y) < i64::from(self.y) + i64::from(self.height)
    }

    /// Centre point, rounded down.
    #[must_use]
    pub fn center(&self) -> (i32, i32) {
        (
            self.x.saturating_add((self.width / 2) as i32),
            self.y.saturating_add((self.height / 2) as i32),
        )
    }

    /// Same size, top-left moved to `(x, y)`.
    #[must_use]
    pub const fn moved_to(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }
}

/// `origin + step * index` in pixels, clamped to the `i32` range.
pub(crate) fn pixel_offset(origin: i32, step: u32, index: u16) -> i32 {
    let at = i64::from(origin) + i64::from(step) * i64::from(index);
    at.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// The play area grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardGrid {
    config: BoardConfig,
}

impl BoardGrid {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn rows(&self) -> u16 {
        self.config.rows
    }

    #[must_use]
    pub fn cols(&self) -> u16 {
        self.config.cols
    }

    /// Check a cell lies on the grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.config.rows && cell.col < self.config.cols
    }

    /// Whole play area in pixels.
    #[must_use]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(
            self.config.origin_x,
            self.config.origin_y,
            self.config.cell_width.saturating_mul(u32::from(self.config.cols)),
            self.config.cell_height.saturating_mul(u32::from(self.config.rows)),
        )
    }

    /// Pixel rect of one cell.
    #[must_use]
    pub fn cell_rect(&self, cell: Cell) -> PixelRect {
        PixelRect::new(
            pixel_offset(self.config.origin_x, self.config.cell_width, cell.col),
            pixel_offset(self.config.origin_y, self.config.cell_height, cell.row),
            self.config.cell_width,
            self.config.cell_height,
        )
    }

    /// Cell under a pixel, by integer division against the cell size.
    ///
    /// Points on the far right or bottom edge clamp into the last column or
    /// row; anything else outside the play area yields `None`.
    #[must_use]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        let dx = i64::from(x) - i64::from(self.config.origin_x);
        let dy = i64::from(y) - i64::from(self.config.origin_y);
        let bounds = self.bounds();
        if dx < 0 || dy < 0 || dx > i64::from(bounds.width) || dy > i64::from(bounds.height) {
            return None;
        }

        let col = (dx / i64::from(self.config.cell_width)).min(i64::from(self.config.cols) - 1);
        let row = (dy / i64::from(self.config.cell_height)).min(i64::from(self.config.rows) - 1);
        Some(Cell::new(row as u16, col as u16))
    }

    /// First span of `len` free cells in one row, scanning row-major.
    ///
    /// The cells just left and right of the span must be free too (or off
    /// the grid), so a meld placed there forms its own cluster.
    #[must_use]
    pub fn find_free_span(&self, len: usize, is_free: impl Fn(Cell) -> bool) -> Option<Cell> {
        let cols = usize::from(self.config.cols);
        if len == 0 || len > cols {
            return None;
        }
        let clear = |cell: Cell| !self.contains(cell) || is_free(cell);

        for row in 0..self.config.rows {
            for start in 0..=(cols - len) {
                let start = Cell::new(row, start as u16);
                let left_clear = start.col == 0 || clear(Cell::new(row, start.col - 1));
                let right_clear = clear(start.right(len as u16));
                let span_free = (0..len as u16).all(|i| is_free(start.right(i)));
                if left_clear && right_clear && span_free {
                    return Some(start);
                }
            }
        }
        None
    }
}
