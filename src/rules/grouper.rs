//! Adjacency grouping.
//!
//! Tiles that sit in horizontally touching cells of the same row form one
//! cluster. The grouper is a pure function of the occupied cells: the input
//! order does not matter and nothing is mutated.

use smallvec::SmallVec;

use super::MAX_MELD_LEN;
use crate::core::Tile;
use crate::zones::{BoardGrid, Cell};

/// Rectangular part of the board to scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanRegion {
    pub top_left: Cell,
    pub rows: u16,
    pub cols: u16,
}

impl ScanRegion {
    #[must_use]
    pub const fn new(top_left: Cell, rows: u16, cols: u16) -> Self {
        Self {
            top_left,
            rows,
            cols,
        }
    }

    /// The whole board.
    #[must_use]
    pub fn whole(grid: &BoardGrid) -> Self {
        Self::new(Cell::new(0, 0), grid.rows(), grid.cols())
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let Cell { row, col } = self.top_left;
        cell.row >= row
            && cell.col >= col
            && u32::from(cell.row) < u32::from(row) + u32::from(self.rows)
            && u32::from(cell.col) < u32::from(col) + u32::from(self.cols)
    }
}

/// One maximal run of horizontally adjacent occupied cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    members: SmallVec<[(Cell, Tile); MAX_MELD_LEN]>,
}

impl Cluster {
    /// Leftmost cell.
    #[must_use]
    pub fn start(&self) -> Cell {
        self.members[0].0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// (cell, tile) pairs, left to right.
    #[must_use]
    pub fn members(&self) -> &[(Cell, Tile)] {
        &self.members
    }

    /// Tiles, left to right.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.members.iter().map(|&(_, tile)| tile)
    }
}

/// Split the occupied cells inside `region` into clusters.
///
/// Clusters come out row-major, left to right. Single tiles are returned as
/// one-element clusters.
///
/// ```
/// use tile_rummy::core::{Color, Tile};
/// use tile_rummy::rules::{find_clusters, ScanRegion};
/// use tile_rummy::zones::Cell;
///
/// let t = |n| Tile::new(Color::Red, n, 0).unwrap();
/// let occupied = [
///     (Cell::new(0, 4), t(3)),
///     (Cell::new(0, 2), t(1)),
///     (Cell::new(0, 3), t(2)),
///     (Cell::new(0, 6), t(9)),
/// ];
///
/// let clusters = find_clusters(occupied, &ScanRegion::new(Cell::new(0, 0), 1, 10));
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].tiles().collect::<Vec<_>>(), vec![t(1), t(2), t(3)]);
/// assert_eq!(clusters[1].len(), 1);
/// ```
pub fn find_clusters(
    occupied: impl IntoIterator<Item = (Cell, Tile)>,
    region: &ScanRegion,
) -> Vec<Cluster> {
    let mut cells: Vec<(Cell, Tile)> = occupied
        .into_iter()
        .filter(|(cell, _)| region.contains(*cell))
        .collect();
    cells.sort_unstable_by_key(|&(cell, _)| cell);

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut current: SmallVec<[(Cell, Tile); MAX_MELD_LEN]> = SmallVec::new();

    for (cell, tile) in cells {
        if let Some(&(last, _)) = current.last() {
            if last.row != cell.row || last.col + 1 != cell.col {
                clusters.push(Cluster {
                    members: std::mem::take(&mut current),
                });
            }
        }
        current.push((cell, tile));
    }
    if !current.is_empty() {
        clusters.push(Cluster { members: current });
    }
    clusters
}
