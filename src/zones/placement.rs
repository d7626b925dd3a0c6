//! Tile location index.
//!
//! `Placement` is the single source of truth for where every tile in play
//! sits. It keeps three views in step: tile → location, board cell → tile,
//! and per-player rack slot → tile. All of them are `im` persistent maps, so
//! cloning a `Placement` to take a snapshot is O(1).

use im::{HashMap as ImHashMap, OrdMap};
use tracing::debug;

use super::location::{Cell, Location};
use super::rack::Rack;
use crate::core::{EngineError, PlayerId, PlayerMap, Tile};

/// Where every tile in play is.
///
/// ```
/// use tile_rummy::core::{Color, PlayerId, Tile};
/// use tile_rummy::zones::{Cell, Location, Placement};
///
/// let red_one = Tile::new(Color::Red, 1, 0).unwrap();
/// let mut placement = Placement::new();
/// placement.place(red_one, Location::rack(PlayerId::HUMAN, 0)).unwrap();
///
/// let old = placement.relocate(red_one, Location::board(0, 3)).unwrap();
/// assert_eq!(old, Location::rack(PlayerId::HUMAN, 0));
/// assert_eq!(placement.tile_at(Cell::new(0, 3)), Some(red_one));
/// assert!(placement.rack(PlayerId::HUMAN).is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// tile -> location
    locations: ImHashMap<Tile, Location>,

    /// Occupied board cells, row-major.
    cells: OrdMap<Cell, Tile>,

    racks: PlayerMap<Rack>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::new()
    }
}

impl Placement {
    /// Create an empty placement.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locations: ImHashMap::new(),
            cells: OrdMap::new(),
            racks: PlayerMap::new(|_| Rack::new()),
        }
    }

    /// Put a tile into play at `location`.
    ///
    /// A tile already in play is rejected; use [`relocate`](Self::relocate)
    /// to move it.
    pub fn place(&mut self, tile: Tile, location: Location) -> Result<(), EngineError> {
        if let Some(&at) = self.locations.get(&tile) {
            return Err(EngineError::TileInPlay { tile, at });
        }
        self.check_free(tile, location)?;
        self.insert(tile, location);
        Ok(())
    }

    /// Move a tile in play to `to`.
    ///
    /// Returns the old location. Moving a tile onto its own location is a
    /// no-op. Bounds are not checked here; the board grid owns them.
    pub fn relocate(&mut self, tile: Tile, to: Location) -> Result<Location, EngineError> {
        let from = self
            .locations
            .get(&tile)
            .copied()
            .ok_or(EngineError::UnknownTile { tile })?;

        if from == to {
            return Ok(from);
        }
        self.check_free(tile, to)?;

        match from {
            Location::Rack { player, slot } => {
                self.racks[player].remove(slot);
            }
            Location::Board { cell } => {
                self.cells.remove(&cell);
            }
        }
        self.insert(tile, to);

        debug!(%tile, %from, %to, "relocated tile");
        Ok(from)
    }

    fn check_free(&self, tile: Tile, location: Location) -> Result<(), EngineError> {
        match (self.occupant(location), location) {
            (Some(occupant), _) if occupant == tile => Ok(()),
            (Some(occupant), Location::Board { cell }) => {
                Err(EngineError::CellOccupied { cell, occupant })
            }
            (Some(occupant), Location::Rack { player, slot }) => Err(EngineError::SlotOccupied {
                player,
                slot,
                occupant,
            }),
            (None, _) => Ok(()),
        }
    }

    fn insert(&mut self, tile: Tile, location: Location) {
        match location {
            Location::Rack { player, slot } => self.racks[player].insert(slot, tile),
            Location::Board { cell } => {
                self.cells.insert(cell, tile);
            }
        }
        self.locations.insert(tile, location);
    }

    // === Queries ===

    /// Location of a tile, or `None` if it is not in play.
    #[must_use]
    pub fn location(&self, tile: Tile) -> Option<Location> {
        self.locations.get(&tile).copied()
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.locations.contains_key(&tile)
    }

    /// Tile on a board cell.
    #[must_use]
    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        self.cells.get(&cell).copied()
    }

    /// Tile at any location.
    #[must_use]
    pub fn occupant(&self, location: Location) -> Option<Tile> {
        match location {
            Location::Rack { player, slot } => self.racks[player].get(slot),
            Location::Board { cell } => self.tile_at(cell),
        }
    }

    /// Whether a board cell is empty.
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.cells.contains_key(&cell)
    }

    /// A player's rack.
    #[must_use]
    pub fn rack(&self, player: PlayerId) -> &Rack {
        &self.racks[player]
    }

    /// Occupied board cells in row-major order.
    pub fn board_tiles(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.cells.iter().map(|(&cell, &tile)| (cell, tile))
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn board_len(&self) -> usize {
        self.cells.len()
    }

    /// Every tile in play with its location (no particular order).
    pub fn iter(&self) -> impl Iterator<Item = (Tile, Location)> + '_ {
        self.locations.iter().map(|(&tile, &location)| (tile, location))
    }

    /// Number of tiles in play.
    #[must_use]
    pub fn total_tiles(&self) -> usize {
        self.locations.len()
    }

    // === Rack arrangement ===

    /// Re-slot a player's rack: `order` fills slots 0, 1, 2, ... and the
    /// rack tiles it does not list follow in their current slot order.
    ///
    /// Tiles in `order` that are not on this rack are skipped.
    pub fn arrange_rack(&mut self, player: PlayerId, order: &[Tile]) {
        let current: Vec<Tile> = self.racks[player].tiles().collect();
        let mut arranged: Vec<Tile> = Vec::with_capacity(current.len());
        for &tile in order {
            if current.contains(&tile) && !arranged.contains(&tile) {
                arranged.push(tile);
            }
        }
        for &tile in &current {
            if !arranged.contains(&tile) {
                arranged.push(tile);
            }
        }

        self.racks[player].clear();
        for (slot, tile) in arranged.into_iter().enumerate() {
            self.insert(tile, Location::rack(player, slot as u16));
        }
    }

    /// Re-slot a player's rack to fixed slots.
    ///
    /// Rack tiles listed in `fixed` take their given slot; the others follow
    /// in their current order into the first free slots. Entries for tiles
    /// not on this rack are skipped.
    pub(crate) fn reslot_rack(&mut self, player: PlayerId, fixed: &[(u16, Tile)]) {
        let current: Vec<Tile> = self.racks[player].tiles().collect();

        self.racks[player].clear();
        for &(slot, tile) in fixed {
            if current.contains(&tile) {
                self.insert(tile, Location::rack(player, slot));
            }
        }
        for tile in current {
            if !fixed.iter().any(|&(_, t)| t == tile) {
                let slot = self.racks[player].first_free_slot();
                self.insert(tile, Location::rack(player, slot));
            }
        }
    }
}
