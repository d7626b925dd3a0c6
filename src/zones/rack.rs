//! Player racks.
//!
//! A rack is a sparse slot → tile map. Playing a tile leaves its slot empty;
//! a drawn tile takes the first empty slot. Slots wrap onto rows of
//! `slots_per_row` when laid out on screen.

use im::OrdMap;

use super::board::{pixel_offset, PixelRect};
use crate::core::{RackConfig, Tile};

/// One player's rack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rack {
    slots: OrdMap<u16, Tile>,
}

impl Rack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tiles on the rack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Tile in a slot.
    #[must_use]
    pub fn get(&self, slot: u16) -> Option<Tile> {
        self.slots.get(&slot).copied()
    }

    /// Slot holding a tile.
    #[must_use]
    pub fn slot_of(&self, tile: Tile) -> Option<u16> {
        self.slots
            .iter()
            .find(|(_, &t)| t == tile)
            .map(|(&slot, _)| slot)
    }

    /// Tiles in slot order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.slots.values().copied()
    }

    /// (slot, tile) pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, Tile)> + '_ {
        self.slots.iter().map(|(&slot, &tile)| (slot, tile))
    }

    /// Lowest empty slot.
    #[must_use]
    pub fn first_free_slot(&self) -> u16 {
        let mut expected = 0u16;
        for &slot in self.slots.keys() {
            if slot != expected {
                break;
            }
            expected += 1;
        }
        expected
    }

    pub(crate) fn insert(&mut self, slot: u16, tile: Tile) {
        self.slots.insert(slot, tile);
    }

    pub(crate) fn remove(&mut self, slot: u16) -> Option<Tile> {
        self.slots.remove(&slot)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Pixel layout of the human rack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RackGrid {
    config: RackConfig,
}

impl RackGrid {
    #[must_use]
    pub fn new(config: RackConfig) -> Self {
        Self { config }
    }

    /// (row, column) of a slot on the rack.
    #[must_use]
    pub fn position(&self, slot: u16) -> (u16, u16) {
        let per_row = self.config.slots_per_row.max(1);
        (slot / per_row, slot % per_row)
    }

    /// Pixel rect of a slot. Slots past the configured rows keep wrapping
    /// downwards.
    #[must_use]
    pub fn slot_rect(&self, slot: u16) -> PixelRect {
        let (row, col) = self.position(slot);
        PixelRect::new(
            pixel_offset(self.config.origin_x, self.config.slot_width, col),
            pixel_offset(self.config.origin_y, self.config.slot_height, row),
            self.config.slot_width,
            self.config.slot_height,
        )
    }
}
