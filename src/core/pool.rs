//! The face-down tile pool.
//!
//! Tiles in the pool have no location yet; dealing and drawing take them
//! out uniformly at random without replacement.

use tracing::warn;

use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use super::tile::{create_initial_pool, Tile};

/// Undealt tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilePool {
    tiles: Vec<Tile>,
}

impl TilePool {
    /// A full 150-tile set.
    #[must_use]
    pub fn full() -> Self {
        Self {
            tiles: create_initial_pool(),
        }
    }

    /// A full set minus the given tiles (used for prearranged hands).
    #[must_use]
    pub fn without(taken: &[Tile]) -> Self {
        let mut tiles = create_initial_pool();
        tiles.retain(|t| !taken.contains(t));
        Self { tiles }
    }

    /// Tiles left to draw.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    /// Iterate over undealt tiles (order carries no meaning).
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Draw one tile uniformly at random.
    pub fn draw(&mut self, rng: &mut GameRng) -> Result<Tile, EngineError> {
        if self.tiles.is_empty() {
            warn!("draw requested from an empty pool");
            return Err(EngineError::ExhaustedPool {
                requested: 1,
                remaining: 0,
            });
        }
        let index = rng.gen_index(self.tiles.len());
        Ok(self.tiles.swap_remove(index))
    }

    /// Deal `counts[player]` tiles to each seat.
    ///
    /// Either every seat gets its full count or the pool is left untouched.
    pub fn deal(
        &mut self,
        counts: &PlayerMap<usize>,
        rng: &mut GameRng,
    ) -> Result<PlayerMap<Vec<Tile>>, EngineError> {
        let requested: usize = counts.iter().map(|(_, &n)| n).sum();
        if requested > self.tiles.len() {
            warn!(requested, remaining = self.tiles.len(), "deal exceeds pool");
            return Err(EngineError::ExhaustedPool {
                requested,
                remaining: self.tiles.len(),
            });
        }

        let mut hands: PlayerMap<Vec<Tile>> = PlayerMap::with_default();
        for player in PlayerId::all() {
            for _ in 0..counts[player] {
                let tile = self.draw(rng)?;
                hands[player].push(tile);
            }
        }
        Ok(hands)
    }
}
