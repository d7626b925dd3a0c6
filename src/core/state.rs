//! Game state: committed snapshot, tentative placement, pending moves.
//!
//! ## GameState
//!
//! The single owner of everything mutable in a game:
//! - `placement`: where every tile is right now, tentative moves included
//! - `snapshot`: the last committed placement, restored by rollback
//! - `pending`: tiles moved this turn and their proposed locations
//! - the undealt pool and the seeded RNG
//!
//! Snapshots are `im` persistent maps, so committing and rolling back are
//! O(1) clones rather than deep copies.

use im::OrdMap;
use tracing::{debug, info, warn};

use super::config::GameConfig;
use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use super::pool::TilePool;
use super::rng::GameRng;
use super::tile::Tile;
use crate::rules::{find_clusters, Cluster, ScanRegion};
use crate::zones::{BoardGrid, Location, PixelRect, Placement, RackGrid};

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    // === Configuration ===
    config: GameConfig,
    board: BoardGrid,
    rack_grid: RackGrid,

    // === Tile positions ===
    /// Current positions, tentative moves included.
    placement: Placement,

    /// Last committed positions.
    snapshot: Placement,

    /// Tiles moved since the last commit, with their proposed locations.
    pending: OrdMap<Tile, Location>,

    // === Pool ===
    pool: TilePool,
    rng: GameRng,

    // === Progression ===
    /// Whose turn it is.
    active_player: PlayerId,

    /// Turn number (starts at 1).
    turn_number: u32,

    winner: Option<PlayerId>,
}

impl GameState {
    /// Put the dealt hands on the racks, slot 0 upwards, and commit.
    ///
    /// A tile may appear only once across the hands and the pool; a repeat
    /// fails with `TileInPlay`.
    pub fn new(
        config: GameConfig,
        hands: PlayerMap<Vec<Tile>>,
        pool: TilePool,
        rng: GameRng,
    ) -> Result<Self, EngineError> {
        let mut placement = Placement::new();
        for (player, hand) in hands.iter() {
            for (slot, &tile) in hand.iter().enumerate() {
                placement.place(tile, Location::rack(player, slot as u16))?;
            }
        }
        if let Some((tile, at)) = pool
            .iter()
            .find_map(|tile| placement.location(tile).map(|at| (tile, at)))
        {
            return Err(EngineError::TileInPlay { tile, at });
        }

        Ok(Self {
            board: BoardGrid::new(config.board),
            rack_grid: RackGrid::new(config.rack),
            config,
            snapshot: placement.clone(),
            placement,
            pending: OrdMap::new(),
            pool,
            rng,
            active_player: PlayerId::HUMAN,
            turn_number: 1,
            winner: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &BoardGrid {
        &self.board
    }

    #[must_use]
    pub fn rack_grid(&self) -> &RackGrid {
        &self.rack_grid
    }

    /// Current positions, tentative moves included.
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Last committed positions.
    #[must_use]
    pub fn snapshot(&self) -> &Placement {
        &self.snapshot
    }

    #[must_use]
    pub fn pool(&self) -> &TilePool {
        &self.pool
    }

    /// Pending moves in tile order.
    pub fn pending(&self) -> impl Iterator<Item = (Tile, Location)> + '_ {
        self.pending.iter().map(|(&tile, &location)| (tile, location))
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether a tile was moved since the last commit.
    #[must_use]
    pub fn is_tentative(&self, tile: Tile) -> bool {
        self.pending.contains_key(&tile)
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    // === Mutation ===

    /// Move a tile and record the move as pending.
    ///
    /// Moving a tile back to its committed location drops the pending entry.
    pub fn relocate(&mut self, tile: Tile, to: Location) -> Result<Location, EngineError> {
        if let Location::Board { cell } = to {
            if !self.board.contains(cell) {
                return Err(EngineError::OutOfBounds { cell });
            }
        }

        let from = self.placement.relocate(tile, to)?;
        if self.snapshot.location(tile) == Some(to) {
            self.pending.remove(&tile);
        } else {
            self.pending.insert(tile, to);
        }
        Ok(from)
    }

    /// Draw one pool tile into the first free slot of `player`'s rack.
    ///
    /// Drawn tiles are committed at once.
    pub fn draw(&mut self, player: PlayerId) -> Result<Tile, EngineError> {
        let tile = self.pool.draw(&mut self.rng)?;
        let at = Location::rack(player, self.snapshot.rack(player).first_free_slot());
        self.snapshot.place(tile, at)?;
        self.placement.place(tile, at)?;
        debug!(%player, %tile, %at, remaining = self.pool.remaining(), "drew tile");
        Ok(tile)
    }

    /// Make the current placement the committed one.
    ///
    /// Returns the number of tiles whose move was committed.
    pub fn commit(&mut self) -> usize {
        let moved = self.pending.len();
        self.snapshot = self.placement.clone();
        self.pending.clear();
        info!(moved, board = self.snapshot.board_len(), "committed placement");
        moved
    }

    /// Put every tile back at its committed location.
    ///
    /// Returns the number of tiles that moved back.
    pub fn rollback(&mut self) -> usize {
        let restored = self.pending.len();
        self.placement = self.snapshot.clone();
        self.pending.clear();
        if restored > 0 {
            warn!(restored, "rolled back pending moves");
        }
        restored
    }

    /// Re-slot a rack in both the current and the committed placement.
    ///
    /// The committed rack is arranged first; every rack tile without a
    /// pending move then takes the same slot in the current placement.
    /// Pending tiles still on the rack move to the first free slots.
    pub fn arrange_rack(&mut self, player: PlayerId, order: &[Tile]) {
        self.snapshot.arrange_rack(player, order);
        let committed: Vec<(u16, Tile)> = self
            .snapshot
            .rack(player)
            .iter()
            .filter(|(_, tile)| !self.pending.contains_key(tile))
            .collect();
        self.placement.reslot_rack(player, &committed);

        let moved: Vec<Tile> = self.pending.keys().copied().collect();
        for tile in moved {
            match self.placement.location(tile) {
                Some(at) if self.snapshot.location(tile) == Some(at) => {
                    self.pending.remove(&tile);
                }
                Some(at) => {
                    self.pending.insert(tile, at);
                }
                None => {}
            }
        }
    }

    /// Clusters on the current board, row-major.
    #[must_use]
    pub fn clusters(&self) -> Vec<Cluster> {
        find_clusters(self.placement.board_tiles(), &ScanRegion::whole(&self.board))
    }

    /// Pixel rect of a location. The opponent's rack has no on-screen
    /// layout, so its slots have none.
    #[must_use]
    pub fn location_rect(&self, location: Location) -> Option<PixelRect> {
        match location {
            Location::Board { cell } => Some(self.board.cell_rect(cell)),
            Location::Rack { player, slot } if player.is_human() => {
                Some(self.rack_grid.slot_rect(slot))
            }
            Location::Rack { .. } => None,
        }
    }

    // === Progression ===

    /// Hand the turn to the other seat.
    pub fn pass_turn(&mut self) {
        self.active_player = self.active_player.other();
        self.turn_number += 1;
    }

    /// Give the turn to `player` without counting a new turn.
    pub fn set_active(&mut self, player: PlayerId) {
        self.active_player = player;
    }

    /// Record a winner once a committed rack is empty.
    ///
    /// The active player is checked first.
    pub fn settle_winner(&mut self) -> Option<PlayerId> {
        if self.winner.is_none() {
            let active = self.active_player;
            self.winner = [active, active.other()]
                .into_iter()
                .find(|&p| self.snapshot.rack(p).is_empty());
            if let Some(winner) = self.winner {
                info!(%winner, turn = self.turn_number, "game over");
            }
        }
        self.winner
    }
}
