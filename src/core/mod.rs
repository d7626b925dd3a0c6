//! Core engine types: tiles, seats, pool, state, RNG, configuration, errors.
//!
//! Everything above this module (rules, play, game) works in terms of these
//! types and never reaches into presentation concerns.

pub mod config;
pub mod error;
pub mod player;
pub mod pool;
pub mod rng;
pub mod state;
pub mod tile;

pub use config::{BoardConfig, ConfigError, GameConfig, OpponentStrategy, RackConfig};
pub use error::EngineError;
pub use player::{PlayerId, PlayerMap, SEAT_COUNT};
pub use pool::TilePool;
pub use rng::GameRng;
pub use state::GameState;
pub use tile::{create_initial_pool, Color, Tile, POOL_SIZE};
