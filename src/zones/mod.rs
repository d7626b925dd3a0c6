//! Where tiles live: rack slots and board cells.
//!
//! ## Key Types
//!
//! - `Location`: exactly one rack slot or one board cell
//! - `Cell`: a board grid cell, ordered row-major
//! - `BoardGrid`: pixel ↔ cell geometry of the play area
//! - `Rack` / `RackGrid`: sparse per-player slots and their pixel layout
//! - `Placement`: the tile → location index, cheap to snapshot

pub mod board;
pub mod location;
pub mod placement;
pub mod rack;

pub use board::{BoardGrid, PixelRect};
pub use location::{Cell, Location};
pub use placement::Placement;
pub use rack::{Rack, RackGrid};
