//! Meld rules.
//!
//! - `meld`: Group / Run classification of one cluster
//! - `grouper`: turns occupied board cells into candidate clusters
//! - `validator`: judges a pending transaction and commits or rolls back

pub mod grouper;
pub mod meld;
pub mod validator;

pub use grouper::{find_clusters, Cluster, ScanRegion};
pub use meld::{classify, Meld, MeldDefect, MeldKind, ValidationFailure};
pub use validator::{judge, validate, Commit};

/// Shortest legal meld.
pub const MIN_MELD_LEN: usize = 3;

/// Longest legal meld.
pub const MAX_MELD_LEN: usize = 5;
