//! Transaction validation.
//!
//! Every cluster that contains a tile moved this turn must be a legal meld.
//! Validation is all-or-nothing: the first failing cluster (row-major) rolls
//! back the whole pending set, valid clusters included.

use tracing::{info, warn};

use super::grouper::Cluster;
use super::meld::{classify, Meld, ValidationFailure};
use crate::core::{GameState, Tile};

/// A successful validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Commit {
    /// Melds formed by this transaction, row-major.
    pub melds: Vec<Meld>,
    /// Tiles moved from a rack onto the board.
    pub tiles_played: usize,
}

/// Judge the clusters that contain at least one pending tile.
///
/// Clusters made only of committed tiles are skipped.
pub fn judge(
    clusters: &[Cluster],
    is_pending: impl Fn(Tile) -> bool,
) -> Result<Vec<Meld>, ValidationFailure> {
    let mut melds = Vec::new();
    for cluster in clusters {
        if !cluster.tiles().any(&is_pending) {
            continue;
        }
        let tiles: Vec<Tile> = cluster.tiles().collect();
        melds.push(classify(&tiles)?);
    }
    Ok(melds)
}

/// Validate the pending transaction and commit it, or roll it back.
///
/// With nothing pending this succeeds without touching the state.
pub fn validate(state: &mut GameState) -> Result<Commit, ValidationFailure> {
    if !state.has_pending() {
        return Ok(Commit::default());
    }

    let clusters = state.clusters();
    let judged = judge(&clusters, |tile| state.is_tentative(tile));
    match judged {
        Ok(melds) => {
            let tiles_played = state
                .pending()
                .filter(|&(tile, to)| {
                    to.is_board()
                        && state
                            .snapshot()
                            .location(tile)
                            .is_some_and(|from| !from.is_board())
                })
                .count();
            state.commit();
            info!(melds = melds.len(), tiles_played, "transaction validated");
            Ok(Commit {
                melds,
                tiles_played,
            })
        }
        Err(failure) => {
            let restored = state.rollback();
            warn!(%failure, restored, "transaction rejected");
            Err(failure)
        }
    }
}
