//! Group / Run classification.
//!
//! A cluster of 3–5 tiles is a **Group** when every tile shows the same
//! number and no color repeats, or a **Run** when every tile has the same
//! color and the numbers step up by exactly one from left to right.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

use super::{MAX_MELD_LEN, MIN_MELD_LEN};
use crate::core::Tile;

/// Legal meld shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    Group,
    Run,
}

/// A classified, legal meld.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Meld {
    kind: MeldKind,
    tiles: SmallVec<[Tile; MAX_MELD_LEN]>,
}

impl Meld {
    #[must_use]
    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    /// Tiles in board order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Why a cluster is not a meld.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldDefect {
    /// More than five tiles.
    TooLong { len: usize },
    /// Same number, but a color appears twice.
    RepeatedColor,
    /// Same color, but the numbers do not step up by one.
    NotConsecutive,
    /// Neither a shared number nor a shared color.
    MixedShape,
}

impl fmt::Display for MeldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { len } => write!(f, "{len} tiles, at most {MAX_MELD_LEN} allowed"),
            Self::RepeatedColor => write!(f, "a color repeats within the group"),
            Self::NotConsecutive => write!(f, "numbers are not consecutive"),
            Self::MixedShape => write!(f, "tiles share neither number nor color"),
        }
    }
}

/// Validation outcome for a rejected transaction.
///
/// Neither case is fatal: the whole transaction rolls back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    /// One or two adjacent tiles: not yet a meld.
    IncompleteCluster { size: usize },
    /// The cluster is long enough but has an illegal shape.
    InvalidMeld { reason: MeldDefect },
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteCluster { size } => write!(
                f,
                "incomplete cluster of {size} tile(s), a meld needs at least {MIN_MELD_LEN}"
            ),
            Self::InvalidMeld { reason } => write!(f, "invalid meld: {reason}"),
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// Classify a cluster given in board (left-to-right) order.
///
/// ```
/// use tile_rummy::core::{Color, Tile};
/// use tile_rummy::rules::{classify, MeldKind};
///
/// let run = [
///     Tile::new(Color::Red, 1, 0).unwrap(),
///     Tile::new(Color::Red, 2, 0).unwrap(),
///     Tile::new(Color::Red, 3, 0).unwrap(),
/// ];
/// assert_eq!(classify(&run).unwrap().kind(), MeldKind::Run);
/// ```
pub fn classify(tiles: &[Tile]) -> Result<Meld, ValidationFailure> {
    let len = tiles.len();
    if len < MIN_MELD_LEN {
        return Err(ValidationFailure::IncompleteCluster { size: len });
    }
    if len > MAX_MELD_LEN {
        return Err(ValidationFailure::InvalidMeld {
            reason: MeldDefect::TooLong { len },
        });
    }

    let first = tiles[0];
    let kind = if tiles.iter().all(|t| t.number() == first.number()) {
        let distinct_colors = tiles
            .iter()
            .enumerate()
            .all(|(i, a)| tiles[i + 1..].iter().all(|b| a.color() != b.color()));
        if !distinct_colors {
            return Err(ValidationFailure::InvalidMeld {
                reason: MeldDefect::RepeatedColor,
            });
        }
        MeldKind::Group
    } else if tiles.iter().all(|t| t.color() == first.color()) {
        let consecutive = tiles
            .windows(2)
            .all(|pair| pair[1].number() == pair[0].number() + 1);
        if !consecutive {
            return Err(ValidationFailure::InvalidMeld {
                reason: MeldDefect::NotConsecutive,
            });
        }
        MeldKind::Run
    } else {
        return Err(ValidationFailure::InvalidMeld {
            reason: MeldDefect::MixedShape,
        });
    };

    Ok(Meld {
        kind,
        tiles: tiles.iter().copied().collect(),
    })
}
