//! Layout assistant: rack sorting and assisted play.
//!
//! The detectors are looser than the meld rules. A rack pattern needs only
//! two tiles, and runs may be longer than a legal meld. `auto_play` trims
//! patterns to legal melds before placing them, and everything it places
//! still goes through the validator.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Color, GameState, PlayerId, Tile};
use crate::rules::{validate, Commit, ValidationFailure, MAX_MELD_LEN, MIN_MELD_LEN};
use crate::zones::Location;

/// Tiles forming one rack pattern, in placement order.
pub type Pattern = SmallVec<[Tile; MAX_MELD_LEN]>;

/// Same-number tiles with at least two distinct colors.
///
/// One tile per color (the lower instance); patterns come out by ascending
/// number, colors in `Color::ALL` order.
///
/// ```
/// use tile_rummy::core::{Color, Tile};
/// use tile_rummy::play::detect_groups;
///
/// let t = |c, n, i| Tile::new(c, n, i).unwrap();
/// let rack = [t(Color::Red, 5, 0), t(Color::Blue, 5, 0), t(Color::Red, 5, 1), t(Color::Red, 9, 0)];
///
/// let groups = detect_groups(&rack);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].as_slice(), &[t(Color::Blue, 5, 0), t(Color::Red, 5, 0)]);
/// ```
pub fn detect_groups(tiles: &[Tile]) -> Vec<Pattern> {
    let mut by_number: FxHashMap<u8, Vec<Tile>> = FxHashMap::default();
    for &tile in tiles {
        by_number.entry(tile.number()).or_default().push(tile);
    }

    let mut numbers: Vec<u8> = by_number.keys().copied().collect();
    numbers.sort_unstable();

    numbers
        .into_iter()
        .filter_map(|number| {
            let mut same = by_number.remove(&number)?;
            same.sort_unstable();
            same.dedup_by_key(|t| t.color());
            (same.len() >= 2).then(|| same.into_iter().collect())
        })
        .collect()
}

/// Same-color chains of consecutive numbers, at least two long.
///
/// Duplicate numbers count once. Chains come out by color in `Color::ALL`
/// order, then by ascending start number.
pub fn detect_runs(tiles: &[Tile]) -> Vec<Pattern> {
    let mut by_color: FxHashMap<Color, Vec<Tile>> = FxHashMap::default();
    for &tile in tiles {
        by_color.entry(tile.color()).or_default().push(tile);
    }

    let mut runs = Vec::new();
    for color in Color::ALL {
        let Some(mut same) = by_color.remove(&color) else {
            continue;
        };
        same.sort_unstable();
        same.dedup_by_key(|t| t.number());

        let mut chain = Pattern::new();
        for tile in same {
            if let Some(last) = chain.last() {
                if tile.number() != last.number() + 1 {
                    if chain.len() >= 2 {
                        runs.push(std::mem::take(&mut chain));
                    }
                    chain.clear();
                }
            }
            chain.push(tile);
        }
        if chain.len() >= 2 {
            runs.push(chain);
        }
    }
    runs
}

/// Move detected groups to the front of `player`'s rack.
pub fn sort_by_groups(state: &mut GameState, player: PlayerId) {
    let rack: Vec<Tile> = state.placement().rack(player).tiles().collect();
    let order: Vec<Tile> = detect_groups(&rack).into_iter().flatten().collect();
    debug!(%player, matched = order.len(), "sorted rack by groups");
    state.arrange_rack(player, &order);
}

/// Move run tiles to the front of `player`'s rack, by ascending number.
pub fn sort_by_runs(state: &mut GameState, player: PlayerId) {
    let rack: Vec<Tile> = state.placement().rack(player).tiles().collect();
    let mut order: Vec<Tile> = detect_runs(&rack).into_iter().flatten().collect();
    order.sort_by_key(|t| t.number());
    debug!(%player, matched = order.len(), "sorted rack by runs");
    state.arrange_rack(player, &order);
}

/// Split a chain into near-equal legal-length pieces.
///
/// Chains shorter than a meld give nothing; chains up to five come back
/// whole.
#[must_use]
pub fn split_chain(chain: &[Tile]) -> Vec<Pattern> {
    if chain.len() < MIN_MELD_LEN {
        return Vec::new();
    }
    let pieces = chain.len().div_ceil(MAX_MELD_LEN);
    let base = chain.len() / pieces;
    let extra = chain.len() % pieces;

    let mut out = Vec::with_capacity(pieces);
    let mut start = 0;
    for i in 0..pieces {
        let len = base + usize::from(i < extra);
        out.push(chain[start..start + len].iter().copied().collect());
        start += len;
    }
    out
}

/// Legal melds available in a rack: groups first, then runs over the tiles
/// the groups did not use.
#[must_use]
pub fn plan_melds(tiles: &[Tile]) -> Vec<Pattern> {
    let mut melds: Vec<Pattern> = detect_groups(tiles)
        .into_iter()
        .filter(|g| g.len() >= MIN_MELD_LEN)
        .collect();

    let remaining: Vec<Tile> = tiles
        .iter()
        .copied()
        .filter(|t| !melds.iter().any(|m| m.contains(t)))
        .collect();
    for run in detect_runs(&remaining) {
        melds.extend(split_chain(&run));
    }
    melds
}

/// Place every planned meld from `player`'s rack and validate.
///
/// Melds go into free board spans with a gap cell on either side. Melds that
/// find no span stay on the rack. Any moves already pending this turn are
/// validated together with the placed melds.
pub fn auto_play(state: &mut GameState, player: PlayerId) -> Result<Commit, ValidationFailure> {
    let rack: Vec<Tile> = state.placement().rack(player).tiles().collect();

    for meld in plan_melds(&rack) {
        let grid = *state.board();
        let Some(start) = grid.find_free_span(meld.len(), |cell| state.placement().is_free(cell))
        else {
            debug!(len = meld.len(), "no free span for meld");
            continue;
        };
        for (i, &tile) in meld.iter().enumerate() {
            let cell = start.right(i as u16);
            if let Err(error) = state.relocate(tile, Location::from(cell)) {
                warn!(%error, %tile, "auto-play placement failed");
            }
        }
    }

    validate(state)
}
