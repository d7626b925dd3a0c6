//! The automated opponent.
//!
//! A policy looks at the opponent's rack and names at most one meld to play.
//! `take_turn` places that meld into the first free board span and commits
//! it, or draws one tile when there is nothing to play or nowhere to put it.
//!
//! Meld choice never consumes randomness: the same rack always produces the
//! same decision. Only the identity of a drawn tile depends on the RNG.

use serde::Serialize;
use tracing::{info, warn};

use super::layout::{plan_melds, Pattern};
use crate::core::{Color, EngineError, GameState, OpponentStrategy, PlayerId, Tile};
use crate::rules::{MAX_MELD_LEN, MIN_MELD_LEN};
use crate::zones::{Cell, Location};

/// Chooses the opponent's play.
pub trait OpponentPolicy: Send + Sync {
    /// The tiles to lay down, in board order, or `None` to draw instead.
    fn choose_meld(&self, rack: &[Tile]) -> Option<Pattern>;
}

/// Same-color chains stepping by two within one number parity.
///
/// Even-numbered tiles are searched first, colors in `Color::ALL` order.
/// A chain counts only if its maximal length is 3 to 5; the play is not
/// always a legal Run.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParityRunPolicy;

impl OpponentPolicy for ParityRunPolicy {
    fn choose_meld(&self, rack: &[Tile]) -> Option<Pattern> {
        for even in [true, false] {
            for color in Color::ALL {
                let mut subset: Vec<Tile> = rack
                    .iter()
                    .copied()
                    .filter(|t| t.is_even() == even && t.color() == color)
                    .collect();
                subset.sort_unstable();

                if let Some(chain) = maximal_chains(&subset, 2)
                    .into_iter()
                    .find(|c| (MIN_MELD_LEN..=MAX_MELD_LEN).contains(&c.len()))
                {
                    return Some(chain);
                }
            }
        }
        None
    }
}

/// First legal Group, else first legal Run, as the layout assistant finds
/// them.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeldPolicy;

impl OpponentPolicy for MeldPolicy {
    fn choose_meld(&self, rack: &[Tile]) -> Option<Pattern> {
        let mut sorted = rack.to_vec();
        sorted.sort_unstable();
        plan_melds(&sorted).into_iter().next()
    }
}

/// Policy for a configured strategy.
#[must_use]
pub fn policy_for(strategy: OpponentStrategy) -> Box<dyn OpponentPolicy> {
    match strategy {
        OpponentStrategy::ParityRuns => Box::new(ParityRunPolicy),
        OpponentStrategy::Melds => Box::new(MeldPolicy),
    }
}

/// Maximal chains in sorted same-color tiles whose numbers rise by `step`.
///
/// Any other difference, a repeated number included, ends the chain.
fn maximal_chains(sorted: &[Tile], step: u8) -> Vec<Pattern> {
    let mut chains = Vec::new();
    let mut chain = Pattern::new();
    for &tile in sorted {
        if let Some(last) = chain.last() {
            if tile.number() != last.number() + step {
                chains.push(std::mem::take(&mut chain));
            }
        }
        chain.push(tile);
    }
    if !chain.is_empty() {
        chains.push(chain);
    }
    chains
}

/// What the opponent did on its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpponentMove {
    /// Laid down `tiles` starting at `start`.
    Played { tiles: Vec<Tile>, start: Cell },
    /// Drew one tile.
    Drew { tile: Tile },
    /// Wanted to draw but the pool was empty.
    Passed,
}

/// Play the opponent's turn against the committed board.
///
/// Pending moves, if any, are rolled back first.
pub fn take_turn(state: &mut GameState, policy: &dyn OpponentPolicy) -> OpponentMove {
    let player = PlayerId::OPPONENT;
    state.rollback();

    let rack: Vec<Tile> = state.placement().rack(player).tiles().collect();
    if let Some(meld) = policy.choose_meld(&rack) {
        let grid = *state.board();
        let span = grid.find_free_span(meld.len(), |cell| state.placement().is_free(cell));
        match span {
            Some(start) => match place(state, &meld, start) {
                Ok(()) => {
                    state.commit();
                    info!(tiles = meld.len(), %start, "opponent played");
                    return OpponentMove::Played {
                        tiles: meld.to_vec(),
                        start,
                    };
                }
                Err(error) => {
                    warn!(%error, "opponent placement failed");
                    state.rollback();
                }
            },
            None => info!(tiles = meld.len(), "no room on the board for opponent meld"),
        }
    }

    match state.draw(player) {
        Ok(tile) => {
            info!(rack = state.placement().rack(player).len(), "opponent drew");
            OpponentMove::Drew { tile }
        }
        Err(error) => {
            warn!(%error, "opponent passes");
            OpponentMove::Passed
        }
    }
}

fn place(state: &mut GameState, meld: &[Tile], start: Cell) -> Result<(), EngineError> {
    for (i, &tile) in meld.iter().enumerate() {
        state.relocate(tile, Location::from(start.right(i as u16)))?;
    }
    Ok(())
}
