//! Turn-level play: the human's drag transaction, the automated opponent
//! and the layout assistant.

pub mod layout;
pub mod opponent;
pub mod transaction;

pub use layout::{
    auto_play, detect_groups, detect_runs, plan_melds, sort_by_groups, sort_by_runs, split_chain,
    Pattern,
};
pub use opponent::{policy_for, take_turn, MeldPolicy, OpponentMove, OpponentPolicy, ParityRunPolicy};
pub use transaction::{
    CancelReason, DragEffect, DragMachine, DragNoopReason, DragState, DragTransition, PointerEvent,
    PointerKind,
};
