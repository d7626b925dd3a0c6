//! The session layer: construction, input handling and rendering views.

pub mod builder;
pub mod events;
pub mod frame;
pub mod session;

pub use builder::GameBuilder;
pub use events::{DrawOutcome, GameEnd, Request, StepReport, TurnOutcome};
pub use frame::{Frame, TileView};
pub use session::Session;
