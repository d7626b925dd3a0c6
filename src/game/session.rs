//! The engine's single entry point.
//!
//! A `Session` owns the game state, the human's drag machine and the
//! opponent policy. The presentation layer feeds it pointer events and
//! requests, and reads a [`Frame`] back after each step. Nothing else
//! mutates the state.

use tracing::{debug, info};

use super::events::{DrawOutcome, GameEnd, Request, StepReport, TurnOutcome};
use super::frame::Frame;
use crate::core::{EngineError, GameState, PlayerId};
use crate::play::{
    auto_play, sort_by_groups, sort_by_runs, take_turn, CancelReason, DragMachine, OpponentPolicy,
    PointerEvent,
};
use crate::rules::{validate, Commit, ValidationFailure};

/// A running game.
pub struct Session {
    state: GameState,
    drag: DragMachine,
    policy: Box<dyn OpponentPolicy>,
    reveal_opponent: bool,
    closed: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("reveal_opponent", &self.reveal_opponent)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) fn new(state: GameState, policy: Box<dyn OpponentPolicy>) -> Self {
        Self {
            state,
            drag: DragMachine::new(),
            policy,
            reveal_opponent: false,
            closed: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn drag(&self) -> &DragMachine {
        &self.drag
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Rendering view after the last step.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state, &self.drag, self.reveal_opponent)
    }

    /// Process one pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<StepReport, EngineError> {
        self.ensure_running()?;
        let transition = self.drag.apply(&mut self.state, event);
        Ok(StepReport {
            drag: Some(transition),
            ..StepReport::default()
        })
    }

    /// Process one request.
    ///
    /// While a drag is active, or once the game is over, only `Quit` is
    /// accepted.
    pub fn handle_request(&mut self, request: Request) -> Result<StepReport, EngineError> {
        if self.closed {
            return Err(EngineError::SessionClosed);
        }
        if request != Request::Quit {
            self.ensure_running()?;
            if self.drag.is_dragging() {
                return Err(EngineError::DragInProgress);
            }
        }

        debug!(?request, "handling request");
        let mut report = StepReport::default();
        match request {
            Request::BeginTurn => {
                let restored = self.state.rollback();
                self.state.set_active(PlayerId::HUMAN);
                report.turn = Some(TurnOutcome {
                    rolled_back: restored > 0,
                    ..TurnOutcome::default()
                });
            }
            Request::Validate => {
                let result = validate(&mut self.state);
                self.finish_transaction(result, &mut report);
            }
            Request::AutoPlay => {
                let result = auto_play(&mut self.state, PlayerId::HUMAN);
                self.finish_transaction(result, &mut report);
            }
            Request::SortByGroups => sort_by_groups(&mut self.state, PlayerId::HUMAN),
            Request::SortByRuns => sort_by_runs(&mut self.state, PlayerId::HUMAN),
            Request::DrawTile => {
                let restored = self.state.rollback();
                report.turn = Some(TurnOutcome {
                    rolled_back: restored > 0,
                    ..TurnOutcome::default()
                });
                report.draw = Some(match self.state.draw(PlayerId::HUMAN) {
                    Ok(tile) => DrawOutcome::Drew { tile },
                    Err(_) => DrawOutcome::PoolExhausted,
                });
                self.opponent_turn(&mut report);
            }
            Request::Rollback => {
                let restored = self.state.rollback();
                report.turn = Some(TurnOutcome {
                    rolled_back: restored > 0,
                    ..TurnOutcome::default()
                });
            }
            Request::RevealOpponent(reveal) => self.reveal_opponent = reveal,
            Request::Quit => report = self.quit(),
        }
        Ok(report)
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        if self.closed {
            return Err(EngineError::SessionClosed);
        }
        match self.state.winner() {
            Some(winner) => Err(EngineError::GameOver { winner }),
            None => Ok(()),
        }
    }

    fn quit(&mut self) -> StepReport {
        let drag = self.drag.cancel(CancelReason::Quit);
        self.closed = true;
        info!(turn = self.state.turn_number(), "session closed");
        StepReport {
            drag,
            ..StepReport::default()
        }
    }

    /// Report a validation result; a commit that played tiles either ends
    /// the game or hands the turn to the opponent.
    fn finish_transaction(
        &mut self,
        result: Result<Commit, ValidationFailure>,
        report: &mut StepReport,
    ) {
        match result {
            Ok(commit) => {
                report.turn = Some(TurnOutcome {
                    validated: true,
                    tiles_played: commit.tiles_played,
                    ..TurnOutcome::default()
                });
                if commit.tiles_played == 0 {
                    return;
                }
                if let Some(winner) = self.state.settle_winner() {
                    report.game_end = Some(GameEnd { winner });
                    return;
                }
                self.opponent_turn(report);
            }
            Err(failure) => {
                report.turn = Some(TurnOutcome {
                    rolled_back: true,
                    failure: Some(failure),
                    ..TurnOutcome::default()
                });
            }
        }
    }

    fn opponent_turn(&mut self, report: &mut StepReport) {
        self.state.pass_turn();
        report.opponent = Some(take_turn(&mut self.state, self.policy.as_ref()));
        if let Some(winner) = self.state.settle_winner() {
            report.game_end = Some(GameEnd { winner });
            return;
        }
        self.state.pass_turn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardConfig, Color, Tile};
    use crate::game::GameBuilder;
    use crate::play::{DragEffect, OpponentMove};
    use crate::zones::Location;

    fn t(color: Color, number: u8) -> Tile {
        Tile::new(color, number, 0).unwrap()
    }

    fn session(human: Vec<Tile>, opponent: Vec<Tile>) -> Session {
        GameBuilder::new()
            .seed(17)
            .board(BoardConfig::grid(4, 10))
            .hands(human, opponent)
            .build()
            .unwrap()
    }

    fn drag_to(session: &mut Session, tile: Tile, row: u16, col: u16) {
        let state = session.state();
        let from = state.placement().location(tile).unwrap();
        let (x, y) = state.location_rect(from).unwrap().center();
        let (bx, by) = state.location_rect(Location::board(row, col)).unwrap().center();
        session.handle_pointer(PointerEvent::down(x, y)).unwrap();
        session.handle_pointer(PointerEvent::move_to(bx, by)).unwrap();
        let report = session.handle_pointer(PointerEvent::up(bx, by)).unwrap();
        assert!(matches!(
            report.drag.map(|d| d.effect),
            Some(DragEffect::Snapped { .. })
        ));
    }

    #[test]
    fn test_requests_rejected_while_dragging() {
        let tile = t(Color::Red, 1);
        let mut session = session(vec![tile, t(Color::Red, 2)], vec![t(Color::Blue, 5)]);
        let (x, y) = session
            .state()
            .location_rect(Location::rack(PlayerId::HUMAN, 0))
            .unwrap()
            .center();
        session.handle_pointer(PointerEvent::down(x, y)).unwrap();

        assert_eq!(
            session.handle_request(Request::Validate),
            Err(EngineError::DragInProgress)
        );
        assert_eq!(
            session.handle_request(Request::SortByRuns),
            Err(EngineError::DragInProgress)
        );

        let report = session.handle_request(Request::Quit).unwrap();
        assert!(matches!(
            report.drag.map(|d| d.effect),
            Some(DragEffect::Cancelled {
                reason: CancelReason::Quit,
                ..
            })
        ));
        assert!(session.is_closed());
        assert_eq!(
            session.handle_pointer(PointerEvent::up(x, y)),
            Err(EngineError::SessionClosed)
        );
        assert_eq!(
            session.handle_request(Request::Quit),
            Err(EngineError::SessionClosed)
        );
    }

    #[test]
    fn test_validate_runs_opponent_after_play() {
        let run = [t(Color::Red, 1), t(Color::Red, 2), t(Color::Red, 3)];
        let mut hand = run.to_vec();
        hand.push(t(Color::Green, 9));
        let mut session = session(hand, vec![t(Color::Blue, 5), t(Color::Yellow, 12)]);

        for (i, &tile) in run.iter().enumerate() {
            drag_to(&mut session, tile, 0, i as u16);
        }
        let report = session.handle_request(Request::Validate).unwrap();

        let turn = report.turn.unwrap();
        assert!(turn.validated);
        assert_eq!(turn.tiles_played, 3);
        assert!(matches!(report.opponent, Some(OpponentMove::Drew { .. })));
        assert_eq!(session.state().placement().rack(PlayerId::OPPONENT).len(), 3);
        assert_eq!(session.state().active_player(), PlayerId::HUMAN);
        assert_eq!(session.state().turn_number(), 3);
    }

    #[test]
    fn test_validate_with_nothing_pending_skips_opponent() {
        let mut session = session(vec![t(Color::Red, 1)], vec![t(Color::Blue, 5)]);
        let report = session.handle_request(Request::Validate).unwrap();
        assert_eq!(
            report.turn,
            Some(TurnOutcome {
                validated: true,
                ..TurnOutcome::default()
            })
        );
        assert_eq!(report.opponent, None);
    }

    #[test]
    fn test_rollback_request() {
        let tile = t(Color::Red, 1);
        let mut session = session(vec![tile, t(Color::Red, 7)], vec![t(Color::Blue, 5)]);
        drag_to(&mut session, tile, 2, 2);

        let report = session.handle_request(Request::Rollback).unwrap();

        assert!(report.turn.unwrap().rolled_back);
        assert_eq!(
            session.state().placement().location(tile),
            Some(Location::rack(PlayerId::HUMAN, 0))
        );
    }

    #[test]
    fn test_draw_tile_ends_turn() {
        let mut session = session(vec![t(Color::Red, 1)], vec![t(Color::Blue, 5)]);
        let pool = session.state().pool().remaining();

        let report = session.handle_request(Request::DrawTile).unwrap();

        assert!(matches!(report.draw, Some(DrawOutcome::Drew { .. })));
        assert!(matches!(report.opponent, Some(OpponentMove::Drew { .. })));
        assert_eq!(session.state().pool().remaining(), pool - 2);
        assert_eq!(session.state().placement().rack(PlayerId::HUMAN).len(), 2);
    }

    #[test]
    fn test_game_over_blocks_input() {
        let run = [t(Color::Red, 1), t(Color::Red, 2), t(Color::Red, 3)];
        let mut session = session(run.to_vec(), vec![t(Color::Blue, 5)]);
        for (i, &tile) in run.iter().enumerate() {
            drag_to(&mut session, tile, 1, 4 + i as u16);
        }

        let report = session.handle_request(Request::Validate).unwrap();

        assert_eq!(
            report.game_end,
            Some(GameEnd {
                winner: PlayerId::HUMAN
            })
        );
        assert_eq!(report.opponent, None);
        let over = Err(EngineError::GameOver {
            winner: PlayerId::HUMAN,
        });
        assert_eq!(session.handle_request(Request::Validate), over);
        assert_eq!(session.handle_pointer(PointerEvent::down(0, 0)), over);
        assert!(session.handle_request(Request::Quit).is_ok());
    }

    #[test]
    fn test_frame_hides_opponent_until_revealed() {
        let opponent = vec![t(Color::Blue, 5), t(Color::Blue, 6)];
        let mut session = session(vec![t(Color::Red, 1)], opponent.clone());

        let frame = session.frame();
        assert_eq!(frame.tiles.len(), 1);
        assert_eq!(frame.opponent_rack_len, 2);
        assert!(frame.tile(opponent[0]).is_none());

        session
            .handle_request(Request::RevealOpponent(true))
            .unwrap();
        let frame = session.frame();
        assert_eq!(frame.tiles.len(), 3);
        let view = frame.tile(opponent[1]).unwrap();
        assert_eq!(view.location, Location::rack(PlayerId::OPPONENT, 1));
        assert_eq!(view.rect, None);
    }

    #[test]
    fn test_frame_tracks_drag_and_tentative_tiles() {
        let tile = t(Color::Red, 1);
        let mut session = session(vec![tile, t(Color::Red, 2)], vec![t(Color::Blue, 5)]);
        let rect = session
            .state()
            .location_rect(Location::rack(PlayerId::HUMAN, 0))
            .unwrap();
        let (x, y) = rect.center();

        session.handle_pointer(PointerEvent::down(x, y)).unwrap();
        session
            .handle_pointer(PointerEvent::move_to(x + 30, y - 40))
            .unwrap();
        let view = *session.frame().tile(tile).unwrap();
        assert!(view.dragging);
        assert_eq!(view.rect, Some(rect.moved_to(rect.x + 30, rect.y - 40)));
        session.handle_pointer(PointerEvent::up(-500, -500)).unwrap();

        drag_to(&mut session, tile, 3, 9);
        let view = *session.frame().tile(tile).unwrap();
        assert!(view.tentative);
        assert!(!view.dragging);
        assert_eq!(view.location, Location::board(3, 9));
    }
}
