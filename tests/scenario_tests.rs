//! End-to-end scenarios driven through the session the way a
//! presentation layer would: pointer events at rendered tile rects,
//! then requests.

use tile_rummy::core::{BoardConfig, Color, PlayerId, Tile};
use tile_rummy::game::{GameBuilder, GameEnd, Request, Session};
use tile_rummy::play::{DragEffect, OpponentMove, PointerEvent};
use tile_rummy::rules::{MeldDefect, ValidationFailure};
use tile_rummy::zones::Location;

fn t(color: Color, number: u8) -> Tile {
    Tile::new(color, number, 0).unwrap()
}

fn session(human: Vec<Tile>, opponent: Vec<Tile>) -> Session {
    GameBuilder::new()
        .seed(2024)
        .board(BoardConfig::grid(5, 12).at(40, 20))
        .hands(human, opponent)
        .build()
        .unwrap()
}

/// Drag `tile` from wherever it is rendered to a board cell.
fn drag_to_board(session: &mut Session, tile: Tile, row: u16, col: u16) {
    let from = session
        .frame()
        .tile(tile)
        .and_then(|view| view.rect)
        .expect("tile should be rendered");
    let to = session
        .state()
        .location_rect(Location::board(row, col))
        .unwrap();
    let (x, y) = from.center();
    let (tx, ty) = to.center();

    let down = session.handle_pointer(PointerEvent::down(x, y)).unwrap();
    assert!(matches!(
        down.drag.unwrap().effect,
        DragEffect::Picked { tile: picked, .. } if picked == tile
    ));
    session
        .handle_pointer(PointerEvent::move_to(tx + 7, ty - 3))
        .unwrap();
    let dropped = session.handle_pointer(PointerEvent::up(tx, ty)).unwrap();
    assert!(matches!(
        dropped.drag.unwrap().effect,
        DragEffect::Snapped { .. }
    ));
}

// =============================================================================
// Scenario A: a run that empties the rack wins
// =============================================================================

#[test]
fn test_run_empties_rack_and_wins() {
    let run = [t(Color::Red, 1), t(Color::Red, 2), t(Color::Red, 3)];
    let mut session = session(run.to_vec(), vec![t(Color::Blue, 8), t(Color::Black, 11)]);

    for (i, &tile) in run.iter().enumerate() {
        drag_to_board(&mut session, tile, 2, 3 + i as u16);
    }
    assert!(session.frame().tiles.iter().all(|view| view.tentative));

    let report = session.handle_request(Request::Validate).unwrap();

    let turn = report.turn.unwrap();
    assert!(turn.validated);
    assert_eq!(turn.tiles_played, 3);
    assert_eq!(
        report.game_end,
        Some(GameEnd {
            winner: PlayerId::HUMAN
        })
    );
    let state = session.state();
    assert!(state.placement().rack(PlayerId::HUMAN).is_empty());
    assert!(!state.has_pending());
    assert_eq!(state.winner(), Some(PlayerId::HUMAN));
    assert_eq!(session.frame().winner, Some(PlayerId::HUMAN));
}

// =============================================================================
// Scenario B: a group leaves the duplicate tile on the rack
// =============================================================================

#[test]
fn test_group_leaves_duplicate_on_rack() {
    let duplicate = Tile::new(Color::Red, 5, 1).unwrap();
    let group = [t(Color::Red, 5), t(Color::Blue, 5), t(Color::Green, 5)];
    let mut hand = group.to_vec();
    hand.push(duplicate);
    let mut session = session(hand, vec![t(Color::Yellow, 2), t(Color::Black, 9)]);

    for (i, &tile) in group.iter().enumerate() {
        drag_to_board(&mut session, tile, 0, i as u16);
    }
    let report = session.handle_request(Request::Validate).unwrap();

    assert!(report.turn.unwrap().validated);
    assert_eq!(report.game_end, None);
    let state = session.state();
    for (i, &tile) in group.iter().enumerate() {
        assert_eq!(
            state.snapshot().location(tile),
            Some(Location::board(0, i as u16))
        );
    }
    assert_eq!(
        state.placement().location(duplicate),
        Some(Location::rack(PlayerId::HUMAN, 3))
    );
    assert_eq!(state.placement().rack(PlayerId::HUMAN).len(), 1);
}

// =============================================================================
// Scenario C: a mixed cluster rolls every tile back
// =============================================================================

#[test]
fn test_mixed_cluster_rolls_back() {
    let tiles = [t(Color::Red, 1), t(Color::Red, 2), t(Color::Blue, 4)];
    let mut hand = tiles.to_vec();
    hand.push(t(Color::Yellow, 13));
    let mut session = session(hand, vec![t(Color::Black, 7)]);
    let before: Vec<_> = tiles
        .iter()
        .map(|&tile| session.state().placement().location(tile))
        .collect();

    for (i, &tile) in tiles.iter().enumerate() {
        drag_to_board(&mut session, tile, 1, 5 + i as u16);
    }
    let report = session.handle_request(Request::Validate).unwrap();

    let turn = report.turn.unwrap();
    assert!(!turn.validated);
    assert!(turn.rolled_back);
    assert_eq!(
        turn.failure,
        Some(ValidationFailure::InvalidMeld {
            reason: MeldDefect::MixedShape
        })
    );
    assert_eq!(report.opponent, None);
    let after: Vec<_> = tiles
        .iter()
        .map(|&tile| session.state().placement().location(tile))
        .collect();
    assert_eq!(before, after);
    assert_eq!(session.state().placement().board_len(), 0);
    assert!(session.frame().tiles.iter().all(|view| !view.tentative));
}

// =============================================================================
// Scenario D: an opponent without a run draws exactly one tile
// =============================================================================

#[test]
fn test_opponent_without_run_draws_once() {
    // Neither parity subset holds three same-color tiles two apart.
    let opponent = vec![
        t(Color::Red, 2),
        t(Color::Red, 4),
        t(Color::Red, 7),
        t(Color::Blue, 9),
        t(Color::Blue, 13),
        t(Color::Green, 1),
    ];
    let mut session = session(vec![t(Color::Black, 1), t(Color::Yellow, 15)], opponent);
    let pool = session.state().pool().remaining();

    let report = session.handle_request(Request::DrawTile).unwrap();

    let Some(OpponentMove::Drew { tile }) = report.opponent else {
        panic!("opponent should draw, got {:?}", report.opponent);
    };
    let rack = session.state().placement().rack(PlayerId::OPPONENT);
    assert_eq!(rack.len(), 7);
    assert_eq!(rack.slot_of(tile), Some(6));
    assert_eq!(session.state().pool().remaining(), pool - 2);
    assert_eq!(session.state().placement().board_len(), 0);
}

// =============================================================================
// Transaction flow
// =============================================================================

#[test]
fn test_drop_onto_occupied_cell_cancels() {
    let a = t(Color::Red, 1);
    let b = t(Color::Red, 2);
    let mut session = session(vec![a, b], vec![t(Color::Black, 7)]);
    drag_to_board(&mut session, a, 0, 0);

    let (x, y) = session.frame().tile(b).unwrap().rect.unwrap().center();
    let (tx, ty) = session
        .state()
        .location_rect(Location::board(0, 0))
        .unwrap()
        .center();
    session.handle_pointer(PointerEvent::down(x, y)).unwrap();
    let report = session.handle_pointer(PointerEvent::up(tx, ty)).unwrap();

    assert!(matches!(
        report.drag.unwrap().effect,
        DragEffect::Cancelled { tile, .. } if tile == b
    ));
    assert_eq!(
        session.state().placement().location(b),
        Some(Location::rack(PlayerId::HUMAN, 1))
    );
}

#[test]
fn test_committed_board_tiles_are_locked() {
    let group = [t(Color::Red, 5), t(Color::Blue, 5), t(Color::Green, 5)];
    let mut hand = group.to_vec();
    hand.push(t(Color::Black, 12));
    let mut session = session(hand, vec![t(Color::Yellow, 3)]);
    for (i, &tile) in group.iter().enumerate() {
        drag_to_board(&mut session, tile, 0, i as u16);
    }
    session.handle_request(Request::Validate).unwrap();

    let (x, y) = session.frame().tile(group[0]).unwrap().rect.unwrap().center();
    let report = session.handle_pointer(PointerEvent::down(x, y)).unwrap();

    assert!(matches!(
        report.drag.unwrap().effect,
        DragEffect::Noop { .. }
    ));
    assert!(!session.drag().is_dragging());
}

#[test]
fn test_begin_turn_discards_pending_moves() {
    let tile = t(Color::Green, 4);
    let mut session = session(vec![tile, t(Color::Green, 9)], vec![t(Color::Yellow, 3)]);
    drag_to_board(&mut session, tile, 4, 11);
    assert!(session.state().has_pending());

    let report = session.handle_request(Request::BeginTurn).unwrap();

    assert!(report.turn.unwrap().rolled_back);
    assert!(!session.state().has_pending());
    assert_eq!(session.state().active_player(), PlayerId::HUMAN);
}

#[test]
fn test_auto_play_lays_down_melds() {
    let hand = vec![
        t(Color::Red, 7),
        t(Color::Blue, 7),
        t(Color::Black, 7),
        t(Color::Green, 10),
        t(Color::Green, 11),
        t(Color::Green, 12),
        t(Color::Yellow, 1),
    ];
    let mut session = session(hand, vec![t(Color::Blue, 14)]);

    let report = session.handle_request(Request::AutoPlay).unwrap();

    let turn = report.turn.unwrap();
    assert!(turn.validated);
    assert_eq!(turn.tiles_played, 6);
    let state = session.state();
    assert_eq!(state.snapshot().board_len(), 6);
    assert_eq!(
        state.placement().rack(PlayerId::HUMAN).tiles().collect::<Vec<_>>(),
        vec![t(Color::Yellow, 1)]
    );
    assert!(report.opponent.is_some());
}

#[test]
fn test_sort_by_runs_survives_rollback() {
    let hand = vec![
        t(Color::Yellow, 9),
        t(Color::Red, 4),
        t(Color::Red, 3),
        t(Color::Black, 1),
    ];
    let mut session = session(hand, vec![t(Color::Blue, 14)]);

    session.handle_request(Request::SortByRuns).unwrap();
    session.handle_request(Request::Rollback).unwrap();

    let order: Vec<_> = session
        .state()
        .placement()
        .rack(PlayerId::HUMAN)
        .tiles()
        .collect();
    assert_eq!(
        order,
        vec![
            t(Color::Red, 3),
            t(Color::Red, 4),
            t(Color::Yellow, 9),
            t(Color::Black, 1),
        ]
    );
}

#[test]
fn test_sort_during_turn_keeps_untouched_tiles_in_place() {
    let played = t(Color::Black, 9);
    let (four, three) = (t(Color::Red, 4), t(Color::Red, 3));
    let mut session = session(vec![played, four, three], vec![t(Color::Blue, 14)]);
    drag_to_board(&mut session, played, 1, 1);

    session.handle_request(Request::SortByRuns).unwrap();

    let frame = session.frame();
    for (slot, tile) in [(0, three), (1, four)] {
        let view = frame.tile(tile).unwrap();
        assert_eq!(view.location, Location::rack(PlayerId::HUMAN, slot));
        assert!(!view.tentative);
    }
    assert!(frame.tile(played).unwrap().tentative);

    let report = session.handle_request(Request::Rollback).unwrap();

    assert!(report.turn.unwrap().rolled_back);
    let rack: Vec<_> = session
        .state()
        .placement()
        .rack(PlayerId::HUMAN)
        .iter()
        .collect();
    assert_eq!(rack, vec![(0, three), (1, four), (2, played)]);
}
