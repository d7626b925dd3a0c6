//! Property tests for the engine's invariants.

use proptest::prelude::*;
use proptest::sample::subsequence;

use tile_rummy::core::{
    create_initial_pool, BoardConfig, Color, GameConfig, GameRng, GameState, PlayerId, PlayerMap,
    Tile, TilePool,
};
use tile_rummy::game::{GameBuilder, Request};
use tile_rummy::play::{MeldPolicy, OpponentPolicy, ParityRunPolicy, PointerEvent};
use tile_rummy::rules::{classify, validate, MeldKind};
use tile_rummy::zones::Location;

fn t(color: Color, number: u8) -> Tile {
    Tile::new(color, number, 0).unwrap()
}

/// State with a fixed human hand on a 4x12 board.
fn state_with(human: Vec<Tile>) -> GameState {
    let opponent = vec![Tile::new(Color::Black, 15, 1).unwrap()];
    let mut taken = human.clone();
    taken.extend(&opponent);
    GameState::new(
        GameConfig::new(5).with_board(BoardConfig::grid(4, 12)),
        PlayerMap::from_pair(human, opponent),
        TilePool::without(&taken),
        GameRng::new(5),
    )
    .unwrap()
}

fn sorted(mut tiles: Vec<Tile>) -> Vec<Tile> {
    tiles.sort_unstable();
    tiles
}

/// Reference definition of a legal meld.
fn is_legal(tiles: &[Tile]) -> bool {
    if !(3..=5).contains(&tiles.len()) {
        return false;
    }
    let first = tiles[0];
    let group = tiles.iter().all(|t| t.number() == first.number())
        && tiles
            .iter()
            .enumerate()
            .all(|(i, a)| tiles[i + 1..].iter().all(|b| a.color() != b.color()));
    let run = tiles.iter().all(|t| t.color() == first.color())
        && tiles
            .iter()
            .enumerate()
            .all(|(i, t)| usize::from(t.number()) == usize::from(first.number()) + i);
    group || run
}

#[derive(Clone, Debug)]
enum Step {
    Pointer(PointerEvent),
    Request(Request),
}

fn step() -> impl Strategy<Value = Step> {
    // Default geometry: board at (120, 60), rack at (120, 560).
    let point = (0i32..1100, 0i32..820);
    prop_oneof![
        4 => point.clone().prop_map(|(x, y)| Step::Pointer(PointerEvent::down(x, y))),
        3 => point.clone().prop_map(|(x, y)| Step::Pointer(PointerEvent::move_to(x, y))),
        4 => point.prop_map(|(x, y)| Step::Pointer(PointerEvent::up(x, y))),
        1 => Just(Step::Request(Request::Validate)),
        1 => Just(Step::Request(Request::Rollback)),
        1 => Just(Step::Request(Request::DrawTile)),
        1 => Just(Step::Request(Request::AutoPlay)),
        1 => Just(Step::Request(Request::SortByGroups)),
        1 => Just(Step::Request(Request::SortByRuns)),
        1 => Just(Step::Request(Request::BeginTurn)),
    ]
}

fn color() -> impl Strategy<Value = Color> {
    (0usize..5).prop_map(|i| Color::ALL[i])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tiles_are_conserved(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..60)) {
        let mut session = GameBuilder::new().seed(seed).build().unwrap();
        let initial = sorted(create_initial_pool());

        for step in steps {
            // Rejections are fine; they must not lose tiles either.
            let _ = match step {
                Step::Pointer(event) => session.handle_pointer(event),
                Step::Request(request) => session.handle_request(request),
            };
            let state = session.state();
            let mut all: Vec<Tile> = state.placement().iter().map(|(tile, _)| tile).collect();
            all.extend(state.pool().iter());
            prop_assert_eq!(state.placement().total_tiles() + state.pool().remaining(), initial.len());
            prop_assert_eq!(sorted(all), initial.clone());
        }
    }

    #[test]
    fn failed_validation_restores_every_cluster(
        number in 1u8..=13,
        run_col in 0u16..9,
        pair_col in 0u16..10,
    ) {
        let run = [t(Color::Red, number), t(Color::Red, number + 1), t(Color::Red, number + 2)];
        let pair = [t(Color::Blue, number), t(Color::Yellow, number + 2)];
        let mut hand = run.to_vec();
        hand.extend(pair);
        let mut state = state_with(hand);
        let before = state.placement().clone();

        for (i, &tile) in run.iter().enumerate() {
            state.relocate(tile, Location::board(0, run_col + i as u16)).unwrap();
        }
        for (i, &tile) in pair.iter().enumerate() {
            state.relocate(tile, Location::board(2, pair_col + i as u16)).unwrap();
        }

        prop_assert!(validate(&mut state).is_err());
        prop_assert_eq!(state.placement(), &before);
        prop_assert_eq!(state.snapshot(), &before);
        prop_assert!(!state.has_pending());
    }

    #[test]
    fn revalidating_a_committed_board_changes_nothing(
        number in 1u8..=15,
        row in 0u16..4,
        col in 0u16..9,
    ) {
        let group = [t(Color::Black, number), t(Color::Green, number), t(Color::Yellow, number)];
        let mut state = state_with(group.to_vec());
        for (i, &tile) in group.iter().enumerate() {
            state.relocate(tile, Location::board(row, col + i as u16)).unwrap();
        }

        let first = validate(&mut state).unwrap();
        prop_assert_eq!(first.tiles_played, 3);
        let committed = state.placement().clone();

        for _ in 0..2 {
            let again = validate(&mut state).unwrap();
            prop_assert_eq!(again.tiles_played, 0);
            prop_assert!(again.melds.is_empty());
            prop_assert_eq!(state.placement(), &committed);
            prop_assert_eq!(state.snapshot(), &committed);
        }
    }

    #[test]
    fn opponent_choice_depends_only_on_rack(
        rack in subsequence(create_initial_pool(), 0..24),
    ) {
        let mut reversed = rack.clone();
        reversed.reverse();
        for policy in [&ParityRunPolicy as &dyn OpponentPolicy, &MeldPolicy] {
            let choice = policy.choose_meld(&rack);
            prop_assert_eq!(&choice, &policy.choose_meld(&rack));
            prop_assert_eq!(&choice, &policy.choose_meld(&reversed));
        }
    }

    #[test]
    fn distinct_colors_of_one_number_form_a_group(
        number in 1u8..=15,
        colors in subsequence(Color::ALL.to_vec(), 3..=5),
    ) {
        let tiles: Vec<Tile> = colors.iter().map(|&c| t(c, number)).collect();
        let meld = classify(&tiles).unwrap();
        prop_assert_eq!(meld.kind(), MeldKind::Group);
    }

    #[test]
    fn ascending_same_color_forms_a_run(
        color in color(),
        start in 1u8..=13,
        len in 3u8..=5,
    ) {
        prop_assume!(start + len - 1 <= 15);
        let tiles: Vec<Tile> = (start..start + len).map(|n| t(color, n)).collect();
        let meld = classify(&tiles).unwrap();
        prop_assert_eq!(meld.kind(), MeldKind::Run);
    }

    #[test]
    fn only_groups_and_runs_are_legal(
        tiles in subsequence(create_initial_pool(), 1..=6).prop_shuffle(),
    ) {
        prop_assert_eq!(classify(&tiles).is_ok(), is_legal(&tiles));
    }

    #[test]
    fn validator_accepts_runs_on_the_board(
        color in color(),
        start in 1u8..=11,
        len in 3u8..=5,
        row in 0u16..4,
    ) {
        prop_assume!(start + len - 1 <= 15);
        let run: Vec<Tile> = (start..start + len).map(|n| t(color, n)).collect();
        let mut state = state_with(run.clone());
        for (i, &tile) in run.iter().enumerate() {
            state.relocate(tile, Location::board(row, 2 + i as u16)).unwrap();
        }

        let commit = validate(&mut state).unwrap();
        prop_assert_eq!(commit.melds.len(), 1);
        prop_assert_eq!(commit.melds[0].kind(), MeldKind::Run);
        prop_assert!(state.placement().rack(PlayerId::HUMAN).is_empty());
    }
}
