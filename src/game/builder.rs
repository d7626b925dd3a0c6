//! Session construction.

use tracing::info;

use super::session::Session;
use crate::core::{
    BoardConfig, ConfigError, GameConfig, GameRng, GameState, OpponentStrategy, PlayerId,
    PlayerMap, RackConfig, Tile, TilePool,
};
use crate::play::policy_for;

/// Builder for a [`Session`].
///
/// Hands are dealt from a seeded pool unless fixed with [`hands`](Self::hands).
///
/// ```
/// use tile_rummy::core::PlayerId;
/// use tile_rummy::game::GameBuilder;
///
/// let session = GameBuilder::new().seed(42).hand_size(14).build().unwrap();
/// assert_eq!(session.state().placement().rack(PlayerId::HUMAN).len(), 14);
/// assert_eq!(session.state().pool().remaining(), 150 - 28);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
    hands: Option<PlayerMap<Vec<Tile>>>,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    #[must_use]
    pub fn board(mut self, board: BoardConfig) -> Self {
        self.config.board = board;
        self
    }

    #[must_use]
    pub fn rack(mut self, rack: RackConfig) -> Self {
        self.config.rack = rack;
        self
    }

    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.config.hand_size = size;
        self
    }

    #[must_use]
    pub fn opponent(mut self, strategy: OpponentStrategy) -> Self {
        self.config.opponent = strategy;
        self
    }

    /// Fix both opening hands instead of dealing them.
    ///
    /// The pool then holds every other tile.
    #[must_use]
    pub fn hands(mut self, human: Vec<Tile>, opponent: Vec<Tile>) -> Self {
        self.hands = Some(PlayerMap::from_pair(human, opponent));
        self
    }

    /// Validate the configuration, deal, and start the session.
    pub fn build(self) -> Result<Session, ConfigError> {
        let config = self.config;
        config.validate()?;
        let mut rng = GameRng::new(config.seed);

        let (hands, pool) = match self.hands {
            Some(hands) => {
                let mut taken: Vec<Tile> = Vec::new();
                for (_, hand) in hands.iter() {
                    if hand.is_empty() {
                        return Err(ConfigError::EmptyHand);
                    }
                    if hand.len() > config.rack.capacity() {
                        return Err(ConfigError::RackTooSmall {
                            capacity: config.rack.capacity(),
                            hand_size: hand.len(),
                        });
                    }
                    for &tile in hand {
                        if taken.contains(&tile) {
                            return Err(ConfigError::DuplicateTile { tile });
                        }
                        taken.push(tile);
                    }
                }
                (hands, TilePool::without(&taken))
            }
            None => {
                let mut pool = TilePool::full();
                let hands = pool
                    .deal(&PlayerMap::with_value(config.hand_size), &mut rng)
                    .map_err(ConfigError::Deal)?;
                (hands, pool)
            }
        };

        info!(
            seed = config.seed,
            human = hands[PlayerId::HUMAN].len(),
            opponent = hands[PlayerId::OPPONENT].len(),
            strategy = ?config.opponent,
            "starting session"
        );
        let policy = policy_for(config.opponent);
        let state = GameState::new(config, hands, pool, rng).map_err(ConfigError::Deal)?;
        Ok(Session::new(state, policy))
    }
}
