//! Configuration for rolling pools.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::dice::DieRole;
use crate::game::{Game, GameContext};

/// Settings shared by the pools of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollConfig {
    /// Game the pools are rolled for.
    pub game: Game,
    /// How many times a pool may be pushed.
    pub max_push: u32,
    /// RNG seed for reproducible rolls. Entropy-seeded when `None`.
    pub seed: Option<u64>,
    /// Role order used when reporting terms.
    pub dice_sorting: Vec<DieRole>,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            game: Game::MutantYearZero,
            max_push: 1,
            seed: None,
            dice_sorting: DieRole::ALL.to_vec(),
        }
    }
}

impl RollConfig {
    /// Set the game.
    pub fn with_game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    /// Set the push cap. 0 disables pushing.
    pub fn with_max_push(mut self, max_push: u32) -> Self {
        self.max_push = max_push;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the report role order.
    pub fn with_dice_sorting(mut self, sorting: Vec<DieRole>) -> Self {
        self.dice_sorting = sorting;
        self
    }

    /// The game context for new pools.
    pub fn context(&self) -> GameContext {
        GameContext::new(self.game)
    }

    /// A random generator honoring the seed.
    pub fn roller(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
