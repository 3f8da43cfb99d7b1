//! Push-your-luck dice engine for the Year Zero family of games.
//!
//! Builds dice pools from typed dice (base, skill, gear, negative, stress,
//! artifact, step, ammo and location dice), rolls them, pushes them while
//! keeping locked faces, and reads successes, banes and the game-specific
//! counters back out. Difficulty modifiers are resolved per game: a die size
//! ladder for Twilight 2000, advantage for Blade Runner, paired skill and
//! negative dice for Mutant and Forbidden Lands, and a skill floor elsewhere.

pub mod config;
pub mod dice;
pub mod error;
pub mod game;
pub mod modifier;
pub mod pool;
pub mod report;

pub use config::RollConfig;
pub use dice::{
    DiceRoller, DieKind, DieResult, DieRole, DieTerm, DieType, ResultState, ScriptedRoller,
};
pub use error::{YzError, YzResult};
pub use game::{Game, GameContext};
pub use modifier::ModifierRule;
pub use pool::{
    AddOptions, Comparator, DicePool, RemoveOptions, RollStats, TermFilter, TermSpec,
};
pub use report::{RollReport, TermReport};
