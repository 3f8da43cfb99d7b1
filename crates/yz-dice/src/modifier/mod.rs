//! Difficulty modifiers.
//!
//! Each game turns a signed difficulty modifier into pool mutations in one
//! of a few ways:
//! - **Ladder** (Twilight 2000): base dice step up or down the die sizes
//! - **Advantage** (Blade Runner): the lowest base die is doubled or dropped
//! - **Paired** (Mutant, Forbidden Lands): skill dice, with negative dice for
//!   the shortfall, cancelling each other out
//! - **Skill floor** (everything else): skill dice, never fewer than one

pub mod floor;
pub mod ladder;
pub mod paired;

use serde::{Deserialize, Serialize};

use crate::dice::{DiceRoller, DieKind};
use crate::error::{YzError, YzResult};
use crate::pool::DicePool;

/// Largest modifier magnitude [`DicePool::modify`] accepts.
pub const MAX_MODIFIER: u32 = 100;

/// How a game resolves a difficulty modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierRule {
    /// Base dice move along the die size ladder.
    Ladder,
    /// One lowest base die is added or removed, whatever the magnitude.
    Advantage,
    /// Skill dice are added; a shortfall becomes negative dice, and skill and
    /// negative dice cancel pairwise.
    Paired {
        /// The die added for the shortfall.
        negative: DieKind,
    },
    /// Skill dice are added, keeping at least one.
    SkillFloor,
}

impl DicePool {
    /// Apply a difficulty modifier with the game's rule.
    ///
    /// A zero delta changes nothing. When the pool was already evaluated, any
    /// die the modifier added is rolled before returning. A delta beyond
    /// [`MAX_MODIFIER`] is rejected and leaves the pool untouched.
    pub fn modify<R: DiceRoller + ?Sized>(&mut self, delta: i32, roller: &mut R) -> YzResult<()> {
        if delta == 0 {
            return Ok(());
        }
        if delta.unsigned_abs() > MAX_MODIFIER {
            return Err(YzError::ModifierOutOfRange {
                delta,
                max: MAX_MODIFIER,
            });
        }
        let rule = self.context().modifier_rule();
        tracing::debug!(delta, ?rule, before = %self, "applying difficulty modifier");
        match rule {
            ModifierRule::Ladder => ladder::apply_ladder(self, delta, roller)?,
            ModifierRule::Advantage => ladder::apply_advantage(self, delta, roller)?,
            ModifierRule::Paired { negative } => paired::apply(self, delta, negative, roller)?,
            ModifierRule::SkillFloor => floor::apply(self, delta, roller)?,
        }
        if self.is_evaluated() {
            self.evaluate(roller);
        }
        tracing::debug!(after = %self, "modifier applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{DieRole, ScriptedRoller};
    use crate::game::{Game, GameContext};

    #[test]
    fn zero_delta_is_noop() {
        let mut pool = DicePool::from_quantities(
            GameContext::new(Game::Alien),
            &[(DieKind::Skill, 2)],
            1,
        )
        .unwrap();
        let before = pool.clone();
        pool.modify(0, &mut ScriptedRoller::default()).unwrap();
        assert_eq!(pool, before);
    }

    #[test]
    fn rule_can_be_overridden() {
        let ctx = GameContext::new(Game::Coriolis).with_modifier_rule(ModifierRule::Paired {
            negative: DieKind::Negative,
        });
        let mut pool = DicePool::from_quantities(ctx, &[(DieKind::Skill, 1)], 1).unwrap();
        pool.modify(-3, &mut ScriptedRoller::default()).unwrap();
        assert_eq!(pool.count_role(DieRole::Skill), 0);
        assert_eq!(pool.count_role(DieRole::Negative), 2);
    }

    #[test]
    fn extreme_modifiers_are_rejected() {
        for game in Game::ALL {
            let ctx = GameContext::new(game);
            let mut pool = DicePool::from_quantities(ctx, &[(game.default_die(), 2)], 1).unwrap();
            let before = pool.clone();
            for delta in [i32::MIN, i32::MAX, -101, 101] {
                let err = pool.modify(delta, &mut ScriptedRoller::default()).unwrap_err();
                assert!(matches!(err, YzError::ModifierOutOfRange { .. }), "{game}: {err}");
            }
            assert_eq!(pool, before);
        }
    }

    #[test]
    fn largest_penalty_empties_skill_dice() {
        let mut pool = DicePool::from_quantities(
            GameContext::new(Game::MutantYearZero),
            &[(DieKind::Base, 2), (DieKind::Skill, 3)],
            1,
        )
        .unwrap();
        pool.modify(-(MAX_MODIFIER as i32), &mut ScriptedRoller::default())
            .unwrap();
        assert_eq!(pool.count_role(DieRole::Skill), 0);
        assert_eq!(pool.count_role(DieRole::Negative), 97);
    }

    #[test]
    fn evaluated_pool_rolls_added_dice() {
        let mut pool = DicePool::from_quantities(
            GameContext::new(Game::Vaesen),
            &[(DieKind::Skill, 1)],
            1,
        )
        .unwrap();
        pool.evaluate(&mut ScriptedRoller::new([3]));
        pool.modify(2, &mut ScriptedRoller::new([6, 6])).unwrap();
        assert_eq!(pool.terms()[0].values(), vec![3, 6, 6]);
        assert_eq!(pool.successes(), 2);
    }
}
