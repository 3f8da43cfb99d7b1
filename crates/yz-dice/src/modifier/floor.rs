//! Skill dice with a floor of one (Alien, Coriolis, Tales, Vaesen).

use crate::dice::{DiceRoller, DieRole};
use crate::error::YzResult;
use crate::pool::{AddOptions, DicePool};

/// Add `delta` skill dice. A penalty never leaves fewer than one skill die.
pub fn apply<R: DiceRoller + ?Sized>(
    pool: &mut DicePool,
    delta: i32,
    roller: &mut R,
) -> YzResult<()> {
    let skill = i32::try_from(pool.count_role(DieRole::Skill)).unwrap_or(i32::MAX);
    let delta = if delta < 0 { delta.max(1 - skill) } else { delta };
    pool.add_dice(delta, DieRole::Skill, AddOptions::default(), roller)
}

#[cfg(test)]
mod tests {
    use crate::dice::{DieKind, DieRole, ScriptedRoller};
    use crate::game::{Game, GameContext};
    use crate::pool::DicePool;

    fn modified(game: Game, dice: &[(DieKind, u32)], delta: i32) -> DicePool {
        let mut pool = DicePool::from_quantities(GameContext::new(game), dice, 1).unwrap();
        pool.modify(delta, &mut ScriptedRoller::default()).unwrap();
        pool
    }

    #[test]
    fn bonus_adds_skill_dice() {
        let pool = modified(Game::Alien, &[(DieKind::Skill, 3), (DieKind::Stress, 1)], 2);
        assert_eq!(pool.to_string(), "5ds + 1dz");
    }

    #[test]
    fn penalty_keeps_one_die() {
        let pool = modified(Game::Coriolis, &[(DieKind::Skill, 3)], -5);
        assert_eq!(pool.count_role(DieRole::Skill), 1);
        let pool = modified(Game::Tales, &[(DieKind::Skill, 4)], -2);
        assert_eq!(pool.count_role(DieRole::Skill), 2);
    }

    #[test]
    fn penalty_on_empty_skill_pool_adds_one() {
        let pool = modified(Game::Alien, &[(DieKind::Stress, 2)], -2);
        assert_eq!(pool.count_role(DieRole::Skill), 1);
    }
}
