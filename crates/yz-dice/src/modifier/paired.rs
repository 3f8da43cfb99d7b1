//! Paired skill and negative dice (Mutant: Year Zero, Forbidden Lands).

use crate::dice::{DiceRoller, DieKind, DieRole};
use crate::error::YzResult;
use crate::pool::{AddOptions, DicePool, RemoveOptions};

/// Add `delta` skill dice, turning a shortfall into `negative` dice, then
/// cancel skill dice against negative dice one for one.
pub fn apply<R: DiceRoller + ?Sized>(
    pool: &mut DicePool,
    delta: i32,
    negative: DieKind,
    roller: &mut R,
) -> YzResult<()> {
    let skill = i32::try_from(pool.count_role(DieRole::Skill)).unwrap_or(i32::MAX);
    let shortfall = delta.saturating_neg().saturating_sub(skill).max(0);
    pool.add_dice(delta, DieRole::Skill, AddOptions::default(), roller)?;
    if shortfall > 0 {
        let options = AddOptions::default().with_faces(negative.faces());
        pool.add_dice(shortfall, negative.role(), options, roller)?;
    }

    let neg_role = negative.role();
    while pool.count_role(DieRole::Skill) > 0 && pool.count_role(neg_role) > 0 {
        let removed = pool.remove_dice(1, DieRole::Skill, RemoveOptions::default())
            + pool.remove_dice(1, neg_role, RemoveOptions::default());
        if removed < 2 {
            break;
        }
    }
    Ok(())
}
