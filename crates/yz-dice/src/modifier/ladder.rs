//! Die size ladder (Twilight 2000) and advantage (Blade Runner).

use crate::dice::{DiceRoller, DieRole};
use crate::error::{YzError, YzResult};
use crate::pool::{AddOptions, DicePool};

/// Die sizes from the bottom rung to the top.
const LADDER: [u32; 4] = [6, 8, 10, 12];

fn rung(faces: u32) -> YzResult<usize> {
    LADDER
        .iter()
        .position(|&f| f == faces)
        .ok_or(YzError::LadderOutOfRange { faces })
}

/// Push-related settings of a base term before the modifier, reused by rebuilt dice.
struct Template {
    flavor: Option<String>,
    max_push: u32,
}

/// Step base dice up (positive delta) or down (negative delta) the ladder.
///
/// Each step raises the first smallest die or lowers the first largest one.
/// A d12 that steps up stays a d12 and, while the pool holds fewer than two
/// base dice, brings in an extra d6. A d6 that steps down leaves the pool,
/// unless it is the last die, in which case it stays. Once a step changes
/// nothing the remaining steps are skipped.
pub fn apply_ladder<R: DiceRoller + ?Sized>(
    pool: &mut DicePool,
    mut delta: i32,
    roller: &mut R,
) -> YzResult<()> {
    let (mut dice, templates) = base_dice(pool);
    if dice.is_empty() {
        if delta < 0 {
            return Ok(());
        }
        dice.push(LADDER[0]);
        delta -= 1;
    }

    while delta != 0 {
        if delta > 0 {
            let i = position_of(&dice, dice.iter().min());
            let step = rung(dice[i])?;
            if step + 1 < LADDER.len() {
                dice[i] = LADDER[step + 1];
            } else if dice.len() < 2 {
                dice.push(LADDER[0]);
            } else {
                break;
            }
            delta -= 1;
        } else {
            let i = position_of(&dice, dice.iter().max());
            let step = rung(dice[i])?;
            if step > 0 {
                dice[i] = LADDER[step - 1];
            } else if dice.len() > 1 {
                dice.remove(i);
            } else {
                break;
            }
            delta += 1;
        }
    }

    rebuild_base(pool, &dice, &templates, roller)
}

/// Duplicate the lowest base die (positive delta) or drop it (negative delta).
///
/// The magnitude of the delta is ignored. The last base die is never dropped.
pub fn apply_advantage<R: DiceRoller + ?Sized>(
    pool: &mut DicePool,
    delta: i32,
    roller: &mut R,
) -> YzResult<()> {
    let (mut dice, templates) = base_dice(pool);
    let Some(&lowest) = dice.iter().min() else {
        tracing::debug!("no base die to apply advantage to");
        return Ok(());
    };
    if delta > 0 {
        dice.push(lowest);
    } else if dice.len() > 1 {
        let i = position_of(&dice, Some(&lowest));
        dice.remove(i);
    }
    rebuild_base(pool, &dice, &templates, roller)
}

fn position_of(dice: &[u32], target: Option<&u32>) -> usize {
    target
        .and_then(|t| dice.iter().position(|d| d == t))
        .unwrap_or(0)
}

/// Flatten the base terms into one face count per die.
fn base_dice(pool: &DicePool) -> (Vec<u32>, Vec<Template>) {
    let mut dice = Vec::new();
    let mut templates = Vec::new();
    for term in pool.terms_of(DieRole::Base) {
        dice.extend(std::iter::repeat_n(term.faces(), term.number() as usize));
        templates.push(Template {
            flavor: term.flavor().map(str::to_string),
            max_push: term.max_push(),
        });
    }
    (dice, templates)
}

/// Replace every base term with one die per face count.
///
/// Die 0 borrows the settings of the first previous term. When there were
/// several previous terms and several dice remain, the others borrow the
/// second term's settings.
fn rebuild_base<R: DiceRoller + ?Sized>(
    pool: &mut DicePool,
    dice: &[u32],
    templates: &[Template],
    roller: &mut R,
) -> YzResult<()> {
    for &faces in dice {
        rung(faces)?;
    }
    let default_max_push = pool.max_push_for_new_term();
    pool.terms_mut().retain(|t| t.role() != DieRole::Base);

    let skilled = templates.len() > 1 && dice.len() > 1;
    for (i, &faces) in dice.iter().enumerate() {
        let template = templates.get(i.min(usize::from(skilled)));
        let options = AddOptions::default()
            .with_faces(faces)
            .with_flavor(template.and_then(|t| t.flavor.clone()))
            .with_max_push(template.map_or(default_max_push, |t| t.max_push));
        pool.add_dice(1, DieRole::Base, options, roller)?;
    }
    Ok(())
}
