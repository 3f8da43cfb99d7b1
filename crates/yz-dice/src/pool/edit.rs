//! Adding and removing dice after a pool is built.

use serde::{Deserialize, Serialize};

use crate::dice::term::RetireMode;
use crate::dice::{DiceRoller, DieRole, DieTerm};
use crate::error::YzResult;

use super::DicePool;

/// Options for [`DicePool::add_dice`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddOptions {
    /// Face count of the dice to add. Defaults to 6.
    pub faces: Option<u32>,
    /// Force the new dice to show this value instead of rolling.
    pub preset: Option<u32>,
    /// Flavor label of the target term.
    pub flavor: Option<String>,
    /// Push cap of the target term. A new term defaults to the pool's cap.
    pub max_push: Option<u32>,
}

impl AddOptions {
    /// Set the face count.
    pub fn with_faces(mut self, faces: u32) -> Self {
        self.faces = Some(faces);
        self
    }

    /// Set a preset value.
    pub fn with_preset(mut self, value: u32) -> Self {
        self.preset = Some(value);
        self
    }

    /// Set the flavor label.
    pub fn with_flavor(mut self, flavor: Option<String>) -> Self {
        self.flavor = flavor;
        self
    }

    /// Set the push cap of a new term.
    pub fn with_max_push(mut self, max_push: u32) -> Self {
        self.max_push = Some(max_push);
        self
    }

    fn filter(&self, role: DieRole) -> TermFilter {
        TermFilter {
            role,
            faces: Some(self.faces.unwrap_or(6)),
            flavor: self.flavor.clone(),
            max_push: self.max_push,
        }
    }
}

/// Selects the terms [`DicePool::remove_dice`] takes dice from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermFilter {
    /// Role of the term.
    pub role: DieRole,
    /// Face count, any when `None`.
    pub faces: Option<u32>,
    /// Flavor label, any when `None`.
    pub flavor: Option<String>,
    /// Push cap, any when `None`.
    pub max_push: Option<u32>,
}

impl TermFilter {
    /// Whether a term is selected.
    pub fn matches(&self, term: &DieTerm) -> bool {
        term.role() == self.role
            && self.faces.is_none_or(|f| term.faces() == f)
            && self
                .flavor
                .as_deref()
                .is_none_or(|f| term.flavor() == Some(f))
            && self.max_push.is_none_or(|m| term.max_push() == m)
    }
}

impl From<DieRole> for TermFilter {
    fn from(role: DieRole) -> Self {
        Self {
            role,
            faces: None,
            flavor: None,
            max_push: None,
        }
    }
}

/// How removed results of an evaluated pool are handled.
///
/// By default they are deleted. `discard` wins over `disable` when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveOptions {
    /// Keep the result, marked as discarded.
    pub discard: bool,
    /// Keep the result, switched off.
    pub disable: bool,
}

impl RemoveOptions {
    fn mode(self) -> RetireMode {
        if self.discard {
            RetireMode::Discard
        } else if self.disable {
            RetireMode::Disable
        } else {
            RetireMode::Delete
        }
    }
}

impl DicePool {
    /// Add `quantity` dice of a role. A negative quantity removes dice.
    ///
    /// Dice join the first term with the same role, faces and flavor (and push
    /// cap, when one is given), or a new term at the end of the pool. On an
    /// evaluated pool the new dice are rolled at once. With a preset value an
    /// unrolled pool is evaluated first and the new dice show the preset.
    pub fn add_dice<R: DiceRoller + ?Sized>(
        &mut self,
        quantity: i32,
        role: DieRole,
        options: AddOptions,
        roller: &mut R,
    ) -> YzResult<()> {
        if quantity == 0 {
            return Ok(());
        }
        let filter = options.filter(role);
        if quantity < 0 {
            self.remove_dice(quantity.unsigned_abs(), filter, RemoveOptions::default());
            return Ok(());
        }
        let quantity = quantity.unsigned_abs();
        if options.preset.is_some() && !self.is_evaluated() {
            self.evaluate(roller);
        }
        let evaluated = self.is_evaluated();

        if let Some(term) = self.terms.iter_mut().find(|t| filter.matches(t)) {
            for _ in 0..quantity {
                term.grow();
                if evaluated {
                    match options.preset {
                        Some(value) => term.roll_preset(value),
                        None => term.roll(roller),
                    };
                }
            }
            tracing::debug!(term = %term, added = quantity, "grew term");
            return Ok(());
        }

        let faces = filter.faces.unwrap_or(6);
        let kind = self.context.die_for(role, faces)?;
        let max_push = options
            .max_push
            .unwrap_or_else(|| self.max_push_for_new_term());
        let mut term = DieTerm::new(kind, quantity).with_max_push(max_push);
        if let Some(flavor) = options.flavor {
            term = term.with_flavor(flavor);
        }
        if evaluated {
            term.evaluate(roller);
            if let Some(value) = options.preset {
                term.preset_all(value);
            }
        }
        tracing::debug!(term = %term, "added term");
        self.terms.push(term);
        Ok(())
    }

    /// Remove up to `quantity` dice from the terms selected by `filter`.
    ///
    /// Each removal takes one die from the first matching term; a term left
    /// with no dice leaves the pool. On an evaluated pool the term's first
    /// active result is deleted, discarded or disabled. Stops early when
    /// nothing matches. Returns how many dice were removed.
    pub fn remove_dice(
        &mut self,
        quantity: u32,
        filter: impl Into<TermFilter>,
        options: RemoveOptions,
    ) -> u32 {
        let filter = filter.into();
        let evaluated = self.is_evaluated();
        let mut removed = 0;
        while removed < quantity {
            let Some(index) = self.terms.iter().position(|t| filter.matches(t)) else {
                break;
            };
            let term = &mut self.terms[index];
            term.shrink();
            removed += 1;
            if term.number() == 0 {
                self.terms.remove(index);
            } else if evaluated && !term.retire_one(options.mode()) {
                break;
            }
        }
        if removed > 0 {
            tracing::debug!(role = %filter.role, removed, "removed dice");
        }
        removed
    }
}
