//! Read-only aggregates over a pool's active results.

use serde::{Deserialize, Serialize};

use crate::dice::{DieRole, DieTerm};

use super::DicePool;

/// How [`DicePool::count_dice`] compares a face value to the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Comparator {
    /// `=`
    #[default]
    Eq,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl Comparator {
    /// Parse a comparison symbol. Unknown symbols mean equality.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "<" => Self::Lt,
            "<=" => Self::Le,
            _ => Self::Eq,
        }
    }

    /// Whether `value` satisfies the comparison against `seed`.
    pub fn matches(self, value: u32, seed: u32) -> bool {
        match self {
            Self::Eq => value == seed,
            Self::Gt => value > seed,
            Self::Ge => value >= seed,
            Self::Lt => value < seed,
            Self::Le => value <= seed,
        }
    }
}

/// A snapshot of every derived counter of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollStats {
    /// Total successes.
    pub successes: i32,
    /// Ones on base, gear, stress and ammo dice.
    pub banes: u32,
    /// Ones on base dice.
    pub attribute_trauma: u32,
    /// Ones on gear dice.
    pub gear_damage: u32,
    /// Number of stress dice.
    pub stress: u32,
    /// Ones on stress dice.
    pub panic: u32,
    /// Sum of the ammo dice.
    pub ammo_spent: u32,
    /// Ammo dice showing a 6.
    pub hits: u32,
    /// Ammo ones plus base ones, when any ammo die shows a one.
    pub jam_count: u32,
    /// Whether the weapon jammed.
    pub jammed: bool,
    /// Successes not coming from ammo hits.
    pub base_successes: i32,
    /// Rolled hit locations.
    pub hit_locations: Vec<u32>,
    /// Times the pool was pushed.
    pub push_count: u32,
    /// Whether another push is allowed.
    pub pushable: bool,
}

impl DicePool {
    /// Count dice of a role.
    ///
    /// Without a seed, every active die counts (unrolled terms count their
    /// full size). With a seed, only active results whose value satisfies
    /// `cmp` against it.
    pub fn count_dice(&self, role: DieRole, seed: Option<u32>, cmp: Comparator) -> u32 {
        self.terms_of(role)
            .map(|term| count_term(term, seed, cmp))
            .sum()
    }

    /// Number of dice of a role.
    pub fn count_role(&self, role: DieRole) -> u32 {
        self.count_dice(role, None, Comparator::Eq)
    }

    /// Number of active results of a role showing exactly `value`.
    pub fn count_value(&self, role: DieRole, value: u32) -> u32 {
        self.count_dice(role, Some(value), Comparator::Eq)
    }

    /// Active values of a role, in pool order.
    pub fn values_of(&self, role: DieRole) -> Vec<u32> {
        self.terms_of(role).flat_map(DieTerm::values).collect()
    }

    /// Total successes. Unrolled terms contribute nothing.
    pub fn successes(&self) -> i32 {
        self.terms.iter().filter_map(DieTerm::success).sum()
    }

    /// Ones on banable dice (base, gear, stress, ammo).
    pub fn banes(&self) -> u32 {
        DieRole::ALL
            .into_iter()
            .filter(|role| role.is_banable())
            .map(|role| self.count_value(role, 1))
            .sum()
    }

    /// Ones on base dice.
    pub fn attribute_trauma(&self) -> u32 {
        self.count_value(DieRole::Base, 1)
    }

    /// Ones on gear dice.
    pub fn gear_damage(&self) -> u32 {
        self.count_value(DieRole::Gear, 1)
    }

    /// Number of stress dice.
    pub fn stress(&self) -> u32 {
        self.count_role(DieRole::Stress)
    }

    /// Ones on stress dice.
    pub fn panic(&self) -> u32 {
        self.count_value(DieRole::Stress, 1)
    }

    /// Sum of the ammo dice.
    pub fn ammo_spent(&self) -> u32 {
        self.values_of(DieRole::Ammo).into_iter().sum()
    }

    /// Ammo dice showing a 6 or more.
    pub fn hit_count(&self) -> u32 {
        self.count_dice(DieRole::Ammo, Some(6), Comparator::Ge)
    }

    /// Ammo ones plus attribute trauma, or 0 when no ammo die shows a one.
    pub fn jam_count(&self) -> u32 {
        match self.count_value(DieRole::Ammo, 1) {
            0 => 0,
            ones => ones + self.attribute_trauma(),
        }
    }

    /// A pushed roll with a jam count of 2 or more jams the weapon.
    pub fn jammed(&self) -> bool {
        self.pushed() && self.jam_count() >= 2
    }

    /// Successes minus ammo hits.
    pub fn base_successes(&self) -> i32 {
        self.successes() - self.hit_count() as i32
    }

    /// Rolled hit locations, in pool order.
    pub fn hit_locations(&self) -> Vec<u32> {
        self.values_of(DieRole::Location)
    }

    /// Highest hit location.
    pub fn best_hit_location(&self) -> Option<u32> {
        self.hit_locations().into_iter().max()
    }

    /// Lowest hit location.
    pub fn worst_hit_location(&self) -> Option<u32> {
        self.hit_locations().into_iter().min()
    }

    /// Every derived counter at once.
    pub fn stats(&self) -> RollStats {
        RollStats {
            successes: self.successes(),
            banes: self.banes(),
            attribute_trauma: self.attribute_trauma(),
            gear_damage: self.gear_damage(),
            stress: self.stress(),
            panic: self.panic(),
            ammo_spent: self.ammo_spent(),
            hits: self.hit_count(),
            jam_count: self.jam_count(),
            jammed: self.jammed(),
            base_successes: self.base_successes(),
            hit_locations: self.hit_locations(),
            push_count: self.push_count(),
            pushable: self.is_pushable(),
        }
    }
}

fn count_term(term: &DieTerm, seed: Option<u32>, cmp: Comparator) -> u32 {
    if !term.is_rolled() {
        return if seed.is_some() { 0 } else { term.number() };
    }
    let hits = term
        .active_results()
        .filter(|r| seed.is_none_or(|s| cmp.matches(r.value, s)))
        .count();
    hits as u32
}
