//! Structured snapshots of a pool for renderers and JSON output.

use serde::{Deserialize, Serialize};

use crate::dice::{DieKind, DieResult, DieRole, DieTerm};
use crate::game::Game;
use crate::pool::{DicePool, RollStats};

/// One term of a report, with its push history laid out as a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermReport {
    /// Die kind.
    pub kind: DieKind,
    /// Role of the die kind.
    pub role: DieRole,
    /// Number of dice.
    pub number: u32,
    /// Faces per die.
    pub faces: u32,
    /// Flavor label.
    pub flavor: Option<String>,
    /// Active values.
    pub values: Vec<u32>,
    /// Successes of the term.
    pub successes: i32,
    /// Rows are push cycles (0 is the first roll), columns are dice.
    pub matrix: Vec<Vec<Option<DieResult>>>,
}

impl TermReport {
    fn new(term: &DieTerm, rows: u32) -> Self {
        Self {
            kind: term.kind(),
            role: term.role(),
            number: term.number(),
            faces: term.faces(),
            flavor: term.flavor().map(str::to_string),
            values: term.values(),
            successes: term.success().unwrap_or(0),
            matrix: term
                .push_matrix(rows)
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.cloned()).collect())
                .collect(),
        }
    }
}

/// Everything a renderer needs to show a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// Game the roll was made for.
    pub game: Game,
    /// Roll name.
    pub name: Option<String>,
    /// Formula, such as `3db + 2ds - 1dn`.
    pub formula: String,
    /// Terms, sorted by role.
    pub terms: Vec<TermReport>,
    /// Derived counters.
    pub stats: RollStats,
}

impl DicePool {
    /// Build a report with terms ordered by `sorting`. Roles missing from
    /// `sorting` go last, in pool order.
    pub fn report(&self, sorting: &[DieRole]) -> RollReport {
        let rows = self.push_count() + 1;
        let mut terms: Vec<TermReport> = self
            .terms()
            .iter()
            .map(|term| TermReport::new(term, rows))
            .collect();
        terms.sort_by_key(|t| {
            sorting
                .iter()
                .position(|role| *role == t.role)
                .unwrap_or(sorting.len())
        });
        RollReport {
            game: self.game(),
            name: self.name().map(str::to_string),
            formula: self.to_string(),
            terms,
            stats: self.stats(),
        }
    }
}
