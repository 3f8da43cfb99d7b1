//! A group of same-kind dice and their roll history.

use serde::{Deserialize, Serialize};

use super::result::{DieResult, ResultState};
use super::roller::DiceRoller;
use super::{DieKind, DieRole, DieType};

/// A reroll queued by a push, waiting for the roller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRoll {
    /// Push cycle the new result belongs to.
    pub push_index: u32,
    /// Column inherited from the result it replaces.
    pub result_index: u32,
}

/// How [`DieTerm::retire_one`] takes a result out of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireMode {
    /// Delete the result from the history.
    Delete,
    /// Keep it, marked as discarded.
    Discard,
    /// Keep it, switched off.
    Disable,
}

/// One or more dice of a single kind inside a pool.
///
/// Tracks every result ever rolled for the term: the active ones, and the
/// ones a push replaced, so a renderer can rebuild the push history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieTerm {
    kind: DieKind,
    number: u32,
    max_push: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flavor: Option<String>,
    #[serde(default)]
    results: Vec<DieResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pending: Vec<PendingRoll>,
}

impl DieTerm {
    /// Create an unrolled term of `number` dice, pushable once.
    pub fn new(kind: DieKind, number: u32) -> Self {
        Self {
            kind,
            number,
            max_push: 1,
            flavor: None,
            results: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Set how many times this term may be pushed (0 disables pushing).
    pub fn with_max_push(mut self, max_push: u32) -> Self {
        self.max_push = max_push;
        self
    }

    /// Attach a flavor label.
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// The die kind.
    pub fn kind(&self) -> DieKind {
        self.kind
    }

    /// The catalog record of the die kind.
    pub fn die_type(&self) -> &'static DieType {
        self.kind.die_type()
    }

    /// The role of the die kind.
    pub fn role(&self) -> DieRole {
        self.die_type().role
    }

    /// Number of faces of each die.
    pub fn faces(&self) -> u32 {
        self.die_type().faces
    }

    /// Number of dice in the term.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Push cap of the term.
    pub fn max_push(&self) -> u32 {
        self.max_push
    }

    /// Change the push cap.
    pub fn set_max_push(&mut self, max_push: u32) {
        self.max_push = max_push;
    }

    /// Flavor label, if any.
    pub fn flavor(&self) -> Option<&str> {
        self.flavor.as_deref()
    }

    /// Every result rolled so far, including replaced ones.
    pub fn results(&self) -> &[DieResult] {
        &self.results
    }

    /// Active results only.
    pub fn active_results(&self) -> impl Iterator<Item = &DieResult> {
        self.results.iter().filter(|r| r.is_active())
    }

    /// Values of the active results.
    pub fn values(&self) -> Vec<u32> {
        self.active_results().map(|r| r.value).collect()
    }

    /// How many active results show exactly `value`.
    pub fn count(&self, value: u32) -> u32 {
        self.active_results().filter(|r| r.value == value).count() as u32
    }

    /// Whether the term has been rolled at least once.
    pub fn is_rolled(&self) -> bool {
        !self.results.is_empty()
    }

    /// Whether rerolls are queued and waiting for [`Self::roll_pending`].
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Highest push cycle seen among the results.
    pub fn push_count(&self) -> u32 {
        self.results.iter().map(|r| r.push_index).max().unwrap_or(0)
    }

    /// Whether the term has been pushed.
    pub fn pushed(&self) -> bool {
        self.push_count() > 0
    }

    /// Whether a push would reroll anything.
    pub fn is_pushable(&self) -> bool {
        if self.push_count() >= self.max_push {
            return false;
        }
        let die_type = self.die_type();
        self.active_results().any(|r| !die_type.is_locked(r.value))
    }

    /// Whether a push recorded under the given cycle would reroll something.
    pub(crate) fn is_pushable_on(&self, push_index: u32) -> bool {
        push_index <= self.max_push && self.is_pushable()
    }

    /// Successes scored by the active results, or `None` before the first roll.
    pub fn success(&self) -> Option<i32> {
        if !self.is_rolled() {
            return None;
        }
        let die_type = self.die_type();
        let total: i32 = self
            .active_results()
            .map(|r| die_type.successes_for(r.value))
            .sum();
        Some(if die_type.role == DieRole::Negative {
            -total
        } else {
            total
        })
    }

    /// Active ones (banes), or `None` before the first roll.
    pub fn failure(&self) -> Option<u32> {
        if !self.is_rolled() {
            return None;
        }
        Some(self.active_results().filter(|r| r.value <= 1).count() as u32)
    }

    fn next_result_index(&self) -> u32 {
        self.results
            .iter()
            .map(|r| r.result_index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Roll one new die into the next free column of the current push cycle.
    pub fn roll<R: DiceRoller + ?Sized>(&mut self, roller: &mut R) -> &DieResult {
        let value = roller.roll_die(self.faces());
        self.record(value)
    }

    /// Like [`Self::roll`], but with a predetermined value (clamped to the faces).
    pub fn roll_preset(&mut self, value: u32) -> &DieResult {
        let value = value.clamp(1, self.faces());
        self.record(value)
    }

    fn record(&mut self, value: u32) -> &DieResult {
        let result = DieResult::new(value, self.push_count(), self.next_result_index());
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    /// Roll every die of a never-rolled term, then any queued rerolls.
    pub fn evaluate<R: DiceRoller + ?Sized>(&mut self, roller: &mut R) {
        if !self.is_rolled() {
            for _ in 0..self.number {
                self.roll(roller);
            }
        }
        self.roll_pending(roller);
    }

    /// Mark every unlocked active result as replaced and queue one reroll per
    /// replaced result, in the same column. Locked results stay active.
    ///
    /// Returns how many rerolls were queued; 0 when the term is not pushable.
    pub fn push(&mut self) -> usize {
        self.push_as(self.push_count() + 1)
    }

    /// Like [`Self::push`], recording the rerolls under the given push cycle.
    pub(crate) fn push_as(&mut self, push_index: u32) -> usize {
        if !self.is_pushable_on(push_index) {
            return 0;
        }
        let die_type = self.die_type();
        let before = self.pending.len();
        for result in self.results.iter_mut().filter(|r| r.is_active()) {
            result.hidden = true;
            if !die_type.is_locked(result.value) {
                result.state = ResultState::Superseded;
                self.pending.push(PendingRoll {
                    push_index,
                    result_index: result.result_index,
                });
            }
        }
        self.pending.len() - before
    }

    /// Roll the rerolls queued by [`Self::push`]. Returns how many were rolled.
    pub fn roll_pending<R: DiceRoller + ?Sized>(&mut self, roller: &mut R) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let faces = self.faces();
        for slot in &pending {
            let value = roller.roll_die(faces);
            self.results
                .push(DieResult::new(value, slot.push_index, slot.result_index));
        }
        pending.len()
    }

    pub(crate) fn grow(&mut self) {
        self.number += 1;
    }

    pub(crate) fn shrink(&mut self) {
        self.number = self.number.saturating_sub(1);
    }

    pub(crate) fn preset_all(&mut self, value: u32) {
        let value = value.clamp(1, self.faces());
        for result in &mut self.results {
            result.value = value;
        }
    }

    /// Take the first active result out of play. Returns false if none is left.
    pub fn retire_one(&mut self, mode: RetireMode) -> bool {
        let Some(index) = self.results.iter().position(|r| r.is_active()) else {
            return false;
        };
        match mode {
            RetireMode::Delete => {
                self.results.remove(index);
            }
            RetireMode::Discard => self.results[index].state = ResultState::Discarded,
            RetireMode::Disable => self.results[index].state = ResultState::Disabled,
        }
        true
    }

    /// Lay the results out as rows (push cycles) by columns (result index).
    ///
    /// Row 0 holds the original roll. When several results share a cell the
    /// latest one wins.
    pub fn push_matrix(&self, rows: u32) -> Vec<Vec<Option<&DieResult>>> {
        let rows = rows.max(self.push_count() + 1) as usize;
        let cols = self.number.max(self.next_result_index()) as usize;
        let mut matrix = vec![vec![None; cols]; rows];
        for result in &self.results {
            matrix[result.push_index as usize][result.result_index as usize] = Some(result);
        }
        matrix
    }
}

impl std::fmt::Display for DieTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.number, self.die_type().denomination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;

    fn rolled(kind: DieKind, values: &[u32]) -> DieTerm {
        let mut term = DieTerm::new(kind, values.len() as u32);
        term.evaluate(&mut ScriptedRoller::new(values.iter().copied()));
        term
    }

    #[test]
    fn unrolled_term_has_no_totals() {
        let term = DieTerm::new(DieKind::Skill, 3);
        assert_eq!(term.success(), None);
        assert_eq!(term.failure(), None);
        assert!(!term.is_pushable());
        assert_eq!(term.to_string(), "3ds");
    }

    #[test]
    fn roll_assigns_sequential_columns() {
        let term = rolled(DieKind::Base, &[2, 4, 6]);
        let cols: Vec<u32> = term.results().iter().map(|r| r.result_index).collect();
        assert_eq!(cols, vec![0, 1, 2]);
        assert!(term.results().iter().all(|r| r.push_index == 0));
    }

    #[test]
    fn skill_six_is_one_success() {
        assert_eq!(rolled(DieKind::Skill, &[6]).success(), Some(1));
        assert_eq!(rolled(DieKind::Skill, &[5]).success(), Some(0));
    }

    #[test]
    fn negative_six_subtracts() {
        assert_eq!(rolled(DieKind::Negative, &[6, 6, 2]).success(), Some(-2));
    }

    #[test]
    fn artifact_table_successes() {
        assert_eq!(rolled(DieKind::ArtifactD12, &[12, 8]).success(), Some(6));
    }

    #[test]
    fn failure_counts_ones() {
        assert_eq!(rolled(DieKind::Gear, &[1, 1, 4]).failure(), Some(2));
    }

    #[test]
    fn push_rerolls_unlocked_in_same_column() {
        let mut term = rolled(DieKind::Base, &[1, 3, 6]);
        assert!(term.is_pushable());
        assert_eq!(term.push(), 1);
        assert!(term.has_pending());
        assert_eq!(term.roll_pending(&mut ScriptedRoller::new([5])), 1);

        assert_eq!(term.push_count(), 1);
        assert!(term.pushed());
        assert_eq!(term.values(), vec![1, 6, 5]);
        let replaced = &term.results()[1];
        assert!(replaced.was_pushed());
        let reroll = &term.results()[3];
        assert_eq!(reroll.push_index, 1);
        assert_eq!(reroll.result_index, 1);
        assert!(term.results()[0].hidden);
        assert!(term.results()[0].is_active());
    }

    #[test]
    fn push_respects_cap() {
        let mut term = rolled(DieKind::Skill, &[2]);
        term.push();
        term.roll_pending(&mut ScriptedRoller::new([3]));
        assert!(!term.is_pushable());
        assert_eq!(term.push(), 0);
        assert_eq!(term.push_count(), 1);
    }

    #[test]
    fn locked_faces_block_push() {
        let mut term = rolled(DieKind::Gear, &[6]);
        assert!(!term.is_pushable());
        assert_eq!(term.push(), 0);
        assert_eq!(term.push_count(), 0);
    }

    #[test]
    fn location_die_never_pushes() {
        let term = rolled(DieKind::Location, &[3]);
        assert!(!term.is_pushable());
        assert_eq!(term.success(), Some(0));
    }

    #[test]
    fn zero_max_push_disables() {
        let mut term = DieTerm::new(DieKind::Skill, 1).with_max_push(0);
        term.evaluate(&mut ScriptedRoller::new([2]));
        assert!(!term.is_pushable());
    }

    #[test]
    fn retire_modes() {
        let mut term = rolled(DieKind::Skill, &[6, 6, 6]);
        assert!(term.retire_one(RetireMode::Delete));
        assert_eq!(term.results().len(), 2);
        assert!(term.retire_one(RetireMode::Discard));
        assert_eq!(term.results()[0].state, ResultState::Discarded);
        assert!(term.retire_one(RetireMode::Disable));
        assert_eq!(term.results()[1].state, ResultState::Disabled);
        assert!(!term.retire_one(RetireMode::Delete));
        assert_eq!(term.success(), Some(0));
    }

    #[test]
    fn matrix_places_rerolls_by_row() {
        let mut term = rolled(DieKind::Skill, &[2, 6]);
        term.push();
        term.roll_pending(&mut ScriptedRoller::new([4]));
        let matrix = term.push_matrix(1);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0][0].map(|r| r.value), Some(2));
        assert_eq!(matrix[0][1].map(|r| r.value), Some(6));
        assert_eq!(matrix[1][0].map(|r| r.value), Some(4));
        assert!(matrix[1][1].is_none());
    }

    #[test]
    fn preset_roll_is_clamped() {
        let mut term = DieTerm::new(DieKind::Skill, 1);
        assert_eq!(term.roll_preset(9).value, 6);
    }
}
