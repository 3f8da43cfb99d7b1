//! Dice pools: one resolution roll made of several die terms.
//!
//! A pool goes `Unrolled → Evaluated`, and then any number of pushes return
//! it to `Evaluated`. Replaced results are kept for the audit trail and are
//! never reactivated.

pub mod edit;
pub mod query;

pub use edit::{AddOptions, RemoveOptions, TermFilter};
pub use query::{Comparator, RollStats};

use serde::{Deserialize, Serialize};

use crate::dice::{DiceRoller, DieKind, DieRole, DieTerm};
use crate::error::{YzError, YzResult};
use crate::game::{Game, GameContext};

/// Evaluation state of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolState {
    /// Built, not rolled yet.
    #[default]
    Unrolled,
    /// Every term has been rolled.
    Evaluated,
}

/// One manifest entry used to forge a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSpec {
    /// Die denomination within the game (`b`, `s`, `g`, `10`, ...).
    pub die: String,
    /// How many dice.
    pub quantity: u32,
    /// Optional flavor label.
    #[serde(default)]
    pub flavor: Option<String>,
    /// Optional per-term push cap, overriding the pool default.
    #[serde(default)]
    pub max_push: Option<u32>,
}

impl TermSpec {
    /// A plain entry.
    pub fn new(die: impl Into<String>, quantity: u32) -> Self {
        Self {
            die: die.into(),
            quantity,
            flavor: None,
            max_push: None,
        }
    }

    /// Set the flavor label.
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// Set the push cap of this entry.
    pub fn with_max_push(mut self, max_push: u32) -> Self {
        self.max_push = Some(max_push);
        self
    }
}

/// An ordered collection of die terms rolled together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    #[serde(flatten)]
    context: GameContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    default_max_push: u32,
    terms: Vec<DieTerm>,
    #[serde(default)]
    state: PoolState,
}

impl DicePool {
    /// An empty pool. New terms will be pushable once.
    pub fn new(context: GameContext) -> Self {
        Self {
            context,
            name: None,
            default_max_push: 1,
            terms: Vec::new(),
            state: PoolState::Unrolled,
        }
    }

    /// Build a pool from a manifest of denominations.
    ///
    /// Entries with a zero quantity are skipped. If nothing is left, the pool
    /// falls back to a single default die of the game.
    pub fn forge(context: GameContext, manifest: &[TermSpec], max_push: u32) -> YzResult<Self> {
        let mut pool = Self::new(context).with_default_max_push(max_push);
        for spec in manifest.iter().filter(|s| s.quantity > 0) {
            let kind = context.die_by_denomination(&spec.die)?;
            let mut term =
                DieTerm::new(kind, spec.quantity).with_max_push(spec.max_push.unwrap_or(max_push));
            if let Some(flavor) = &spec.flavor {
                term = term.with_flavor(flavor.clone());
            }
            pool.terms.push(term);
        }
        pool.ensure_not_empty();
        Ok(pool)
    }

    /// Build a pool from die kinds and quantities.
    ///
    /// Every kind must belong to the game. Zero quantities are skipped and an
    /// empty result falls back to a single default die.
    pub fn from_quantities(
        context: GameContext,
        dice: &[(DieKind, u32)],
        max_push: u32,
    ) -> YzResult<Self> {
        let mut pool = Self::new(context).with_default_max_push(max_push);
        for &(kind, quantity) in dice.iter().filter(|(_, n)| *n > 0) {
            context.require_die(kind)?;
            pool.terms
                .push(DieTerm::new(kind, quantity).with_max_push(max_push));
        }
        pool.ensure_not_empty();
        Ok(pool)
    }

    fn ensure_not_empty(&mut self) {
        if self.terms.is_empty() {
            let kind = self.game().default_die();
            tracing::warn!(
                game = %self.game(),
                die = %kind,
                "empty dice manifest, rolling a single default die"
            );
            self.terms
                .push(DieTerm::new(kind, 1).with_max_push(self.default_max_push));
        }
    }

    /// Set the roll's name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the push cap given to terms created later.
    pub fn with_default_max_push(mut self, max_push: u32) -> Self {
        self.default_max_push = max_push;
        self
    }

    /// Append a term as-is.
    pub fn with_term(mut self, term: DieTerm) -> YzResult<Self> {
        if term.number() == 0 {
            return Err(YzError::InvalidPool(format!("term {term} has no dice")));
        }
        self.context.require_die(term.kind())?;
        self.terms.push(term);
        Ok(self)
    }

    /// The game context.
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// The game.
    pub fn game(&self) -> Game {
        self.context.game()
    }

    /// The roll's name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All terms, in pool order.
    pub fn terms(&self) -> &[DieTerm] {
        &self.terms
    }

    /// Terms of one role.
    pub fn terms_of(&self, role: DieRole) -> impl Iterator<Item = &DieTerm> {
        self.terms.iter().filter(move |t| t.role() == role)
    }

    pub(crate) fn terms_mut(&mut self) -> &mut Vec<DieTerm> {
        &mut self.terms
    }

    /// Evaluation state.
    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Whether the pool has been rolled.
    pub fn is_evaluated(&self) -> bool {
        self.state == PoolState::Evaluated
    }

    /// Total number of dice.
    pub fn size(&self) -> u32 {
        self.terms.iter().map(DieTerm::number).sum()
    }

    /// Quantity of each die kind, in order of first appearance.
    pub fn dice_quantities(&self) -> Vec<(DieKind, u32)> {
        let mut out: Vec<(DieKind, u32)> = Vec::new();
        for term in &self.terms {
            match out.iter_mut().find(|(k, _)| *k == term.kind()) {
                Some((_, n)) => *n += term.number(),
                None => out.push((term.kind(), term.number())),
            }
        }
        out
    }

    /// Effective push cap: the highest cap among the terms, 0 when empty.
    pub fn max_push(&self) -> u32 {
        self.terms.iter().map(DieTerm::max_push).max().unwrap_or(0)
    }

    /// Set the push cap of the pool and of every term in it.
    pub fn set_max_push(&mut self, max_push: u32) {
        self.default_max_push = max_push;
        for term in &mut self.terms {
            term.set_max_push(max_push);
        }
    }

    /// Push cap for a term created now.
    pub(crate) fn max_push_for_new_term(&self) -> u32 {
        self.terms
            .iter()
            .map(DieTerm::max_push)
            .max()
            .unwrap_or(self.default_max_push)
    }

    /// How many times the pool has been pushed.
    pub fn push_count(&self) -> u32 {
        self.terms.iter().map(DieTerm::push_count).max().unwrap_or(0)
    }

    /// Whether the pool has been pushed.
    pub fn pushed(&self) -> bool {
        self.push_count() > 0
    }

    /// Whether another push is allowed and would reroll something.
    ///
    /// A term only counts when the pool's next push cycle is within its cap.
    pub fn is_pushable(&self) -> bool {
        let cycle = self.push_count() + 1;
        cycle <= self.max_push() && self.terms.iter().any(|t| t.is_pushable_on(cycle))
    }

    /// Roll every unrolled term and every queued reroll.
    pub fn evaluate<R: DiceRoller + ?Sized>(&mut self, roller: &mut R) {
        for term in &mut self.terms {
            term.evaluate(roller);
        }
        self.state = PoolState::Evaluated;
    }

    /// Push the pool: reroll every unlocked die, keeping locked results.
    ///
    /// An unrolled pool is evaluated first. Returns false (and changes nothing
    /// else) when the pool is not pushable.
    pub fn push<R: DiceRoller + ?Sized>(&mut self, roller: &mut R) -> bool {
        if !self.is_evaluated() {
            self.evaluate(roller);
        }
        if !self.is_pushable() {
            tracing::debug!(push_count = self.push_count(), "pool is not pushable");
            return false;
        }
        let queued = self.queue_rerolls();
        let rolled = self.roll_pending(roller);
        tracing::debug!(
            push_count = self.push_count(),
            queued,
            rolled,
            "pushed pool"
        );
        true
    }

    /// First push phase: mark replaced results and queue their rerolls.
    ///
    /// Every term records its rerolls under the pool's next push cycle.
    pub fn queue_rerolls(&mut self) -> usize {
        let cycle = self.push_count() + 1;
        self.terms.iter_mut().map(|term| term.push_as(cycle)).sum()
    }

    /// Second push phase: roll only the queued rerolls.
    pub fn roll_pending<R: DiceRoller + ?Sized>(&mut self, roller: &mut R) -> usize {
        self.terms
            .iter_mut()
            .map(|term| term.roll_pending(roller))
            .sum()
    }

    /// An independent deep copy, histories included.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Serialize the pool, including every term's history.
    pub fn to_json(&self) -> YzResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a pool saved with [`Self::to_json`].
    pub fn from_json(json: &str) -> YzResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                let op = if term.role() == DieRole::Negative { '-' } else { '+' };
                write!(f, " {op} ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;
    use crate::modifier::ModifierRule;

    fn myz() -> GameContext {
        GameContext::new(Game::MutantYearZero)
    }

    #[test]
    fn forge_from_manifest() {
        let manifest = [
            TermSpec::new("b", 3),
            TermSpec::new("s", 2).with_flavor("Shoot"),
            TermSpec::new("g", 0),
            TermSpec::new("n", 1).with_max_push(0),
        ];
        let pool = DicePool::forge(myz(), &manifest, 1).unwrap();
        assert_eq!(pool.terms().len(), 3);
        assert_eq!(pool.size(), 6);
        assert_eq!(pool.terms()[1].flavor(), Some("Shoot"));
        assert_eq!(pool.terms()[2].max_push(), 0);
        assert_eq!(pool.to_string(), "3db + 2ds - 1dn");
        assert_eq!(pool.state(), PoolState::Unrolled);
    }

    #[test]
    fn forge_rejects_unknown_denomination() {
        let err = DicePool::forge(myz(), &[TermSpec::new("m", 1)], 1).unwrap_err();
        assert!(matches!(err, YzError::UnknownDenomination { .. }));
    }

    #[test]
    fn empty_manifest_falls_back() {
        let pool = DicePool::forge(myz(), &[], 1).unwrap();
        assert_eq!(pool.dice_quantities(), vec![(DieKind::Skill, 1)]);
        let t2k = DicePool::forge(GameContext::new(Game::Twilight2000), &[], 1).unwrap();
        assert_eq!(t2k.to_string(), "1d6");
    }

    #[test]
    fn from_quantities_checks_game() {
        let ctx = GameContext::new(Game::Alien);
        assert!(DicePool::from_quantities(ctx, &[(DieKind::Base, 1)], 1).is_err());
        let dice = [(DieKind::Skill, 4), (DieKind::Stress, 2)];
        let pool = DicePool::from_quantities(ctx, &dice, 1).unwrap();
        assert_eq!(pool.to_string(), "4ds + 2dz");
    }

    #[test]
    fn with_term_rejects_empty_term() {
        let err = DicePool::new(myz())
            .with_term(DieTerm::new(DieKind::Base, 0))
            .unwrap_err();
        assert!(matches!(err, YzError::InvalidPool(_)));
    }

    #[test]
    fn max_push_is_highest_term_cap() {
        let mut pool = DicePool::new(myz());
        assert_eq!(pool.max_push(), 0);
        pool = pool
            .with_term(DieTerm::new(DieKind::Base, 1).with_max_push(2))
            .unwrap()
            .with_term(DieTerm::new(DieKind::Skill, 1).with_max_push(0))
            .unwrap();
        assert_eq!(pool.max_push(), 2);
        pool.set_max_push(3);
        assert!(pool.terms().iter().all(|t| t.max_push() == 3));
    }

    #[test]
    fn push_evaluates_unrolled_pool_first() {
        let mut pool = DicePool::from_quantities(myz(), &[(DieKind::Skill, 1)], 1).unwrap();
        let mut roller = ScriptedRoller::new([2, 4]);
        assert!(pool.push(&mut roller));
        assert!(pool.is_evaluated());
        assert_eq!(pool.push_count(), 1);
        assert_eq!(pool.terms()[0].values(), vec![4]);
        assert!(!pool.is_pushable());
        assert!(!pool.push(&mut roller));
    }

    #[test]
    fn push_keeps_locked_results() {
        let mut pool =
            DicePool::from_quantities(myz(), &[(DieKind::Base, 2), (DieKind::Gear, 1)], 1).unwrap();
        pool.evaluate(&mut ScriptedRoller::new([1, 4, 6]));
        assert!(pool.push(&mut ScriptedRoller::new([5])));
        assert_eq!(pool.terms()[0].values(), vec![1, 5]);
        assert_eq!(pool.terms()[1].values(), vec![6]);
        assert_eq!(pool.terms()[1].push_count(), 0);
    }

    #[test]
    fn late_term_is_pushed_on_pool_cycle() {
        let mut pool = DicePool::from_quantities(myz(), &[(DieKind::Skill, 1)], 2).unwrap();
        pool.evaluate(&mut ScriptedRoller::new([3]));
        assert!(pool.push(&mut ScriptedRoller::new([4])));
        pool.add_dice(1, DieRole::Gear, AddOptions::default(), &mut ScriptedRoller::new([2]))
            .unwrap();
        assert!(pool.push(&mut ScriptedRoller::new([5, 5])));
        assert_eq!(pool.push_count(), 2);
        let gear: Vec<u32> = pool.terms()[1]
            .results()
            .iter()
            .map(|r| r.push_index)
            .collect();
        assert_eq!(gear, vec![0, 2]);
        assert!(!pool.is_pushable());
    }

    #[test]
    fn late_term_beyond_its_cap_blocks_push() {
        let mut pool = DicePool::from_quantities(myz(), &[(DieKind::Skill, 1)], 2).unwrap();
        pool.evaluate(&mut ScriptedRoller::new([3]));
        assert!(pool.push(&mut ScriptedRoller::new([6])));
        let options = AddOptions::default().with_max_push(1);
        pool.add_dice(1, DieRole::Base, options, &mut ScriptedRoller::new([2]))
            .unwrap();
        assert!(pool.terms()[1].is_pushable());
        assert!(!pool.is_pushable());
        let before = pool.clone();
        assert!(!pool.push(&mut ScriptedRoller::new([5])));
        assert_eq!(pool, before);
    }

    #[test]
    fn duplicate_is_independent() {
        let mut pool = DicePool::from_quantities(myz(), &[(DieKind::Skill, 2)], 1).unwrap();
        pool.evaluate(&mut ScriptedRoller::new([2, 3]));
        let copy = pool.duplicate();
        pool.push(&mut ScriptedRoller::new([6, 6]));
        assert!(!copy.pushed());
        assert_eq!(copy.terms()[0].values(), vec![2, 3]);
        assert!(pool.pushed());
    }

    #[test]
    fn json_round_trip_keeps_history() {
        let mut pool = DicePool::from_quantities(myz(), &[(DieKind::Base, 2)], 1)
            .unwrap()
            .with_name("Force");
        pool.evaluate(&mut ScriptedRoller::new([3, 6]));
        pool.push(&mut ScriptedRoller::new([2]));
        let json = pool.to_json().unwrap();
        assert!(json.contains("\"game\":\"myz\""));
        let restored = DicePool::from_json(&json).unwrap();
        assert_eq!(restored, pool);
        assert_eq!(restored.name(), Some("Force"));
    }

    #[test]
    fn json_round_trip_keeps_modifier_rule() {
        let ctx = GameContext::new(Game::Coriolis).with_modifier_rule(ModifierRule::Paired {
            negative: DieKind::Negative,
        });
        let pool = DicePool::from_quantities(ctx, &[(DieKind::Skill, 2)], 1).unwrap();
        let json = pool.to_json().unwrap();
        assert!(json.contains("\"game\":\"cor\""));
        assert!(json.contains("modifier_rule"));
        let mut restored = DicePool::from_json(&json).unwrap();
        assert_eq!(restored, pool);
        restored.modify(-3, &mut ScriptedRoller::default()).unwrap();
        assert_eq!(restored.count_role(DieRole::Negative), 1);
    }

    #[test]
    fn default_modifier_rule_is_not_written() {
        let pool = DicePool::from_quantities(myz(), &[(DieKind::Skill, 1)], 1).unwrap();
        assert!(!pool.to_json().unwrap().contains("modifier_rule"));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(
            DicePool::from_json("{\"game\":\"dnd\"}"),
            Err(YzError::Serialization(_))
        ));
    }
}
