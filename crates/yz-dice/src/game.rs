//! Game variants and the per-game context.
//!
//! A [`GameContext`] is the explicit replacement for a global "current game"
//! setting: it is built from a [`Game`], stored in every pool, and decides
//! which dice exist and how difficulty modifiers are resolved.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dice::{DieKind, DieRole, join_keys};
use crate::error::{YzError, YzResult};
use crate::modifier::ModifierRule;

/// A Year Zero game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    /// Mutant: Year Zero.
    #[serde(rename = "myz")]
    MutantYearZero,
    /// Forbidden Lands.
    #[serde(rename = "fbl")]
    ForbiddenLands,
    /// Alien RPG.
    #[serde(rename = "alien")]
    Alien,
    /// Tales From the Loop / Things From the Flood.
    #[serde(rename = "tales")]
    Tales,
    /// Coriolis: The Third Horizon.
    #[serde(rename = "cor")]
    Coriolis,
    /// Vaesen.
    #[serde(rename = "vae")]
    Vaesen,
    /// Twilight 2000 (4th edition).
    #[serde(rename = "t2k")]
    Twilight2000,
    /// Blade Runner RPG.
    #[serde(rename = "br")]
    BladeRunner,
}

impl Game {
    /// Every supported game.
    pub const ALL: [Game; 8] = [
        Self::MutantYearZero,
        Self::ForbiddenLands,
        Self::Alien,
        Self::Tales,
        Self::Coriolis,
        Self::Vaesen,
        Self::Twilight2000,
        Self::BladeRunner,
    ];

    /// Short identifier (`myz`, `t2k`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::MutantYearZero => "myz",
            Self::ForbiddenLands => "fbl",
            Self::Alien => "alien",
            Self::Tales => "tales",
            Self::Coriolis => "cor",
            Self::Vaesen => "vae",
            Self::Twilight2000 => "t2k",
            Self::BladeRunner => "br",
        }
    }

    /// Full title.
    pub fn title(self) -> &'static str {
        match self {
            Self::MutantYearZero => "Mutant: Year Zero",
            Self::ForbiddenLands => "Forbidden Lands",
            Self::Alien => "Alien RPG",
            Self::Tales => "Tales From the Loop",
            Self::Coriolis => "Coriolis: The Third Horizon",
            Self::Vaesen => "Vaesen",
            Self::Twilight2000 => "Twilight 2000",
            Self::BladeRunner => "Blade Runner",
        }
    }

    /// The dice that belong to this game, in registration order.
    pub fn die_kinds(self) -> &'static [DieKind] {
        use DieKind::*;
        match self {
            Self::MutantYearZero => &[Base, Skill, Gear, Negative],
            Self::ForbiddenLands => &[
                Base,
                Skill,
                Gear,
                Negative,
                ArtifactD8,
                ArtifactD10,
                ArtifactD12,
            ],
            Self::Alien => &[Skill, Stress],
            Self::Tales | Self::Coriolis | Self::Vaesen => &[Skill],
            Self::Twilight2000 => &[
                TwilightD12,
                TwilightD10,
                TwilightD8,
                TwilightD6,
                Ammo,
                Location,
            ],
            Self::BladeRunner => &[
                BladeRunnerD12,
                BladeRunnerD10,
                BladeRunnerD8,
                BladeRunnerD6,
            ],
        }
    }

    /// How difficulty modifiers change a pool of this game.
    pub fn modifier_rule(self) -> ModifierRule {
        match self {
            Self::Twilight2000 => ModifierRule::Ladder,
            Self::BladeRunner => ModifierRule::Advantage,
            Self::MutantYearZero | Self::ForbiddenLands => ModifierRule::Paired {
                negative: DieKind::Negative,
            },
            Self::Alien | Self::Tales | Self::Coriolis | Self::Vaesen => ModifierRule::SkillFloor,
        }
    }

    /// The die used when a pool is forged from an empty manifest.
    pub fn default_die(self) -> DieKind {
        match self {
            Self::Twilight2000 => DieKind::TwilightD6,
            Self::BladeRunner => DieKind::BladeRunnerD6,
            _ => DieKind::Skill,
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Game {
    type Err = YzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.key() == s)
            .ok_or_else(|| YzError::UnknownGame {
                game: s,
                allowed: Self::ALL.map(Game::key).join(", "),
            })
    }
}

/// Everything a pool needs to know about the game it is rolled for.
///
/// Serializes as the game key plus a `modifier_rule` entry that is only
/// written when it differs from the game's own rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredContext", into = "StoredContext")]
pub struct GameContext {
    game: Game,
    modifier_rule: ModifierRule,
}

impl GameContext {
    /// Build the context of a game.
    pub fn new(game: Game) -> Self {
        Self {
            game,
            modifier_rule: game.modifier_rule(),
        }
    }

    /// Override the modifier rule (for house rules or tests).
    pub fn with_modifier_rule(mut self, rule: ModifierRule) -> Self {
        self.modifier_rule = rule;
        self
    }

    /// The game.
    pub fn game(&self) -> Game {
        self.game
    }

    /// The modifier rule in effect.
    pub fn modifier_rule(&self) -> ModifierRule {
        self.modifier_rule
    }

    /// The dice that belong to the game.
    pub fn die_kinds(&self) -> &'static [DieKind] {
        self.game.die_kinds()
    }

    /// Whether a die kind belongs to the game.
    pub fn has_die(&self, kind: DieKind) -> bool {
        self.die_kinds().contains(&kind)
    }

    /// Check that a die kind belongs to the game.
    pub fn require_die(&self, kind: DieKind) -> YzResult<DieKind> {
        if self.has_die(kind) {
            Ok(kind)
        } else {
            Err(YzError::UnknownDieType {
                kind: kind.key().to_string(),
                allowed: join_keys(self.die_kinds()),
            })
        }
    }

    /// Find the game's die selected by a denomination (`b`, `s`, `10`, ...).
    pub fn die_by_denomination(&self, denomination: &str) -> YzResult<DieKind> {
        let denomination = denomination.trim();
        self.die_kinds()
            .iter()
            .copied()
            .find(|k| k.die_type().denomination == denomination)
            .ok_or_else(|| YzError::UnknownDenomination {
                denomination: denomination.to_string(),
                game: self.game.to_string(),
                allowed: self
                    .die_kinds()
                    .iter()
                    .map(|k| k.die_type().denomination)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Find a die kind by role and face count.
    ///
    /// The game's own dice are preferred; otherwise the whole catalog is
    /// searched, so a game can borrow a die it does not register.
    pub fn die_for(&self, role: DieRole, faces: u32) -> YzResult<DieKind> {
        let matches = |k: &DieKind| k.role() == role && k.faces() == faces;
        if let Some(kind) = self.die_kinds().iter().copied().find(matches) {
            return Ok(kind);
        }
        let kind = DieKind::ALL
            .into_iter()
            .find(matches)
            .ok_or_else(|| YzError::NoDieForRole {
                role: role.to_string(),
                faces,
            })?;
        tracing::debug!(game = %self.game, die = %kind, "borrowing a die from outside the game");
        Ok(kind)
    }
}

impl From<Game> for GameContext {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredContext {
    game: Game,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modifier_rule: Option<ModifierRule>,
}

impl From<StoredContext> for GameContext {
    fn from(stored: StoredContext) -> Self {
        let context = Self::new(stored.game);
        match stored.modifier_rule {
            Some(rule) => context.with_modifier_rule(rule),
            None => context,
        }
    }
}

impl From<GameContext> for StoredContext {
    fn from(context: GameContext) -> Self {
        let rule = context.modifier_rule;
        let modifier_rule = (rule != context.game.modifier_rule()).then_some(rule);
        Self {
            game: context.game,
            modifier_rule,
        }
    }
}

impl From<GameContext> for Game {
    fn from(ctx: GameContext) -> Self {
        ctx.game
    }
}
