//! Die types, die terms, and rolling.
//!
//! Every die kind of the Year Zero games is described by a single
//! [`DieType`] record in a static catalog. A [`DieKind`] selects a record;
//! a [`DieRole`] is the semantic role several kinds can share (the four
//! Twilight 2000 step dice are all `base` dice, for example).

pub mod result;
pub mod roller;
pub mod term;

pub use result::{DieResult, ResultState};
pub use roller::{DiceRoller, ScriptedRoller};
pub use term::DieTerm;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::YzError;

/// The semantic role of a die inside a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieRole {
    /// Base (attribute) die.
    #[serde(rename = "base")]
    Base,
    /// Skill die.
    #[serde(rename = "skill")]
    Skill,
    /// Negative die: its successes are subtracted.
    #[serde(rename = "neg")]
    Negative,
    /// Gear die.
    #[serde(rename = "gear")]
    Gear,
    /// Stress die (Alien).
    #[serde(rename = "stress")]
    Stress,
    /// Artifact die (Forbidden Lands), can score several successes.
    #[serde(rename = "arto")]
    Artifact,
    /// Ammunition die (Twilight 2000).
    #[serde(rename = "ammo")]
    Ammo,
    /// Hit location die (Twilight 2000).
    #[serde(rename = "loc")]
    Location,
}

impl DieRole {
    /// All roles, in default display order.
    pub const ALL: [DieRole; 8] = [
        Self::Base,
        Self::Skill,
        Self::Negative,
        Self::Gear,
        Self::Artifact,
        Self::Location,
        Self::Ammo,
        Self::Stress,
    ];

    /// The short tag of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Skill => "skill",
            Self::Negative => "neg",
            Self::Gear => "gear",
            Self::Stress => "stress",
            Self::Artifact => "arto",
            Self::Ammo => "ammo",
            Self::Location => "loc",
        }
    }

    /// Parse a role from its short tag.
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    /// Whether a `1` on this role counts as a bane.
    pub fn is_banable(self) -> bool {
        matches!(self, Self::Base | Self::Gear | Self::Stress | Self::Ammo)
    }
}

impl std::fmt::Display for DieRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete die kind from the catalog.
///
/// The serialized name is the die type key used by the games
/// (`base`, `artoD8`, `a`, `brD6`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieKind {
    /// Base die: locked on 1 and 6.
    #[serde(rename = "base")]
    Base,
    /// Skill die: locked on 6.
    #[serde(rename = "skill")]
    Skill,
    /// Gear die: locked on 1 and 6.
    #[serde(rename = "gear")]
    Gear,
    /// Negative die: locked on 6, negative successes.
    #[serde(rename = "neg")]
    Negative,
    /// Stress die: locked on 1 and 6.
    #[serde(rename = "stress")]
    Stress,
    /// D8 artifact die.
    #[serde(rename = "artoD8")]
    ArtifactD8,
    /// D10 artifact die.
    #[serde(rename = "artoD10")]
    ArtifactD10,
    /// D12 artifact die.
    #[serde(rename = "artoD12")]
    ArtifactD12,
    /// Twilight 2000 step die A (d12).
    #[serde(rename = "a")]
    TwilightD12,
    /// Twilight 2000 step die B (d10).
    #[serde(rename = "b")]
    TwilightD10,
    /// Twilight 2000 step die C (d8).
    #[serde(rename = "c")]
    TwilightD8,
    /// Twilight 2000 step die D (d6).
    #[serde(rename = "d")]
    TwilightD6,
    /// Twilight 2000 ammunition die.
    #[serde(rename = "ammo")]
    Ammo,
    /// Twilight 2000 hit location die. Never pushed.
    #[serde(rename = "loc")]
    Location,
    /// Blade Runner d12.
    #[serde(rename = "brD12")]
    BladeRunnerD12,
    /// Blade Runner d10.
    #[serde(rename = "brD10")]
    BladeRunnerD10,
    /// Blade Runner d8.
    #[serde(rename = "brD8")]
    BladeRunnerD8,
    /// Blade Runner d6.
    #[serde(rename = "brD6")]
    BladeRunnerD6,
}

impl DieKind {
    /// Every die kind, in catalog order.
    pub const ALL: [DieKind; 18] = [
        Self::Base,
        Self::Skill,
        Self::Gear,
        Self::Negative,
        Self::Stress,
        Self::ArtifactD8,
        Self::ArtifactD10,
        Self::ArtifactD12,
        Self::TwilightD12,
        Self::TwilightD10,
        Self::TwilightD8,
        Self::TwilightD6,
        Self::Ammo,
        Self::Location,
        Self::BladeRunnerD12,
        Self::BladeRunnerD10,
        Self::BladeRunnerD8,
        Self::BladeRunnerD6,
    ];

    /// The catalog record for this kind.
    pub fn die_type(self) -> &'static DieType {
        &DIE_TYPES[self as usize]
    }

    /// The die type key (`base`, `artoD8`, `a`, ...).
    pub fn key(self) -> &'static str {
        self.die_type().key
    }

    /// The role of this kind.
    pub fn role(self) -> DieRole {
        self.die_type().role
    }

    /// The face count of this kind.
    pub fn faces(self) -> u32 {
        self.die_type().faces
    }
}

impl std::fmt::Display for DieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DieKind {
    type Err = YzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| YzError::UnknownDieType {
                kind: s.to_string(),
                allowed: join_keys(&Self::ALL),
            })
    }
}

/// Comma-separated die type keys, for error messages.
pub(crate) fn join_keys(kinds: &[DieKind]) -> String {
    kinds.iter().map(|k| k.key()).collect::<Vec<_>>().join(", ")
}

/// Immutable description of a die kind.
#[derive(Debug, PartialEq, Eq)]
pub struct DieType {
    /// Die type key.
    pub key: &'static str,
    /// Semantic role.
    pub role: DieRole,
    /// Short key selecting this die inside a game's formula.
    pub denomination: &'static str,
    /// Number of faces.
    pub faces: u32,
    /// Face values that are never rerolled by a push.
    pub locked_values: &'static [u32],
    /// Successes per face (index 0 is face 1). `None` means "6+ is one success".
    pub success_table: Option<&'static [i32]>,
}

impl DieType {
    /// Whether a rolled value is locked against pushing.
    pub fn is_locked(&self, value: u32) -> bool {
        self.locked_values.contains(&value)
    }

    /// Successes scored by a single face, before negation.
    pub fn successes_for(&self, value: u32) -> i32 {
        match self.success_table {
            Some(table) => value
                .checked_sub(1)
                .and_then(|i| table.get(i as usize))
                .copied()
                .unwrap_or(0),
            None => i32::from(value >= 6),
        }
    }
}

const ARTIFACT_SUCCESSES: &[i32] = &[0, 0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4];
const STEP_SUCCESSES: &[i32] = &[0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2];
const NO_SUCCESSES: &[i32] = &[0, 0, 0, 0, 0, 0];

const fn d6(
    key: &'static str,
    role: DieRole,
    deno: &'static str,
    locked: &'static [u32],
) -> DieType {
    DieType {
        key,
        role,
        denomination: deno,
        faces: 6,
        locked_values: locked,
        success_table: None,
    }
}

const fn table_die(
    key: &'static str,
    role: DieRole,
    deno: &'static str,
    faces: u32,
    locked: &'static [u32],
    table: &'static [i32],
) -> DieType {
    DieType {
        key,
        role,
        denomination: deno,
        faces,
        locked_values: locked,
        success_table: Some(table),
    }
}

/// The catalog, indexed by `DieKind as usize`.
static DIE_TYPES: [DieType; 18] = [
    d6("base", DieRole::Base, "b", &[1, 6]),
    d6("skill", DieRole::Skill, "s", &[6]),
    d6("gear", DieRole::Gear, "g", &[1, 6]),
    d6("neg", DieRole::Negative, "n", &[6]),
    d6("stress", DieRole::Stress, "z", &[1, 6]),
    table_die("artoD8", DieRole::Artifact, "8", 8, &[6, 7, 8], ARTIFACT_SUCCESSES),
    table_die("artoD10", DieRole::Artifact, "10", 10, &[6, 7, 8, 9, 10], ARTIFACT_SUCCESSES),
    table_die(
        "artoD12",
        DieRole::Artifact,
        "12",
        12,
        &[6, 7, 8, 9, 10, 11, 12],
        ARTIFACT_SUCCESSES,
    ),
    table_die(
        "a",
        DieRole::Base,
        "12",
        12,
        &[1, 6, 7, 8, 9, 10, 11, 12],
        STEP_SUCCESSES,
    ),
    table_die("b", DieRole::Base, "10", 10, &[1, 6, 7, 8, 9, 10], STEP_SUCCESSES),
    table_die("c", DieRole::Base, "8", 8, &[1, 6, 7, 8], STEP_SUCCESSES),
    table_die("d", DieRole::Base, "6", 6, &[1, 6], STEP_SUCCESSES),
    d6("ammo", DieRole::Ammo, "m", &[1, 6]),
    table_die("loc", DieRole::Location, "l", 6, &[1, 2, 3, 4, 5, 6], NO_SUCCESSES),
    table_die("brD12", DieRole::Base, "12", 12, &[1, 10, 11, 12], STEP_SUCCESSES),
    table_die("brD10", DieRole::Base, "10", 10, &[1, 10], STEP_SUCCESSES),
    table_die("brD8", DieRole::Base, "8", 8, &[1, 6, 7, 8], STEP_SUCCESSES),
    table_die("brD6", DieRole::Base, "6", 6, &[1, 6], STEP_SUCCESSES),
];
