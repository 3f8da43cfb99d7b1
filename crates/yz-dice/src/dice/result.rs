//! Individual die results and their lifecycle state.

use serde::{Deserialize, Serialize};

/// Where a rolled result stands in the roll's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultState {
    /// Counts toward every aggregate.
    #[default]
    Active,
    /// Replaced by a reroll during a push. Kept for the audit trail.
    Superseded,
    /// Taken out of the pool and greyed out.
    Discarded,
    /// Switched off without being marked as discarded.
    Disabled,
}

/// One rolled face of a die term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The face value rolled (1 to faces).
    pub value: u32,
    /// Lifecycle state.
    #[serde(default)]
    pub state: ResultState,
    /// The push cycle that produced this result (0 for the first roll).
    pub push_index: u32,
    /// Column of this result within its term. Presentational only.
    pub result_index: u32,
    /// Hidden from 3D dice animations after a push. Presentational only.
    #[serde(default)]
    pub hidden: bool,
}

impl DieResult {
    /// A fresh, active result.
    pub fn new(value: u32, push_index: u32, result_index: u32) -> Self {
        Self {
            value,
            state: ResultState::Active,
            push_index,
            result_index,
            hidden: false,
        }
    }

    /// Whether this result counts toward totals.
    pub fn is_active(&self) -> bool {
        self.state == ResultState::Active
    }

    /// Whether this result was rerolled away by a push.
    pub fn was_pushed(&self) -> bool {
        self.state == ResultState::Superseded
    }
}

impl std::fmt::Display for DieResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.state {
            ResultState::Active => write!(f, "{}", self.value),
            _ => write!(f, "({})", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_result_is_active() {
        let r = DieResult::new(4, 0, 2);
        assert!(r.is_active());
        assert!(!r.was_pushed());
        assert!(!r.hidden);
        assert_eq!(r.result_index, 2);
    }

    #[test]
    fn display_marks_inactive() {
        let mut r = DieResult::new(3, 0, 0);
        assert_eq!(r.to_string(), "3");
        r.state = ResultState::Superseded;
        assert_eq!(r.to_string(), "(3)");
        assert!(r.was_pushed());
    }

    #[test]
    fn state_defaults_when_missing() {
        let r: DieResult =
            serde_json::from_str(r#"{"value":5,"push_index":1,"result_index":0}"#).unwrap();
        assert_eq!(r.state, ResultState::Active);
        assert!(!r.hidden);
    }
}
