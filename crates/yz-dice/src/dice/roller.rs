//! The random primitive behind every die roll.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};

/// Source of uniform die rolls.
///
/// The engine only ever asks for "one roll of an N-sided die"; anything
/// that can answer that can drive a pool.
pub trait DiceRoller {
    /// Roll one die with `faces` sides, returning a value in `1..=faces`.
    fn roll_die(&mut self, faces: u32) -> u32;
}

impl DiceRoller for StdRng {
    fn roll_die(&mut self, faces: u32) -> u32 {
        self.random_range(1..=faces.max(1))
    }
}

impl DiceRoller for ThreadRng {
    fn roll_die(&mut self, faces: u32) -> u32 {
        self.random_range(1..=faces.max(1))
    }
}

/// Replays a fixed sequence of values, in order.
///
/// Values are clamped to the die being rolled. When the sequence runs out it
/// starts over; an empty sequence always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    script: Vec<u32>,
    queue: VecDeque<u32>,
}

impl ScriptedRoller {
    /// Create a roller that replays `values`.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        let script: Vec<u32> = values.into_iter().collect();
        Self {
            queue: script.iter().copied().collect(),
            script,
        }
    }

    /// Number of values left before the script restarts.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DiceRoller for ScriptedRoller {
    fn roll_die(&mut self, faces: u32) -> u32 {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(1).clamp(1, faces.max(1))
    }
}
