//! Kill tally fed by the once-per-hostile kill flag

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::entity::HostileClass;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreLedger {
    pub kills: u64,
    pub score: u64,
    pub by_class: AHashMap<HostileClass, u64>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one kill; returns the score awarded
    pub fn record(&mut self, class: HostileClass) -> u32 {
        let score = class.stats().score;
        self.kills += 1;
        self.score += u64::from(score);
        *self.by_class.entry(class).or_insert(0) += 1;
        score
    }

    pub fn kills_of(&self, class: HostileClass) -> u64 {
        self.by_class.get(&class).copied().unwrap_or(0)
    }
}
