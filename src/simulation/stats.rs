//! Running counters over the event stream

use serde::{Deserialize, Serialize};

use crate::core::types::{SimTime, Tick};
use crate::simulation::events::SimulationEvent;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub ticks: Tick,
    pub simulated_time: SimTime,
    pub spawned: u64,
    pub awakenings: u64,
    pub hits: u64,
    pub kills: u64,
    pub score: u64,
    pub despawned: u64,
    pub bonus_loot: u64,
    pub stuns: u64,
    pub player_damage_taken: f32,
    pub core_damage_taken: f32,
    pub peak_population: usize,
}

impl SimulationStats {
    /// Fold one tick's events into the counters
    pub fn record_tick(&mut self, tick: Tick, time: SimTime, population: usize, events: &[SimulationEvent]) {
        self.ticks = tick;
        self.simulated_time = time;
        self.peak_population = self.peak_population.max(population);

        for event in events {
            match event {
                SimulationEvent::Spawned { .. } => self.spawned += 1,
                SimulationEvent::AwakeningTriggered { .. } => self.awakenings += 1,
                SimulationEvent::Hit { .. } => self.hits += 1,
                SimulationEvent::Killed { score, .. } => {
                    self.kills += 1;
                    self.score += u64::from(*score);
                }
                SimulationEvent::Despawned { .. } => self.despawned += 1,
                SimulationEvent::BonusLoot { .. } => self.bonus_loot += 1,
                SimulationEvent::Stunned { .. } => self.stuns += 1,
                SimulationEvent::PlayerDamaged { damage, .. } => self.player_damage_taken += damage,
                SimulationEvent::CoreDamaged { damage, .. } => self.core_damage_taken += damage,
                SimulationEvent::ChainBeam { .. }
                | SimulationEvent::Impact { .. }
                | SimulationEvent::PopulationChanged { .. } => {}
            }
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Simulated {} ticks ({:.1}s)\n{} spawned, {} killed ({} score), {} despawned, peak population {}\nPlayer took {:.0} damage, core took {:.0}",
            self.ticks,
            self.simulated_time,
            self.spawned,
            self.kills,
            self.score,
            self.despawned,
            self.peak_population,
            self.player_damage_taken,
            self.core_damage_taken,
        )
    }
}
