//! The horde engine and its tick order
//!
//! Per tick:
//! 1. Spawn director (may add one hostile)
//! 2. Behavior update (locomotion, attack phases, movement)
//! 3. Queued attack requests, drained in submission order
//! 4. Death side effects, then corpse pruning
//! 5. Snapshot capture
//!
//! Everything is single-threaded and driven by one seeded RNG, so the same
//! seed, config and inputs replay the same run.

use std::mem;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::behavior::update_hostiles;
use crate::combat::{resolve_request, AttackRequest};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, SimTime, Tick};
use crate::entity::Population;
use crate::lifecycle::{process_deaths, prune_corpses, ScoreLedger};
use crate::simulation::context::TickContext;
use crate::simulation::events::SimulationEvent;
use crate::simulation::snapshot::Snapshot;
use crate::simulation::stats::SimulationStats;
use crate::spawn::{SpawnDirector, SpawnRequest};

/// What one tick produced
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub snapshot: Arc<Snapshot>,
    pub events: Vec<SimulationEvent>,
}

pub struct HordeEngine {
    config: EngineConfig,
    population: Population,
    director: SpawnDirector,
    ledger: ScoreLedger,
    stats: SimulationStats,
    pending_attacks: Vec<AttackRequest>,
    /// Events raised between ticks (manual spawns), flushed with the next tick
    pending_events: Vec<SimulationEvent>,
    rng: ChaCha8Rng,
    tick: Tick,
    time: SimTime,
    snapshot: Arc<Snapshot>,
}

impl HordeEngine {
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        info!(seed, "horde engine initialized");

        Ok(Self {
            config,
            population: Population::new(),
            director: SpawnDirector::new(),
            ledger: ScoreLedger::new(),
            stats: SimulationStats::default(),
            pending_attacks: Vec::new(),
            pending_events: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
            time: 0.0,
            snapshot: Arc::new(Snapshot::default()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn pending_attacks(&self) -> usize {
        self.pending_attacks.len()
    }

    /// Buffer an attack; it resolves during the next tick
    pub fn queue_attack(&mut self, request: AttackRequest) {
        self.pending_attacks.push(request);
    }

    /// Insert a hostile immediately, bypassing the director's cooldown and cap
    pub fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        let mut events = mem::take(&mut self.pending_events);
        let id = self.insert(&request, &mut events);
        self.pending_events = events;
        id
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32, ctx: &mut TickContext) -> TickOutput {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "non-finite or negative delta time, treating as zero");
            0.0
        };

        self.tick += 1;
        self.time += f64::from(dt);
        let now = self.time;
        let mut events = mem::take(&mut self.pending_events);

        // 1. Spawn
        if let Some(request) = self.director.tick(
            dt,
            self.population.len(),
            &mut ctx.progression,
            &self.config.spawn,
            &mut self.rng,
        ) {
            self.insert(&request, &mut events);
        }

        // 2. Behavior
        update_hostiles(&mut self.population, ctx, &self.config.behavior, now, dt, &mut events);

        // 3. Attacks
        for request in mem::take(&mut self.pending_attacks) {
            resolve_request(
                &mut self.population,
                &request,
                now,
                &self.config.combat,
                &mut self.ledger,
                &mut events,
            );
        }

        // 4. Lifecycle
        process_deaths(&mut self.population, now, &self.config.lifecycle, &mut self.rng, &mut events);
        prune_corpses(&mut self.population, now, &self.config.lifecycle, &mut events);

        // 5. Snapshot
        let snapshot = Snapshot::capture(&self.population, self.tick, now, self.snapshot.len());
        if snapshot.population_changed {
            events.push(SimulationEvent::PopulationChanged { count: snapshot.len() });
        }
        self.snapshot = Arc::new(snapshot);

        self.stats.record_tick(self.tick, now, self.population.len(), &events);

        TickOutput {
            snapshot: Arc::clone(&self.snapshot),
            events,
        }
    }

    fn insert(&mut self, request: &SpawnRequest, events: &mut Vec<SimulationEvent>) -> EntityId {
        let seed = self.rng.gen::<u32>();
        let id = self.population.spawn(request, seed, self.time);

        if request.awakened {
            info!(%id, "awakening: colossus spawned");
            events.push(SimulationEvent::AwakeningTriggered { id });
        } else {
            debug!(%id, class = request.class.name(), "hostile spawned");
        }
        events.push(SimulationEvent::Spawned {
            id,
            class: request.class,
            position: request.position,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::HostileClass;
    use glam::Vec2;

    fn quiet_engine() -> HordeEngine {
        let mut config = EngineConfig::default();
        config.spawn.enabled = false;
        HordeEngine::new(config, 7).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.lifecycle.death_grace = -1.0;
        assert!(HordeEngine::new(config, 1).is_err());
    }

    #[test]
    fn test_manual_spawn_reported_next_tick() {
        let mut engine = quiet_engine();
        let id = engine.spawn(SpawnRequest::new(HostileClass::LightMelee, Vec2::new(30.0, 0.0)));
        let mut ctx = TickContext::new(Vec2::new(-80.0, 0.0), Vec2::ZERO);

        let out = engine.tick(0.1, &mut ctx);
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e, SimulationEvent::Spawned { id: spawned, .. } if *spawned == id)));
        assert!(out.events.contains(&SimulationEvent::PopulationChanged { count: 1 }));
        assert!(out.snapshot.population_changed);

        let out = engine.tick(0.1, &mut ctx);
        assert!(!out.snapshot.population_changed);
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_bad_dt_is_zero() {
        let mut engine = quiet_engine();
        let mut ctx = TickContext::new(Vec2::ZERO, Vec2::ZERO);
        engine.tick(f32::NAN, &mut ctx);
        engine.tick(-1.0, &mut ctx);
        assert_eq!(engine.time(), 0.0);
        assert_eq!(engine.current_tick(), 2);
    }

    #[test]
    fn test_queued_attack_drains() {
        let mut engine = quiet_engine();
        let id = engine.spawn(SpawnRequest::new(HostileClass::LightMelee, Vec2::new(0.0, 3.0)));
        engine.queue_attack(AttackRequest::targeted(Vec2::ZERO, id, 100.0));
        assert_eq!(engine.pending_attacks(), 1);

        let mut ctx = TickContext::new(Vec2::new(-80.0, -80.0), Vec2::new(80.0, 80.0));
        let out = engine.tick(0.0, &mut ctx);

        assert_eq!(engine.pending_attacks(), 0);
        assert_eq!(out.events.iter().filter(|e| e.is_kill()).count(), 1);
        assert_eq!(engine.ledger().kills, 1);
        assert!(out.snapshot.get(id).unwrap().dying);
    }

    #[test]
    fn test_director_spawns_over_time() {
        let mut engine = HordeEngine::new(EngineConfig::default(), 42).unwrap();
        let mut ctx = TickContext::new(Vec2::ZERO, Vec2::ZERO);
        for _ in 0..50 {
            engine.tick(0.1, &mut ctx);
        }
        assert!(engine.population().len() >= 2);
        assert_eq!(engine.stats().spawned as usize, engine.population().len());
    }
}
