//! Headless Horde Runner
//!
//! Drives the engine with a scripted defender and reports run statistics.
//! A stationary player swings a rotating melee arc and fires periodic
//! ranged shots; a turret on the core picks the nearest hostile from the
//! latest snapshot and fires targeted impacts at it.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use horde_engine::core::types::SimTime;
use horde_engine::simulation::SimulationStats;
use horde_engine::spatial::{heading_of, normalize_angle};
use horde_engine::{
    AttackRequest, AttackSource, Biome, EngineConfig, HordeEngine, NightEvent, Obstacle, Progression, Result,
    Snapshot, TickContext,
};

/// Headless Horde Runner - scripted defense runs for tuning
#[derive(Parser, Debug)]
#[command(name = "horde_runner")]
#[command(about = "Run a scripted defense against the horde and print statistics")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1)]
    level: u32,

    #[arg(long, default_value_t = 1)]
    wave: u32,

    /// Night event: calm, rush or siege
    #[arg(long, default_value = "calm")]
    event: String,

    /// Biome: grassland, forest, desert, tundra or ruins
    #[arg(long, default_value = "grassland")]
    biome: String,

    /// Awakening progress gained per simulated second
    #[arg(long, default_value_t = 2.0)]
    awakening_rate: f32,

    /// Engine config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    seed: u64,
    level: u32,
    wave: u32,
    event: String,
    biome: String,
    score: u64,
    final_population: usize,
    statistics: SimulationStats,
}

const PLAYER_POSITION: Vec2 = Vec2::new(0.0, 6.0);
const MELEE_PERIOD: SimTime = 0.5;
const MELEE_RANGE: f32 = 3.0;
const MELEE_DAMAGE: f32 = 25.0;
const RANGED_PERIOD: SimTime = 1.5;
const RANGED_RANGE: f32 = 25.0;
const RANGED_DAMAGE: f32 = 20.0;
const TURRET_PERIOD: SimTime = 1.0;
const TURRET_RANGE: f32 = 18.0;
const TURRET_DAMAGE: f32 = 15.0;

/// Fires `period`-spaced actions as simulated time passes
struct Cadence {
    period: SimTime,
    next_at: SimTime,
}

impl Cadence {
    fn new(period: SimTime) -> Self {
        Self { period, next_at: period }
    }

    fn ready(&mut self, now: SimTime) -> bool {
        if now < self.next_at {
            return false;
        }
        self.next_at = now + self.period;
        true
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("horde_engine=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::random());

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let event: NightEvent = args.event.parse()?;
    let biome: Biome = args.biome.parse()?;

    tracing::info!(seed, level = args.level, wave = args.wave, %event, %biome, "starting horde run");

    let mut engine = HordeEngine::new(config, seed)?;
    let core = Vec2::ZERO;
    let mut ctx = TickContext::new(PLAYER_POSITION, core)
        .with_obstacles(vec![
            Obstacle::new(Vec2::new(12.0, 4.0), 1.5),
            Obstacle::new(Vec2::new(-9.0, -10.0), 2.0),
        ])
        .with_progression(Progression {
            level: args.level.max(1),
            wave: args.wave.max(1),
            night_event: event,
            biome,
            awakening_progress: 0.0,
        });

    let mut defender = Defender::new(core);

    for _ in 0..args.ticks {
        let snapshot = engine.snapshot();
        defender.act(&mut engine, &snapshot);

        ctx.progression.awakening_progress += args.awakening_rate * args.dt;
        let output = engine.tick(args.dt, &mut ctx);

        for e in &output.events {
            tracing::trace!(event = ?e, "tick event");
        }
    }

    let report = RunReport {
        seed,
        level: args.level,
        wave: args.wave,
        event: event.to_string(),
        biome: biome.to_string(),
        score: engine.ledger().score,
        final_population: engine.population().len(),
        statistics: engine.stats().clone(),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Seed {} | level {} wave {} | {} / {}", seed, args.level, args.wave, event, biome);
        println!("{}", report.statistics.summary());
        println!("Score {} from {} kills", report.score, engine.ledger().kills);
    }

    Ok(())
}

/// Scripted player and core turret
struct Defender {
    core: Vec2,
    swing: f32,
    melee: Cadence,
    ranged: Cadence,
    turret: Cadence,
}

impl Defender {
    fn new(core: Vec2) -> Self {
        Self {
            core,
            swing: 0.0,
            melee: Cadence::new(MELEE_PERIOD),
            ranged: Cadence::new(RANGED_PERIOD),
            turret: Cadence::new(TURRET_PERIOD),
        }
    }

    /// Queue whatever attacks are due, aiming from the latest snapshot
    fn act(&mut self, engine: &mut HordeEngine, snapshot: &Snapshot) {
        let now = engine.time();

        if self.melee.ready(now) {
            self.swing = normalize_angle(self.swing + std::f32::consts::FRAC_PI_2);
            engine.queue_attack(AttackRequest::melee_arc(PLAYER_POSITION, self.swing, MELEE_RANGE, MELEE_DAMAGE));
        }

        if self.ranged.ready(now) {
            if let Some(target) = snapshot.nearest_active(PLAYER_POSITION, RANGED_RANGE) {
                let facing = heading_of(target.position - PLAYER_POSITION);
                engine.queue_attack(AttackRequest::ranged_line(PLAYER_POSITION, facing, RANGED_RANGE, RANGED_DAMAGE));
            }
        }

        if self.turret.ready(now) {
            if let Some(target) = snapshot.nearest_active(self.core, TURRET_RANGE) {
                engine.queue_attack(
                    AttackRequest::targeted(self.core, target.id, TURRET_DAMAGE).with_source(AttackSource::Turret),
                );
            }
        }
    }
}
