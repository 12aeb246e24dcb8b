//! Combat resolution integration tests
//!
//! Attacks are queued on a live engine and resolved by a tick, so these
//! cover request buffering, hit tests, damage, kill dedup and scoring
//! together.

use glam::Vec2;

use horde_engine::{
    AttackRequest, AttackSource, EngineConfig, EntityId, HordeEngine, HostileClass, SimulationEvent, SpawnRequest,
    TickContext,
};

fn quiet_engine() -> HordeEngine {
    let mut config = EngineConfig::default();
    config.spawn.enabled = false;
    config.lifecycle.bonus_loot_chance = 0.0;
    HordeEngine::new(config, 99).unwrap()
}

/// Player and core far from everything so hostiles stay in PATROL and never attack
fn far_context() -> TickContext {
    TickContext::new(Vec2::new(-500.0, -500.0), Vec2::new(500.0, 500.0))
}

fn spawn_light(engine: &mut HordeEngine, x: f32, y: f32) -> EntityId {
    engine.spawn(SpawnRequest::new(HostileClass::LightMelee, Vec2::new(x, y)))
}

fn hits(events: &[SimulationEvent]) -> Vec<(EntityId, f32)> {
    events
        .iter()
        .filter_map(|e| match e {
            SimulationEvent::Hit { id, damage, .. } => Some((*id, *damage)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_melee_arc_front_hit_side_miss() {
    let mut engine = quiet_engine();
    let front = spawn_light(&mut engine, 1.0, 4.0);
    let side = spawn_light(&mut engine, 4.0, 0.0);
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::melee_arc(Vec2::ZERO, 0.0, 5.0, 5.0));
    let out = engine.tick(0.0, &mut ctx);

    let hit_ids: Vec<_> = hits(&out.events).into_iter().map(|(id, _)| id).collect();
    assert_eq!(hit_ids, vec![front]);
    assert!(out.snapshot.get(front).unwrap().health_fraction < 1.0);
    assert_eq!(out.snapshot.get(side).unwrap().health_fraction, 1.0);
}

#[test]
fn test_chain_beam_four_links_with_falloff() {
    let mut engine = quiet_engine();
    let ids: Vec<_> = (1..=5).map(|i| spawn_light(&mut engine, 2.0 * i as f32, 0.0)).collect();
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::chain_beam(Vec2::ZERO, 5.0, 10.0));
    let out = engine.tick(0.0, &mut ctx);

    let landed = hits(&out.events);
    assert_eq!(landed.len(), 4);
    for (k, (id, damage)) in landed.iter().enumerate() {
        assert_eq!(*id, ids[k]);
        assert!((damage - 10.0 * 0.7f32.powi(k as i32)).abs() < 1e-4);
    }

    let path = out
        .events
        .iter()
        .find_map(|e| match e {
            SimulationEvent::ChainBeam { path } => Some(path.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(path.len(), 5);
    assert_eq!(path[0], Vec2::ZERO);
}

#[test]
fn test_ranged_line_hits_nearest_three() {
    let mut engine = quiet_engine();
    let ids: Vec<_> = (0..5).map(|i| spawn_light(&mut engine, 0.0, 10.0 - 1.5 * i as f32)).collect();
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::ranged_line(Vec2::ZERO, 0.0, 20.0, 1.0));
    let out = engine.tick(0.0, &mut ctx);

    let hit_ids: Vec<_> = hits(&out.events).into_iter().map(|(id, _)| id).collect();
    assert_eq!(hit_ids, vec![ids[4], ids[3], ids[2]]);
}

#[test]
fn test_ranged_line_narrow_tolerance() {
    let mut engine = quiet_engine();
    // 0.2 rad off the firing axis and nearest: outside the 0.15 rad line
    let (wide_x, wide_y) = (3.0 * 0.2f32.sin(), 3.0 * 0.2f32.cos());
    let wide = spawn_light(&mut engine, wide_x, wide_y);
    // 0.1 rad off axis: still on the line
    let (near_x, near_y) = (6.0 * 0.1f32.sin(), 6.0 * 0.1f32.cos());
    let inside = spawn_light(&mut engine, near_x, near_y);
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::ranged_line(Vec2::ZERO, 0.0, 20.0, 1.0));
    let out = engine.tick(0.0, &mut ctx);

    let hit_ids: Vec<_> = hits(&out.events).into_iter().map(|(id, _)| id).collect();
    assert_eq!(hit_ids, vec![inside]);
    assert!(!hit_ids.contains(&wide));
}

#[test]
fn test_circular_impact_hits_radius_only() {
    let mut engine = quiet_engine();
    let inside = spawn_light(&mut engine, 2.0, 2.0);
    let edge = spawn_light(&mut engine, 0.0, 4.0);
    let outside = spawn_light(&mut engine, 5.0, 0.0);
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::impact(Vec2::ZERO, 4.0, 1.0));
    let out = engine.tick(0.0, &mut ctx);

    let hit_ids: Vec<_> = hits(&out.events).into_iter().map(|(id, _)| id).collect();
    assert!(hit_ids.contains(&inside));
    assert!(hit_ids.contains(&edge));
    assert!(!hit_ids.contains(&outside));
}

#[test]
fn test_nova_and_impact_same_tick_kill_once() {
    let mut engine = quiet_engine();
    for i in 0..6 {
        spawn_light(&mut engine, i as f32, 1.0);
    }
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::nova(Vec2::ZERO));
    engine.queue_attack(AttackRequest::impact(Vec2::ZERO, 50.0, 500.0));
    let out = engine.tick(0.0, &mut ctx);

    assert_eq!(out.events.iter().filter(|e| e.is_kill()).count(), 6);
    assert_eq!(engine.ledger().kills, 6);
    assert!(out.snapshot.entities.iter().all(|e| e.dying));

    // Corpses stay until the grace window ends and cannot be scored again
    engine.queue_attack(AttackRequest::nova(Vec2::ZERO));
    let out = engine.tick(0.0, &mut ctx);
    assert_eq!(out.events.iter().filter(|e| e.is_kill()).count(), 0);
    assert_eq!(engine.ledger().kills, 6);
}

#[test]
fn test_kill_awards_class_score() {
    let mut engine = quiet_engine();
    let titan = engine.spawn(SpawnRequest::new(HostileClass::Titan, Vec2::new(0.0, 2.0)));
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::targeted(Vec2::ZERO, titan, 10_000.0).with_source(AttackSource::Turret));
    let out = engine.tick(0.0, &mut ctx);

    assert!(out.events.iter().any(|e| matches!(
        e,
        SimulationEvent::Killed { id, score, .. } if *id == titan && *score == HostileClass::Titan.stats().score
    )));
    assert_eq!(engine.ledger().score, u64::from(HostileClass::Titan.stats().score));
}

#[test]
fn test_malformed_requests_do_nothing() {
    let mut engine = quiet_engine();
    let id = spawn_light(&mut engine, 0.0, 1.0);
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::melee_arc(Vec2::ZERO, f32::NAN, 5.0, 100.0));
    engine.queue_attack(AttackRequest::impact(Vec2::ZERO, -2.0, 100.0));
    engine.queue_attack(AttackRequest::chain_beam(Vec2::new(f32::INFINITY, 0.0), 5.0, 100.0));
    engine.queue_attack(AttackRequest::ranged_line(Vec2::ZERO, 0.0, 10.0, -1.0));
    let out = engine.tick(0.0, &mut ctx);

    assert!(hits(&out.events).is_empty());
    assert_eq!(out.snapshot.get(id).unwrap().health_fraction, 1.0);
}

#[test]
fn test_targeted_after_removal_is_ignored() {
    let mut engine = quiet_engine();
    let id = spawn_light(&mut engine, 0.0, 1.0);
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::targeted(Vec2::ZERO, id, 100.0));
    engine.tick(0.0, &mut ctx);
    // Past the grace window
    let out = engine.tick(5.0, &mut ctx);
    assert!(out.events.contains(&SimulationEvent::Despawned { id }));
    assert!(engine.population().get(id).is_none());

    engine.queue_attack(AttackRequest::targeted(Vec2::ZERO, id, 100.0));
    let out = engine.tick(0.0, &mut ctx);
    assert!(out.events.is_empty());
    assert_eq!(engine.ledger().kills, 1);
}
