//! Lifecycle integration tests
//!
//! Grace window, despawn reporting, population-change signalling and the
//! bonus loot roll.

use glam::Vec2;

use horde_engine::{
    AttackRequest, EngineConfig, HordeEngine, HostileClass, SimulationEvent, SpawnRequest, TickContext,
};

fn engine_with_loot(chance: f32, seed: u64) -> HordeEngine {
    let mut config = EngineConfig::default();
    config.spawn.enabled = false;
    config.lifecycle.bonus_loot_chance = chance;
    HordeEngine::new(config, seed).unwrap()
}

fn far_context() -> TickContext {
    TickContext::new(Vec2::new(-500.0, -500.0), Vec2::new(500.0, 500.0))
}

#[test]
fn test_corpse_visible_for_grace_window() {
    let mut engine = engine_with_loot(0.0, 1);
    let id = engine.spawn(SpawnRequest::new(HostileClass::HeavyMelee, Vec2::new(3.0, 0.0)));
    let mut ctx = far_context();

    engine.queue_attack(AttackRequest::impact(Vec2::ZERO, 5.0, 1000.0));
    let out = engine.tick(0.5, &mut ctx);
    let died_at = out.snapshot.time;
    assert!(out.snapshot.get(id).unwrap().dying);

    let mut removed_at = None;
    for _ in 0..10 {
        let out = engine.tick(0.5, &mut ctx);
        match out.snapshot.get(id) {
            Some(record) => {
                assert!(record.dying);
                assert!(out.snapshot.time - died_at < 3.0);
            }
            None => {
                assert!(out.events.contains(&SimulationEvent::Despawned { id }));
                assert!(out.events.contains(&SimulationEvent::PopulationChanged { count: 0 }));
                removed_at = Some(out.snapshot.time);
                break;
            }
        }
    }

    let removed_at = removed_at.expect("corpse was never removed");
    assert!(removed_at - died_at >= 3.0);
}

#[test]
fn test_dying_entity_keeps_position() {
    let mut engine = engine_with_loot(0.0, 1);
    let id = engine.spawn(SpawnRequest::new(HostileClass::LightMelee, Vec2::new(10.0, 10.0)));
    let mut ctx = TickContext::new(Vec2::new(10.0, 12.0), Vec2::ZERO);

    engine.queue_attack(AttackRequest::nova(Vec2::ZERO));
    engine.tick(0.1, &mut ctx);
    let at_death = engine.snapshot().get(id).unwrap().position;

    for _ in 0..10 {
        engine.tick(0.1, &mut ctx);
    }
    let record = engine.snapshot().get(id).cloned().unwrap();
    assert_eq!(record.position, at_death);
    assert!(record.dying);
}

#[test]
fn test_population_changed_only_on_count_change() {
    let mut engine = engine_with_loot(0.0, 2);
    let mut ctx = far_context();

    let out = engine.tick(0.1, &mut ctx);
    assert!(!out.snapshot.population_changed);

    engine.spawn(SpawnRequest::new(HostileClass::LightMelee, Vec2::new(0.0, 40.0)));
    engine.spawn(SpawnRequest::new(HostileClass::LightMelee, Vec2::new(0.0, -40.0)));
    let out = engine.tick(0.1, &mut ctx);
    assert!(out.snapshot.population_changed);
    assert!(out.events.contains(&SimulationEvent::PopulationChanged { count: 2 }));

    // A kill does not change the count; removal does
    engine.queue_attack(AttackRequest::nova(Vec2::ZERO));
    let out = engine.tick(0.1, &mut ctx);
    assert!(!out.snapshot.population_changed);
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, SimulationEvent::PopulationChanged { .. })));

    let out = engine.tick(3.5, &mut ctx);
    assert!(out.snapshot.population_changed);
    assert!(out.snapshot.is_empty());
}

#[test]
fn test_bonus_loot_rate() {
    let mut engine = engine_with_loot(0.05, 4242);
    let mut ctx = far_context();
    let mut drops = 0;
    let rounds = 40;
    let per_round = 25;

    for round in 0..rounds {
        for i in 0..per_round {
            let x = (i % 5) as f32 * 10.0;
            let y = (i / 5) as f32 * 10.0 + round as f32 * 0.01;
            engine.spawn(SpawnRequest::new(HostileClass::LightMelee, Vec2::new(x, y)));
        }
        engine.queue_attack(AttackRequest::nova(Vec2::ZERO));
        let out = engine.tick(5.0, &mut ctx);
        drops += out
            .events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::BonusLoot { .. }))
            .count();
    }

    // 1000 deaths at 5%: expect about 50
    assert!((20..=90).contains(&drops), "{} drops", drops);
    assert_eq!(engine.ledger().kills, (rounds * per_round) as u64);
}

#[test]
fn test_every_death_rolls_loot_at_full_chance() {
    let mut engine = engine_with_loot(1.0, 9);
    let mut ctx = far_context();
    let ids: Vec<_> = (0..4)
        .map(|i| engine.spawn(SpawnRequest::new(HostileClass::RangedCaster, Vec2::new(i as f32 * 10.0, 0.0))))
        .collect();

    engine.queue_attack(AttackRequest::nova(Vec2::ZERO));
    let out = engine.tick(0.1, &mut ctx);

    for id in ids {
        assert!(out
            .events
            .iter()
            .any(|e| matches!(e, SimulationEvent::BonusLoot { id: dropped, .. } if *dropped == id)));
    }
}
