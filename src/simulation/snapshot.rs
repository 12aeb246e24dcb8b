//! Read-only per-tick view for renderers and turrets

use glam::Vec2;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, SimTime, Tick};
use crate::entity::{AttackPhase, BehaviorState, Hostile, HostileClass, Population};

/// One hostile as seen from outside the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: EntityId,
    pub class: HostileClass,
    pub position: Vec2,
    /// Position plus cosmetic jitter; never fed back into the simulation
    pub render_position: Vec2,
    pub facing: f32,
    pub health_fraction: f32,
    pub behavior: BehaviorState,
    pub attack_phase: AttackPhase,
    pub dying: bool,
    pub stunned: bool,
}

impl EntityRecord {
    fn from_hostile(hostile: &Hostile, now: SimTime) -> Self {
        Self {
            id: hostile.id,
            class: hostile.class,
            position: hostile.position,
            render_position: hostile.position + hostile.jitter,
            facing: hostile.facing(),
            health_fraction: hostile.health_fraction(),
            behavior: hostile.behavior,
            attack_phase: hostile.attack.phase,
            dying: hostile.dying,
            stunned: hostile.is_stunned(now),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub time: SimTime,
    pub entities: Vec<EntityRecord>,
    /// Entity count differs from the previous snapshot
    pub population_changed: bool,
}

impl Snapshot {
    pub fn capture(population: &Population, tick: Tick, time: SimTime, previous_count: usize) -> Self {
        let entities: Vec<EntityRecord> = population.iter().map(|h| EntityRecord::from_hostile(h, time)).collect();
        let population_changed = entities.len() != previous_count;
        Self {
            tick,
            time,
            entities,
            population_changed,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Records that are not dying
    pub fn active(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities.iter().filter(|e| !e.dying)
    }

    /// Closest non-dying hostile to `point` within `max_distance`
    pub fn nearest_active(&self, point: Vec2, max_distance: f32) -> Option<&EntityRecord> {
        self.active()
            .map(|e| (e, e.position.distance(point)))
            .filter(|(_, distance)| *distance <= max_distance)
            .min_by_key(|(e, distance)| (OrderedFloat(*distance), e.id))
            .map(|(e, _)| e)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::SpawnRequest;

    fn population() -> (Population, Vec<EntityId>) {
        let mut pop = Population::new();
        let ids = [1.0, 3.0, 8.0]
            .iter()
            .map(|&x| pop.spawn(&SpawnRequest::new(HostileClass::LightMelee, Vec2::new(x, 0.0)), 0, 0.0))
            .collect();
        (pop, ids)
    }

    #[test]
    fn test_capture_flags_change() {
        let (pop, _) = population();
        assert!(Snapshot::capture(&pop, 1, 0.1, 0).population_changed);
        assert!(!Snapshot::capture(&pop, 1, 0.1, 3).population_changed);
    }

    #[test]
    fn test_nearest_skips_dying() {
        let (mut pop, ids) = population();
        pop.get_mut(ids[0]).unwrap().kill(0.0);
        let snap = Snapshot::capture(&pop, 1, 0.1, 3);

        assert_eq!(snap.nearest_active(Vec2::ZERO, 100.0).map(|e| e.id), Some(ids[1]));
        assert!(snap.nearest_active(Vec2::ZERO, 2.0).is_none());
        assert_eq!(snap.active().count(), 2);
        assert!(snap.get(ids[0]).unwrap().dying);
    }

    #[test]
    fn test_render_position_includes_jitter() {
        let (mut pop, ids) = population();
        pop.get_mut(ids[2]).unwrap().jitter = Vec2::new(0.05, 0.0);
        let snap = Snapshot::capture(&pop, 1, 0.1, 3);
        let record = snap.get(ids[2]).unwrap();
        assert_eq!(record.position, Vec2::new(8.0, 0.0));
        assert!((record.render_position - Vec2::new(8.05, 0.0)).length() < 1e-5);
    }
}
