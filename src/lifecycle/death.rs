//! Death side effects and corpse removal
//!
//! A dying hostile gets its side effects exactly once (death shock, loot
//! roll), then lingers for the grace window so it can be rendered falling
//! before it is removed.

use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use crate::core::config::LifecycleConfig;
use crate::core::types::{EntityId, SimTime};
use crate::entity::{Hostile, HostileClass, Population};
use crate::simulation::events::SimulationEvent;

/// Run side effects for every newly dying hostile; returns how many
pub fn process_deaths<R: Rng + ?Sized>(
    population: &mut Population,
    now: SimTime,
    config: &LifecycleConfig,
    rng: &mut R,
    events: &mut Vec<SimulationEvent>,
) -> usize {
    let fresh: Vec<(Vec2, HostileClass, EntityId)> = population
        .iter_mut()
        .filter(|h| h.dying && !h.death_handled)
        .map(|h| {
            h.death_handled = true;
            (h.position, h.class, h.id)
        })
        .collect();

    for &(position, class, id) in &fresh {
        let stun_until = now + f64::from(config.death_shock_stun);
        for neighbor in population.iter_mut() {
            if !neighbor.is_active() || neighbor.position.distance_squared(position) >= config.death_shock_radius_sq {
                continue;
            }
            if neighbor.stun_until(stun_until) {
                trace!(id = %neighbor.id, source = %id, "death shock stun");
                events.push(SimulationEvent::Stunned {
                    id: neighbor.id,
                    until: stun_until,
                });
            }
        }

        if rng.gen::<f32>() < config.bonus_loot_chance {
            debug!(%id, class = class.name(), "bonus loot dropped");
            events.push(SimulationEvent::BonusLoot { id, class, position });
        }
    }

    fresh.len()
}

/// True once a dying hostile has lingered for the full grace window
pub fn grace_expired(hostile: &Hostile, now: SimTime, grace: f32) -> bool {
    hostile.dying && hostile.died_at.map_or(false, |died_at| now - died_at >= f64::from(grace))
}

/// Remove corpses whose grace window has passed
pub fn prune_corpses(
    population: &mut Population,
    now: SimTime,
    config: &LifecycleConfig,
    events: &mut Vec<SimulationEvent>,
) -> Vec<Hostile> {
    let removed = population.remove_where(|h| grace_expired(h, now, config.death_grace));
    for hostile in &removed {
        events.push(SimulationEvent::Despawned { id: hostile.id });
    }
    if !removed.is_empty() {
        debug!(count = removed.len(), "corpses despawned");
    }
    removed
}
