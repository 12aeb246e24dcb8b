//! Apply attack requests to the population
//!
//! Hit tests pick the victims; this module applies damage, credits kills
//! exactly once through the ledger and reports what happened as events.

use tracing::{debug, trace};

use crate::combat::hit_test::{chain_beam_links, impact_hits, melee_arc_hits, ranged_line_hits, ChainParams};
use crate::combat::request::{AttackKind, AttackRequest};
use crate::core::config::CombatConfig;
use crate::core::types::{EntityId, SimTime};
use crate::entity::{DamageOutcome, Hostile, Population};
use crate::lifecycle::ScoreLedger;
use crate::simulation::events::SimulationEvent;

/// What one request did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub hits: usize,
    pub kills: usize,
}

/// Resolve a single request against the population
pub fn resolve_request(
    population: &mut Population,
    request: &AttackRequest,
    now: SimTime,
    config: &CombatConfig,
    ledger: &mut ScoreLedger,
    events: &mut Vec<SimulationEvent>,
) -> ResolutionReport {
    let mut report = ResolutionReport::default();

    if !request.is_well_formed() {
        debug!(?request, "dropping malformed attack request");
        return report;
    }

    let damage = request.damage;
    let victims: Vec<(EntityId, f32)> = match request.kind {
        AttackKind::MeleeArc { facing, range } => {
            melee_arc_hits(population.as_slice(), request.origin, facing, range, config.melee_arc_tolerance)
                .into_iter()
                .map(|hit| (hit.id, damage))
                .collect()
        }
        AttackKind::RangedLine { facing, range } => ranged_line_hits(
            population.as_slice(),
            request.origin,
            facing,
            range,
            config.ranged_line_tolerance,
            config.ranged_line_max_hits,
        )
        .into_iter()
        .map(|hit| (hit.id, damage))
        .collect(),
        AttackKind::ChainBeam { range } => {
            let params = ChainParams {
                range,
                chain_radius: config.chain_radius,
                max_links: config.chain_max_links,
                falloff: config.chain_falloff,
            };
            let links = chain_beam_links(population.as_slice(), request.origin, damage, &params);
            if !links.is_empty() {
                let mut path = Vec::with_capacity(links.len() + 1);
                path.push(request.origin);
                path.extend(links.iter().map(|link| link.position));
                events.push(SimulationEvent::ChainBeam { path });
            }
            links.into_iter().map(|link| (link.id, link.damage)).collect()
        }
        AttackKind::Impact { radius } => impact_hits(population.as_slice(), request.origin, radius)
            .into_iter()
            .map(|hit| (hit.id, damage))
            .collect(),
        AttackKind::Nova => {
            let ids: Vec<EntityId> = population.iter().filter(|h| h.is_active()).map(|h| h.id).collect();
            for id in ids {
                if let Some(hostile) = population.get_mut(id) {
                    let outcome = hostile.kill(now);
                    record_outcome(hostile, outcome, ledger, events, &mut report);
                }
            }
            trace!(kills = report.kills, "nova resolved");
            return report;
        }
        AttackKind::Targeted { target } => match population.get(target) {
            Some(hostile) if hostile.is_active() => vec![(target, damage)],
            _ => {
                trace!(%target, "targeted attack on missing or dying hostile ignored");
                Vec::new()
            }
        },
    };

    for (id, amount) in victims {
        let Some(hostile) = population.get_mut(id) else {
            continue;
        };
        let outcome = hostile.apply_damage(amount, now);
        if outcome == DamageOutcome::Ignored {
            continue;
        }
        events.push(SimulationEvent::Hit {
            id,
            position: hostile.position,
            damage: amount,
            remaining_health: hostile.health.max(0.0),
        });
        record_outcome(hostile, outcome, ledger, events, &mut report);
    }

    trace!(
        source = ?request.source,
        hits = report.hits,
        kills = report.kills,
        "attack resolved"
    );
    report
}

fn record_outcome(
    hostile: &Hostile,
    outcome: DamageOutcome,
    ledger: &mut ScoreLedger,
    events: &mut Vec<SimulationEvent>,
    report: &mut ResolutionReport,
) {
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Wounded => report.hits += 1,
        DamageOutcome::Killed { scored } => {
            report.hits += 1;
            if scored {
                report.kills += 1;
                let score = ledger.record(hostile.class);
                events.push(SimulationEvent::Killed {
                    id: hostile.id,
                    class: hostile.class,
                    position: hostile.position,
                    score,
                });
            }
        }
    }
}
