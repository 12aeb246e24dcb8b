//! Attack requests queued against the horde

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::EntityId;

/// Who issued an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackSource {
    #[default]
    Player,
    Turret,
    Structure,
    Event,
}

/// Hit-test shape of an attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackKind {
    /// Wide cone in front of the origin; hits everything inside
    MeleeArc { facing: f32, range: f32 },
    /// Narrow cone; only the nearest few hostiles are hit
    RangedLine { facing: f32, range: f32 },
    /// Nearest hostile in range, then hops to neighbors with falloff
    ChainBeam { range: f32 },
    /// Everything within `radius` of the origin
    Impact { radius: f32 },
    /// Kills every active hostile
    Nova,
    /// A single known hostile (turrets, structures)
    Targeted { target: EntityId },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackRequest {
    pub origin: Vec2,
    pub kind: AttackKind,
    pub damage: f32,
    pub source: AttackSource,
}

impl AttackRequest {
    pub fn melee_arc(origin: Vec2, facing: f32, range: f32, damage: f32) -> Self {
        Self::player(origin, AttackKind::MeleeArc { facing, range }, damage)
    }

    pub fn ranged_line(origin: Vec2, facing: f32, range: f32, damage: f32) -> Self {
        Self::player(origin, AttackKind::RangedLine { facing, range }, damage)
    }

    pub fn chain_beam(origin: Vec2, range: f32, damage: f32) -> Self {
        Self::player(origin, AttackKind::ChainBeam { range }, damage)
    }

    pub fn impact(origin: Vec2, radius: f32, damage: f32) -> Self {
        Self::player(origin, AttackKind::Impact { radius }, damage)
    }

    pub fn nova(origin: Vec2) -> Self {
        Self::player(origin, AttackKind::Nova, 0.0)
    }

    pub fn targeted(origin: Vec2, target: EntityId, damage: f32) -> Self {
        Self::player(origin, AttackKind::Targeted { target }, damage)
    }

    pub fn with_source(mut self, source: AttackSource) -> Self {
        self.source = source;
        self
    }

    fn player(origin: Vec2, kind: AttackKind, damage: f32) -> Self {
        Self {
            origin,
            kind,
            damage,
            source: AttackSource::Player,
        }
    }

    /// Finite coordinates and non-negative extents and damage
    pub fn is_well_formed(&self) -> bool {
        let finite_non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !self.origin.is_finite() || !finite_non_negative(self.damage) {
            return false;
        }

        match self.kind {
            AttackKind::MeleeArc { facing, range } | AttackKind::RangedLine { facing, range } => {
                facing.is_finite() && finite_non_negative(range)
            }
            AttackKind::ChainBeam { range } => finite_non_negative(range),
            AttackKind::Impact { radius } => finite_non_negative(radius),
            AttackKind::Nova | AttackKind::Targeted { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(AttackRequest::melee_arc(Vec2::ZERO, 0.0, 5.0, 10.0).is_well_formed());
        assert!(AttackRequest::nova(Vec2::ZERO).is_well_formed());
        assert!(AttackRequest::impact(Vec2::ZERO, 0.0, 0.0).is_well_formed());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(!AttackRequest::melee_arc(Vec2::ZERO, f32::NAN, 5.0, 10.0).is_well_formed());
        assert!(!AttackRequest::ranged_line(Vec2::ZERO, 0.0, -1.0, 10.0).is_well_formed());
        assert!(!AttackRequest::chain_beam(Vec2::new(f32::INFINITY, 0.0), 5.0, 10.0).is_well_formed());
        assert!(!AttackRequest::impact(Vec2::ZERO, 3.0, -5.0).is_well_formed());
        assert!(!AttackRequest::targeted(Vec2::ZERO, EntityId(1), f32::NAN).is_well_formed());
    }

    #[test]
    fn test_source_defaults_to_player() {
        let req = AttackRequest::chain_beam(Vec2::ZERO, 5.0, 10.0);
        assert_eq!(req.source, AttackSource::Player);
        assert_eq!(req.with_source(AttackSource::Turret).source, AttackSource::Turret);
    }
}
