//! Population - the single source of truth for live hostiles
//!
//! Insertion order is kept stable across removals; steering relies on it
//! for "processed earlier this tick" neighbor sets.

use ahash::AHashMap;

use crate::core::types::{EntityId, SimTime};
use crate::entity::hostile::Hostile;
use crate::spawn::SpawnRequest;

#[derive(Debug, Clone, Default)]
pub struct Population {
    hostiles: Vec<Hostile>,
    index: AHashMap<EntityId, usize>,
    next_id: u64,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hostiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hostiles.is_empty()
    }

    /// Entities that are not dying
    pub fn active_count(&self) -> usize {
        self.hostiles.iter().filter(|h| h.is_active()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hostile> {
        self.hostiles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hostile> {
        self.hostiles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Hostile] {
        &self.hostiles
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Hostile> {
        self.index.get(&id).and_then(|&slot| self.hostiles.get(slot))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Hostile> {
        match self.index.get(&id) {
            Some(&slot) => self.hostiles.get_mut(slot),
            None => None,
        }
    }

    /// Insert a hostile built from a spawn request at full health
    pub fn spawn(&mut self, request: &SpawnRequest, seed: u32, now: SimTime) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);

        let hostile = Hostile::new(
            id,
            request.class,
            request.position,
            request.health_multiplier,
            request.speed_multiplier,
            request.target,
            seed,
            now,
        );

        self.index.insert(id, self.hostiles.len());
        self.hostiles.push(hostile);
        id
    }

    /// Remove every hostile matching `predicate`, returning them in order
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<Hostile>
    where
        F: FnMut(&Hostile) -> bool,
    {
        let (removed, kept): (Vec<Hostile>, Vec<Hostile>) =
            std::mem::take(&mut self.hostiles).into_iter().partition(|h| predicate(h));
        self.hostiles = kept;

        if !removed.is_empty() {
            self.rebuild_index();
        }
        removed
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (slot, hostile) in self.hostiles.iter().enumerate() {
            self.index.insert(hostile.id, slot);
        }
    }
}
