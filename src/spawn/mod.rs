//! Spawn director and the difficulty modifiers it reads

pub mod director;
pub mod modifiers;

pub use director::{difficulty_scaling, population_cap, roll_class, spawn_interval, SpawnDirector, SpawnRequest};
pub use modifiers::{Biome, ClassWeights, EventModifier, NightEvent};
