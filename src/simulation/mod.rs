//! Engine, per-tick inputs and outputs

pub mod context;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod stats;

pub use context::{Progression, TickContext};
pub use engine::{HordeEngine, TickOutput};
pub use events::SimulationEvent;
pub use snapshot::{EntityRecord, Snapshot};
pub use stats::SimulationStats;
