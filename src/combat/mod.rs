//! Player-side attacks against the horde
//!
//! Requests are queued on the engine and drained once per tick, so all
//! damage lands at a single point in the tick order.

pub mod request;
pub mod resolution;

pub use hit_test::{chain_beam_links, cone_hits, impact_hits, melee_arc_hits, ranged_line_hits, ChainLink, ChainParams, Hit};
pub use request::{AttackKind, AttackRequest, AttackSource};
pub use resolution::{resolve_request, ResolutionReport};
