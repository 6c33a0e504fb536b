//! Shared primitives for the phalanx battle simulation: 2D math, entity ids, the per-tick context
//! and the typed blackboard behavior trees read and write.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod ids;
pub mod math;
pub mod tick;

pub use blackboard::{BbKey, Blackboard, Partition};
pub use ids::{ArmyId, FormationId, SoldierId};
pub use math::{heading, normalize_degrees, signed_angle, Vec2};
pub use tick::{TickContext, DEFAULT_MAX_FRAME_SECONDS};
