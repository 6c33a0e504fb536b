//! Behavior trees for phalanx soldiers.
//!
//! Trees are loaded from nested JSON definitions (see [`loader`]), compiled into an immutable
//! [`Node`] hierarchy and shared between every soldier of an archetype. Each call to
//! [`BehaviorTree::run`] is a fresh depth-first evaluation for one soldier: composites combine
//! child results, leaves read and write the [`Blackboard`](phalanx_core::Blackboard) and request
//! steering through the host's [`TacticalWorld`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod board;
pub mod error;
pub mod leaf;
pub mod loader;
pub mod node;
pub mod trace;
pub mod tree;
pub mod world;

pub use board::{ARMIES, SOLDIERS, TARGET, WAYPOINT};
pub use error::{NodeError, TreeLoadError};
pub use leaf::Leaf;
pub use loader::{TreeLoader, TreeSource};
pub use node::{Composite, Node};
pub use trace::{emit, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG, TRACE_SINK};
pub use tree::BehaviorTree;
pub use world::{SoldierStatus, TacticalWorld};
