//! Formations: typed slots laid out on a grid, and the best-fit assignment of soldiers to them.
//!
//! A [`Formation`] references its members by id only; the host owns the soldiers. Membership
//! changes go through [`Formation::add`] and [`Formation::remove`], and every removal
//! redistributes the remaining members so the formation never keeps gaps.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod formation;
pub mod slot;
pub mod template;

pub use error::FormationError;
pub use formation::{Formation, FormationMember};
pub use slot::{Occupant, Slot, SlotCosts, SlotType};
pub use template::{FormationLoader, FormationTemplate, SlotSpec, CELL_HEIGHT, CELL_WIDTH};
