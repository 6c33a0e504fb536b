//! Headless battle host for phalanx.
//!
//! [`Battlefield`] owns the soldiers, formations and armies, refreshes the blackboard, runs every
//! soldier's behavior tree once per tick and resolves weapon hits. [`SimConfig`] and [`Scenario`]
//! are plain YAML documents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod archetype;
pub mod army;
pub mod battlefield;
pub mod config;
pub mod error;
pub mod roster;
pub mod scenario;
pub mod soldier;
pub mod weapon;

pub use archetype::Archetype;
pub use army::Army;
pub use battlefield::{Battlefield, Outcome, TickReport};
pub use config::SimConfig;
pub use error::SimError;
pub use roster::Roster;
pub use scenario::{ArmySpec, FormationSpec, Scenario, SquadSpec};
pub use soldier::Soldier;
pub use weapon::{Arrow, Bow, Sword, Weapon, WeaponSpec};
