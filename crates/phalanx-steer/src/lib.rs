//! Locomotion model and steering behaviors for phalanx soldiers and formation anchors.
//!
//! Each tick an entity's steering accumulators are reset, refilled by steering calls (usually from
//! behavior-tree leaves), and finally integrated by [`Movable::apply`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod movable;
pub mod steering;

pub use movable::{Movable, Steerable, SteeringLimits};
pub use steering::{aim, aim_rotation, arrive, arrive_speed, separate, AimRadii, ArriveRadii};
