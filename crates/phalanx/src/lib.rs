//! Umbrella crate that re-exports the `phalanx-*` building blocks.
//!
//! Enable only the layers you need: `core` and `steer` are engine-agnostic, `bt` and `formation`
//! build soldier behavior on top of them, and `sim` is the headless battle host.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use phalanx_core as core;

#[cfg(feature = "steer")]
#[cfg_attr(docsrs, doc(cfg(feature = "steer")))]
pub use phalanx_steer as steer;

#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub use phalanx_bt as bt;

#[cfg(feature = "formation")]
#[cfg_attr(docsrs, doc(cfg(feature = "formation")))]
pub use phalanx_formation as formation;

#[cfg(feature = "sim")]
#[cfg_attr(docsrs, doc(cfg(feature = "sim")))]
pub use phalanx_sim as sim;
