#![forbid(unsafe_code)]

//! Fan-chart layout solvers.
//!
//! This crate derives a complete radial ancestor layout from person records
//! and parent links:
//!
//! - [`SlotTreeBuilder`] - breadth-first derivation of the canonical binary
//!   ancestor slot tree (the algorithmic core)
//! - [`RadialGeometryPlanner`] - concrete polar geometry (ring radii,
//!   angular sectors, padding, corner rounding) as a function of viewport
//!   size and generation depth
//! - [`LabelPlanner`] - per-slot rotation, truncation, and sub-label
//!   visibility for the slot's available arc length
//!
//! Every solver is pure: same inputs, same outputs, no side effects. The
//! chart controller in `ventall-chart` orchestrates them and owns state.
//!
//! # Slot arithmetic
//!
//! Generation `g` always holds exactly `2^g` slots, occupied or not. Slot
//! `2k` at generation `g` is the father of generation `g-1` slot `k`; slot
//! `2k+1` is the mother. Absent ancestors never collapse or renumber their
//! siblings - an empty slot still reserves its wedge so that index
//! arithmetic stays valid for geometry and click mapping across rebuilds.

pub mod label;
pub mod radial;
pub mod slots;

pub use label::{LabelConfig, LabelPlanner, SlotLabel};
pub use radial::{FanConfig, RadialGeometryPlanner, RadialPlan, wedge_sector};
pub use slots::{MAX_GENERATIONS, SlotNode, SlotTree, SlotTreeBuilder, SlotTreeError};
