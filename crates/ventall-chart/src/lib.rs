#![forbid(unsafe_code)]

//! Fan chart orchestration.
//!
//! [`FanChartController`] owns the chart's state: the materialized slot
//! tree, the current radial plan, and the selection. Every caller event
//! (re-root, depth change, resize, select) runs synchronously to completion
//! and fully replaces the affected state; there is no background work, no
//! partial build, and no internal queuing. Hosts with overlapping input
//! streams must serialize calls themselves (a resize debounce is typical).
//!
//! The controller emits a pure data projection, [`RenderModel`], for the
//! host's drawing layer; it performs no I/O and owns no rendering
//! primitives. Multiple independent charts on one page each construct their
//! own controller - there is no process-wide state.

pub mod controller;
pub mod model;

pub use controller::{ChartError, FanChartController, Selection};
pub use model::{RenderModel, RingModel, RootCardModel, WedgeModel};
