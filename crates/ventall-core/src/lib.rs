#![forbid(unsafe_code)]

//! Core data model for Ventall fan charts.
//!
//! This crate holds the foundational types shared by the layout and chart
//! crates:
//!
//! - [`Person`], [`Sex`], [`PersonId`] - immutable person records
//! - [`PersonIndex`], [`ParentLinkIndex`] - in-memory lookup tables built
//!   once from externally supplied lists
//! - [`geometry`] - polar geometry primitives ([`Sector`], [`RingBand`],
//!   [`CardRect`], [`Viewport`])
//!
//! Person records are owned by the host's data store; this crate only
//! indexes them for the duration of a chart's lifetime. A person flagged as
//! `hidden` is treated as absent for layout purposes even though its record
//! exists.

pub mod geometry;
pub mod index;
pub mod person;

pub use geometry::{CardRect, RingBand, Sector, Viewport};
pub use index::{ParentLink, ParentLinkIndex, PersonIndex};
pub use person::{Person, PersonId, Sex};
