#![forbid(unsafe_code)]

//! Ventall public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! lightweight prelude. A typical host builds the indexes once, constructs
//! one controller per chart widget, and redraws from the render model:
//!
//! ```
//! use ventall::prelude::*;
//!
//! let persons = PersonIndex::from_persons([
//!     Person::new("1", "Laia Vidal", Sex::Female).with_birth("1981"),
//!     Person::new("2", "Pere Vidal", Sex::Male).with_birth("1948"),
//! ]);
//! let links = ParentLinkIndex::from_links([
//!     ("1".into(), ParentLink::father_only("2")),
//! ]);
//!
//! let mut chart = FanChartController::new(persons, links)?;
//! chart.resize(1280.0, 860.0);
//! chart.set_root("1")?;
//!
//! let model = chart.render_model().unwrap();
//! assert_eq!(model.root.name, "Laia Vidal");
//! assert!(model.wedge(1, 0).unwrap().occupied); // the father
//! assert!(!model.wedge(1, 1).unwrap().occupied); // no mother recorded
//! # Ok::<(), ventall::ChartError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use ventall_core::geometry::{CardRect, RingBand, Sector, Viewport};
pub use ventall_core::{ParentLink, ParentLinkIndex, Person, PersonId, PersonIndex, Sex};

// --- Layout re-exports -----------------------------------------------------

pub use ventall_layout::{
    FanConfig, LabelConfig, LabelPlanner, MAX_GENERATIONS, RadialGeometryPlanner, RadialPlan,
    SlotLabel, SlotNode, SlotTree, SlotTreeBuilder, SlotTreeError, wedge_sector,
};

// --- Chart re-exports ------------------------------------------------------

pub use ventall_chart::{
    ChartError, FanChartController, RenderModel, RingModel, RootCardModel, Selection, WedgeModel,
};

/// Commonly used imports for hosts.
pub mod prelude {
    pub use crate::{
        ChartError, FanChartController, ParentLink, ParentLinkIndex, Person, PersonId,
        PersonIndex, RenderModel, Selection, Sex, Viewport,
    };
}
