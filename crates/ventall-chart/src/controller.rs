#![forbid(unsafe_code)]

//! Chart controller and selection state machine.
//!
//! States: `Idle` (constructed, no root yet) and `Built` (showing the
//! latest successful build). Every successful rebuild self-loops on
//! `Built`; a failed rebuild returns an error and leaves the previous
//! `Built` state fully intact - the controller is never half-built.

use std::fmt;

use ventall_core::{ParentLinkIndex, Person, PersonId, PersonIndex, Viewport};
use ventall_layout::{
    FanConfig, LabelConfig, LabelPlanner, MAX_GENERATIONS, RadialGeometryPlanner, RadialPlan,
    SlotTree, SlotTreeBuilder, SlotTreeError, wedge_sector,
};

use crate::model::{RenderModel, RingModel, RootCardModel, WedgeModel};

/// Default generation depth for a fresh controller.
pub const DEFAULT_DEPTH: u8 = 4;

/// The currently selected entity: the root card or one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// The root person's card.
    Root,
    /// A slot wedge.
    Slot {
        /// Generation, `>= 1`.
        generation: u8,
        /// Position within the generation.
        slot_index: u32,
    },
}

/// Chart-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// The person index was empty at construction. Configuration error,
    /// raised once; a chart over no data can never build.
    NoPersons,
    /// The requested root id is absent or hidden. The previous built state
    /// is retained.
    RootNotFound { id: PersonId },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPersons => write!(f, "person index is empty"),
            Self::RootNotFound { id } => write!(f, "root person `{id}` not found or hidden"),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<SlotTreeError> for ChartError {
    fn from(err: SlotTreeError) -> Self {
        match err {
            SlotTreeError::RootNotFound { id } => Self::RootNotFound { id },
        }
    }
}

type SlotObserver = Box<dyn FnMut(Option<&Person>)>;

/// Orchestrates rebuild-on-change and owns all chart state.
///
/// One controller per chart widget; independent charts on one page must not
/// share a controller. All methods run synchronously to completion.
pub struct FanChartController {
    persons: PersonIndex,
    links: ParentLinkIndex,
    radial: RadialGeometryPlanner,
    labels: LabelPlanner,
    viewport: Viewport,
    depth: u8,
    tree: Option<SlotTree>,
    plan: Option<RadialPlan>,
    model: Option<RenderModel>,
    selection: Option<Selection>,
    observers: Vec<SlotObserver>,
}

impl fmt::Debug for FanChartController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanChartController")
            .field("persons", &self.persons.len())
            .field("links", &self.links.len())
            .field("depth", &self.depth)
            .field("built", &self.tree.is_some())
            .field("selection", &self.selection)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl FanChartController {
    /// Create an idle controller over the host-supplied data.
    ///
    /// The indexes are loaded once and never refreshed; a data change means
    /// constructing a new controller. An empty person index is a
    /// configuration error reported here, not per build.
    pub fn new(persons: PersonIndex, links: ParentLinkIndex) -> Result<Self, ChartError> {
        if persons.is_empty() {
            return Err(ChartError::NoPersons);
        }
        Ok(Self {
            persons,
            links,
            radial: RadialGeometryPlanner::new(),
            labels: LabelPlanner::new(),
            viewport: Viewport::default(),
            depth: DEFAULT_DEPTH,
            tree: None,
            plan: None,
            model: None,
            selection: None,
            observers: Vec::new(),
        })
    }

    /// Adjust the geometry constants.
    #[must_use]
    pub fn with_fan_config(mut self, config: FanConfig) -> Self {
        self.radial = RadialGeometryPlanner::with_config(config);
        self
    }

    /// Adjust the label constants.
    #[must_use]
    pub fn with_label_config(mut self, config: LabelConfig) -> Self {
        self.labels = LabelPlanner::with_config(config);
        self
    }

    /// Register a synchronous observer invoked with the selected person (or
    /// `None`) whenever the selection changes state.
    pub fn on_slot_activated(&mut self, observer: impl FnMut(Option<&Person>) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Re-root the chart on a different person and rebuild everything.
    ///
    /// On failure the previous built state stays visible. The selection
    /// survives the rebuild only if the selected person still appears in
    /// the new tree; it is then remapped to that person's new slot.
    pub fn set_root(&mut self, root: impl Into<PersonId>) -> Result<(), ChartError> {
        let root = root.into();
        let tree = match SlotTreeBuilder::new(&self.persons, &self.links).build(&root, self.depth)
        {
            Ok(tree) => tree,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(root = %root, error = %err, "re-root failed, keeping previous chart");
                return Err(err.into());
            }
        };

        #[cfg(feature = "tracing")]
        tracing::info!(root = %root, depth = self.depth, "chart re-rooted");

        let prev_selected = self.selected_person_id();
        self.tree = Some(tree);
        self.selection = self.remap_selection(prev_selected.as_ref());
        self.replan();
        self.notify_if_changed(prev_selected);
        Ok(())
    }

    /// Change the generation depth.
    ///
    /// When the materialized tree already covers the new depth only the
    /// geometry and labels are replanned; otherwise the tree is rebuilt to
    /// the new depth. While idle the depth is merely recorded for the first
    /// `set_root`. A selection deeper than the new depth is cleared.
    pub fn set_generation_depth(&mut self, depth: u8) -> Result<(), ChartError> {
        let depth = depth.min(MAX_GENERATIONS);
        let Some(tree) = &self.tree else {
            self.depth = depth;
            return Ok(());
        };

        let prev_selected = self.selected_person_id();
        if tree.depth() < depth {
            // Rebuild before committing the new depth so a failure leaves
            // the previous state untouched.
            let root = tree.root().clone();
            let rebuilt = SlotTreeBuilder::new(&self.persons, &self.links).build(&root, depth)?;
            self.tree = Some(rebuilt);
        }
        self.depth = depth;
        if let Some(Selection::Slot { generation, .. }) = self.selection
            && generation > depth
        {
            self.selection = None;
        }
        self.replan();
        self.notify_if_changed(prev_selected);
        Ok(())
    }

    /// Adopt a new viewport size. Replans geometry and labels only; the
    /// slot tree and the selection are unaffected.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        if self.tree.is_some() {
            self.replan();
        }
    }

    /// Update the selection. Pure state change, no rebuild.
    ///
    /// Returns the previous selection for UI diffing. Selecting an
    /// unoccupied or out-of-depth slot clears the selection (clicking an
    /// empty wedge deselects). Observers fire iff the selected person
    /// actually changed. No-op while idle.
    pub fn select(&mut self, selection: Option<Selection>) -> Option<Selection> {
        let Some(tree) = &self.tree else {
            return None;
        };
        let normalized = match selection {
            Some(Selection::Root) => Some(Selection::Root),
            // Generation 0 is the root card however the host addresses it.
            Some(Selection::Slot { generation: 0, slot_index }) => {
                (slot_index == 0).then_some(Selection::Root)
            }
            Some(Selection::Slot {
                generation,
                slot_index,
            }) => {
                let occupied = generation <= self.view_depth()
                    && tree
                        .slot(generation, slot_index)
                        .is_some_and(|slot| slot.occupied());
                occupied.then_some(Selection::Slot {
                    generation,
                    slot_index,
                })
            }
            None => None,
        };
        let prev_selected = self.selected_person_id();
        let prev = std::mem::replace(&mut self.selection, normalized);
        self.notify_if_changed(prev_selected);
        prev
    }

    /// Resolve a viewport point to a selectable entity using the current
    /// plan. `None` while idle or for dead space.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Selection> {
        match self.plan.as_ref()?.hit_test(x, y)? {
            (0, _) => Some(Selection::Root),
            (generation, slot_index) => Some(Selection::Slot {
                generation,
                slot_index,
            }),
        }
    }

    /// The latest render model, or `None` while idle.
    #[must_use]
    pub fn render_model(&self) -> Option<&RenderModel> {
        self.model.as_ref()
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The currently selected person's record.
    #[must_use]
    pub fn selected_person(&self) -> Option<&Person> {
        let id = self.selected_person_id()?;
        self.persons.get(&id)
    }

    /// Requested generation depth.
    #[must_use]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Depth of the materialized slot tree, which can exceed the requested
    /// depth after a shrink (the deeper tree is kept for cheap re-growth).
    #[must_use]
    pub fn materialized_depth(&self) -> Option<u8> {
        self.tree.as_ref().map(SlotTree::depth)
    }

    /// Current root id, or `None` while idle.
    #[must_use]
    pub fn root(&self) -> Option<&PersonId> {
        self.tree.as_ref().map(SlotTree::root)
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // --- internals ---------------------------------------------------------

    fn view_depth(&self) -> u8 {
        match &self.tree {
            Some(tree) => self.depth.min(tree.depth()),
            None => self.depth,
        }
    }

    fn selected_person_id(&self) -> Option<PersonId> {
        let tree = self.tree.as_ref()?;
        match self.selection? {
            Selection::Root => Some(tree.root().clone()),
            Selection::Slot {
                generation,
                slot_index,
            } => tree.slot(generation, slot_index)?.person.clone(),
        }
    }

    fn remap_selection(&self, prev: Option<&PersonId>) -> Option<Selection> {
        let tree = self.tree.as_ref()?;
        match tree.find_person(prev?)? {
            (0, _) => Some(Selection::Root),
            (generation, slot_index) => (generation <= self.view_depth()).then_some(
                Selection::Slot {
                    generation,
                    slot_index,
                },
            ),
        }
    }

    /// Rebuild the radial plan and the render model from the current tree.
    fn replan(&mut self) {
        let Some(tree) = &self.tree else {
            self.plan = None;
            self.model = None;
            return;
        };
        let view_depth = self.depth.min(tree.depth());
        let plan = self.radial.plan(self.viewport, view_depth);

        let Some(root_person) = self.persons.get(tree.root()) else {
            // Unreachable: the tree was validated against this same
            // immutable index. Degrade to idle rather than panic.
            self.plan = None;
            self.model = None;
            return;
        };
        let root_label = self.labels.plan(root_person, wedge_sector(0, 0), 0);
        let root = RootCardModel {
            person: root_person.id.clone(),
            name: root_person.name.clone(),
            years: root_label.years,
            sex: root_person.sex,
            geometry: plan.root_card,
        };

        let mut rings = Vec::with_capacity(view_depth as usize);
        for (i, band) in plan.rings().iter().enumerate() {
            let generation = (i + 1) as u8;
            let Some(slots) = tree.generation(generation) else {
                break;
            };
            let mut wedges = Vec::with_capacity(slots.len());
            for slot in slots {
                let sector = wedge_sector(generation, slot.slot_index);
                let occupant = slot
                    .person
                    .as_ref()
                    .and_then(|id| self.persons.get(id));
                wedges.push(match occupant {
                    Some(person) => WedgeModel {
                        slot_index: slot.slot_index,
                        occupied: true,
                        sector,
                        person: Some(person.id.clone()),
                        sex: Some(person.sex),
                        label: Some(self.labels.plan(person, sector, generation)),
                    },
                    None => WedgeModel {
                        slot_index: slot.slot_index,
                        occupied: false,
                        sector,
                        person: None,
                        sex: None,
                        label: None,
                    },
                });
            }
            rings.push(RingModel {
                generation,
                band: *band,
                wedges,
            });
        }

        self.model = Some(RenderModel {
            origin_x: plan.origin_x,
            origin_y: plan.origin_y,
            max_radius: plan.max_radius,
            root,
            rings,
        });
        self.plan = Some(plan);
    }

    /// Fire observers when the selected person actually changed.
    fn notify_if_changed(&mut self, prev: Option<PersonId>) {
        let current = self.selected_person_id();
        if current == prev {
            return;
        }
        let Self {
            observers, persons, ..
        } = self;
        let person = current.as_ref().and_then(|id| persons.get(id));
        for observer in observers.iter_mut() {
            observer(person);
        }
    }
}
