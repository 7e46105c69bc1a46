#![forbid(unsafe_code)]

//! Read-only render model.
//!
//! A pure data projection of one built chart: the root card plus one ring
//! of wedges per generation. The drawing layer consumes this as-is; nothing
//! in it references the controller or the indexes, so a host may keep a
//! snapshot across frames or (with the `serde` feature) dump one for
//! debugging.

use ventall_core::{CardRect, PersonId, RingBand, Sector, Sex};
use ventall_layout::SlotLabel;

/// The root person's card model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootCardModel {
    /// The root person.
    pub person: PersonId,
    /// Full name, never truncated: the card has room.
    pub name: String,
    /// Years line, when any year could be extracted.
    pub years: Option<String>,
    /// Sex, for host-side styling.
    pub sex: Sex,
    /// Card rectangle, centered on the radial origin.
    pub geometry: CardRect,
}

/// One slot's wedge in a ring.
///
/// Empty slots are present too: they reserve their sector so that slot
/// arithmetic and click mapping stay aligned between generations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WedgeModel {
    /// Slot position within the generation.
    pub slot_index: u32,
    /// Whether a person occupies the slot.
    pub occupied: bool,
    /// Angular sector of the wedge.
    pub sector: Sector,
    /// Occupying person, if any.
    pub person: Option<PersonId>,
    /// Sex of the occupant, for host-side styling.
    pub sex: Option<Sex>,
    /// Planned label; occupied slots only.
    pub label: Option<SlotLabel>,
}

/// One generation's ring of wedges.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingModel {
    /// Generation, `>= 1`.
    pub generation: u8,
    /// Ring band geometry.
    pub band: RingBand,
    /// Exactly `2^generation` wedges, slot order.
    pub wedges: Vec<WedgeModel>,
}

/// The complete renderable scene for one built chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderModel {
    /// Radial origin x in viewport pixels.
    pub origin_x: f32,
    /// Radial origin y in viewport pixels.
    pub origin_y: f32,
    /// Maximum usable radius.
    pub max_radius: f32,
    /// The root card.
    pub root: RootCardModel,
    /// Rings for generations `1..=depth`, in order.
    pub rings: Vec<RingModel>,
}

impl RenderModel {
    /// Rendered depth (number of rings).
    #[must_use]
    pub fn depth(&self) -> u8 {
        self.rings.len() as u8
    }

    /// A wedge by slot coordinates.
    #[must_use]
    pub fn wedge(&self, generation: u8, slot_index: u32) -> Option<&WedgeModel> {
        if generation == 0 {
            return None;
        }
        self.rings
            .get(generation as usize - 1)?
            .wedges
            .get(slot_index as usize)
    }

    /// Serialize the model to JSON for debugging.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
