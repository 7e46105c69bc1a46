#![forbid(unsafe_code)]

//! Radial geometry planning.
//!
//! Converts a viewport size and a generation depth into concrete polar
//! geometry: the root card rectangle, one [`RingBand`] per generation, and
//! the angular sector of every slot. The fan is bottom-centered and opens
//! upward through the half-circle `[-π/2, +π/2]` - ancestor fans
//! conventionally sweep up from the subject rather than around it.
//!
//! The planner is pure; it never looks at the slot tree. Wedge sectors are
//! a function of `(generation, slot_index)` alone, so empty slots reserve
//! exactly the same angles as occupied ones.

use std::f32::consts::{FRAC_PI_2, PI};

use ventall_core::{CardRect, RingBand, Sector, Viewport};

/// Tuned presentation constants for the radial plan.
///
/// Defaults reproduce the reference chart. All values are plain fields so a
/// host can adjust them, but two properties must survive any adjustment:
/// pad angles stay monotonically non-decreasing in the generation, and ring
/// bands never overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FanConfig {
    /// Max radius as a fraction of viewport width.
    pub radius_width_factor: f32,
    /// Max radius as a fraction of viewport height.
    pub radius_height_factor: f32,
    /// Vertical position of the radial origin as a fraction of height.
    pub origin_y_factor: f32,
    /// Root card height as a fraction of the max radius.
    pub card_height_factor: f32,
    /// Root card height clamp, pixels.
    pub card_min_height: f32,
    /// Root card height clamp, pixels.
    pub card_max_height: f32,
    /// Root card width as a fraction of viewport width.
    pub card_width_factor: f32,
    /// Root card width clamp, pixels.
    pub card_min_width: f32,
    /// Root card width clamp, pixels.
    pub card_max_width: f32,
    /// Gap between the card's top edge and the first ring, pixels.
    pub card_clearance: f32,
    /// Fraction of the ring band actually filled; the rest separates rings.
    pub ring_fill: f32,
    /// Base angular pad between wedges, radians.
    pub pad_base: f32,
    /// Additional pad per generation, radians.
    pub pad_per_generation: f32,
    /// Cap on the generation-dependent pad growth, radians.
    pub pad_growth_cap: f32,
    /// Corner rounding as a fraction of ring width.
    pub corner_ratio: f32,
    /// Corner rounding floor so thin outer rings stay legible, pixels.
    pub corner_min: f32,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            radius_width_factor: 0.48,
            radius_height_factor: 0.82,
            origin_y_factor: 0.88,
            card_height_factor: 0.22,
            card_min_height: 64.0,
            card_max_height: 90.0,
            card_width_factor: 0.32,
            card_min_width: 240.0,
            card_max_width: 340.0,
            card_clearance: 6.0,
            ring_fill: 0.96,
            pad_base: 0.005,
            pad_per_generation: 0.002,
            pad_growth_cap: 0.01,
            corner_ratio: 0.08,
            corner_min: 2.0,
        }
    }
}

impl FanConfig {
    /// Angular pad for a generation. Monotonically non-decreasing in `g`.
    #[inline]
    #[must_use]
    pub fn pad_angle(&self, generation: u8) -> f32 {
        self.pad_base + (self.pad_per_generation * generation as f32).min(self.pad_growth_cap)
    }
}

/// The concrete polar geometry for one viewport and depth.
///
/// Recomputed on every resize or depth change; never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialPlan {
    /// Radial origin x, viewport pixels.
    pub origin_x: f32,
    /// Radial origin y, viewport pixels.
    pub origin_y: f32,
    /// Maximum usable radius.
    pub max_radius: f32,
    /// The root person's card, centered on the origin.
    pub root_card: CardRect,
    /// Ring bands for generations `1..=max_generation`, in order.
    rings: Vec<RingBand>,
}

impl RadialPlan {
    /// Ring band for a generation (`g >= 1`).
    #[must_use]
    pub fn ring(&self, generation: u8) -> Option<&RingBand> {
        if generation == 0 {
            return None;
        }
        self.rings.get(generation as usize - 1)
    }

    /// All ring bands, generation 1 first.
    #[must_use]
    pub fn rings(&self) -> &[RingBand] {
        &self.rings
    }

    /// Deepest generation this plan covers.
    #[must_use]
    pub fn max_generation(&self) -> u8 {
        self.rings.len() as u8
    }

    /// Resolve a viewport point to a slot coordinate or the root card.
    ///
    /// Returns `Some((0, 0))` for the card, `Some((g, k))` for a wedge, and
    /// `None` for dead space. This is the inverse of the wedge mapping and
    /// is what keeps click handling consistent with the slot arithmetic.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<(u8, u32)> {
        if self.root_card.contains(x, y) {
            return Some((0, 0));
        }
        let dx = x - self.origin_x;
        let dy = self.origin_y - y; // up is positive
        let radius = (dx * dx + dy * dy).sqrt();
        // 0 = straight up, positive sweeps right.
        let angle = dx.atan2(dy);
        if !(-FRAC_PI_2..FRAC_PI_2).contains(&angle) {
            return None;
        }
        for (i, band) in self.rings.iter().enumerate() {
            if band.contains(radius) {
                let g = (i + 1) as u8;
                let count = 1u32 << g;
                let step = PI / count as f32;
                let index = (((angle + FRAC_PI_2) / step) as u32).min(count - 1);
                return Some((g, index));
            }
        }
        None
    }
}

/// Angular sector of one slot.
///
/// The half-circle is divided into `2^generation` equal wedges; the pad
/// angle is applied by the renderer inside the sector, so sectors partition
/// `[-π/2, +π/2]` exactly with no gaps or overlaps.
#[must_use]
pub fn wedge_sector(generation: u8, slot_index: u32) -> Sector {
    let count = 1u32 << generation.min(31);
    let index = slot_index.min(count - 1);
    let start = -FRAC_PI_2 + PI * (index as f32 / count as f32);
    let end = -FRAC_PI_2 + PI * ((index + 1) as f32 / count as f32);
    Sector::new(start, end)
}

/// Plans ring radii and the root card for a viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialGeometryPlanner {
    config: FanConfig,
}

impl RadialGeometryPlanner {
    /// Planner with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Planner with an adjusted configuration.
    #[must_use]
    pub fn with_config(config: FanConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    /// Compute the plan for a viewport and depth.
    ///
    /// Degenerate viewports produce a degenerate but well-formed plan
    /// (zero-width rings); the caller does not need to special-case them.
    pub fn plan(&self, viewport: Viewport, max_generation: u8) -> RadialPlan {
        let c = &self.config;
        let max_radius = (viewport.width * c.radius_width_factor)
            .min(viewport.height * c.radius_height_factor)
            .max(0.0);
        let origin_x = viewport.width * 0.5;
        let origin_y = viewport.height * c.origin_y_factor;

        let card_height =
            (max_radius * c.card_height_factor).clamp(c.card_min_height, c.card_max_height);
        let card_width =
            (viewport.width * c.card_width_factor).clamp(c.card_min_width, c.card_max_width);
        let root_card = CardRect::new(origin_x, origin_y, card_width, card_height);

        // The first ring starts above the card so they never overlap.
        let inner_start = card_height * 0.5 + c.card_clearance;
        let available = (max_radius - inner_start).max(0.0);
        let ring_width = if max_generation == 0 {
            0.0
        } else {
            available / max_generation as f32
        };

        let mut rings = Vec::with_capacity(max_generation as usize);
        for g in 1..=max_generation {
            let inner = inner_start + ring_width * (g as f32 - 1.0);
            rings.push(RingBand {
                inner_radius: inner,
                outer_radius: inner + ring_width * c.ring_fill,
                pad_angle: c.pad_angle(g),
                corner_radius: (ring_width * c.corner_ratio).max(c.corner_min),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            max_generation,
            max_radius,
            ring_width,
            "radial plan computed"
        );

        RadialPlan {
            origin_x,
            origin_y,
            max_radius,
            root_card,
            rings,
        }
    }
}
