#![forbid(unsafe_code)]

//! Polar geometry primitives.
//!
//! Angles are radians. The fan opens upward from the subject: generation
//! rings sweep the half-circle `[-π/2, +π/2]` where `0` points straight up,
//! negative angles lean left and positive angles lean right. Radii and
//! pixel coordinates use `f32`, origin at the top-left of the viewport.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport. Negative dimensions are clamped to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Whether the viewport has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An angular sector, `start_angle <= end_angle`, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sector {
    /// Start angle (inclusive).
    pub start_angle: f32,
    /// End angle (exclusive for hit testing).
    pub end_angle: f32,
}

impl Sector {
    /// Create a sector from two angles.
    #[inline]
    #[must_use]
    pub const fn new(start_angle: f32, end_angle: f32) -> Self {
        Self {
            start_angle,
            end_angle,
        }
    }

    /// Angular span covered by the sector.
    #[inline]
    #[must_use]
    pub fn span(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    /// Mid-angle, used for label placement and rotation.
    #[inline]
    #[must_use]
    pub fn mid_angle(&self) -> f32 {
        (self.start_angle + self.end_angle) * 0.5
    }

    /// Whether an angle falls inside `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, angle: f32) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }

    /// Arc length of the sector at a given radius.
    #[inline]
    #[must_use]
    pub fn arc_length(&self, radius: f32) -> f32 {
        self.span() * radius
    }
}

/// Per-generation ring band.
///
/// Recomputed on every viewport or depth change; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RingBand {
    /// Inner edge radius in pixels.
    pub inner_radius: f32,
    /// Outer edge radius in pixels.
    pub outer_radius: f32,
    /// Angular gap drawn between adjacent wedges, radians.
    pub pad_angle: f32,
    /// Corner rounding radius for wedge outlines, pixels.
    pub corner_radius: f32,
}

impl RingBand {
    /// Radial thickness of the band.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }

    /// Mid-band radius, where labels sit.
    #[inline]
    #[must_use]
    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) * 0.5
    }

    /// Whether a radius falls inside `[inner, outer)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, radius: f32) -> bool {
        radius >= self.inner_radius && radius < self.outer_radius
    }
}

/// Center-anchored rectangle for the root person's card.
///
/// The root is rendered as a rectangular card rather than a wedge; it
/// anchors the radial origin of the fan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardRect {
    /// Center x in viewport pixels.
    pub center_x: f32,
    /// Center y in viewport pixels.
    pub center_y: f32,
    /// Full width.
    pub width: f32,
    /// Full height.
    pub height: f32,
}

impl CardRect {
    /// Create a card from its center and size.
    #[inline]
    #[must_use]
    pub const fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub fn left(&self) -> f32 {
        self.center_x - self.width * 0.5
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f32 {
        self.center_y - self.height * 0.5
    }

    /// Whether a point falls inside the card.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        x >= self.center_x - hw
            && x < self.center_x + hw
            && y >= self.center_y - hh
            && y < self.center_y + hh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn sector_span_and_mid() {
        let s = Sector::new(-FRAC_PI_2, FRAC_PI_2);
        assert!((s.span() - std::f32::consts::PI).abs() < 1e-6);
        assert!(s.mid_angle().abs() < 1e-6);
        assert!(s.contains(0.0));
        assert!(s.contains(-FRAC_PI_2));
        assert!(!s.contains(FRAC_PI_2));
    }

    #[test]
    fn sector_arc_length_scales_with_radius() {
        let s = Sector::new(0.0, 0.5);
        assert!((s.arc_length(100.0) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn ring_band_width_and_contains() {
        let band = RingBand {
            inner_radius: 40.0,
            outer_radius: 70.0,
            pad_angle: 0.007,
            corner_radius: 3.0,
        };
        assert!((band.width() - 30.0).abs() < 1e-6);
        assert!((band.mid_radius() - 55.0).abs() < 1e-6);
        assert!(band.contains(40.0));
        assert!(!band.contains(70.0));
    }

    #[test]
    fn card_rect_contains_edges() {
        let card = CardRect::new(100.0, 200.0, 40.0, 20.0);
        assert!((card.left() - 80.0).abs() < 1e-6);
        assert!((card.top() - 190.0).abs() < 1e-6);
        assert!(card.contains(80.0, 190.0));
        assert!(!card.contains(120.0, 200.0));
    }

    #[test]
    fn viewport_clamps_negative() {
        let v = Viewport::new(-10.0, 5.0);
        assert_eq!(v.width, 0.0);
        assert!(v.is_empty());
        assert!(!Viewport::new(800.0, 600.0).is_empty());
    }
}
