#![forbid(unsafe_code)]

//! Drag geometry: axis-locked clamping and the dead zone.
//!
//! A dragged item follows the pointer along one axis only. Each move, the
//! candidate position is clamped in two stages relative to the drag anchor:
//!
//! 1. **Axis lock**: the non-dominant axis is held within `±band` of the
//!    anchor, so the item travels in a straight line.
//! 2. **Outer bound**: both axes are held within `±bound` of the anchor.
//!
//! # Invariants
//!
//! 1. The result is always within `±bound` of the anchor on both axes.
//! 2. The non-dominant axis is within `±min(band, bound)` of the anchor.
//! 3. The dead zone is inclusive: `|dx| <= min && |dy| <= min`.

use crate::geometry::{Axis, Vec2, clamp_axis};

/// Limits applied to a drag's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragLimits {
    /// Half-width of the band the non-dominant axis is held in (default: 15).
    pub axis_lock_band: f32,
    /// Maximum travel from the anchor on either axis (default: 220).
    pub max_distance: f32,
    /// Displacement at or below which a drag counts as no gesture (default: 50).
    pub dead_zone: f32,
}

impl Default for DragLimits {
    fn default() -> Self {
        Self {
            axis_lock_band: 15.0,
            max_distance: 220.0,
            dead_zone: 50.0,
        }
    }
}

impl DragLimits {
    /// Clamp a candidate position relative to `anchor`.
    #[must_use]
    pub fn clamp(&self, candidate: Vec2, anchor: Vec2) -> Vec2 {
        let displacement = candidate - anchor;
        let locked = match displacement.dominant_axis() {
            Axis::Horizontal => Vec2::new(
                candidate.x,
                clamp_axis(candidate.y, anchor.y, self.axis_lock_band),
            ),
            Axis::Vertical => Vec2::new(
                clamp_axis(candidate.x, anchor.x, self.axis_lock_band),
                candidate.y,
            ),
        };
        locked.clamp_around(anchor, self.max_distance)
    }

    /// Whether a displacement lies inside the dead zone.
    #[inline]
    #[must_use]
    pub fn in_dead_zone(&self, displacement: Vec2) -> bool {
        displacement.x.abs() <= self.dead_zone && displacement.y.abs() <= self.dead_zone
    }
}
