#![forbid(unsafe_code)]

//! Geometric primitives.

use std::ops::{Add, Neg, Sub};

/// A 2D point or offset in the host's anchored coordinate space.
///
/// The y axis points up: a positive `y` displacement means the pointer moved
/// toward the top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component (positive is up).
    pub y: f32,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// The axis with the strictly larger magnitude.
    ///
    /// Equal magnitudes resolve to [`Axis::Vertical`].
    #[inline]
    #[must_use]
    pub fn dominant_axis(self) -> Axis {
        if self.x.abs() > self.y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Clamp each component to `center ± radius` on that axis.
    #[must_use]
    pub fn clamp_around(self, center: Self, radius: f32) -> Self {
        Self::new(
            clamp_axis(self.x, center.x, radius),
            clamp_axis(self.y, center.y, radius),
        )
    }

    /// Linear interpolation toward `other` by `t` (not clamped).
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Clamp `value` into `[center - radius, center + radius]`.
///
/// A negative or NaN radius collapses the band onto `center`.
#[inline]
pub(crate) fn clamp_axis(value: f32, center: f32, radius: f32) -> f32 {
    let radius = if radius > 0.0 { radius } else { 0.0 };
    let lo = center - radius;
    let hi = center + radius;
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else if value.is_nan() {
        center
    } else {
        value
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// One of the two screen axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right.
    Horizontal,
    /// Up/down.
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Vec2::new(3.0, -4.0);
        let b = Vec2::new(1.0, 1.0);
        assert_eq!(a + b, Vec2::new(4.0, -3.0));
        assert_eq!(a - b, Vec2::new(2.0, -5.0));
        assert_eq!(-a, Vec2::new(-3.0, 4.0));
        assert_eq!(a.abs(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn dominant_axis_is_strict() {
        assert_eq!(Vec2::new(5.0, 4.0).dominant_axis(), Axis::Horizontal);
        assert_eq!(Vec2::new(4.0, 5.0).dominant_axis(), Axis::Vertical);
        assert_eq!(Vec2::new(-7.0, 7.0).dominant_axis(), Axis::Vertical);
        assert_eq!(Vec2::ZERO.dominant_axis(), Axis::Vertical);
    }

    #[test]
    fn clamp_around_bounds_each_axis() {
        let center = Vec2::new(10.0, 10.0);
        let v = Vec2::new(100.0, -100.0).clamp_around(center, 20.0);
        assert_eq!(v, Vec2::new(30.0, -10.0));
        let inside = Vec2::new(12.0, 9.0).clamp_around(center, 20.0);
        assert_eq!(inside, Vec2::new(12.0, 9.0));
    }

    #[test]
    fn clamp_axis_handles_degenerate_radius() {
        assert_eq!(clamp_axis(5.0, 1.0, -3.0), 1.0);
        assert_eq!(clamp_axis(f32::NAN, 2.0, 4.0), 2.0);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Vec2::new(0.0, 10.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 5.0));
    }
}
