#![forbid(unsafe_code)]

//! Return motion: the eased slide of a dragged item back to its anchor.
//!
//! A [`ReturnTween`] is a fixed-duration, single-shot position animation.
//! It is sampled with an explicit `now` rather than ticked with deltas, so a
//! host frame loop and a test clock drive it the same way.
//!
//! # Invariants
//!
//! 1. `progress(now)` is 0.0 at or before `started`, 1.0 at or after
//!    `started + duration`, and monotonic in between.
//! 2. `position_at(now)` equals `from` at progress 0 and `to` at progress 1.
//!
//! # Failure Modes
//!
//! - Zero duration: the tween is complete from the instant it starts;
//!   `progress` is 1.0 and `position_at` is `to` for every `now`.

use web_time::{Duration, Instant};

use crate::geometry::Vec2;

/// Easing curve: maps linear progress `t ∈ [0, 1]` to eased progress.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-out: fast start, gentle arrival.
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// A position animation from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct ReturnTween {
    from: Vec2,
    to: Vec2,
    started: Instant,
    duration: Duration,
    easing: EasingFn,
}

impl ReturnTween {
    /// Start a tween at `now` with [`ease_out_quad`].
    #[must_use]
    pub fn new(from: Vec2, to: Vec2, duration: Duration, now: Instant) -> Self {
        Self {
            from,
            to,
            started: now,
            duration,
            easing: ease_out_quad,
        }
    }

    /// Replace the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Whether the tween has reached its destination.
    #[inline]
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Eased position at `now`.
    #[must_use]
    pub fn position_at(&self, now: Instant) -> Vec2 {
        if self.is_complete(now) {
            return self.to;
        }
        self.from.lerp(self.to, (self.easing)(self.progress(now)))
    }

    /// Destination of the tween.
    #[inline]
    pub fn target(&self) -> Vec2 {
        self.to
    }

    /// Configured duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn ease_out_quad_endpoints_and_shape() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert!(ease_out_quad(0.25) > linear(0.25));
    }

    #[test]
    fn tween_reaches_target() {
        let t0 = Instant::now();
        let tw = ReturnTween::new(Vec2::new(100.0, 0.0), Vec2::ZERO, MS_100, t0);
        assert_eq!(tw.position_at(t0), Vec2::new(100.0, 0.0));
        assert!(!tw.is_complete(t0 + Duration::from_millis(50)));
        assert!(tw.is_complete(t0 + MS_100));
        assert_eq!(tw.position_at(t0 + Duration::from_millis(500)), Vec2::ZERO);
    }

    #[test]
    fn tween_midpoint_is_eased() {
        let t0 = Instant::now();
        let tw = ReturnTween::new(Vec2::new(100.0, 0.0), Vec2::ZERO, MS_100, t0);
        let mid = tw.position_at(t0 + Duration::from_millis(50));
        // ease_out_quad(0.5) = 0.75 of the way there.
        assert!((mid.x - 25.0).abs() < 0.5, "mid.x = {}", mid.x);
    }

    #[test]
    fn progress_is_monotonic() {
        let t0 = Instant::now();
        let tw = ReturnTween::new(Vec2::ZERO, Vec2::new(0.0, 10.0), MS_100, t0);
        let mut prev = 0.0;
        for ms in 0..=120 {
            let p = tw.progress(t0 + Duration::from_millis(ms));
            assert!(p >= prev);
            prev = p;
        }
        assert_eq!(prev, 1.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let t0 = Instant::now();
        let tw = ReturnTween::new(Vec2::new(5.0, 5.0), Vec2::ZERO, Duration::ZERO, t0)
            .easing(linear);
        assert_eq!(tw.duration(), Duration::ZERO);
        assert!(tw.is_complete(t0));
        assert_eq!(tw.progress(t0), 1.0);
        assert_eq!(tw.position_at(t0), Vec2::ZERO);
        assert_eq!(tw.target(), Vec2::ZERO);
    }
}
