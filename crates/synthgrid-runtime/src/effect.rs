#![forbid(unsafe_code)]

//! Cancellable, single-slot effect timer.
//!
//! While a drag targets a synthesis slot, a short effect plays over the
//! target before the synthesized sprite appears. [`EffectScheduler`] owns
//! that timer. It holds at most one [`PendingEffect`]; scheduling another
//! supersedes it.
//!
//! # Handles
//!
//! Every `schedule` issues a fresh [`EffectId`] from a monotonic counter,
//! so ids are never reused. Cancelling with a stale id (one that is no
//! longer the active effect) does nothing. Each effect also carries the
//! [`SessionId`] of the drag that scheduled it; the consumer compares it
//! with its live session before applying an expiry.
//!
//! # Invariants
//!
//! 1. At most one effect is active.
//! 2. `poll` yields an effect at most once, and only once `now >= deadline`.
//! 3. A cancelled effect is never yielded by `poll`.

use synthgrid_core::Item;
use web_time::{Duration, Instant};

/// Identity of one drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// Handle of one scheduled effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

impl EffectId {
    /// Raw id value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A scheduled synthesis effect.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEffect {
    /// Handle for cancellation.
    pub id: EffectId,
    /// Drag session that scheduled the effect.
    pub session: SessionId,
    /// Store index of the synthesis slot being revealed.
    pub target_index: usize,
    /// Display cell the effect plays over.
    pub cell: usize,
    /// Item revealed when the effect finishes.
    pub result: Item,
    /// When the effect expires.
    pub deadline: Instant,
}

/// Lifetime counters, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectStats {
    /// Effects scheduled.
    pub scheduled: u64,
    /// Effects cancelled or superseded before expiry.
    pub cancelled: u64,
    /// Effects that expired and were handed to the caller.
    pub expired: u64,
}

/// Single-slot effect timer.
#[derive(Debug, Default)]
pub struct EffectScheduler {
    active: Option<PendingEffect>,
    next_id: u64,
    stats: EffectStats,
}

impl EffectScheduler {
    /// An idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an effect expiring `delay` after `now`, superseding any
    /// active one.
    pub fn schedule(
        &mut self,
        session: SessionId,
        target_index: usize,
        cell: usize,
        result: Item,
        delay: Duration,
        now: Instant,
    ) -> EffectId {
        if let Some(prev) = self.active.take() {
            self.stats.cancelled += 1;
            tracing::debug!(
                target: "synthgrid.effect",
                effect_id = prev.id.0,
                target_index = prev.target_index,
                "effect superseded"
            );
        }

        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.stats.scheduled += 1;

        tracing::debug!(
            target: "synthgrid.effect",
            effect_id = id.0,
            session = session.0,
            target_index,
            cell,
            delay_ms = delay.as_millis() as u64,
            "effect scheduled"
        );

        self.active = Some(PendingEffect {
            id,
            session,
            target_index,
            cell,
            result,
            deadline: now + delay,
        });
        id
    }

    /// Cancel the effect with `id`. Returns `false` if it is not the active one.
    pub fn cancel(&mut self, id: EffectId) -> bool {
        if self.active.as_ref().is_some_and(|e| e.id == id) {
            self.active = None;
            self.stats.cancelled += 1;
            tracing::debug!(target: "synthgrid.effect", effect_id = id.0, "effect cancelled");
            true
        } else {
            false
        }
    }

    /// Cancel whatever is active, returning it.
    pub fn cancel_all(&mut self) -> Option<PendingEffect> {
        let prev = self.active.take()?;
        self.stats.cancelled += 1;
        tracing::debug!(target: "synthgrid.effect", effect_id = prev.id.0, "effect cancelled");
        Some(prev)
    }

    /// Take the active effect if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<PendingEffect> {
        if self.active.as_ref().is_some_and(|e| now >= e.deadline) {
            let effect = self.active.take()?;
            self.stats.expired += 1;
            tracing::debug!(
                target: "synthgrid.effect",
                effect_id = effect.id.0,
                target_index = effect.target_index,
                "effect expired"
            );
            return Some(effect);
        }
        None
    }

    /// The active effect, if any.
    #[inline]
    pub fn active(&self) -> Option<&PendingEffect> {
        self.active.as_ref()
    }

    /// Whether an effect is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Time until the active effect expires (zero if already due).
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|e| e.deadline.saturating_duration_since(now))
    }

    /// Lifetime counters.
    #[inline]
    pub fn stats(&self) -> EffectStats {
        self.stats
    }
}
