#![forbid(unsafe_code)]

//! The drag interaction state machine.
//!
//! [`DragInteractionController`] turns pointer events on a primary grid item
//! into highlight changes, a timed synthesis effect, and either a commit
//! (activation plus a return animation) or a cancel (full restore).
//!
//! # State Machine
//!
//! ```text
//!            on_drag_begin                on_drag_end (target)
//!   Idle ─────────────────────▶ Dragging ─────────────────────▶ Committing
//!    ▲                            │  ▲                             │
//!    │   on_drag_end (no target)  │  │ on_drag_move                │ tick (tween done)
//!    ├────────────────────────────┘  └─┘                           │
//!    └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cancelling is not a resting state: the restore runs to completion inside
//! the handler that decided to cancel.
//!
//! # Effects
//!
//! A move that changes the resolved target supersedes the pending effect.
//! Pointing at a direction with no result counts as a change: the effect is
//! cancelled on that move instead of running out its delay with nothing to
//! reveal, and the element is shown again at once.
//!
//! # Time
//!
//! Handlers that care about time take an explicit `now`. The host drives
//! [`tick`](DragInteractionController::tick) once per frame; that is where
//! effect expiry and the return tween advance. No handler ever blocks.
//!
//! # Invariants
//!
//! 1. At most one drag session exists, and at most one effect is pending.
//! 2. An expired effect only applies to the session that scheduled it.
//! 3. Every path back to `Idle` leaves the presenter with every cell visible
//!    at full opacity, and the element resting at its anchor.
//! 4. A commit activates exactly once and closes the panel exactly once.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Source is not a primary slot | `on_drag_begin` returns `false` |
//! | Target slot empty | No highlight; drag end cancels |
//! | Result no longer in the store | Commit falls back to cancel |
//! | Presenter has no cells | Controller is inert; handlers are no-ops |

use std::mem;
use std::sync::Arc;

use synthgrid_core::drag::DragLimits;
use synthgrid_core::grid;
use synthgrid_core::tween::ReturnTween;
use synthgrid_core::{GridStore, Vec2, Visual, resolve_target};
use web_time::{Duration, Instant};

use crate::config::InteractionConfig;
use crate::effect::{EffectId, EffectScheduler, PendingEffect, SessionId};
use crate::element::{DraggedElement, ElementFlags, Ghost};
use crate::error::SetupError;
use crate::host::{Activation, InteractionHost, PanelMode};
use crate::presenter::HighlightPresenter;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Coarse controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No interaction in progress.
    Idle,
    /// A drag is live.
    Dragging,
    /// A commit was made; the element is animating home.
    Committing,
}

/// Why a drag ended without a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// Drag end arrived with no live session.
    NotStarted,
    /// The final displacement was inside the dead zone.
    DeadZone,
    /// The final direction had no synthesis result.
    NoResult,
    /// The result could not be located in the store.
    Unlocatable,
}

/// Result of [`DragInteractionController::on_drag_end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragOutcome {
    /// The event did not apply (inert controller, or a commit in flight).
    Ignored,
    /// The drag was cancelled and everything restored.
    Cancelled(CancelReason),
    /// The synthesis result at `index` was activated.
    Committed {
        /// Global store index of the activated item.
        index: usize,
    },
}

/// The live state of one drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    id: SessionId,
    source: usize,
    anchor: Vec2,
    pointer_start: Vec2,
    displacement: Vec2,
    original_sprite: Option<Visual>,
    highlighted_cell: Option<usize>,
    target_index: Option<usize>,
    synthesis_sprite: Option<Visual>,
    effect: Option<EffectId>,
}

impl DragSession {
    /// Session identity.
    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Store index of the dragged primary item.
    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Where the element rests.
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Clamped displacement from the anchor as of the last move.
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    /// The source item's sprite, captured at drag start.
    #[inline]
    pub fn original_sprite(&self) -> Option<Visual> {
        self.original_sprite
    }

    /// Cell currently carrying the target highlight.
    #[inline]
    pub fn highlighted_cell(&self) -> Option<usize> {
        self.highlighted_cell
    }

    /// Store index of the last target an effect was started for.
    #[inline]
    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    /// Handle of the effect playing for this session.
    #[inline]
    pub fn effect(&self) -> Option<EffectId> {
        self.effect
    }
}

#[derive(Debug, Clone)]
struct CommitSession {
    id: SessionId,
    anchor: Vec2,
    original_sprite: Option<Visual>,
    tween: ReturnTween,
}

#[derive(Debug, Clone)]
enum InteractionState {
    Idle,
    Dragging(DragSession),
    Committing(CommitSession),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Drag-to-synthesize controller for one grid.
///
/// Owns the presenter and host it reports to; both can be `&mut` borrows
/// when the caller wants to keep ownership.
#[derive(Debug)]
pub struct DragInteractionController<P, H> {
    config: InteractionConfig,
    limits: DragLimits,
    store: Arc<GridStore>,
    presenter: P,
    host: H,
    scheduler: EffectScheduler,
    element: DraggedElement,
    state: InteractionState,
    next_session: u64,
    setup_error: Option<SetupError>,
}

impl<P: HighlightPresenter, H: InteractionHost> DragInteractionController<P, H> {
    /// Create an idle controller.
    ///
    /// A presenter with no cells leaves the controller inert; see
    /// [`setup_error`](Self::setup_error).
    pub fn new(
        config: InteractionConfig,
        store: impl Into<Arc<GridStore>>,
        presenter: P,
        host: H,
    ) -> Self {
        let setup_error =
            (presenter.cell_count() == 0).then_some(SetupError::MissingCollaborator("grid cells"));
        if let Some(err) = &setup_error {
            tracing::warn!(target: "synthgrid.drag", error = %err, "drag controller is inert");
        }
        let problems = config.validate();
        if !problems.is_empty() {
            tracing::warn!(target: "synthgrid.drag", ?problems, "interaction config failed validation");
        }

        Self {
            limits: config.drag_limits(),
            config,
            store: store.into(),
            presenter,
            host,
            scheduler: EffectScheduler::new(),
            element: DraggedElement::default(),
            state: InteractionState::Idle,
            next_session: 0,
            setup_error,
        }
    }

    // -- Accessors --------------------------------------------------------

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.state {
            InteractionState::Idle => Phase::Idle,
            InteractionState::Dragging(_) => Phase::Dragging,
            InteractionState::Committing(_) => Phase::Committing,
        }
    }

    /// The live drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            InteractionState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Display state of the dragged item.
    #[inline]
    pub fn element(&self) -> &DraggedElement {
        &self.element
    }

    /// The presenter.
    #[inline]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The host.
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The store being resolved against.
    #[inline]
    pub fn store(&self) -> &Arc<GridStore> {
        &self.store
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The effect pending for the live drag, if any.
    #[inline]
    pub fn pending_effect(&self) -> Option<&PendingEffect> {
        self.scheduler.active()
    }

    /// The effect scheduler, for diagnostics.
    #[inline]
    pub fn scheduler(&self) -> &EffectScheduler {
        &self.scheduler
    }

    /// Why the controller is inert, if it is.
    #[inline]
    pub fn setup_error(&self) -> Option<SetupError> {
        self.setup_error
    }

    /// Whether every handler is a no-op.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.setup_error.is_some()
    }

    /// How long the host may wait before the next [`tick`](Self::tick) matters.
    ///
    /// `Some(ZERO)` while the return tween runs, the effect's remaining time
    /// while one is pending, `None` when nothing is scheduled.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        if matches!(self.state, InteractionState::Committing(_)) {
            return Some(Duration::ZERO);
        }
        self.scheduler.time_until_due(now)
    }

    /// Swap the store. Any interaction in progress is torn down first.
    pub fn set_store(&mut self, store: impl Into<Arc<GridStore>>) {
        self.on_disable();
        self.store = store.into();
    }

    // -- Handlers ---------------------------------------------------------

    /// Start dragging the primary item at store index `source`.
    ///
    /// `anchor` is the element's resting position; `pointer` is where the
    /// press landed. Returns `false` if the drag was refused. A drag already
    /// in progress is cancelled first, and a commit in flight is finished.
    pub fn on_drag_begin(&mut self, source: usize, anchor: Vec2, pointer: Vec2) -> bool {
        if self.is_inert() {
            return false;
        }

        match mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Idle => {}
            InteractionState::Dragging(session) => {
                tracing::debug!(
                    target: "synthgrid.drag",
                    session = session.id.0,
                    "drag superseded by a new drag"
                );
                self.scheduler.cancel_all();
                self.restore_resting(Some((session.anchor, session.original_sprite)));
            }
            InteractionState::Committing(commit) => self.finish_commit(commit),
        }

        if !grid::slot_role(source).is_draggable() || !grid::is_valid(source, self.store.len()) {
            tracing::debug!(target: "synthgrid.drag", source, "drag refused: not a primary slot");
            return false;
        }

        let original_sprite = self.store.get(source).map(|item| item.visual);
        let page = grid::page_of(source);

        if let Some(corners) = grid::corner_cells(page) {
            self.presenter
                .set_corner_alpha(&corners, self.config.corner_alpha);
        }

        self.element.set_position(anchor);
        self.element.set_sprite(original_sprite);
        self.element.set_effect_cell(None);
        self.element.set_flag(ElementFlags::VISIBLE, true);
        self.element.set_flag(ElementFlags::INTERACTIVE, false);
        self.element.set_flag(ElementFlags::CROSS_PANEL, true);
        self.element.show_ghost(Ghost {
            position: anchor,
            sprite: original_sprite,
            alpha: self.config.ghost_alpha,
        });

        let id = SessionId(self.next_session);
        self.next_session += 1;
        tracing::debug!(target: "synthgrid.drag", session = id.0, source, page, "drag began");

        self.state = InteractionState::Dragging(DragSession {
            id,
            source,
            anchor,
            pointer_start: pointer,
            displacement: Vec2::ZERO,
            original_sprite,
            highlighted_cell: None,
            target_index: None,
            synthesis_sprite: None,
            effect: None,
        });
        true
    }

    /// Follow the pointer to `pointer`.
    pub fn on_drag_move(&mut self, pointer: Vec2, now: Instant) {
        if self.is_inert() {
            return;
        }
        let InteractionState::Dragging(session) = &mut self.state else {
            return;
        };

        let candidate = session.anchor + (pointer - session.pointer_start);
        let position = self.limits.clamp(candidate, session.anchor);
        self.element.set_position(position);
        let displacement = position - session.anchor;
        session.displacement = displacement;

        if let Some(cell) = session.highlighted_cell.take() {
            self.presenter.restore_cell(cell);
        }

        if self.limits.in_dead_zone(displacement) {
            if let Some(id) = session.effect.take() {
                self.scheduler.cancel(id);
                self.element.set_effect_cell(None);
                self.element.set_flag(ElementFlags::VISIBLE, true);
            }
            session.target_index = None;
            session.synthesis_sprite = None;
            self.element.set_sprite(session.original_sprite);
            return;
        }

        let Some(target) = resolve_target(session.source, displacement, &self.store) else {
            if let Some(id) = session.effect.take() {
                self.scheduler.cancel(id);
                self.element.set_effect_cell(None);
                self.element.set_flag(ElementFlags::VISIBLE, true);
            }
            if let Some(previous) = session.target_index.take() {
                tracing::debug!(target: "synthgrid.drag", previous, "target cleared");
            }
            session.synthesis_sprite = None;
            self.element.set_sprite(session.original_sprite);
            return;
        };

        let cell = target.cell;
        let target_index = target.store_index;
        let sprite = target.item.visual;

        self.presenter.set_visible(cell, true);
        self.presenter.set_alpha(cell, self.config.highlight_alpha);
        session.highlighted_cell = Some(cell);
        session.synthesis_sprite = Some(sprite);

        if session.target_index != Some(target_index) {
            let delay = self.config.effect_delay();
            if delay.is_zero() {
                if let Some(id) = session.effect.take() {
                    self.scheduler.cancel(id);
                    self.element.set_effect_cell(None);
                    self.element.set_flag(ElementFlags::VISIBLE, true);
                }
            } else {
                let result = target.item.clone();
                let id = self
                    .scheduler
                    .schedule(session.id, target_index, cell, result, delay, now);
                session.effect = Some(id);
                self.element.set_effect_cell(Some(cell));
                self.element.set_flag(ElementFlags::VISIBLE, false);
            }
            tracing::debug!(
                target: "synthgrid.drag",
                session = session.id.0,
                direction = ?target.direction,
                target_index,
                "target changed"
            );
            session.target_index = Some(target_index);
        }

        if session.effect.is_none() {
            self.element.set_sprite(Some(sprite));
            self.presenter.set_visible(cell, false);
        }
    }

    /// Release the drag, committing or cancelling it.
    pub fn on_drag_end(&mut self, now: Instant) -> DragOutcome {
        if self.is_inert() {
            return DragOutcome::Ignored;
        }

        let session = match mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Dragging(session) => session,
            InteractionState::Idle => {
                self.scheduler.cancel_all();
                self.restore_resting(None);
                return self.cancelled(None, CancelReason::NotStarted);
            }
            committing @ InteractionState::Committing(_) => {
                self.state = committing;
                return DragOutcome::Ignored;
            }
        };

        self.element.set_flag(ElementFlags::CROSS_PANEL, false);
        let displacement = self.element.position() - session.anchor;

        if self.limits.in_dead_zone(displacement) {
            return self.cancel_session(session, CancelReason::DeadZone);
        }

        let Some(target) = resolve_target(session.source, displacement, &self.store) else {
            return self.cancel_session(session, CancelReason::NoResult);
        };
        let result = target.item.clone();
        let target_index = target.store_index;

        let span = tracing::debug_span!(
            target: "synthgrid.drag",
            "synthgrid.commit",
            session = session.id.0,
            source = session.source,
            target_index,
        );
        let _guard = span.enter();

        self.scheduler.cancel_all();
        self.element.set_effect_cell(None);
        self.element.set_flag(ElementFlags::VISIBLE, true);
        self.presenter.restore_all();

        let Some(index) = self.store.position_of(result.id) else {
            tracing::warn!(
                target: "synthgrid.drag",
                item = result.id.0,
                "synthesis result not found in store"
            );
            return self.cancel_session(session, CancelReason::Unlocatable);
        };

        self.element.set_sprite(Some(result.visual));
        let chat = self.host.chat_dispatch_eligible();
        self.host.activated(Activation { index, chat });
        self.element.hide_ghost();
        tracing::info!(target: "synthgrid.drag", index, chat, "synthesis committed");

        let tween = ReturnTween::new(
            self.element.position(),
            session.anchor,
            self.config.return_duration(),
            now,
        );
        let commit = CommitSession {
            id: session.id,
            anchor: session.anchor,
            original_sprite: session.original_sprite,
            tween,
        };

        if tween.is_complete(now) {
            self.finish_commit(commit);
        } else {
            self.state = InteractionState::Committing(commit);
        }
        DragOutcome::Committed { index }
    }

    /// Advance timers: effect expiry and the return tween.
    pub fn tick(&mut self, now: Instant) {
        if self.is_inert() {
            return;
        }

        if let Some(effect) = self.scheduler.poll(now) {
            self.on_effect_expired(effect);
        }

        let InteractionState::Committing(commit) = &self.state else {
            return;
        };
        if !commit.tween.is_complete(now) {
            self.element.set_position(commit.tween.position_at(now));
            return;
        }
        if let InteractionState::Committing(commit) =
            mem::replace(&mut self.state, InteractionState::Idle)
        {
            self.finish_commit(commit);
        }
    }

    /// Activate the primary item shown at display `cell` directly.
    ///
    /// Returns `false` when the controller is busy or the cell is empty.
    pub fn on_click(&mut self, cell: usize) -> bool {
        if self.is_inert() || !matches!(self.state, InteractionState::Idle) {
            return false;
        }
        let Some(index) = grid::store_index_of_cell(cell) else {
            return false;
        };
        if self.store.get(index).is_none() {
            return false;
        }

        let chat = self.host.chat_dispatch_eligible();
        self.host.activated(Activation { index, chat });
        self.host.close_panel(PanelMode::Normal);
        tracing::debug!(target: "synthgrid.drag", cell, index, "item activated directly");
        true
    }

    /// Forced teardown. Restores everything; no host signals are sent.
    ///
    /// Safe to call in any phase, and more than once.
    pub fn on_disable(&mut self) {
        self.scheduler.cancel_all();
        let rest = match mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Idle => None,
            InteractionState::Dragging(session) => {
                tracing::debug!(target: "synthgrid.drag", session = session.id.0, "drag torn down");
                Some((session.anchor, session.original_sprite))
            }
            InteractionState::Committing(commit) => {
                tracing::debug!(target: "synthgrid.drag", session = commit.id.0, "commit torn down");
                Some((commit.anchor, commit.original_sprite))
            }
        };
        self.restore_resting(rest);
    }

    // -- Internals --------------------------------------------------------

    fn on_effect_expired(&mut self, effect: PendingEffect) {
        let InteractionState::Dragging(session) = &mut self.state else {
            tracing::debug!(target: "synthgrid.drag", effect_id = effect.id.get(), "stale effect ignored");
            return;
        };
        if session.id != effect.session || session.effect != Some(effect.id) {
            tracing::debug!(target: "synthgrid.drag", effect_id = effect.id.get(), "stale effect ignored");
            return;
        }

        session.effect = None;
        self.element.set_effect_cell(None);
        self.element.set_flag(ElementFlags::VISIBLE, true);
        if let Some(sprite) = session.synthesis_sprite {
            self.element.set_sprite(Some(sprite));
            self.presenter.set_visible(effect.cell, false);
        }
    }

    fn finish_commit(&mut self, commit: CommitSession) {
        self.host.close_panel(PanelMode::Synthesis);
        self.element.set_position(commit.anchor);
        self.element.set_sprite(commit.original_sprite);
        self.element.set_flag(ElementFlags::INTERACTIVE, true);
        self.presenter.restore_all();
        tracing::debug!(target: "synthgrid.drag", session = commit.id.0, "commit finished");
    }

    fn cancel_session(&mut self, session: DragSession, reason: CancelReason) -> DragOutcome {
        self.scheduler.cancel_all();
        self.restore_resting(Some((session.anchor, session.original_sprite)));
        self.cancelled(Some(session.id), reason)
    }

    fn cancelled(&self, session: Option<SessionId>, reason: CancelReason) -> DragOutcome {
        tracing::debug!(
            target: "synthgrid.drag",
            session = ?session.map(|s| s.0),
            ?reason,
            "drag cancelled"
        );
        DragOutcome::Cancelled(reason)
    }

    /// Undo every drag-time decoration. `rest` is where and what the element
    /// returns to, when known.
    fn restore_resting(&mut self, rest: Option<(Vec2, Option<Visual>)>) {
        if let Some((anchor, sprite)) = rest {
            self.element.set_position(anchor);
            self.element.set_sprite(sprite);
        }
        self.element.set_effect_cell(None);
        self.element.hide_ghost();
        self.element.set_flag(ElementFlags::VISIBLE, true);
        self.element.set_flag(ElementFlags::CROSS_PANEL, false);
        self.element.set_flag(ElementFlags::INTERACTIVE, true);
        self.presenter.restore_all();
        self.presenter.reset_corner_alpha();
    }
}
