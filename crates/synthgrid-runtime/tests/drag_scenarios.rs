#![forbid(unsafe_code)]

//! End-to-end drag scenarios against the stock [`CellPresenter`].
//!
//! Each test drives a controller the way a host frame loop would: begin,
//! a stream of moves, release, then ticks until the interaction settles.
//!
//! Run:
//!   cargo test -p synthgrid-runtime --test drag_scenarios

use synthgrid_core::{GridStore, Item, Vec2, Visual};
use synthgrid_runtime::{
    Activation, CancelReason, CellPresenter, DragInteractionController, DragOutcome,
    InteractionConfig, InteractionHost, PanelMode, Phase,
};
use web_time::{Duration, Instant};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Default)]
struct Panel {
    activations: Vec<Activation>,
    closed: Vec<PanelMode>,
    chat_blocked: bool,
}

impl InteractionHost for Panel {
    fn activated(&mut self, activation: Activation) {
        self.activations.push(activation);
    }

    fn close_panel(&mut self, mode: PanelMode) {
        self.closed.push(mode);
    }

    fn chat_dispatch_eligible(&self) -> bool {
        !self.chat_blocked
    }
}

const ANCHOR: Vec2 = Vec2::new(0.0, 0.0);
const FRAME: Duration = Duration::from_millis(16);

/// Two pages. Page 0 has every synthesis slot filled; page 1 only Left.
fn two_page_store() -> GridStore {
    let mut store = GridStore::new(2);
    for page in 0..2 {
        for local in 0..9 {
            let index = page * 13 + local;
            store
                .set(index, Some(Item::new(index as u32, 1000 + index as u32)))
                .unwrap();
        }
    }
    for (index, id) in [(9, 90), (10, 91), (11, 92), (12, 93), (23, 94)] {
        store
            .set(index, Some(Item::new(id, 2000 + id).with_effect("sparkle")))
            .unwrap();
    }
    store
}

fn controller<'a>(
    presenter: &'a mut CellPresenter,
    panel: &'a mut Panel,
) -> DragInteractionController<&'a mut CellPresenter, &'a mut Panel> {
    DragInteractionController::new(InteractionConfig::default(), two_page_store(), presenter, panel)
}

/// Feed `moves` one frame apart starting at `t`, ticking after each.
fn drive<P, H>(c: &mut DragInteractionController<P, H>, t: &mut Instant, moves: &[Vec2])
where
    P: synthgrid_runtime::HighlightPresenter,
    H: InteractionHost,
{
    for &pointer in moves {
        *t += FRAME;
        c.on_drag_move(pointer, *t);
        c.tick(*t);
    }
}

fn settle<P, H>(c: &mut DragInteractionController<P, H>, t: &mut Instant)
where
    P: synthgrid_runtime::HighlightPresenter,
    H: InteractionHost,
{
    for _ in 0..64 {
        if c.phase() == Phase::Idle {
            return;
        }
        *t += FRAME;
        c.tick(*t);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn upward_drag_commits_top_synthesis() {
    let mut presenter = CellPresenter::new(18);
    let mut panel = Panel::default();
    let mut t = Instant::now();
    {
        let mut c = controller(&mut presenter, &mut panel);
        assert!(c.on_drag_begin(4, ANCHOR, ANCHOR));
        drive(&mut c, &mut t, &[Vec2::new(0.0, 40.0), Vec2::new(0.0, 90.0), Vec2::new(2.0, 130.0)]);

        // Hold long enough for the effect to finish.
        t += Duration::from_millis(800);
        c.tick(t);
        assert_eq!(c.element().sprite(), Some(Visual(2090)));

        assert_eq!(c.on_drag_end(t), DragOutcome::Committed { index: 9 });
        settle(&mut c, &mut t);
        assert!(c.element().is_resting_at(ANCHOR, Some(Visual(1004))));
    }
    assert_eq!(panel.activations, vec![Activation { index: 9, chat: true }]);
    assert_eq!(panel.closed, vec![PanelMode::Synthesis]);
    assert!(presenter.is_resting());
}

#[test]
fn horizontal_wins_only_on_strict_majority() {
    let mut presenter = CellPresenter::new(18);
    let mut panel = Panel::default();
    let mut t = Instant::now();
    {
        let mut c = controller(&mut presenter, &mut panel);
        c.on_drag_begin(4, ANCHOR, ANCHOR);
        // |dx| == |dy| goes vertical; the axis lock then pins x.
        drive(&mut c, &mut t, &[Vec2::new(-100.0, -100.0)]);
        assert_eq!(c.element().position(), Vec2::new(-15.0, -100.0));
        assert_eq!(c.on_drag_end(t), DragOutcome::Committed { index: 12 });
        settle(&mut c, &mut t);
    }
    assert_eq!(panel.activations[0].index, 12);
}

#[test]
fn second_page_uses_its_own_slots() {
    let mut presenter = CellPresenter::new(18);
    let mut panel = Panel::default();
    let mut t = Instant::now();
    {
        let mut c = controller(&mut presenter, &mut panel);
        assert!(c.on_drag_begin(13 + 4, ANCHOR, ANCHOR));
        assert_eq!(c.presenter().cell(9).map(|v| v.alpha), Some(0.1));
        assert_eq!(c.presenter().cell(0).map(|v| v.alpha), Some(1.0));

        drive(&mut c, &mut t, &[Vec2::new(-120.0, 0.0)]);
        assert_eq!(c.pending_effect().map(|e| e.cell), Some(9 + 3));
        assert_eq!(c.on_drag_end(t), DragOutcome::Committed { index: 23 });
        settle(&mut c, &mut t);
    }
    assert!(presenter.is_resting());
}

#[test]
fn release_toward_empty_slot_cancels() {
    let mut presenter = CellPresenter::new(18);
    let mut panel = Panel::default();
    let mut t = Instant::now();
    {
        let mut c = controller(&mut presenter, &mut panel);
        c.on_drag_begin(13 + 4, ANCHOR, ANCHOR);
        drive(&mut c, &mut t, &[Vec2::new(0.0, 150.0)]);
        assert!(c.pending_effect().is_none());
        assert_eq!(
            c.on_drag_end(t),
            DragOutcome::Cancelled(CancelReason::NoResult)
        );
        assert!(c.element().is_resting_at(ANCHOR, Some(Visual(1017))));
    }
    assert!(panel.activations.is_empty());
    assert!(panel.closed.is_empty());
    assert!(presenter.is_resting());
}

#[test]
fn swinging_between_targets_reveals_only_the_last() {
    let mut presenter = CellPresenter::new(18);
    let mut panel = Panel::default();
    let mut t = Instant::now();
    {
        let mut c = controller(&mut presenter, &mut panel);
        c.on_drag_begin(4, ANCHOR, ANCHOR);
        drive(&mut c, &mut t, &[Vec2::new(0.0, 120.0)]);
        t += Duration::from_millis(400);
        drive(&mut c, &mut t, &[Vec2::new(120.0, 0.0)]);

        // First deadline passes; the superseded effect stays silent.
        t += Duration::from_millis(400);
        c.tick(t);
        assert_eq!(c.element().sprite(), Some(Visual(1004)));
        assert_eq!(c.presenter().cell(1).map(|v| v.alpha), Some(1.0));

        t += Duration::from_millis(400);
        c.tick(t);
        assert_eq!(c.element().sprite(), Some(Visual(2092)));
        assert_eq!(c.presenter().cell(5).map(|v| v.visible), Some(false));
        assert_eq!(c.scheduler().stats().cancelled, 1);

        c.on_disable();
    }
    assert!(panel.activations.is_empty());
    assert!(presenter.is_resting());
}

#[test]
fn wobble_inside_dead_zone_is_a_noop_release() {
    let mut presenter = CellPresenter::new(18);
    let mut panel = Panel::default();
    let mut t = Instant::now();
    {
        let mut c = controller(&mut presenter, &mut panel);
        c.on_drag_begin(0, ANCHOR, ANCHOR);
        drive(
            &mut c,
            &mut t,
            &[Vec2::new(20.0, 10.0), Vec2::new(-50.0, 50.0), Vec2::new(5.0, -30.0)],
        );
        assert_eq!(c.scheduler().stats().scheduled, 0);
        assert_eq!(
            c.on_drag_end(t),
            DragOutcome::Cancelled(CancelReason::DeadZone)
        );
    }
    assert!(presenter.is_resting());
    assert!(panel.closed.is_empty());
}

#[test]
fn blocked_chat_still_activates() {
    let mut presenter = CellPresenter::new(18);
    let mut panel = Panel {
        chat_blocked: true,
        ..Panel::default()
    };
    {
        let mut c = controller(&mut presenter, &mut panel);
        assert!(c.on_click(2));
    }
    assert_eq!(panel.activations, vec![Activation { index: 2, chat: false }]);
    assert_eq!(panel.closed, vec![PanelMode::Normal]);
}

#[test]
fn absent_cell_images_are_tolerated() {
    let mut cells = vec![Some(synthgrid_runtime::CellVisual::RESTING); 18];
    cells[1] = None;
    let mut presenter = CellPresenter::from_cells(cells);
    let mut panel = Panel::default();
    let mut t = Instant::now();
    {
        let mut c = controller(&mut presenter, &mut panel);
        c.on_drag_begin(4, ANCHOR, ANCHOR);
        drive(&mut c, &mut t, &[Vec2::new(0.0, 120.0)]);
        t += Duration::from_millis(800);
        c.tick(t);
        assert_eq!(c.presenter().cell(1), None);
        assert_eq!(c.on_drag_end(t), DragOutcome::Committed { index: 9 });
        settle(&mut c, &mut t);
    }
    assert!(presenter.is_resting());
}
