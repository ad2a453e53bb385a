#![forbid(unsafe_code)]

//! Grid cell highlighting.
//!
//! All transient cell state (dimmed corners, the half-transparent target
//! highlight, the hidden cell whose sprite moved onto the dragged item) goes
//! through the [`HighlightPresenter`] trait. The controller is the only
//! caller; it never touches cell state any other way.
//!
//! # Invariants
//!
//! 1. `restore_all` leaves every present cell visible at full opacity, and
//!    calling it twice is the same as calling it once.
//! 2. Operations on a missing or out-of-range cell are silent no-ops.

/// Opacity of a cell at rest.
pub const FULL_ALPHA: f32 = 1.0;

/// Visual state of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVisual {
    /// Whether the cell's image is drawn.
    pub visible: bool,
    /// Image opacity in `[0, 1]`.
    pub alpha: f32,
}

impl CellVisual {
    /// Fully visible, fully opaque.
    pub const RESTING: Self = Self {
        visible: true,
        alpha: FULL_ALPHA,
    };

    /// Whether the cell is in its resting state.
    #[inline]
    pub fn is_resting(&self) -> bool {
        *self == Self::RESTING
    }
}

impl Default for CellVisual {
    fn default() -> Self {
        Self::RESTING
    }
}

/// Applies transient visual state to grid cells.
pub trait HighlightPresenter {
    /// Number of addressable cells.
    fn cell_count(&self) -> usize;

    /// Set one cell's opacity.
    fn set_alpha(&mut self, cell: usize, alpha: f32);

    /// Show or hide one cell.
    fn set_visible(&mut self, cell: usize, visible: bool);

    /// Return every cell to visible, full opacity.
    fn restore_all(&mut self);

    /// Set the opacity of the given corner cells.
    fn set_corner_alpha(&mut self, corners: &[usize], alpha: f32) {
        for &cell in corners {
            self.set_alpha(cell, alpha);
        }
    }

    /// Return every cell to full opacity, leaving visibility alone.
    fn reset_corner_alpha(&mut self) {
        for cell in 0..self.cell_count() {
            self.set_alpha(cell, FULL_ALPHA);
        }
    }

    /// Return one cell to visible, full opacity.
    fn restore_cell(&mut self, cell: usize) {
        self.set_visible(cell, true);
        self.set_alpha(cell, FULL_ALPHA);
    }
}

impl<P: HighlightPresenter + ?Sized> HighlightPresenter for &mut P {
    fn cell_count(&self) -> usize {
        (**self).cell_count()
    }

    fn set_alpha(&mut self, cell: usize, alpha: f32) {
        (**self).set_alpha(cell, alpha);
    }

    fn set_visible(&mut self, cell: usize, visible: bool) {
        (**self).set_visible(cell, visible);
    }

    fn restore_all(&mut self) {
        (**self).restore_all();
    }

    fn set_corner_alpha(&mut self, corners: &[usize], alpha: f32) {
        (**self).set_corner_alpha(corners, alpha);
    }

    fn reset_corner_alpha(&mut self) {
        (**self).reset_corner_alpha();
    }

    fn restore_cell(&mut self, cell: usize) {
        (**self).restore_cell(cell);
    }
}

// ---------------------------------------------------------------------------
// CellPresenter
// ---------------------------------------------------------------------------

/// The stock presenter: a flat array of cell states the host renders from.
///
/// A `None` entry is a cell whose image is absent; it is skipped by every
/// operation, so that one cell simply stays unresponsive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellPresenter {
    cells: Vec<Option<CellVisual>>,
}

impl CellPresenter {
    /// `count` resting cells.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            cells: vec![Some(CellVisual::RESTING); count],
        }
    }

    /// Cells with some entries absent.
    #[must_use]
    pub fn from_cells(cells: Vec<Option<CellVisual>>) -> Self {
        Self { cells }
    }

    /// State of one cell.
    #[inline]
    pub fn cell(&self, cell: usize) -> Option<CellVisual> {
        self.cells.get(cell).copied().flatten()
    }

    /// All cell states.
    #[inline]
    pub fn cells(&self) -> &[Option<CellVisual>] {
        &self.cells
    }

    /// Whether every present cell is at rest.
    #[must_use]
    pub fn is_resting(&self) -> bool {
        self.cells.iter().flatten().all(CellVisual::is_resting)
    }

    fn cell_mut(&mut self, cell: usize) -> Option<&mut CellVisual> {
        self.cells.get_mut(cell).and_then(Option::as_mut)
    }
}

impl HighlightPresenter for CellPresenter {
    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn set_alpha(&mut self, cell: usize, alpha: f32) {
        if let Some(c) = self.cell_mut(cell) {
            c.alpha = alpha;
        }
    }

    fn set_visible(&mut self, cell: usize, visible: bool) {
        if let Some(c) = self.cell_mut(cell) {
            c.visible = visible;
        }
    }

    fn restore_all(&mut self) {
        for c in self.cells.iter_mut().flatten() {
            *c = CellVisual::RESTING;
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingPresenter
// ---------------------------------------------------------------------------

/// One presenter call, as seen by [`RecordingPresenter`].
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    SetAlpha(usize, f32),
    SetVisible(usize, bool),
    RestoreAll,
    SetCornerAlpha(Vec<usize>, f32),
    ResetCornerAlpha,
}

/// A [`CellPresenter`] that also logs every call.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    cells: CellPresenter,
    calls: Vec<PresenterCall>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl RecordingPresenter {
    /// `count` resting cells, no calls recorded.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            cells: CellPresenter::new(count),
            calls: Vec::new(),
        }
    }

    /// Recorded calls in order.
    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    /// Drop the recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Underlying cell state.
    pub fn cells(&self) -> &CellPresenter {
        &self.cells
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl HighlightPresenter for RecordingPresenter {
    fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    fn set_alpha(&mut self, cell: usize, alpha: f32) {
        self.calls.push(PresenterCall::SetAlpha(cell, alpha));
        self.cells.set_alpha(cell, alpha);
    }

    fn set_visible(&mut self, cell: usize, visible: bool) {
        self.calls.push(PresenterCall::SetVisible(cell, visible));
        self.cells.set_visible(cell, visible);
    }

    fn restore_all(&mut self) {
        self.calls.push(PresenterCall::RestoreAll);
        self.cells.restore_all();
    }

    fn set_corner_alpha(&mut self, corners: &[usize], alpha: f32) {
        self.calls.push(PresenterCall::SetCornerAlpha(corners.to_vec(), alpha));
        self.cells.set_corner_alpha(corners, alpha);
    }

    fn reset_corner_alpha(&mut self) {
        self.calls.push(PresenterCall::ResetCornerAlpha);
        self.cells.reset_corner_alpha();
    }
}
