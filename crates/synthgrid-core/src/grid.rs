#![forbid(unsafe_code)]

//! Paged slot arithmetic.
//!
//! The item store is a flat sequence cut into pages of
//! [`SLOTS_PER_PAGE`] slots. The first [`PRIMARY_SLOTS`] of a page form a
//! 3×3 grid of directly selectable items; the remaining four hold the
//! synthesis results, one per [`Direction`]:
//!
//! ```text
//! local slot   0 1 2 3 4 5 6 7 8 | 9   10   11    12
//! role         ---- primary ---- | Top Left Right Bottom
//! ```
//!
//! Only primary slots are displayed, so the host's cell array has nine cells
//! per page: cell `page * 9 + local` shows store slot `page * 13 + local`.
//!
//! # Invariants
//!
//! 1. [`slot_role`] is a pure function of `index % 13`; locals `9..=12` are
//!    always [`SlotRole::Synthesis`].
//! 2. [`synthesis_index`] is injective over the four directions of a page.
//! 3. Every function here is total: arithmetic overflow or an out-of-range
//!    argument yields `None`, never a panic.

use crate::geometry::Vec2;

/// Logical slots per page (9 primary + 4 synthesis).
pub const SLOTS_PER_PAGE: usize = 13;
/// Primary (displayed, draggable) slots per page.
pub const PRIMARY_SLOTS: usize = 9;
/// Side length of the primary grid.
pub const GRID_SIDE: usize = 3;
/// Local indices of the four corner cells (top-left, top-right, bottom-left, bottom-right).
pub const CORNER_LOCALS: [usize; 4] = [0, 2, 6, 8];

/// Cardinal drag direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Toward the top of the grid (positive `y`).
    Top,
    /// Toward the bottom of the grid.
    Bottom,
    /// Toward the left of the grid.
    Left,
    /// Toward the right of the grid (positive `x`).
    Right,
}

impl Direction {
    /// All directions in synthesis-slot order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Left, Self::Right, Self::Bottom];

    /// Derive a direction from a drag displacement.
    ///
    /// The horizontal axis wins only when `|dx| > |dy|` strictly; an exact
    /// tie (including the zero vector) resolves to the vertical branch.
    #[must_use]
    pub fn from_displacement(d: Vec2) -> Self {
        if d.x.abs() > d.y.abs() {
            if d.x > 0.0 { Self::Right } else { Self::Left }
        } else if d.y > 0.0 {
            Self::Top
        } else {
            Self::Bottom
        }
    }

    /// Local slot (9..=12) holding this direction's synthesis result.
    #[inline]
    pub const fn synthesis_local(self) -> usize {
        match self {
            Self::Top => 9,
            Self::Left => 10,
            Self::Right => 11,
            Self::Bottom => 12,
        }
    }

    /// Local cell (edge midpoint of the 3×3 grid) adjacent in this direction.
    #[inline]
    pub const fn neighbor_local(self) -> usize {
        match self {
            Self::Top => 1,
            Self::Left => 3,
            Self::Right => 5,
            Self::Bottom => 7,
        }
    }

    /// Whether this direction lies on the horizontal axis.
    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// What a store slot is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// One of the nine grid items, with its local index (0..=8).
    Primary(usize),
    /// The synthesis result slot for a direction.
    Synthesis(Direction),
}

impl SlotRole {
    /// Whether a drag may start from this slot.
    #[inline]
    pub const fn is_draggable(self) -> bool {
        matches!(self, Self::Primary(_))
    }
}

/// Classify a global store index.
#[must_use]
pub const fn slot_role(index: usize) -> SlotRole {
    match index % SLOTS_PER_PAGE {
        9 => SlotRole::Synthesis(Direction::Top),
        10 => SlotRole::Synthesis(Direction::Left),
        11 => SlotRole::Synthesis(Direction::Right),
        12 => SlotRole::Synthesis(Direction::Bottom),
        local => SlotRole::Primary(local),
    }
}

/// Page containing a global store index.
#[inline]
pub const fn page_of(index: usize) -> usize {
    index / SLOTS_PER_PAGE
}

/// Global index of a primary slot; `None` if `local` is not a primary local.
#[must_use]
pub const fn primary_index(page: usize, local: usize) -> Option<usize> {
    if local >= PRIMARY_SLOTS {
        return None;
    }
    match page.checked_mul(SLOTS_PER_PAGE) {
        Some(base) => base.checked_add(local),
        None => None,
    }
}

/// Global index of a page's synthesis slot for `direction`.
#[must_use]
pub const fn synthesis_index(page: usize, direction: Direction) -> Option<usize> {
    match page.checked_mul(SLOTS_PER_PAGE) {
        Some(base) => base.checked_add(direction.synthesis_local()),
        None => None,
    }
}

/// Whether `index` addresses a slot of a store of length `len`.
#[inline]
pub const fn is_valid(index: usize, len: usize) -> bool {
    index < len
}

/// Display cell showing a store slot; `None` for synthesis slots.
#[must_use]
pub const fn cell_of(index: usize) -> Option<usize> {
    match slot_role(index) {
        SlotRole::Primary(local) => match page_of(index).checked_mul(PRIMARY_SLOTS) {
            Some(base) => base.checked_add(local),
            None => None,
        },
        SlotRole::Synthesis(_) => None,
    }
}

/// Store slot shown by a display cell.
#[must_use]
pub const fn store_index_of_cell(cell: usize) -> Option<usize> {
    primary_index(cell / PRIMARY_SLOTS, cell % PRIMARY_SLOTS)
}

/// Page a display cell belongs to.
#[inline]
pub const fn page_of_cell(cell: usize) -> usize {
    cell / PRIMARY_SLOTS
}

/// Display cell adjacent to the page center in `direction`.
#[must_use]
pub const fn neighbor_cell(page: usize, direction: Direction) -> Option<usize> {
    match page.checked_mul(PRIMARY_SLOTS) {
        Some(base) => base.checked_add(direction.neighbor_local()),
        None => None,
    }
}

/// The four corner cells of a page.
#[must_use]
pub fn corner_cells(page: usize) -> Option<[usize; 4]> {
    let base = page.checked_mul(PRIMARY_SLOTS)?;
    // Largest local is 8, so one checked add covers all four.
    base.checked_add(CORNER_LOCALS[3])?;
    Some(CORNER_LOCALS.map(|local| base + local))
}
