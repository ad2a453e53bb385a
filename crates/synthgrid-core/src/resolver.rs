#![forbid(unsafe_code)]

//! Directional synthesis lookup.
//!
//! Given the slot a drag started from and the current displacement, the
//! resolver picks a [`Direction`], finds that direction's synthesis slot on
//! the source's page, and returns the item stored there.
//!
//! The highlighted neighbor cell and the fetched result are both derived from
//! the one direction computed here, so they can never disagree.
//!
//! # Failure Modes
//!
//! Every miss is `None`: a source on a page past `page_count`, an index that
//! overflows, or an empty synthesis slot all read as "nothing to synthesize".

use crate::geometry::Vec2;
use crate::grid::{self, Direction};
use crate::store::{GridStore, Item};

/// A resolved synthesis target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisTarget<'a> {
    /// Direction the displacement selected.
    pub direction: Direction,
    /// Store index of the synthesis slot.
    pub store_index: usize,
    /// Display cell of the neighbor in that direction.
    pub cell: usize,
    /// The synthesized item.
    pub item: &'a Item,
}

/// Resolve the full target for a drag from `source` displaced by `displacement`.
#[must_use]
pub fn resolve_target(
    source: usize,
    displacement: Vec2,
    store: &GridStore,
) -> Option<SynthesisTarget<'_>> {
    let direction = Direction::from_displacement(displacement);
    let page = grid::page_of(source);
    if page >= store.page_count() {
        return None;
    }

    let store_index = grid::synthesis_index(page, direction)?;
    if !grid::is_valid(store_index, store.len()) {
        return None;
    }
    let item = store.get(store_index)?;
    let cell = grid::neighbor_cell(page, direction)?;

    Some(SynthesisTarget {
        direction,
        store_index,
        cell,
        item,
    })
}

/// Resolve only the synthesized item.
#[inline]
#[must_use]
pub fn resolve(source: usize, displacement: Vec2, store: &GridStore) -> Option<&Item> {
    resolve_target(source, displacement, store).map(|target| target.item)
}
