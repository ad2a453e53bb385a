#![forbid(unsafe_code)]

//! The page-aligned item store.
//!
//! [`GridStore`] is the backing sequence the grid reads from. It is written
//! by the authoring side (page add/remove, slot edits) and read by the drag
//! engine, which only ever looks items up by index.
//!
//! # Invariants
//!
//! 1. `page_count() >= 1`.
//! 2. `len() == page_count() * SLOTS_PER_PAGE` at all times.
//! 3. Slot lookups never panic: out-of-range reads return `None`.

use std::fmt;

use crate::grid::{self, SLOTS_PER_PAGE};

/// Stable identity of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

/// Opaque handle to the sprite a host draws for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Visual(pub u32);

/// An immutable grid item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Identity used to locate the item in the store.
    pub id: ItemId,
    /// Sprite shown for the item.
    pub visual: Visual,
    /// Payload handed to the activation consumer (e.g. an avatar effect key).
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<String>,
}

impl Item {
    /// Create an item without an effect payload.
    #[must_use]
    pub fn new(id: u32, visual: u32) -> Self {
        Self {
            id: ItemId(id),
            visual: Visual(visual),
            effect: None,
        }
    }

    /// Attach an effect payload (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }
}

/// Errors from store construction and editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The slot index is past the end of the store.
    IndexOutOfRange { index: usize, len: usize },
    /// Slot count does not equal `page_count * 13`.
    NotPageAligned { slots: usize, page_count: usize },
    /// The page does not exist.
    PageOutOfRange { page: usize, page_count: usize },
    /// Removing the only page would violate `page_count >= 1`.
    LastPage,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "slot {index} out of range for store of {len} slots")
            }
            Self::NotPageAligned { slots, page_count } => write!(
                f,
                "{slots} slots is not {page_count} pages of {SLOTS_PER_PAGE}"
            ),
            Self::PageOutOfRange { page, page_count } => {
                write!(f, "page {page} out of range ({page_count} pages)")
            }
            Self::LastPage => write!(f, "cannot remove the last page"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Ordered, page-aligned item slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoreParts"))]
pub struct GridStore {
    slots: Vec<Option<Item>>,
    page_count: usize,
}

/// Unchecked wire shape; validated into a [`GridStore`] on deserialize.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoreParts {
    slots: Vec<Option<Item>>,
    page_count: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<StoreParts> for GridStore {
    type Error = StoreError;

    fn try_from(parts: StoreParts) -> Result<Self, Self::Error> {
        Self::from_slots(parts.slots, parts.page_count)
    }
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GridStore {
    /// Create a store of empty slots. `page_count` is raised to 1 if zero.
    #[must_use]
    pub fn new(page_count: usize) -> Self {
        let page_count = page_count.max(1);
        Self {
            slots: vec![None; page_count * SLOTS_PER_PAGE],
            page_count,
        }
    }

    /// Build a store from existing slots.
    pub fn from_slots(slots: Vec<Option<Item>>, page_count: usize) -> Result<Self, StoreError> {
        if page_count == 0 || page_count.checked_mul(SLOTS_PER_PAGE) != Some(slots.len()) {
            return Err(StoreError::NotPageAligned {
                slots: slots.len(),
                page_count,
            });
        }
        Ok(Self { slots, page_count })
    }

    /// Number of pages (always at least 1).
    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; a store holds at least one page.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of display cells the host needs (nine per page).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.page_count * grid::PRIMARY_SLOTS
    }

    /// Item at `index`, or `None` for an empty or out-of-range slot.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// All slots in order.
    #[inline]
    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    /// The thirteen slots of one page.
    pub fn page(&self, page: usize) -> Option<&[Option<Item>]> {
        let start = page.checked_mul(SLOTS_PER_PAGE)?;
        self.slots.get(start..start.checked_add(SLOTS_PER_PAGE)?)
    }

    /// First slot index holding the item with `id`.
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|item| item.id == id))
    }

    /// Replace one slot, returning its previous content.
    pub fn set(&mut self, index: usize, item: Option<Item>) -> Result<Option<Item>, StoreError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, item))
    }

    /// Append an empty page and return its page number.
    pub fn push_page(&mut self) -> usize {
        self.slots.resize(self.slots.len() + SLOTS_PER_PAGE, None);
        self.page_count += 1;
        self.page_count - 1
    }

    /// Remove a page, shifting later pages forward.
    pub fn remove_page(&mut self, page: usize) -> Result<Vec<Option<Item>>, StoreError> {
        if page >= self.page_count {
            return Err(StoreError::PageOutOfRange {
                page,
                page_count: self.page_count,
            });
        }
        if self.page_count == 1 {
            return Err(StoreError::LastPage);
        }
        let start = page * SLOTS_PER_PAGE;
        let removed = self.slots.drain(start..start + SLOTS_PER_PAGE).collect();
        self.page_count -= 1;
        Ok(removed)
    }
}
