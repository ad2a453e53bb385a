#![forbid(unsafe_code)]

//! State of the dragged item and its drag-time decorations.
//!
//! The host renders the dragged item from a [`DraggedElement`] snapshot; the
//! controller is the only writer.

use bitflags::bitflags;
use synthgrid_core::{Vec2, Visual};

bitflags! {
    /// Boolean display state of the dragged item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// The item's own sprite is drawn (cleared while an effect plays).
        const VISIBLE = 1 << 0;
        /// The item's tap trigger accepts input (cleared while dragging).
        const INTERACTIVE = 1 << 1;
        /// The translucent ghost is shown at the drag origin.
        const GHOST = 1 << 2;
        /// The cross-shaped direction guide is shown.
        const CROSS_PANEL = 1 << 3;
    }
}

impl ElementFlags {
    /// Flags of an item at rest.
    pub const RESTING: Self = Self::VISIBLE.union(Self::INTERACTIVE);
}

/// The translucent copy left at the drag origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    /// Where the ghost is drawn.
    pub position: Vec2,
    /// Sprite it shows (the source item's).
    pub sprite: Option<Visual>,
    /// Ghost opacity.
    pub alpha: f32,
}

/// Display state of the item being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggedElement {
    position: Vec2,
    sprite: Option<Visual>,
    flags: ElementFlags,
    ghost: Option<Ghost>,
    effect_cell: Option<usize>,
}

impl Default for DraggedElement {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            sprite: None,
            flags: ElementFlags::RESTING,
            ghost: None,
            effect_cell: None,
        }
    }
}

impl DraggedElement {
    /// Current anchored position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Sprite currently shown.
    #[inline]
    pub fn sprite(&self) -> Option<Visual> {
        self.sprite
    }

    /// Display flags.
    #[inline]
    pub fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Whether the item's sprite is drawn.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(ElementFlags::VISIBLE)
    }

    /// Whether the tap trigger is enabled.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.flags.contains(ElementFlags::INTERACTIVE)
    }

    /// The origin ghost, if shown.
    #[inline]
    pub fn ghost(&self) -> Option<&Ghost> {
        self.ghost.as_ref()
    }

    /// Cell the synthesis effect is playing over, if any.
    #[inline]
    pub fn effect_cell(&self) -> Option<usize> {
        self.effect_cell
    }

    /// Whether the element is fully at rest at `anchor` showing `sprite`.
    #[must_use]
    pub fn is_resting_at(&self, anchor: Vec2, sprite: Option<Visual>) -> bool {
        self.position == anchor
            && self.sprite == sprite
            && self.flags == ElementFlags::RESTING
            && self.ghost.is_none()
            && self.effect_cell.is_none()
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_sprite(&mut self, sprite: Option<Visual>) {
        self.sprite = sprite;
    }

    pub(crate) fn set_flag(&mut self, flag: ElementFlags, on: bool) {
        self.flags.set(flag, on);
    }

    pub(crate) fn show_ghost(&mut self, ghost: Ghost) {
        self.ghost = Some(ghost);
        self.flags.insert(ElementFlags::GHOST);
    }

    pub(crate) fn hide_ghost(&mut self) {
        self.ghost = None;
        self.flags.remove(ElementFlags::GHOST);
    }

    pub(crate) fn set_effect_cell(&mut self, cell: Option<usize>) {
        self.effect_cell = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_resting() {
        let el = DraggedElement::default();
        assert!(el.is_visible());
        assert!(el.is_interactive());
        assert!(el.is_resting_at(Vec2::ZERO, None));
    }

    #[test]
    fn ghost_toggles_flag() {
        let mut el = DraggedElement::default();
        el.show_ghost(Ghost {
            position: Vec2::new(1.0, 2.0),
            sprite: Some(Visual(3)),
            alpha: 0.5,
        });
        assert!(el.flags().contains(ElementFlags::GHOST));
        assert_eq!(el.ghost().map(|g| g.alpha), Some(0.5));
        el.hide_ghost();
        assert!(el.ghost().is_none());
        assert_eq!(el.flags(), ElementFlags::RESTING);
    }

    #[test]
    fn flags_set_and_clear() {
        let mut el = DraggedElement::default();
        el.set_flag(ElementFlags::INTERACTIVE, false);
        el.set_flag(ElementFlags::CROSS_PANEL, true);
        assert!(!el.is_interactive());
        assert!(el.flags().contains(ElementFlags::CROSS_PANEL));
        assert!(!el.is_resting_at(Vec2::ZERO, None));
    }
}
