#![forbid(unsafe_code)]

//! Core: paged slot arithmetic, the item store, and synthesis lookup.
//!
//! # Role in SynthGrid
//! `synthgrid-core` is the pure layer. Everything here is a deterministic
//! function of its inputs: no timers, no logging, no collaborators.
//!
//! # Primary responsibilities
//! - **Grid arithmetic** ([`grid`]): page/slot/cell index mapping and slot roles.
//! - **GridStore** ([`store`]): the flat, page-aligned item sequence.
//! - **Synthesis lookup** ([`resolver`]): drag displacement to combined item.
//! - **Drag geometry** ([`drag`]): axis-lock clamping and the dead zone.
//! - **Return motion** ([`tween`]): the eased slide back to the anchor.
//!
//! # How it fits in the system
//! The runtime (`synthgrid-runtime`) owns the drag state machine and calls
//! into this crate for every pointer update. Because these lookups carry no
//! memory between calls, the runtime can re-run them on every move without
//! reconciling stale results.

pub mod drag;
pub mod geometry;
pub mod grid;
pub mod resolver;
pub mod store;
pub mod tween;

pub use geometry::{Axis, Vec2};
pub use grid::{Direction, SlotRole};
pub use resolver::{SynthesisTarget, resolve, resolve_target};
pub use store::{GridStore, Item, ItemId, StoreError, Visual};
