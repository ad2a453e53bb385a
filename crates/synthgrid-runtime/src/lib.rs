#![forbid(unsafe_code)]

//! SynthGrid Runtime
//!
//! The stateful half of SynthGrid: everything that changes over the course
//! of a drag.
//!
//! # Key Components
//!
//! - [`DragInteractionController`] - The drag state machine
//! - [`EffectScheduler`] - Single-slot cancellable effect timer
//! - [`HighlightPresenter`] - Trait for transient grid-cell state
//! - [`CellPresenter`] - Stock presenter backed by a flat cell array
//! - [`InteractionHost`] - Receives activations and panel-close signals
//! - [`InteractionConfig`] - Tunable distances, timings, and alphas
//!
//! # Role in SynthGrid
//! `synthgrid-runtime` drives `synthgrid-core`: it feeds pointer
//! displacement through the core clamp and resolver, and turns the answers
//! into presenter calls, element state, and host signals. The host owns the
//! frame loop and calls [`DragInteractionController::tick`] once per frame.

pub mod config;
pub mod controller;
pub mod effect;
pub mod element;
pub mod error;
pub mod host;
pub mod presenter;

pub use config::{ConfigError, InteractionConfig};
pub use controller::{CancelReason, DragInteractionController, DragOutcome, DragSession, Phase};
pub use effect::{EffectId, EffectScheduler, EffectStats, PendingEffect, SessionId};
pub use element::{DraggedElement, ElementFlags, Ghost};
pub use error::SetupError;
pub use host::{Activation, InteractionHost, PanelMode};
pub use presenter::{CellPresenter, CellVisual, FULL_ALPHA, HighlightPresenter};

#[cfg(any(test, feature = "test-helpers"))]
pub use host::RecordingHost;
#[cfg(any(test, feature = "test-helpers"))]
pub use presenter::{PresenterCall, RecordingPresenter};
