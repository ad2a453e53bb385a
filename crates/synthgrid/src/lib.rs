#![forbid(unsafe_code)]

//! SynthGrid public facade crate.
//!
//! Re-exports the grid model from `synthgrid-core` and, with the default
//! `runtime` feature, the drag controller from `synthgrid-runtime`, plus a
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use synthgrid_core::drag::DragLimits;
pub use synthgrid_core::grid::{PRIMARY_SLOTS, SLOTS_PER_PAGE};
pub use synthgrid_core::tween::ReturnTween;
pub use synthgrid_core::{
    Axis, Direction, GridStore, Item, ItemId, SlotRole, StoreError, SynthesisTarget, Vec2, Visual,
    resolve, resolve_target,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use synthgrid_runtime::{
    Activation, CancelReason, CellPresenter, CellVisual, ConfigError, DragInteractionController,
    DragOutcome, DraggedElement, ElementFlags, HighlightPresenter, InteractionConfig,
    InteractionHost, PanelMode, Phase, SetupError,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for SynthGrid hosts.
#[derive(Debug)]
pub enum Error {
    /// Grid store edit or construction failed.
    Store(StoreError),
    /// Interaction config could not be loaded.
    #[cfg(feature = "runtime")]
    Config(ConfigError),
    /// A controller was built without a required collaborator.
    #[cfg(feature = "runtime")]
    Setup(SetupError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Setup(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Setup(err) => Some(err),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "runtime")]
impl From<SetupError> for Error {
    fn from(err: SetupError) -> Self {
        Self::Setup(err)
    }
}

/// Standard result type for SynthGrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{Direction, Error, GridStore, Item, Result, Vec2, Visual};

    #[cfg(feature = "runtime")]
    pub use crate::{
        Activation, CellPresenter, DragInteractionController, DragOutcome, HighlightPresenter,
        InteractionConfig, InteractionHost, PanelMode,
    };

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use synthgrid_core as core;
#[cfg(feature = "runtime")]
pub use synthgrid_runtime as runtime;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_convert() {
        let mut store = GridStore::new(1);
        let err: Error = store.set(99, None).unwrap_err().into();
        assert!(matches!(err, Error::Store(StoreError::IndexOutOfRange { index: 99, .. })));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn setup_error_displays_collaborator() {
        let err = Error::from(SetupError::MissingCollaborator("grid cells"));
        assert_eq!(err.to_string(), "missing collaborator: grid cells");
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn prelude_builds_a_controller() {
        use crate::prelude::*;

        struct Sink;
        impl InteractionHost for Sink {
            fn activated(&mut self, _: Activation) {}
            fn close_panel(&mut self, _: PanelMode) {}
        }

        let c = DragInteractionController::new(
            InteractionConfig::default(),
            GridStore::new(1),
            CellPresenter::new(9),
            Sink,
        );
        assert!(!c.is_inert());
    }
}
