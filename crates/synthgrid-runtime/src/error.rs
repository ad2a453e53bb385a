#![forbid(unsafe_code)]

//! Setup errors.
//!
//! Nothing the controller does at runtime returns an error: bad indices and
//! stale timers read as "nothing to do". The one condition reported is a
//! collaborator that was missing at construction, which leaves the
//! controller inert.

use std::fmt;

/// Why a controller was constructed inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// A required collaborator was absent; the payload names it.
    MissingCollaborator(&'static str),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCollaborator(what) => write!(f, "missing collaborator: {what}"),
        }
    }
}

impl std::error::Error for SetupError {}
