#![forbid(unsafe_code)]

//! Collaborators the controller reports to.
//!
//! The controller never looks anything up at runtime; the host hands it an
//! [`InteractionHost`] at construction and receives activation and
//! panel-close notifications through it.

/// How the hosting panel is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelMode {
    /// A primary item was picked directly.
    Normal,
    /// A synthesis drag was committed.
    Synthesis,
}

/// An item the user confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Activation {
    /// Global store index of the activated item.
    pub index: usize,
    /// Whether the current context accepts chat dispatch for it.
    ///
    /// When `false` the consumer should still play local effects but skip
    /// sending the item as a message.
    pub chat: bool,
}

/// Receives the controller's externally visible signals.
pub trait InteractionHost {
    /// An item was confirmed.
    fn activated(&mut self, activation: Activation);

    /// The hosting panel should close.
    fn close_panel(&mut self, mode: PanelMode);

    /// Whether activations may be dispatched to chat in the current context.
    fn chat_dispatch_eligible(&self) -> bool {
        true
    }
}

impl<H: InteractionHost + ?Sized> InteractionHost for &mut H {
    fn activated(&mut self, activation: Activation) {
        (**self).activated(activation);
    }

    fn close_panel(&mut self, mode: PanelMode) {
        (**self).close_panel(mode);
    }

    fn chat_dispatch_eligible(&self) -> bool {
        (**self).chat_dispatch_eligible()
    }
}

/// A host that records every signal, for tests.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone)]
pub struct RecordingHost {
    /// Activations in arrival order.
    pub activations: Vec<Activation>,
    /// Panel closes in arrival order.
    pub closed: Vec<PanelMode>,
    /// Value returned by `chat_dispatch_eligible`.
    pub eligible: bool,
}

#[cfg(any(test, feature = "test-helpers"))]
impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            activations: Vec::new(),
            closed: Vec::new(),
            eligible: true,
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl InteractionHost for RecordingHost {
    fn activated(&mut self, activation: Activation) {
        self.activations.push(activation);
    }

    fn close_panel(&mut self, mode: PanelMode) {
        self.closed.push(mode);
    }

    fn chat_dispatch_eligible(&self) -> bool {
        self.eligible
    }
}
