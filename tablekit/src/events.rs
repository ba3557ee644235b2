//! Event handling types shared by the table engines.
//!
//! The engine is controlled: it never stores the descriptors it renders.
//! Every mutable concern is reported back to the host through a
//! [`Callback`], and a callback that is `None` means the feature is absent.

use std::fmt;
use std::sync::Arc;

/// A host-supplied callback receiving the next value of some descriptor.
pub type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Wrap a closure as a [`Callback`].
pub fn callback<A, F>(f: F) -> Callback<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Arc::new(f)
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored (feature absent, out-of-range target, no-op).
    Ignored,
    /// Event was consumed.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

// =============================================================================
// Interaction
// =============================================================================

/// A single row interaction handed to caller row handlers.
///
/// Caller handlers run before the engine's own handler for the same event.
/// Calling [`mark_handled`](Interaction::mark_handled) suppresses the engine
/// default for that event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    handled: bool,
}

impl Interaction {
    /// Create a fresh interaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the engine's default action for this event.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    /// Whether a handler already claimed this event.
    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// Placeholder used by `Debug` impls of structs holding callbacks.
pub(crate) struct CallbackSlot(pub bool);

impl fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "Some(<callback>)" } else { "None" })
    }
}
