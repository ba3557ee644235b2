//! Debounced search channel.
//!
//! Keystrokes update a local echo immediately; the host is only told about
//! the value after a quiet period. The pending commit is a tokio task owned by
//! the channel and is cancelled when the host overrides the value or the
//! channel is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::events::Callback;

/// Phase of the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No commit pending.
    Idle,
    /// A commit is scheduled.
    Typing,
}

/// State shared with the scheduled commit task.
#[derive(Debug, Default)]
struct Shared {
    /// Last value handed to the host.
    committed: Option<String>,
}

/// A search box value decoupled from the host's notification rate.
pub struct DebouncedSearch {
    /// Local echo shown in the input.
    value: String,
    /// Last value the host supplied.
    external: String,
    delay: Duration,
    on_commit: Callback<String>,
    pending: Option<JoinHandle<()>>,
    /// Bumped on every schedule and cancel; a task only commits if it still
    /// holds the current generation.
    generation: Arc<AtomicU64>,
    shared: Arc<Mutex<Shared>>,
}

impl std::fmt::Debug for DebouncedSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedSearch")
            .field("value", &self.value)
            .field("external", &self.external)
            .field("delay", &self.delay)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl DebouncedSearch {
    /// Create a channel showing the host's current value.
    pub fn new(external: impl Into<String>, delay: Duration, on_commit: Callback<String>) -> Self {
        let external = external.into();
        Self {
            value: external.clone(),
            external,
            delay,
            on_commit,
            pending: None,
            generation: Arc::new(AtomicU64::new(0)),
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    /// Current local echo.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current phase.
    pub fn phase(&self) -> SearchPhase {
        match &self.pending {
            Some(handle) if !handle.is_finished() => SearchPhase::Typing,
            _ => SearchPhase::Idle,
        }
    }

    /// Replace the commit callback.
    pub fn set_on_commit(&mut self, on_commit: Callback<String>) {
        self.on_commit = on_commit;
    }

    /// Handle a keystroke: echo immediately and restart the quiet period.
    ///
    /// Without a tokio runtime the value is committed immediately.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cancel();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(handle) = Handle::try_current() else {
            debug!("No runtime for search debounce; committing immediately");
            self.commit_now();
            return;
        };

        let value = self.value.clone();
        let delay = self.delay;
        let on_commit = Arc::clone(&self.on_commit);
        let current = Arc::clone(&self.generation);
        let shared = Arc::clone(&self.shared);
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            debug!("Search committed: {:?}", value);
            if let Ok(mut guard) = shared.lock() {
                guard.committed = Some(value.clone());
            }
            on_commit(value);
        }));
    }

    /// Resynchronise with the host's value.
    ///
    /// A new value that is not the host echoing our own last commit replaces
    /// the local echo and cancels any pending commit. The first host change
    /// after a commit consumes it, so a later return to the same value is an
    /// override like any other.
    pub fn sync_external(&mut self, external: &str) {
        if external == self.external {
            return;
        }
        self.external = external.to_string();

        // A commit is acknowledged at most once.
        let acknowledged = self
            .shared
            .lock()
            .map(|mut g| g.committed.take().as_deref() == Some(external))
            .unwrap_or(false);
        if acknowledged {
            return;
        }

        if self.phase() == SearchPhase::Typing {
            debug!("Search overridden by host; pending commit dropped");
        }
        self.cancel();
        self.value = self.external.clone();
    }

    /// Cancel any pending commit.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    fn commit_now(&mut self) {
        if let Ok(mut guard) = self.shared.lock() {
            guard.committed = Some(self.value.clone());
        }
        (self.on_commit)(self.value.clone());
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.cancel();
    }
}
