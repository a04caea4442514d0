//! Single-slot debouncer for editor-to-preview updates.
//!
//! Time is passed in by the caller as milliseconds since some fixed origin,
//! so the event loop owns the clock and tests can drive it directly.

/// Quiet period before a buffered change triggers an update cycle.
pub const DEBOUNCE_QUIET_MS: u64 = 300;

/// Collapses a burst of change notifications into one deadline. Each
/// `schedule` call resets the deadline, so only the trailing edge of a
/// typing burst fires.
#[derive(Debug)]
pub struct UpdateDebouncer {
    quiet_ms: u64,
    deadline: Option<u64>,
}

impl UpdateDebouncer {
    pub const fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            deadline: None,
        }
    }

    /// Record a change at `now_ms`, replacing any pending deadline.
    pub const fn schedule(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms + self.quiet_ms);
    }

    /// If the quiet period has elapsed, consume the deadline and report
    /// ready. At most one ready per scheduled burst.
    pub const fn take_ready(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(at) if now_ms >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for UpdateDebouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_QUIET_MS)
    }
}
