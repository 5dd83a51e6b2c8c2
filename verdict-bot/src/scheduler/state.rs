//! Poll loop state
//!
//! Everything the poller remembers between cycles. Owned by the poller task
//! alone and discarded on exit.

use verdict_core::StatusCode;

/// Where the poller is within a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Fetching,
    Validating,
    Extracting,
    Deciding,
    Notifying,
    Sleeping,
    FailureHandling,
}

/// Result of a cycle that completed without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no work items in the window
    NoItems,
    /// The latest status matches the last one delivered
    Unchanged(StatusCode),
    /// A status change was delivered
    Notified(StatusCode),
}

/// Process-lifetime state of the poll loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopState {
    pub phase: CyclePhase,
    /// Last status successfully delivered to the channel
    pub last_known_status: Option<StatusCode>,
    /// Last error message successfully delivered to the channel
    pub last_sent_error: Option<String>,
    /// `from_date` for the next request
    pub window_start: i64,
}

impl LoopState {
    pub fn new(window_start: i64) -> Self {
        Self {
            phase: CyclePhase::Idle,
            last_known_status: None,
            last_sent_error: None,
            window_start,
        }
    }

    /// Whether `message` was already the last error delivered
    pub fn is_duplicate_error(&self, message: &str) -> bool {
        self.last_sent_error.as_deref() == Some(message)
    }
}
