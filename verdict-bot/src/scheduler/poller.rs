//! Status poller
//!
//! Polls the status API on a fixed interval, tells the channel when the latest
//! work item changes status, and reports failures without flooding the chat.
//!
//! A cycle runs Fetching -> Validating -> Extracting -> Deciding -> Notifying,
//! any of which can drop into FailureHandling. Sleeping always follows.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Duration};
use tracing::{debug, error, info, warn};
use verdict_core::{VerdictTable, extract, validate};

use super::error::CycleError;
use super::state::{CycleOutcome, CyclePhase, LoopState};
use crate::repository::{Notifier, StatusRepository};

/// Poller that tracks the latest work item status
pub struct StatusPoller {
    statuses: Arc<dyn StatusRepository>,
    notifier: Arc<dyn Notifier>,
    verdicts: VerdictTable,
    poll_interval: Duration,
    state: LoopState,
}

impl StatusPoller {
    /// Creates a new status poller
    ///
    /// # Arguments
    /// * `statuses` - Source of raw status responses
    /// * `notifier` - Channel for status changes and failure reports
    /// * `verdicts` - Verdict sentences per status
    /// * `poll_interval` - Pause after every cycle
    /// * `window_start` - `from_date` of the first request
    pub fn new(
        statuses: Arc<dyn StatusRepository>,
        notifier: Arc<dyn Notifier>,
        verdicts: VerdictTable,
        poll_interval: Duration,
        window_start: i64,
    ) -> Self {
        Self {
            statuses,
            notifier,
            verdicts,
            poll_interval,
            state: LoopState::new(window_start),
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Starts the polling loop
    ///
    /// Runs until `shutdown` changes (or its sender is dropped). A cycle in
    /// progress always completes; shutdown is only observed while sleeping.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting status poller (interval: {:?}, from_date: {})",
            self.poll_interval, self.state.window_start
        );

        loop {
            match self.run_cycle().await {
                Ok(outcome) => debug!("Cycle finished: {:?}", outcome),
                Err(e) => debug!("Cycle failed in {:?}: {}", e.phase, e),
            }

            self.enter(CyclePhase::Sleeping);
            tokio::select! {
                _ = time::sleep(self.poll_interval) => {}
                _ = shutdown.changed() => {
                    info!("Shutdown requested, stopping status poller");
                    break;
                }
            }
            self.enter(CyclePhase::Idle);
        }
    }

    /// Performs a single poll cycle, including failure handling
    ///
    /// The error is returned for the caller's information only; it has
    /// already been logged and, unless it duplicates the last one, reported.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        match self.poll_once().await {
            Ok(outcome) => {
                self.state.last_sent_error = None;
                Ok(outcome)
            }
            Err(e) => {
                self.handle_failure(&e).await;
                Err(e)
            }
        }
    }

    async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        self.enter(CyclePhase::Fetching);
        let raw = self
            .statuses
            .fetch(self.state.window_start)
            .await
            .map_err(CycleError::at(CyclePhase::Fetching))?;
        info!("Received status response (from_date={})", self.state.window_start);

        self.enter(CyclePhase::Validating);
        let result = validate(&raw).map_err(CycleError::at(CyclePhase::Validating))?;

        let Some(latest) = result.latest() else {
            info!("No work items reported since {}", self.state.window_start);
            self.state.window_start = result.fetched_at;
            return Ok(CycleOutcome::NoItems);
        };

        self.enter(CyclePhase::Extracting);
        let item =
            extract(latest, &self.verdicts).map_err(CycleError::at(CyclePhase::Extracting))?;

        self.enter(CyclePhase::Deciding);
        if self.state.last_known_status == Some(item.status) {
            debug!("Status of '{}' unchanged: {}", item.name, item.status);
            self.state.window_start = result.fetched_at;
            return Ok(CycleOutcome::Unchanged(item.status));
        }

        self.enter(CyclePhase::Notifying);
        info!(
            "Status of '{}' changed: {:?} -> {}",
            item.name, self.state.last_known_status, item.status
        );
        self.notifier
            .notify(&item.verdict_text)
            .await
            .map_err(CycleError::at(CyclePhase::Notifying))?;
        info!("Status change notification sent");

        self.state.last_known_status = Some(item.status);
        self.state.window_start = result.fetched_at;
        Ok(CycleOutcome::Notified(item.status))
    }

    async fn handle_failure(&mut self, failure: &CycleError) {
        self.enter(CyclePhase::FailureHandling);
        error!("Poll cycle failed in {:?}: {}", failure.phase, failure);

        if failure.is_undelivered_status() {
            warn!("Status change was not delivered, will retry next cycle");
        }
        if failure.is_contract_change() {
            warn!("Status API reported a status outside the known set, check for API changes");
        }

        let message = failure.diagnostic_message();
        if self.state.is_duplicate_error(&message) {
            debug!("Suppressing repeated error notification");
            return;
        }

        match self.notifier.notify(&message).await {
            Ok(()) => {
                info!("Error notification sent");
                self.state.last_sent_error = Some(message);
            }
            Err(e) => error!("Failed to send error notification: {}", e),
        }
    }

    fn enter(&mut self, phase: CyclePhase) {
        debug!("{:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
    }
}
