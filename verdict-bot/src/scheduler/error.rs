//! Cycle errors
//!
//! Every recoverable failure in a poll cycle ends up here, tagged with the
//! phase that produced it.

use thiserror::Error;
use verdict_client::ClientError;
use verdict_core::ValidationError;

use super::state::CyclePhase;
use crate::repository::NotificationError;

/// Prefix of every error message sent to the channel
const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Telegram refuses messages longer than this many characters
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// What went wrong in a cycle
#[derive(Debug, Error)]
pub enum CycleErrorKind {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

/// A failed poll cycle
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct CycleError {
    pub phase: CyclePhase,
    #[source]
    pub kind: CycleErrorKind,
}

impl CycleError {
    /// Returns a closure that tags an error with the phase it came from
    pub fn at<E>(phase: CyclePhase) -> impl FnOnce(E) -> Self
    where
        E: Into<CycleErrorKind>,
    {
        move |err| Self {
            phase,
            kind: err.into(),
        }
    }

    /// Text sent to the channel for this failure, capped at the channel limit
    pub fn diagnostic_message(&self) -> String {
        let message = format!("{}: {}", FAILURE_PREFIX, self);
        match message.char_indices().nth(MAX_MESSAGE_CHARS) {
            Some((cut, _)) => message[..cut].to_string(),
            None => message,
        }
    }

    /// Whether the API reported a status outside the known enumeration
    pub fn is_contract_change(&self) -> bool {
        matches!(&self.kind, CycleErrorKind::Validation(e) if e.is_contract_change())
    }

    /// Whether the failure was delivering a status change
    pub fn is_undelivered_status(&self) -> bool {
        matches!(self.kind, CycleErrorKind::Notification(_))
    }
}
