//! Repository layer
//!
//! Repositories are stateless HTTP clients for the two remote parties the bot
//! talks to: the status API and the messaging channel. They carry no business
//! logic.
//!
//! All repositories are trait-based so the poller can be tested with fakes.

mod notifier;
mod statuses;

// Re-export traits
pub use notifier::Notifier;
pub use statuses::StatusRepository;

// Re-export implementations
pub use notifier::TelegramNotifier;
pub use statuses::HttpStatusRepository;

pub use notifier::NotificationError;
