//! Outbound mail abstraction.

use async_trait::async_trait;
use tracing::info;

use innkeeper_core::result::AppResult;

/// Sends a single message to a guest.
///
/// The default implementation writes to the log; a real SMTP or provider
/// backend slots in behind the same trait.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Mailer that records messages in the application log instead of sending
/// them. Used in development and as the default backend.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from_address: String,
}

impl LogMailer {
    /// Creates a new log-backed mailer.
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        info!(from = %self.from_address, to, subject, body, "Outbound notification");
        Ok(())
    }
}
