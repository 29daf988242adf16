//! Email notification configuration.

use serde::{Deserialize, Serialize};

/// Settings for the fire-and-forget reservation notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Whether notifications are dispatched at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// From address placed on outgoing messages.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Bounded capacity of the in-process dispatch queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            from_address: default_from(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_from() -> String {
    "reservations@innkeeper.local".to_string()
}

fn default_queue_capacity() -> usize {
    256
}
