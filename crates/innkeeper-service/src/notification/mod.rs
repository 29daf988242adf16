//! Guest notifications for reservation lifecycle events.

pub mod dispatcher;
pub mod mailer;

pub use dispatcher::NotificationDispatcher;
pub use mailer::{LogMailer, Mailer};
