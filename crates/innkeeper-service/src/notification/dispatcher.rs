//! Background dispatcher draining the reservation event queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use innkeeper_core::config::NotificationConfig;
use innkeeper_core::events::ReservationEvent;

use super::mailer::Mailer;

/// Owns the bounded event queue and the background task delivering
/// notifications through a [`Mailer`].
///
/// Delivery is fire-and-forget from the request path's point of view: the
/// lifecycle service enqueues without awaiting, and a delivery failure only
/// produces a log line.
pub struct NotificationDispatcher {
    sender: mpsc::Sender<ReservationEvent>,
    handle: JoinHandle<()>,
}

impl NotificationDispatcher {
    /// Spawn the dispatcher task with a queue sized from configuration.
    pub fn spawn(mailer: Arc<dyn Mailer>, config: &NotificationConfig) -> Self {
        let (sender, mut receiver) = mpsc::channel::<ReservationEvent>(config.queue_capacity);

        let handle = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                let to = event.guest().email.clone();
                let (subject, body) = render(&event);
                debug!(reservation_id = %event.reservation_id(), to, "Dispatching notification");
                if let Err(e) = mailer.send(&to, &subject, &body).await {
                    warn!(
                        reservation_id = %event.reservation_id(),
                        error = %e,
                        "Notification delivery failed"
                    );
                }
            }
            debug!("Notification queue closed, dispatcher exiting");
        });

        Self { sender, handle }
    }

    /// A handle for enqueueing events.
    pub fn sender(&self) -> mpsc::Sender<ReservationEvent> {
        self.sender.clone()
    }

    /// Close the queue and wait for in-flight deliveries to finish.
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Notification dispatcher task panicked");
        }
    }
}

/// Render the subject and body for one event.
fn render(event: &ReservationEvent) -> (String, String) {
    let name = event.guest().full_name();
    match event {
        ReservationEvent::Created {
            room_number,
            check_in,
            check_out,
            ..
        } => (
            "Your reservation is confirmed".to_string(),
            format!(
                "Dear {name}, your reservation for room {room_number} from {check_in} to \
                 {check_out} is confirmed. We look forward to welcoming you."
            ),
        ),
        ReservationEvent::CheckedIn { room_number, .. } => (
            "Welcome!".to_string(),
            format!("Dear {name}, you are checked in to room {room_number}. Enjoy your stay."),
        ),
        ReservationEvent::CheckedOut { .. } => (
            "Thank you for staying with us".to_string(),
            format!("Dear {name}, your check-out is complete. We hope to see you again."),
        ),
        ReservationEvent::Cancelled {
            room_number,
            fee_fraction,
            ..
        } => {
            let fee_note = if *fee_fraction > 0.0 {
                format!(
                    " A cancellation fee of {:.0}% of the booking total applies.",
                    fee_fraction * 100.0
                )
            } else {
                String::new()
            };
            (
                "Your reservation has been cancelled".to_string(),
                format!(
                    "Dear {name}, your reservation for room {room_number} has been \
                     cancelled.{fee_note}"
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use uuid::Uuid;

    use async_trait::async_trait;
    use innkeeper_core::events::GuestContact;
    use innkeeper_core::result::AppResult;

    use super::*;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, _body: &str) -> AppResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    fn guest() -> GuestContact {
        GuestContact {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatcher_delivers_then_drains_on_shutdown() {
        let mailer = Arc::new(RecordingMailer::default());
        let dispatcher =
            NotificationDispatcher::spawn(mailer.clone(), &NotificationConfig::default());

        let sender = dispatcher.sender();
        sender
            .send(ReservationEvent::Created {
                reservation_id: Uuid::new_v4(),
                room_number: 101,
                check_in: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
                guest: guest(),
            })
            .await
            .unwrap();
        drop(sender);
        dispatcher.shutdown().await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ada@example.com");
        assert_eq!(sent[0].1, "Your reservation is confirmed");
    }

    #[test]
    fn test_cancellation_body_mentions_fee_only_when_charged() {
        let base = ReservationEvent::Cancelled {
            reservation_id: Uuid::new_v4(),
            room_number: 205,
            reason: None,
            fee_fraction: 0.0,
            guest: guest(),
        };
        let (_, body) = render(&base);
        assert!(!body.contains("cancellation fee"));

        let charged = ReservationEvent::Cancelled {
            reservation_id: Uuid::new_v4(),
            room_number: 205,
            reason: None,
            fee_fraction: 0.5,
            guest: guest(),
        };
        let (_, body) = render(&charged);
        assert!(body.contains("50%"));
    }
}
