//! Outbound email notifications.
//!
//! Delivery is best effort: [`Notifier`] logs a failed send and returns, so a
//! mail outage never changes the outcome of the operation that triggered it.

mod messages;
mod recording;

use std::sync::Arc;

use async_trait::async_trait;
use ag_shared::utils::email::mask;

use crate::domain::entities::account::Account;
use crate::errors::DomainResult;

pub use messages::EmailMessage;
pub use recording::RecordingNotificationSink;

/// Delivery channel for [`EmailMessage`]s
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> DomainResult<()>;

    /// Short name used in log fields
    fn provider_name(&self) -> &'static str;
}

/// Builds the account lifecycle messages and hands them to a sink
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub async fn registration_code(&self, account: &Account, code: &str, valid_minutes: i64) {
        self.dispatch(EmailMessage::registration_code(&account.email, &account.name, code, valid_minutes))
            .await;
    }

    /// Alert every administrator that `applicant` is waiting for a decision
    pub async fn registration_request(&self, admins: &[Account], applicant: &Account) {
        for admin in admins {
            self.dispatch(EmailMessage::registration_request(&admin.email, applicant))
                .await;
        }
    }

    pub async fn password_reset_code(&self, account: &Account, code: &str, valid_minutes: i64) {
        self.dispatch(EmailMessage::password_reset_code(&account.email, &account.name, code, valid_minutes))
            .await;
    }

    pub async fn registration_approved(&self, account: &Account) {
        self.dispatch(EmailMessage::registration_approved(&account.email, &account.name))
            .await;
    }

    pub async fn registration_rejected(&self, account: &Account) {
        self.dispatch(EmailMessage::registration_rejected(&account.email, &account.name))
            .await;
    }

    async fn dispatch(&self, message: EmailMessage) {
        match self.sink.send(&message).await {
            Ok(()) => tracing::debug!(
                provider = self.sink.provider_name(),
                recipient = %mask(&message.to),
                subject = %message.subject,
                "Notification sent"
            ),
            Err(e) => tracing::warn!(
                provider = self.sink.provider_name(),
                recipient = %mask(&message.to),
                subject = %message.subject,
                error = %e,
                "Notification delivery failed"
            ),
        }
    }
}
