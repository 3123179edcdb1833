//! Logging email sink for development and testing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use ag_core::errors::DomainResult;
use ag_core::services::notification::{EmailMessage, NotificationSink};
use ag_shared::utils::email::mask;

/// Writes each message to the log instead of sending it
///
/// The body is logged at debug level only, since it carries one-time codes.
#[derive(Clone, Default)]
pub struct LoggingNotificationSink {
    message_count: Arc<AtomicU64>,
}

impl LoggingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages accepted so far
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn send(&self, message: &EmailMessage) -> DomainResult<()> {
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "mail_service",
            provider = "mock",
            recipient = %mask(&message.to),
            subject = %message.subject,
            message_number = count,
            "Mock email accepted"
        );
        tracing::debug!(target: "mail_service", body = %message.text, "Mock email body");
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
