//! Email notification sinks
//!
//! Two implementations of [`NotificationSink`]:
//! - `mock`: logs messages, for development and tests
//! - `http`: posts to a transactional email HTTP API

mod http;
mod mock;


use std::sync::Arc;

use ag_core::services::notification::NotificationSink;
use ag_shared::config::{MailConfig, MailProvider};

use crate::InfrastructureError;

pub use http::HttpNotificationSink;
pub use mock::LoggingNotificationSink;

/// Build the sink selected by `config.provider`
pub fn create_notification_sink(
    config: &MailConfig,
) -> Result<Arc<dyn NotificationSink>, InfrastructureError> {
    match config.provider {
        MailProvider::Mock => {
            tracing::info!(provider = "mock", "Email delivery disabled, messages are logged");
            Ok(Arc::new(LoggingNotificationSink::new()))
        }
        MailProvider::Http => {
            let sink = HttpNotificationSink::new(config)?;
            tracing::info!(provider = "http", api_url = %config.api_url, "Email delivery enabled");
            Ok(Arc::new(sink))
        }
    }
}
