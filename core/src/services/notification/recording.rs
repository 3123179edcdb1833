//! In-process sink that keeps every message, for tests and local runs.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::{DomainError, DomainResult};

use super::{EmailMessage, NotificationSink};

#[derive(Debug, Default)]
struct State {
    sent: Vec<EmailMessage>,
    failures: usize,
    failing: bool,
}

/// Records messages instead of delivering them. Can be switched to fail every send.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    state: Mutex<State>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_failing(&self, failing: bool) {
        self.state.lock().await.failing = failing;
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.state.lock().await.sent.clone()
    }

    pub async fn recipients(&self) -> Vec<String> {
        self.state.lock().await.sent.iter().map(|m| m.to.clone()).collect()
    }

    pub async fn failures(&self) -> usize {
        self.state.lock().await.failures
    }

    /// The first all-digit word of the latest message to `to`
    pub async fn last_code_for(&self, to: &str) -> Option<String> {
        let state = self.state.lock().await;
        state
            .sent
            .iter()
            .rev()
            .find(|m| m.to == to)
            .and_then(|m| {
                m.text
                    .split(|c: char| c.is_whitespace() || c == '.')
                    .find(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_digit()))
                    .map(str::to_string)
            })
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn send(&self, message: &EmailMessage) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        if state.failing {
            state.failures += 1;
            return Err(DomainError::internal("recording sink set to fail"));
        }
        state.sent.push(message.clone());
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}
