//! Transactional email over HTTP.
//!
//! Speaks the Brevo `v3/smtp/email` JSON shape: sender, recipients, subject
//! and both text and HTML bodies, authenticated with an `api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use ag_core::errors::{DomainError, DomainResult};
use ag_core::services::notification::{EmailMessage, NotificationSink};
use ag_shared::config::MailConfig;
use ag_shared::utils::email::mask;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendEmailBody {
    pub sender: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

pub struct HttpNotificationSink {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    sender_email: String,
    sender_name: Option<String>,
}

impl HttpNotificationSink {
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| InfrastructureError::Config("MAIL_API_KEY is required".to_string()))?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("accessgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
        })
    }

    pub(crate) fn body_for(&self, message: &EmailMessage) -> SendEmailBody {
        SendEmailBody {
            sender: EmailAddress {
                email: self.sender_email.clone(),
                name: self.sender_name.clone(),
            },
            to: vec![EmailAddress {
                email: message.to.clone(),
                name: None,
            }],
            subject: message.subject.clone(),
            html_content: message.html.clone(),
            text_content: message.text.clone(),
        }
    }

    async fn post(&self, message: &EmailMessage) -> Result<(), InfrastructureError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&self.body_for(message))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(InfrastructureError::Mail(format!(
            "provider returned {}: {}",
            status, body
        )))
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn send(&self, message: &EmailMessage) -> DomainResult<()> {
        self.post(message).await.map_err(|e| {
            tracing::error!(
                target: "mail_service",
                recipient = %mask(&message.to),
                error = %e,
                "Email provider call failed"
            );
            DomainError::from(e)
        })
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }
}
