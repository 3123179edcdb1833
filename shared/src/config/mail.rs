//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::env_opt;

/// Which email sink the server wires up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Log messages instead of sending them
    #[default]
    Mock,
    /// Transactional email HTTP API
    Http,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "log" => Ok(MailProvider::Mock),
            "http" | "brevo" => Ok(MailProvider::Http),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// Email provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub provider: MailProvider,

    /// Endpoint of the transactional email API
    pub api_url: String,

    /// API key sent in the `api-key` header
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Sender address
    pub sender_email: String,

    /// Sender display name
    #[serde(default)]
    pub sender_name: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            api_url: String::from("https://api.brevo.com/v3/smtp/email"),
            api_key: None,
            sender_email: String::from("no-reply@accessgate.local"),
            sender_name: Some(String::from("AccessGate")),
            timeout_seconds: 10,
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_opt("MAIL_PROVIDER")
                .and_then(|provider| provider.parse().ok())
                .unwrap_or(defaults.provider),
            api_url: env_opt("MAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: env_opt("MAIL_API_KEY"),
            sender_email: env_opt("MAIL_SENDER_EMAIL").unwrap_or(defaults.sender_email),
            sender_name: env_opt("MAIL_SENDER_NAME").or(defaults.sender_name),
            timeout_seconds: super::env_or("MAIL_TIMEOUT_SECONDS", defaults.timeout_seconds),
        }
    }
}
