//! Message bodies for account lifecycle emails.

use serde::Serialize;

use crate::domain::entities::account::Account;

/// A single outbound email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let html = format!("<p>{}</p>", text.replace('\n', "<br/>"));
        Self {
            to: to.into(),
            subject: subject.into(),
            text,
            html,
        }
    }

    pub fn registration_code(to: &str, name: &str, code: &str, valid_minutes: i64) -> Self {
        Self::new(
            to,
            "Verify your email",
            format!(
                "Hello {name},\nYour verification code is {code}.\nIt expires in {valid_minutes} minutes."
            ),
        )
    }

    pub fn registration_request(to: &str, applicant: &Account) -> Self {
        Self::new(
            to,
            "New registration request",
            format!(
                "{} {} ({}) verified their email and is waiting for approval.",
                applicant.name, applicant.surname, applicant.email
            ),
        )
    }

    pub fn password_reset_code(to: &str, name: &str, code: &str, valid_minutes: i64) -> Self {
        Self::new(
            to,
            "Password reset code",
            format!(
                "Hello {name},\nYour password reset code is {code}.\nIt expires in {valid_minutes} minutes."
            ),
        )
    }

    pub fn registration_approved(to: &str, name: &str) -> Self {
        Self::new(
            to,
            "Registration approved",
            format!("Hello {name},\nYour registration has been approved. You can now sign in."),
        )
    }

    pub fn registration_rejected(to: &str, name: &str) -> Self {
        Self::new(
            to,
            "Registration rejected",
            format!("Hello {name},\nYour registration request has been rejected."),
        )
    }
}
