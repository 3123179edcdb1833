//! Email address helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Canonical form used as the account lookup key
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Loose syntactic check: one `@`, no whitespace, a dot in the domain
pub fn is_valid(email: &str) -> bool {
    match EMAIL_REGEX.as_ref() {
        Some(regex) => regex.is_match(email.trim()),
        None => false,
    }
}

/// Mask an address for log output, keeping the first character and the domain
pub fn mask(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
