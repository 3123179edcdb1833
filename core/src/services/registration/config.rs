//! Configuration for the registration service

use ag_shared::config::{OtpConfig, PasswordConfig};

#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// Confirmed accounts wait in `pending` for an administrator instead of
    /// becoming `approved` immediately
    pub require_admin_approval: bool,
    pub password_min_length: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            require_admin_approval: true,
            password_min_length: 6,
        }
    }
}

impl RegistrationConfig {
    pub fn from_configs(otp: &OtpConfig, password: &PasswordConfig) -> Self {
        Self {
            require_admin_approval: otp.require_admin_approval,
            password_min_length: password.min_length,
        }
    }
}
