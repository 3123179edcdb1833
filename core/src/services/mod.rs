//! Business services: the registration state machine, sign-in, the
//! authorization gate and the administrative operations built on them.

pub mod admin;
pub mod auth;
pub mod authorization;
pub mod notification;
pub mod otp;
pub mod password;
pub mod profile;
pub mod registration;
pub mod roles;
pub mod storage;
pub mod token;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::{AdminService, CreateUserRequest, UpdateUserRequest};
pub use auth::{AuthService, SignInResult};
pub use authorization::{AuthorizationGate, Principal};
pub use notification::{EmailMessage, NotificationSink, Notifier, RecordingNotificationSink};
pub use otp::OtpGenerator;
pub use password::PasswordHasher;
pub use profile::ProfileService;
pub use registration::{
    AccountCheck, RegistrationConfig, RegistrationReceipt, RegistrationRequest, RegistrationService,
};
pub use roles::{RoleInput, RoleService, RoleUpdate};
pub use storage::{InMemoryObjectStorage, ObjectStorage};
pub use token::{IssuedToken, TokenService, TokenServiceConfig};
