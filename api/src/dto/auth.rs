use ag_core::domain::{AccountView, ApprovalStatus};
use ag_core::services::{RegistrationReceipt, RegistrationRequest, SignInResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub surname: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    /// `YYYY-MM-DD`
    #[validate(length(equal = 10))]
    pub birthdate: String,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            surname: request.surname,
            email: request.email,
            password: request.password,
            birthdate: request.birthdate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub account_id: Uuid,
    pub account_no: Option<i64>,
    pub email: String,
    pub approval_status: ApprovalStatus,
}

impl From<RegistrationReceipt> for RegisterResponse {
    fn from(receipt: RegistrationReceipt) -> Self {
        Self {
            message: "Registration received. Check your email for the verification code".to_string(),
            account_id: receipt.account_id,
            account_no: receipt.account_no,
            email: receipt.email,
            approval_status: receipt.approval_status,
        }
    }
}

/// Email plus one-time code, used by both registration and reset verification
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CodeRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 4, max = 10))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRegisterResponse {
    pub message: String,
    pub approval_status: ApprovalStatus,
}

impl VerifyRegisterResponse {
    pub fn for_status(approval_status: ApprovalStatus) -> Self {
        let message = match approval_status {
            ApprovalStatus::Pending => "Email verified. Your registration is waiting for approval",
            _ => "Email verified. You can now sign in",
        };
        Self {
            message: message.to_string(),
            approval_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AccountView,
}

impl From<SignInResult> for LoginResponse {
    fn from(result: SignInResult) -> Self {
        Self {
            token: result.token,
            token_type: "Bearer".to_string(),
            expires_in: result.expires_in,
            user: result.account,
        }
    }
}

/// Body carrying only an email address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 4, max = 10))]
    pub code: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckUserResponse {
    pub message: String,
    /// `approved` or `deleted`
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterRequest {
        RegisterRequest {
            name: "Alice".to_string(),
            surname: "Liddell".to_string(),
            email: "alice@example.com".to_string(),
            password: "wonderland".to_string(),
            birthdate: "1990-05-04".to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register().validate().is_ok());

        let missing_name = RegisterRequest {
            name: String::new(),
            ..register()
        };
        assert!(missing_name.validate().is_err());

        let bad_email = RegisterRequest {
            email: "alice".to_string(),
            ..register()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_code_length_bounds() {
        let request = CodeRequest {
            email: "alice@example.com".to_string(),
            code: "123".to_string(),
        };
        assert!(request.validate().is_err());

        let request = CodeRequest {
            code: "123456".to_string(),
            ..request
        };
        assert!(request.validate().is_ok());
    }
}
