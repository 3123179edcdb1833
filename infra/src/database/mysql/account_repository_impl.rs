//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ag_core::domain::entities::account::{Account, ApprovalStatus, Role, ACCOUNT_NO_BASE};
use ag_core::domain::entities::one_time_code::OneTimeCode;
use ag_core::domain::value_objects::StoredObject;
use ag_core::errors::DomainError;
use ag_core::repositories::AccountRepository;

use super::{column_error, is_unique_violation, query_failed};

const COLUMNS: &str = "id, account_no, name, surname, email, password_hash, birthdate, role, \
     approval_status, is_verified, expired, verification_code, verification_expires_at, \
     profile_picture_url, profile_picture_ref, created_at, updated_at";

/// Attempts at claiming the next account number before giving up
const ACCOUNT_NO_ATTEMPTS: usize = 3;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let role: String = row.try_get("role").map_err(|e| column_error("role", e))?;
        let status: String = row
            .try_get("approval_status")
            .map_err(|e| column_error("approval_status", e))?;

        let code: Option<String> = row
            .try_get("verification_code")
            .map_err(|e| column_error("verification_code", e))?;
        let code_expiry: Option<DateTime<Utc>> = row
            .try_get("verification_expires_at")
            .map_err(|e| column_error("verification_expires_at", e))?;
        let verification = match (code, code_expiry) {
            (Some(code), Some(expires_at)) => Some(OneTimeCode { code, expires_at }),
            _ => None,
        };

        let picture_url: Option<String> = row
            .try_get("profile_picture_url")
            .map_err(|e| column_error("profile_picture_url", e))?;
        let picture_ref: Option<String> = row
            .try_get("profile_picture_ref")
            .map_err(|e| column_error("profile_picture_ref", e))?;
        let profile_picture = match (picture_url, picture_ref) {
            (Some(url), Some(reference)) => Some(StoredObject::new(url, reference)),
            _ => None,
        };

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            account_no: row.try_get("account_no").map_err(|e| column_error("account_no", e))?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            surname: row.try_get("surname").map_err(|e| column_error("surname", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            birthdate: row
                .try_get::<Option<NaiveDate>, _>("birthdate")
                .map_err(|e| column_error("birthdate", e))?,
            role: role.parse::<Role>().map_err(|e| column_error("role", e))?,
            approval_status: status
                .parse::<ApprovalStatus>()
                .map_err(|e| column_error("approval_status", e))?,
            is_verified: row.try_get("is_verified").map_err(|e| column_error("is_verified", e))?,
            expired: row.try_get("expired").map_err(|e| column_error("expired", e))?,
            verification,
            profile_picture,
            created_at: row.try_get("created_at").map_err(|e| column_error("created_at", e))?,
            updated_at: row.try_get("updated_at").map_err(|e| column_error("updated_at", e))?,
        })
    }

    fn rows_to_accounts(rows: Vec<MySqlRow>) -> Result<Vec<Account>, DomainError> {
        rows.iter().map(Self::row_to_account).collect()
    }

    async fn fetch_one_by(&self, column: &str, value: String) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE {column} = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to load account", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 FROM accounts WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to check email", e))?;
        Ok(row.is_some())
    }

    async fn insert(&self, account: &Account) -> Result<(), sqlx::Error> {
        let (code, code_expiry) = verification_columns(account);
        let (picture_url, picture_ref) = picture_columns(account);

        // A missing number is claimed inside the insert itself
        let query = format!(
            "INSERT INTO accounts ({COLUMNS}) \
             SELECT ?, COALESCE(?, COALESCE(MAX(account_no), ?) + 1), \
                    ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ? \
             FROM accounts"
        );

        sqlx::query(&query)
            .bind(account.id.to_string())
            .bind(account.account_no)
            .bind(ACCOUNT_NO_BASE - 1)
            .bind(&account.name)
        .bind(&account.surname)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.birthdate)
        .bind(account.role.as_str())
        .bind(account.approval_status.as_str())
        .bind(account.is_verified)
        .bind(account.expired)
        .bind(code)
        .bind(code_expiry)
        .bind(picture_url)
        .bind(picture_ref)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map(|_| ())
    }

    /// `UPDATE` every mutable column while the stored status is still `expected_status`
    async fn write(
        &self,
        account: &Account,
        expected_status: ApprovalStatus,
    ) -> Result<u64, sqlx::Error> {
        let (code, code_expiry) = verification_columns(account);
        let (picture_url, picture_ref) = picture_columns(account);

        let statement = sqlx::query(
            "UPDATE accounts SET name = ?, surname = ?, email = ?, password_hash = ?, \
             birthdate = ?, role = ?, approval_status = ?, is_verified = ?, expired = ?, \
             verification_code = ?, verification_expires_at = ?, \
             profile_picture_url = ?, profile_picture_ref = ?, updated_at = ? \
             WHERE id = ? AND approval_status = ?",
        )
        .bind(&account.name)
        .bind(&account.surname)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.birthdate)
        .bind(account.role.as_str())
        .bind(account.approval_status.as_str())
        .bind(account.is_verified)
        .bind(account.expired)
        .bind(code)
        .bind(code_expiry)
        .bind(picture_url)
        .bind(picture_ref)
        .bind(account.updated_at)
        .bind(account.id.to_string())
        .bind(expected_status.as_str());

        Ok(statement.execute(&self.pool).await?.rows_affected())
    }
}

fn verification_columns(account: &Account) -> (Option<String>, Option<DateTime<Utc>>) {
    match &account.verification {
        Some(code) => (Some(code.code.clone()), Some(code.expires_at)),
        None => (None, None),
    }
}

fn picture_columns(account: &Account) -> (Option<String>, Option<String>) {
    match &account.profile_picture {
        Some(picture) => (Some(picture.url.clone()), Some(picture.reference.clone())),
        None => (None, None),
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.fetch_one_by("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_one_by("email", email.to_string()).await
    }

    async fn find_by_status(&self, status: ApprovalStatus) -> Result<Vec<Account>, DomainError> {
        let query = format!(
            "SELECT {COLUMNS} FROM accounts WHERE approval_status = ? ORDER BY account_no, created_at"
        );
        let rows = sqlx::query(&query)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list accounts by status", e))?;
        Self::rows_to_accounts(rows)
    }

    async fn find_by_roles(&self, roles: &[Role]) -> Result<Vec<Account>, DomainError> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; roles.len()].join(", ");
        let query = format!(
            "SELECT {COLUMNS} FROM accounts WHERE role IN ({placeholders}) ORDER BY account_no, created_at"
        );
        let mut statement = sqlx::query(&query);
        for role in roles {
            statement = statement.bind(role.as_str());
        }
        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list accounts by role", e))?;
        Self::rows_to_accounts(rows)
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let query = format!("SELECT {COLUMNS} FROM accounts ORDER BY account_no, created_at");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list accounts", e))?;
        Self::rows_to_accounts(rows)
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.insert(&account).await {
                Ok(()) => break,
                Err(e) if is_unique_violation(&e) => {
                    if self.email_taken(&account.email).await? {
                        return Err(DomainError::conflict("Email already registered"));
                    }
                    // Another insert claimed the same number
                    if account.account_no.is_some() || attempt >= ACCOUNT_NO_ATTEMPTS {
                        return Err(DomainError::conflict("Account number already assigned"));
                    }
                }
                Err(e) => return Err(query_failed("Failed to create account", e)),
            }
        }

        self.find_by_id(account.id)
            .await?
            .ok_or_else(|| DomainError::internal("Account missing after insert"))
    }

    async fn update_if_status(
        &self,
        account: &Account,
        expected: ApprovalStatus,
    ) -> Result<bool, DomainError> {
        match self.write(account, expected).await {
            Ok(affected) => Ok(affected > 0),
            Err(e) if is_unique_violation(&e) => Err(DomainError::conflict("Email already registered")),
            Err(e) => Err(query_failed("Failed to update account", e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete account", e))?;
        Ok(result.rows_affected() > 0)
    }
}
