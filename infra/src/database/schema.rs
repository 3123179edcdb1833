//! Table definitions created by [`DatabasePool::ensure_schema`](super::DatabasePool::ensure_schema).
//!
//! This is a bootstrap for empty databases, not a migration system.

pub const CREATE_ACCOUNTS: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id CHAR(36) NOT NULL PRIMARY KEY,
        account_no BIGINT NOT NULL,
        name VARCHAR(255) NOT NULL,
        surname VARCHAR(255) NOT NULL,
        email VARCHAR(320) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        birthdate DATE NULL,
        role VARCHAR(32) NOT NULL DEFAULT 'user',
        approval_status VARCHAR(16) NOT NULL,
        is_verified BOOLEAN NOT NULL DEFAULT FALSE,
        expired BOOLEAN NOT NULL DEFAULT FALSE,
        verification_code VARCHAR(32) NULL,
        verification_expires_at DATETIME(6) NULL,
        profile_picture_url VARCHAR(1024) NULL,
        profile_picture_ref VARCHAR(512) NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_accounts_email (email),
        UNIQUE KEY uq_accounts_account_no (account_no),
        KEY idx_accounts_status (approval_status),
        KEY idx_accounts_role (role)
    )
"#;

pub const CREATE_ROLES: &str = r#"
    CREATE TABLE IF NOT EXISTS roles (
        id CHAR(36) NOT NULL PRIMARY KEY,
        name VARCHAR(64) NOT NULL,
        privileges TEXT NOT NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        UNIQUE KEY uq_roles_name (name)
    )
"#;

pub const STATEMENTS: [&str; 2] = [CREATE_ACCOUNTS, CREATE_ROLES];
