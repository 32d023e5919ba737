use std::sync::OnceLock;

use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::error;

use super::{
    auth::{hash_password, verify_password},
    models::UserRow,
};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("a required field is empty")]
    MissingField,
    #[error("username already exists")]
    DuplicateUsername,
    #[error("email address already registered")]
    DuplicateEmail,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("failed to hash password: {0}")]
    HashFailure(String),
    #[error("database error: {0}")]
    PersistenceFailure(#[from] sqlx::Error),
}

impl AccountError {
    /// Query-string code understood by the flash message table.
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::MissingField => "missing_fields",
            AccountError::DuplicateUsername => "duplicate_username",
            AccountError::DuplicateEmail => "duplicate_email",
            AccountError::InvalidCredentials => "invalid_credentials",
            AccountError::HashFailure(_) | AccountError::PersistenceFailure(_) => "persistence",
        }
    }
}

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Creates a user and returns its id. Nothing is persisted unless every step succeeds.
pub async fn register_user(pool: &SqlitePool, new_user: NewUser<'_>) -> Result<i64, AccountError> {
    let username = new_user.username.trim();
    let email = new_user.email.trim();
    if username.is_empty() || email.is_empty() || new_user.password.is_empty() {
        return Err(AccountError::MissingField);
    }

    let password_hash =
        hash_password(new_user.password).map_err(|err| AccountError::HashFailure(err.to_string()))?;

    let mut tx = pool.begin().await?;
    match insert_user(&mut tx, username, email, &password_hash).await {
        Ok(id) => {
            tx.commit().await?;
            Ok(id)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!(?rollback_err, "failed to roll back registration");
            }
            Err(err)
        }
    }
}

async fn insert_user(
    tx: &mut Transaction<'_, Sqlite>,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, AccountError> {
    let username_taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(&mut **tx)
        .await?;
    if username_taken > 0 {
        return Err(AccountError::DuplicateUsername);
    }

    let email_taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(&mut **tx)
        .await?;
    if email_taken > 0 {
        return Err(AccountError::DuplicateEmail);
    }

    let result = sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(&mut **tx)
        .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        // A concurrent registration can still win the race between the checks and the insert.
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            if db_err.message().contains("users.email") {
                Err(AccountError::DuplicateEmail)
            } else {
                Err(AccountError::DuplicateUsername)
            }
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn fetch_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        "SELECT id, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Verifies a username/password pair. Unknown users and wrong passwords fail identically.
pub async fn authenticate_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<UserRow, AccountError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingField);
    }

    match fetch_user_by_username(pool, username).await? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        Some(_) => Err(AccountError::InvalidCredentials),
        None => {
            // Spend the same verification work as for a known user.
            if let Some(hash) = dummy_hash() {
                verify_password(password, hash);
            }
            Err(AccountError::InvalidCredentials)
        }
    }
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    DUMMY_HASH
        .get_or_init(|| hash_password("osint-dashboard-placeholder").ok())
        .as_deref()
}
