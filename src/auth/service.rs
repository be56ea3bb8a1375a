//! Authentication service for slotbook.
//!
//! Credential verification with a per-account lockout state machine: failed
//! attempts are counted in the store, and five consecutive failures lock the
//! account for five minutes. Lockout expiry is lazy - no timer runs; the
//! next attempt after the expiry instant is admitted, and the counter is
//! only reset by a successful login or an administrative unlock.

use chrono::{Duration, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::account::{Account, AccountRow, NewAccount, Role};
use super::password::{hash_password, verify_password, PasswordError};
use super::repository::AccountRepository;
use crate::db::Database;
use crate::SlotbookError;

/// Failed attempts that trigger a lockout.
pub const MAX_FAILED_ATTEMPTS: i64 = 5;

/// Lockout duration in minutes.
pub const LOCKOUT_MINUTES: i64 = 5;

/// Minimum password length accepted by a password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong username or password.
    ///
    /// `attempts_remaining` is reported only when the account exists; an
    /// unknown username yields the same error with no counter, so usernames
    /// cannot be probed.
    #[error("invalid credentials")]
    InvalidCredentials {
        /// Attempts left before the account locks, when known.
        attempts_remaining: Option<i64>,
    },

    /// The account is locked out.
    #[error("account locked, try again in {minutes_remaining} minutes")]
    AccountLocked {
        /// Whole minutes until the lockout expires, rounded up.
        minutes_remaining: i64,
    },

    /// The new password does not meet the minimum length.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// The username is already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// The account does not exist.
    #[error("account not found")]
    NotFound,

    /// Password hashing failure.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Infrastructure failure.
    #[error(transparent)]
    Store(#[from] SlotbookError),
}

/// Authentication service over the account store.
pub struct AuthService<'a> {
    db: &'a Database,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Authenticate a username/password pair against the current clock.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        self.authenticate_at(username, password, Utc::now().naive_utc())
            .await
    }

    /// Authenticate against an explicit clock instant.
    ///
    /// The account row is read and its counters updated inside a single
    /// transaction, so concurrent attempts cannot lose failure counts.
    pub async fn authenticate_at(
        &self,
        username: &str,
        password: &str,
        now: NaiveDateTime,
    ) -> Result<Account, AuthError> {
        let mut tx = self.db.begin().await?;

        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT id, username, password_hash, role, staff_id, is_active,
                    failed_attempts, locked_until, must_change_password, created_at
             FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        // Unknown and inactive accounts get the same generic rejection
        let account = match row.map(AccountRow::into_account) {
            Some(account) if account.is_active => account,
            _ => {
                warn!(username = %username, "Login failed: unknown or inactive account");
                return Err(AuthError::InvalidCredentials {
                    attempts_remaining: None,
                });
            }
        };

        if let Some(locked_until) = account.locked_until {
            if locked_until > now {
                let seconds = (locked_until - now).num_seconds();
                let minutes_remaining = (seconds + 59) / 60;
                warn!(
                    username = %username,
                    minutes_remaining,
                    "Login attempt blocked: account locked"
                );
                return Err(AuthError::AccountLocked { minutes_remaining });
            }
            // Lockout expired: the attempt is admitted, but the counter
            // stays until a success clears it
        }

        match verify_password(password, &account.password_hash) {
            Ok(()) => {
                sqlx::query(
                    "UPDATE accounts SET failed_attempts = 0, locked_until = NULL WHERE id = ?",
                )
                .bind(account.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| SlotbookError::Database(e.to_string()))?;

                tx.commit()
                    .await
                    .map_err(|e| SlotbookError::Database(e.to_string()))?;

                info!(username = %username, account_id = account.id, "Login successful");

                Ok(Account {
                    failed_attempts: 0,
                    locked_until: None,
                    ..account
                })
            }
            Err(_) => {
                let failed_attempts = account.failed_attempts + 1;
                let locked_until = if failed_attempts >= MAX_FAILED_ATTEMPTS {
                    Some(now + Duration::minutes(LOCKOUT_MINUTES))
                } else {
                    None
                };

                sqlx::query(
                    "UPDATE accounts SET failed_attempts = ?, locked_until = ? WHERE id = ?",
                )
                .bind(failed_attempts)
                .bind(locked_until)
                .bind(account.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| SlotbookError::Database(e.to_string()))?;

                tx.commit()
                    .await
                    .map_err(|e| SlotbookError::Database(e.to_string()))?;

                let attempts_remaining = (MAX_FAILED_ATTEMPTS - failed_attempts).max(0);
                warn!(
                    username = %username,
                    failed_attempts,
                    locked = locked_until.is_some(),
                    "Login failed: wrong password"
                );

                Err(AuthError::InvalidCredentials {
                    attempts_remaining: Some(attempts_remaining),
                })
            }
        }
    }

    /// Administrative unlock: clear the failure counter and lockout.
    ///
    /// Idempotent; returns false (without error) when the account is absent.
    pub async fn unlock(&self, username: &str) -> Result<bool, AuthError> {
        let cleared = AccountRepository::new(self.db.pool())
            .clear_lockout(username)
            .await?;
        if cleared {
            info!(username = %username, "Account unlocked");
        }
        Ok(cleared)
    }

    /// Change an account's password and clear the forced-change flag.
    pub async fn change_password(
        &self,
        account_id: i64,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        let password_hash = hash_password(new_password)?;
        let updated = AccountRepository::new(self.db.pool())
            .set_password(account_id, &password_hash)
            .await?;
        if !updated {
            return Err(AuthError::NotFound);
        }

        info!(account_id, "Password changed");
        Ok(())
    }

    /// Create a new account with a hashed password.
    ///
    /// The account must change its password on first login.
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
        role: Role,
        staff_id: Option<i64>,
    ) -> Result<Account, AuthError> {
        let repo = AccountRepository::new(self.db.pool());

        if repo.username_exists(username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(password)?;
        let mut new_account = NewAccount::new(username, password_hash).with_role(role);
        if let Some(staff_id) = staff_id {
            new_account = new_account.with_staff_id(staff_id);
        }

        let account = repo.create(&new_account).await?;
        info!(username = %username, account_id = account.id, "Account created");
        Ok(account)
    }

    /// Get an account by username.
    pub async fn get_account(&self, username: &str) -> Result<Account, AuthError> {
        AccountRepository::new(self.db.pool())
            .get_by_username(username)
            .await?
            .ok_or(AuthError::NotFound)
    }
}
