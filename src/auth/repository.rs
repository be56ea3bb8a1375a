//! Account repository for slotbook.
//!
//! This module provides CRUD operations for login accounts. The failure
//! counter updates that drive the lockout state machine live in the auth
//! service, inside its transaction.

use super::account::{Account, AccountRow, NewAccount};
use crate::db::DbPool;
use crate::{Result, SlotbookError};

/// Columns fetched for every account query.
const ACCOUNT_COLUMNS: &str = "id, username, password_hash, role, staff_id, is_active, \
     failed_attempts, locked_until, must_change_password, created_at";

/// Repository for account CRUD operations.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new account in the database.
    ///
    /// New accounts start with a clean failure counter and must change their
    /// password on first login.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO accounts (username, password_hash, role, staff_id)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_account.username)
        .bind(&new_account.password_hash)
        .bind(new_account.role.as_str())
        .bind(new_account.staff_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("account".to_string()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(row.map(AccountRow::into_account))
    }

    /// Get an account by username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(row.map(AccountRow::into_account))
    }

    /// Check if a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = ?)")
                .bind(username)
                .fetch_one(self.pool)
                .await
                .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(exists.0)
    }

    /// Store a new password hash and clear the forced-change flag.
    ///
    /// Returns true if the account exists.
    pub async fn set_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = ?, must_change_password = 0 WHERE id = ?",
        )
        .bind(password_hash)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear the failure counter and lockout for a username.
    ///
    /// Returns true if the account exists. Idempotent.
    pub async fn clear_lockout(&self, username: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET failed_attempts = 0, locked_until = NULL WHERE username = ?",
        )
        .bind(username)
        .execute(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all accounts.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_account() {
        let db = setup_db().await;
        let repo = AccountRepository::new(db.pool());

        let account = repo
            .create(&NewAccount::new("admin", "hash").with_role(Role::Admin))
            .await
            .unwrap();

        assert_eq!(account.username, "admin");
        assert_eq!(account.role, Role::Admin);
        assert_eq!(account.failed_attempts, 0);
        assert!(account.locked_until.is_none());
        assert!(account.must_change_password);
        assert!(account.is_active);
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let db = setup_db().await;
        let repo = AccountRepository::new(db.pool());

        repo.create(&NewAccount::new("admin", "hash")).await.unwrap();
        let result = repo.create(&NewAccount::new("admin", "other")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let db = setup_db().await;
        let repo = AccountRepository::new(db.pool());

        repo.create(&NewAccount::new("admin", "hash")).await.unwrap();

        assert!(repo.get_by_username("admin").await.unwrap().is_some());
        assert!(repo.get_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_exists() {
        let db = setup_db().await;
        let repo = AccountRepository::new(db.pool());

        assert!(!repo.username_exists("admin").await.unwrap());
        repo.create(&NewAccount::new("admin", "hash")).await.unwrap();
        assert!(repo.username_exists("admin").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_password_clears_forced_change() {
        let db = setup_db().await;
        let repo = AccountRepository::new(db.pool());

        let account = repo.create(&NewAccount::new("admin", "hash")).await.unwrap();
        assert!(account.must_change_password);

        assert!(repo.set_password(account.id, "newhash").await.unwrap());

        let reloaded = repo.get_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "newhash");
        assert!(!reloaded.must_change_password);

        assert!(!repo.set_password(999, "hash").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_lockout() {
        let db = setup_db().await;
        let repo = AccountRepository::new(db.pool());

        let account = repo.create(&NewAccount::new("admin", "hash")).await.unwrap();

        sqlx::query(
            "UPDATE accounts SET failed_attempts = 5, locked_until = '2026-01-25 14:00:00'
             WHERE id = ?",
        )
        .bind(account.id)
        .execute(db.pool())
        .await
        .unwrap();

        assert!(repo.clear_lockout("admin").await.unwrap());

        let reloaded = repo.get_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(reloaded.failed_attempts, 0);
        assert!(reloaded.locked_until.is_none());

        // Absent account: no error, just false
        assert!(!repo.clear_lockout("ghost").await.unwrap());
        // Idempotent on an already-clean account
        assert!(repo.clear_lockout("admin").await.unwrap());
    }
}
