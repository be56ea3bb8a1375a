//! Client repository for slotbook.
//!
//! This module provides CRUD operations for clients in the database.

use sqlx::QueryBuilder;

use super::types::{Client, ClientUpdate, NewClient};
use crate::db::DbPool;
use crate::{Result, SlotbookError};

/// Repository for client CRUD operations.
pub struct ClientRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new ClientRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new client in the database.
    ///
    /// Returns the created client with the assigned ID.
    pub async fn create(&self, new_client: &NewClient) -> Result<Client> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO clients (name, email, phone, notes)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_client.name)
        .bind(&new_client.email)
        .bind(&new_client.phone)
        .bind(&new_client.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("client".to_string()))
    }

    /// Get a client by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Client>> {
        let result = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, notes, created_at
             FROM clients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a client by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Client>> {
        let result = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, notes, created_at
             FROM clients WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a client by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated client, or None if not found.
    pub async fn update(&self, id: i64, update: &ClientUpdate) -> Result<Option<Client>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE clients SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email);
        }
        if let Some(ref phone) = update.phone {
            separated.push("phone = ");
            separated.push_bind_unseparated(phone.clone());
        }
        if let Some(ref notes) = update.notes {
            separated.push("notes = ");
            separated.push_bind_unseparated(notes.clone());
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a client by ID.
    ///
    /// The client's appointments are removed by the foreign key cascade.
    /// Returns true if a client was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// List all clients ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, notes, created_at
             FROM clients ORDER BY name",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(clients)
    }

    /// Search clients by name or phone (case-insensitive substring match).
    ///
    /// Returns at most `limit` matches ordered by name.
    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<Client>> {
        // Strip LIKE wildcards from the user-supplied term
        let cleaned: String = term
            .chars()
            .filter(|c| !matches!(c, '%' | '_' | '\\'))
            .collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{cleaned}%");
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, notes, created_at
             FROM clients
             WHERE name LIKE ? OR phone LIKE ?
             ORDER BY name LIMIT ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(clients)
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        let exists: (bool,) = match exclude_id {
            Some(id) => {
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM clients WHERE email = ? AND id != ?)")
                    .bind(email)
                    .bind(id)
                    .fetch_one(self.pool)
                    .await
            }
            None => {
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM clients WHERE email = ?)")
                    .bind(email)
                    .fetch_one(self.pool)
                    .await
            }
        }
        .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(exists.0)
    }

    /// Count all clients.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
