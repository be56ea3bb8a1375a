//! Service catalog repository for slotbook.
//!
//! This module provides CRUD operations for catalog services in the database.

use sqlx::QueryBuilder;

use super::types::{NewService, ServiceDefinition, ServiceUpdate};
use crate::db::DbPool;
use crate::{Result, SlotbookError};

/// Repository for service catalog CRUD operations.
pub struct ServiceRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ServiceRepository<'a> {
    /// Create a new ServiceRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new catalog service in the database.
    ///
    /// Returns the created service with the assigned ID.
    pub async fn create(&self, new_service: &NewService) -> Result<ServiceDefinition> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO services (name, duration, price, is_active)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_service.name)
        .bind(new_service.duration as i64)
        .bind(new_service.price)
        .bind(new_service.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("service".to_string()))
    }

    /// Get a catalog service by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ServiceDefinition>> {
        let result = sqlx::query_as::<_, ServiceDefinition>(
            "SELECT id, name, duration, price, is_active FROM services WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a catalog service by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated service, or None if not found.
    pub async fn update(&self, id: i64, update: &ServiceUpdate) -> Result<Option<ServiceDefinition>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE services SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(duration) = update.duration {
            separated.push("duration = ");
            separated.push_bind_unseparated(duration as i64);
        }
        if let Some(price) = update.price {
            separated.push("price = ");
            separated.push_bind_unseparated(price);
        }
        if let Some(is_active) = update.is_active {
            separated.push("is_active = ");
            separated.push_bind_unseparated(is_active);
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

    /// List active catalog services ordered by name.
    pub async fn list_active(&self) -> Result<Vec<ServiceDefinition>> {
        let services = sqlx::query_as::<_, ServiceDefinition>(
            "SELECT id, name, duration, price, is_active
             FROM services WHERE is_active = 1 ORDER BY name",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(services)
    }

    /// List all catalog services (including inactive) ordered by name.
    pub async fn list_all(&self) -> Result<Vec<ServiceDefinition>> {
        let services = sqlx::query_as::<_, ServiceDefinition>(
            "SELECT id, name, duration, price, is_active FROM services ORDER BY name",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(services)
    }

    /// Check if a service name is already taken.
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        let exists: (bool,) = match exclude_id {
            Some(id) => {
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM services WHERE name = ? AND id != ?)")
                    .bind(name)
                    .bind(id)
                    .fetch_one(self.pool)
                    .await
            }
            None => {
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM services WHERE name = ?)")
                    .bind(name)
                    .fetch_one(self.pool)
                    .await
            }
        }
        .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(exists.0)
    }

    /// Count all catalog services.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_service() {
        let db = setup_db().await;
        let repo = ServiceRepository::new(db.pool());

        let service = repo
            .create(&NewService::new("Haircut", 30).with_price(2500.0))
            .await
            .unwrap();

        assert_eq!(service.id, 1);
        assert_eq!(service.name, "Haircut");
        assert_eq!(service.duration, 30);
        assert_eq!(service.price, 2500.0);
        assert!(service.is_active);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let db = setup_db().await;
        let repo = ServiceRepository::new(db.pool());

        repo.create(&NewService::new("Haircut", 30)).await.unwrap();
        let result = repo.create(&NewService::new("Haircut", 45)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_service() {
        let db = setup_db().await;
        let repo = ServiceRepository::new(db.pool());

        let service = repo.create(&NewService::new("Haircut", 30)).await.unwrap();

        let update = ServiceUpdate::new().duration(45).price(3000.0);
        let updated = repo.update(service.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.duration, 45);
        assert_eq!(updated.price, 3000.0);
        assert_eq!(updated.name, "Haircut");
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let db = setup_db().await;
        let repo = ServiceRepository::new(db.pool());

        let update = ServiceUpdate::new().duration(45);
        assert!(repo.update(999, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_active_excludes_inactive() {
        let db = setup_db().await;
        let repo = ServiceRepository::new(db.pool());

        repo.create(&NewService::new("Haircut", 30)).await.unwrap();
        let beard = repo.create(&NewService::new("Beard Trim", 15)).await.unwrap();

        repo.update(beard.id, &ServiceUpdate::new().is_active(false))
            .await
            .unwrap();

        let active = repo.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Haircut");

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_name_exists() {
        let db = setup_db().await;
        let repo = ServiceRepository::new(db.pool());

        let service = repo.create(&NewService::new("Haircut", 30)).await.unwrap();

        assert!(repo.name_exists("Haircut", None).await.unwrap());
        assert!(!repo.name_exists("Shave", None).await.unwrap());
        assert!(!repo.name_exists("Haircut", Some(service.id)).await.unwrap());
    }
}
