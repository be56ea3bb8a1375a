//! Service catalog management for slotbook.
//!
//! High-level catalog operations with duration/price validation and name
//! uniqueness. Services referenced by bookings are deactivated, not deleted,
//! so historical bookings keep a valid reference.

use tracing::info;

use super::repository::ServiceRepository;
use super::types::{NewService, ServiceDefinition, ServiceUpdate};
use crate::db::Database;
use crate::validation::{validate_duration, validate_name, validate_price};
use crate::{Result, SlotbookError};

/// Service for catalog management.
pub struct CatalogService<'a> {
    db: &'a Database,
}

impl<'a> CatalogService<'a> {
    /// Create a new CatalogService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List catalog services, optionally including inactive ones.
    pub async fn list(&self, active_only: bool) -> Result<Vec<ServiceDefinition>> {
        let repo = ServiceRepository::new(self.db.pool());
        if active_only {
            repo.list_active().await
        } else {
            repo.list_all().await
        }
    }

    /// Get a catalog service by ID.
    pub async fn get(&self, service_id: i64) -> Result<ServiceDefinition> {
        ServiceRepository::new(self.db.pool())
            .get_by_id(service_id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("service".to_string()))
    }

    /// Create a new catalog service.
    pub async fn create(&self, name: &str, duration: u32, price: f64) -> Result<ServiceDefinition> {
        validate_name(name)?;
        validate_duration(duration)?;
        validate_price(price)?;

        let repo = ServiceRepository::new(self.db.pool());

        let name = name.trim();
        if repo.name_exists(name, None).await? {
            return Err(SlotbookError::Validation(
                "a service with that name already exists".to_string(),
            ));
        }

        let service = repo
            .create(&NewService::new(name, duration).with_price(price))
            .await?;
        info!(service_id = service.id, name = %service.name, "Catalog service created");
        Ok(service)
    }

    /// Update an existing catalog service.
    ///
    /// Duration changes apply to future bookings only; existing bookings keep
    /// their original interval.
    pub async fn update(&self, service_id: i64, update: ServiceUpdate) -> Result<ServiceDefinition> {
        let repo = ServiceRepository::new(self.db.pool());

        if let Some(ref name) = update.name {
            validate_name(name)?;
            if repo.name_exists(name.trim(), Some(service_id)).await? {
                return Err(SlotbookError::Validation(
                    "another service already uses that name".to_string(),
                ));
            }
        }
        if let Some(duration) = update.duration {
            validate_duration(duration)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        repo.update(service_id, &update)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("service".to_string()))
    }

    /// Deactivate a catalog service so it can no longer be booked.
    pub async fn deactivate(&self, service_id: i64) -> Result<ServiceDefinition> {
        self.update(service_id, ServiceUpdate::new().is_active(false))
            .await
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
    async fn test_create_valid_service() {
        let db = setup_db().await;
        let service = CatalogService::new(&db);

        let created = service.create("Haircut", 30, 2500.0).await.unwrap();
        assert_eq!(created.name, "Haircut");
        assert_eq!(created.duration, 30);
    }

    #[tokio::test]
    async fn test_create_rejects_zero_duration() {
        let db = setup_db().await;
        let service = CatalogService::new(&db);

        let result = service.create("Haircut", 0, 0.0).await;
        assert!(matches!(result, Err(SlotbookError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let db = setup_db().await;
        let service = CatalogService::new(&db);

        let result = service.create("Haircut", 30, -5.0).await;
        assert!(matches!(result, Err(SlotbookError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let db = setup_db().await;
        let service = CatalogService::new(&db);

        service.create("Haircut", 30, 0.0).await.unwrap();
        let result = service.create("Haircut", 45, 0.0).await;
        assert!(matches!(result, Err(SlotbookError::Validation(_))));
    }

    #[tokio::test]
    async fn test_deactivate() {
        let db = setup_db().await;
        let service = CatalogService::new(&db);

        let created = service.create("Haircut", 30, 0.0).await.unwrap();
        let deactivated = service.deactivate(created.id).await.unwrap();

        assert!(!deactivated.is_active);
        assert_eq!(service.list(true).await.unwrap().len(), 0);
        assert_eq!(service.list(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = setup_db().await;
        let service = CatalogService::new(&db);

        let result = service.get(999).await;
        assert!(matches!(result, Err(SlotbookError::NotFound(_))));
    }
}
