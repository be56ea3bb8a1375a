//! Client service for slotbook.
//!
//! High-level client operations with input validation and duplicate checks.

use tracing::info;

use super::repository::ClientRepository;
use super::types::{Client, ClientUpdate, NewClient};
use crate::db::Database;
use crate::validation::{validate_email, validate_name, validate_phone};
use crate::{Result, SlotbookError};

/// Maximum number of results returned by a client search.
pub const SEARCH_LIMIT: i64 = 10;

/// Service for client record keeping.
pub struct ClientService<'a> {
    db: &'a Database,
}

impl<'a> ClientService<'a> {
    /// Create a new ClientService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all clients ordered by name.
    pub async fn list(&self) -> Result<Vec<Client>> {
        ClientRepository::new(self.db.pool()).list_all().await
    }

    /// Get a client by ID.
    pub async fn get(&self, client_id: i64) -> Result<Client> {
        ClientRepository::new(self.db.pool())
            .get_by_id(client_id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("client".to_string()))
    }

    /// Search clients by name or phone.
    pub async fn search(&self, term: &str) -> Result<Vec<Client>> {
        ClientRepository::new(self.db.pool())
            .search(term, SEARCH_LIMIT)
            .await
    }

    /// Create a new client after validating name, email and phone.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Client> {
        validate_name(name)?;
        validate_email(email)?;
        if let Some(phone) = phone {
            validate_phone(phone)?;
        }

        let repo = ClientRepository::new(self.db.pool());

        let email = email.trim();
        if repo.email_exists(email, None).await? {
            return Err(SlotbookError::Validation(
                "a client with that email already exists".to_string(),
            ));
        }

        let mut new_client = NewClient::new(name.trim(), email);
        if let Some(phone) = phone {
            new_client = new_client.with_phone(phone.trim());
        }
        if let Some(notes) = notes {
            let notes = notes.trim();
            if !notes.is_empty() {
                new_client = new_client.with_notes(notes);
            }
        }

        let client = repo.create(&new_client).await?;
        info!(client_id = client.id, name = %client.name, "Client created");
        Ok(client)
    }

    /// Update an existing client.
    ///
    /// Validates any changed fields and rejects duplicate emails.
    pub async fn update(&self, client_id: i64, update: ClientUpdate) -> Result<Client> {
        let repo = ClientRepository::new(self.db.pool());

        if let Some(ref name) = update.name {
            validate_name(name)?;
        }
        if let Some(ref email) = update.email {
            validate_email(email)?;
            if repo.email_exists(email.trim(), Some(client_id)).await? {
                return Err(SlotbookError::Validation(
                    "another client already uses that email".to_string(),
                ));
            }
        }
        if let Some(Some(ref phone)) = update.phone {
            validate_phone(phone)?;
        }

        repo.update(client_id, &update)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("client".to_string()))
    }

    /// Delete a client.
    ///
    /// The client's appointments are removed by the foreign key cascade.
    pub async fn delete(&self, client_id: i64) -> Result<()> {
        let deleted = ClientRepository::new(self.db.pool())
            .delete(client_id)
            .await?;
        if !deleted {
            return Err(SlotbookError::NotFound("client".to_string()));
        }
        info!(client_id, "Client deleted");
        Ok(())
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
    async fn test_create_valid_client() {
        let db = setup_db().await;
        let service = ClientService::new(&db);

        let client = service
            .create("Ana García", "ana@example.com", Some("1143215678"), None)
            .await
            .unwrap();

        assert_eq!(client.name, "Ana García");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_email() {
        let db = setup_db().await;
        let service = ClientService::new(&db);

        let result = service.create("Ana", "not-an-email", None, None).await;
        assert!(matches!(result, Err(SlotbookError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let db = setup_db().await;
        let service = ClientService::new(&db);

        service
            .create("Ana", "ana@example.com", None, None)
            .await
            .unwrap();

        let result = service.create("Other", "ana@example.com", None, None).await;
        assert!(matches!(result, Err(SlotbookError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_trims_fields() {
        let db = setup_db().await;
        let service = ClientService::new(&db);

        let client = service
            .create("  Ana  ", " ana@example.com ", None, Some("   "))
            .await
            .unwrap();

        assert_eq!(client.name, "Ana");
        assert_eq!(client.email, "ana@example.com");
        assert!(client.notes.is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_email_taken_by_other() {
        let db = setup_db().await;
        let service = ClientService::new(&db);

        service
            .create("Ana", "ana@example.com", None, None)
            .await
            .unwrap();
        let carlos = service
            .create("Carlos", "carlos@example.com", None, None)
            .await
            .unwrap();

        let result = service
            .update(carlos.id, ClientUpdate::new().email("ana@example.com"))
            .await;
        assert!(matches!(result, Err(SlotbookError::Validation(_))));

        // Re-setting your own email is fine
        let ok = service
            .update(carlos.id, ClientUpdate::new().email("carlos@example.com"))
            .await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_client() {
        let db = setup_db().await;
        let service = ClientService::new(&db);

        let result = service.update(999, ClientUpdate::new().name("Ghost")).await;
        assert!(matches!(result, Err(SlotbookError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_client() {
        let db = setup_db().await;
        let service = ClientService::new(&db);

        let result = service.delete(999).await;
        assert!(matches!(result, Err(SlotbookError::NotFound(_))));
    }
}
