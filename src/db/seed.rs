//! First-run seed data for slotbook.
//!
//! Populates an empty database with a default service catalog, one staff
//! member and an administrator account.

use tracing::info;

use crate::auth::{hash_password, AccountRepository, NewAccount, Role};
use crate::catalog::{NewService, ServiceRepository};
use crate::staff::{NewStaffMember, StaffRepository};
use crate::{Database, Result, SlotbookError};

/// Username and initial password of the seeded administrator.
///
/// The account is created with a forced password change, so the default
/// credential only works once.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Seed default records into an empty database.
///
/// Idempotent: tables that already contain rows are left untouched.
pub async fn seed_defaults(db: &Database) -> Result<()> {
    seed_services(db).await?;
    seed_staff_and_admin(db).await?;
    Ok(())
}

/// Seed the default service catalog if the table is empty.
async fn seed_services(db: &Database) -> Result<()> {
    let repo = ServiceRepository::new(db.pool());
    if repo.count().await? > 0 {
        return Ok(());
    }

    let defaults = [
        NewService::new("Haircut", 30),
        NewService::new("Beard Trim", 15),
        NewService::new("Cut + Beard Combo", 40),
    ];
    for service in &defaults {
        repo.create(service).await?;
    }

    info!("Seeded default service catalog");
    Ok(())
}

/// Seed a default staff member and administrator account if missing.
async fn seed_staff_and_admin(db: &Database) -> Result<()> {
    let staff_repo = StaffRepository::new(db.pool());

    let staff = if staff_repo.count().await? == 0 {
        let staff = staff_repo
            .create(&NewStaffMember::new("Primary Staff").with_color("#7E57C2"))
            .await?;
        info!("Seeded default staff member");
        staff
    } else {
        staff_repo
            .list_all()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SlotbookError::NotFound("staff member".to_string()))?
    };

    let account_repo = AccountRepository::new(db.pool());
    if account_repo.count().await? == 0 {
        let password_hash =
            hash_password(DEFAULT_ADMIN_PASSWORD).map_err(|e| SlotbookError::Config(e.to_string()))?;
        account_repo
            .create(
                &NewAccount::new(DEFAULT_ADMIN_USERNAME, password_hash)
                    .with_role(Role::Admin)
                    .with_staff_id(staff.id),
            )
            .await?;
        info!("Seeded administrator account (password change required on first login)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthService;

    #[tokio::test]
    async fn test_seed_populates_empty_database() {
        let db = Database::open_in_memory().await.unwrap();
        seed_defaults(&db).await.unwrap();

        assert_eq!(ServiceRepository::new(db.pool()).count().await.unwrap(), 3);
        assert_eq!(StaffRepository::new(db.pool()).count().await.unwrap(), 1);
        assert_eq!(AccountRepository::new(db.pool()).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        seed_defaults(&db).await.unwrap();
        seed_defaults(&db).await.unwrap();

        assert_eq!(ServiceRepository::new(db.pool()).count().await.unwrap(), 3);
        assert_eq!(AccountRepository::new(db.pool()).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seeded_admin_can_log_in_and_must_change_password() {
        let db = Database::open_in_memory().await.unwrap();
        seed_defaults(&db).await.unwrap();

        let auth = AuthService::new(&db);
        let account = auth.authenticate("admin", "admin").await.unwrap();

        assert!(account.is_admin());
        assert!(account.must_change_password);
        assert!(account.staff_id.is_some());
    }
}
