//! Staff management for slotbook.
//!
//! High-level staff operations. Deactivation is guarded: the business must
//! keep at least one active staff member at all times.

use thiserror::Error;
use tracing::info;

use super::repository::StaffRepository;
use super::types::{NewStaffMember, StaffMember};
use crate::db::Database;
use crate::validation::validate_name;
use crate::SlotbookError;

/// Staff management errors.
#[derive(Error, Debug)]
pub enum StaffError {
    /// Staff member does not exist.
    #[error("staff member not found")]
    NotFound,

    /// Deactivation would leave the business without active staff.
    #[error("cannot deactivate the last active staff member")]
    LastActiveStaff,

    /// Infrastructure or validation failure.
    #[error(transparent)]
    Store(#[from] SlotbookError),
}

impl From<crate::validation::ValidationError> for StaffError {
    fn from(e: crate::validation::ValidationError) -> Self {
        StaffError::Store(e.into())
    }
}

/// Service for staff management.
pub struct StaffService<'a> {
    db: &'a Database,
}

impl<'a> StaffService<'a> {
    /// Create a new StaffService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List staff members, optionally including inactive ones.
    pub async fn list(&self, active_only: bool) -> Result<Vec<StaffMember>, StaffError> {
        let repo = StaffRepository::new(self.db.pool());
        let staff = if active_only {
            repo.list_active().await?
        } else {
            repo.list_all().await?
        };
        Ok(staff)
    }

    /// Get a staff member by ID.
    pub async fn get(&self, staff_id: i64) -> Result<StaffMember, StaffError> {
        StaffRepository::new(self.db.pool())
            .get_by_id(staff_id)
            .await?
            .ok_or(StaffError::NotFound)
    }

    /// Create a new staff member.
    pub async fn create(&self, name: &str, color: Option<&str>) -> Result<StaffMember, StaffError> {
        validate_name(name)?;

        let mut new_staff = NewStaffMember::new(name.trim());
        if let Some(color) = color {
            new_staff = new_staff.with_color(color);
        }

        let staff = StaffRepository::new(self.db.pool())
            .create(&new_staff)
            .await?;
        info!(staff_id = staff.id, name = %staff.name, "Staff member created");
        Ok(staff)
    }

    /// Update a staff member's name and color.
    pub async fn update(
        &self,
        staff_id: i64,
        name: &str,
        color: &str,
    ) -> Result<StaffMember, StaffError> {
        validate_name(name)?;

        StaffRepository::new(self.db.pool())
            .update(staff_id, name.trim(), color)
            .await?
            .ok_or(StaffError::NotFound)
    }

    /// Reactivate a staff member.
    pub async fn activate(&self, staff_id: i64) -> Result<(), StaffError> {
        let updated = StaffRepository::new(self.db.pool())
            .set_active(staff_id, true)
            .await?;
        if !updated {
            return Err(StaffError::NotFound);
        }
        Ok(())
    }

    /// Deactivate a staff member.
    ///
    /// Fails with [`StaffError::LastActiveStaff`] when this would leave the
    /// business without any active staff member.
    pub async fn deactivate(&self, staff_id: i64) -> Result<(), StaffError> {
        let repo = StaffRepository::new(self.db.pool());

        let staff = repo.get_by_id(staff_id).await?.ok_or(StaffError::NotFound)?;

        if staff.is_active && repo.count_active().await? <= 1 {
            return Err(StaffError::LastActiveStaff);
        }

        repo.set_active(staff_id, false).await?;
        info!(staff_id, "Staff member deactivated");
        Ok(())
    }
}
