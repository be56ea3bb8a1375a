//! Staff repository for slotbook.
//!
//! This module provides CRUD operations for staff members in the database.

use super::types::{NewStaffMember, StaffMember};
use crate::db::DbPool;
use crate::{Result, SlotbookError};

/// Repository for staff CRUD operations.
pub struct StaffRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> StaffRepository<'a> {
    /// Create a new StaffRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new staff member in the database.
    ///
    /// Returns the created staff member with the assigned ID.
    pub async fn create(&self, new_staff: &NewStaffMember) -> Result<StaffMember> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO staff (name, color) VALUES (?, ?) RETURNING id",
        )
        .bind(&new_staff.name)
        .bind(&new_staff.color)
        .fetch_one(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("staff member".to_string()))
    }

    /// Get a staff member by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<StaffMember>> {
        let result = sqlx::query_as::<_, StaffMember>(
            "SELECT id, name, color, is_active, created_at FROM staff WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List active staff members ordered by name.
    pub async fn list_active(&self) -> Result<Vec<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT id, name, color, is_active, created_at
             FROM staff WHERE is_active = 1 ORDER BY name",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(staff)
    }

    /// List all staff members (including inactive) ordered by name.
    pub async fn list_all(&self) -> Result<Vec<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            "SELECT id, name, color, is_active, created_at FROM staff ORDER BY name",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(staff)
    }

    /// Update a staff member's name and color.
    ///
    /// Returns the updated staff member, or None if not found.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        color: &str,
    ) -> Result<Option<StaffMember>> {
        let result = sqlx::query("UPDATE staff SET name = ?, color = ? WHERE id = ?")
            .bind(name)
            .bind(color)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Set a staff member's active flag.
    ///
    /// Returns true if the staff member exists.
    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE staff SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count active staff members.
    pub async fn count_active(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM staff WHERE is_active = 1")
            .fetch_one(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(count.0)
    }

    /// Count all staff members.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM staff")
            .fetch_one(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
