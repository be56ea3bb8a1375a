//! Booking repository for slotbook.
//!
//! Date and overlap queries over the appointments table. Cancelled bookings
//! never block a staff member's timeline, so overlap and date queries exclude
//! them.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::booking::{Booking, BookingRow, BookingStatus, NewBooking};
use crate::db::DbPool;
use crate::{Result, SlotbookError};

/// Columns fetched for every booking query.
const BOOKING_COLUMNS: &str =
    "id, client_id, service_id, staff_id, start_time, end_time, status, created_at";

/// Repository for booking persistence and range queries.
pub struct BookingRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BookingRepository<'a> {
    /// Create a new BookingRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new booking with status `pending`.
    ///
    /// This performs no conflict checking; use the scheduling service for
    /// validated, transactional creation.
    pub async fn create(&self, new_booking: &NewBooking) -> Result<Booking> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO appointments (client_id, service_id, staff_id, start_time, end_time, status)
             VALUES (?, ?, ?, ?, ?, 'pending') RETURNING id",
        )
        .bind(new_booking.client_id)
        .bind(new_booking.service_id)
        .bind(new_booking.staff_id)
        .bind(new_booking.start_time)
        .bind(new_booking.end_time)
        .fetch_one(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SlotbookError::NotFound("booking".to_string()))
    }

    /// Get a booking by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM appointments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(row.map(BookingRow::into_booking))
    }

    /// Find non-cancelled bookings for a staff member overlapping the
    /// half-open interval `[start, end)`.
    ///
    /// `exclude_id` ignores one booking, so a reschedule doesn't conflict
    /// with itself.
    pub async fn find_overlapping(
        &self,
        staff_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Booking>> {
        let rows: Vec<BookingRow> = match exclude_id {
            Some(excluded) => {
                sqlx::query_as(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM appointments
                     WHERE staff_id = ? AND status != 'cancelled'
                       AND start_time < ? AND end_time > ?
                       AND id != ?"
                ))
                .bind(staff_id)
                .bind(end)
                .bind(start)
                .bind(excluded)
                .fetch_all(self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM appointments
                     WHERE staff_id = ? AND status != 'cancelled'
                       AND start_time < ? AND end_time > ?"
                ))
                .bind(staff_id)
                .bind(end)
                .bind(start)
                .fetch_all(self.pool)
                .await
            }
        }
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(BookingRow::into_booking).collect())
    }

    /// List non-cancelled bookings starting on the given date, ordered by
    /// start time. Optionally restricted to one staff member.
    pub async fn list_by_date(
        &self,
        date: NaiveDate,
        staff_id: Option<i64>,
    ) -> Result<Vec<Booking>> {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        self.list_by_range(staff_id, day_start, day_end).await
    }

    /// List non-cancelled bookings starting within `[start, end)`, ordered by
    /// start time. Optionally restricted to one staff member.
    pub async fn list_by_range(
        &self,
        staff_id: Option<i64>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Booking>> {
        let rows: Vec<BookingRow> = match staff_id {
            Some(staff) => {
                sqlx::query_as(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM appointments
                     WHERE status != 'cancelled'
                       AND start_time >= ? AND start_time < ?
                       AND staff_id = ?
                     ORDER BY start_time"
                ))
                .bind(start)
                .bind(end)
                .bind(staff)
                .fetch_all(self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM appointments
                     WHERE status != 'cancelled'
                       AND start_time >= ? AND start_time < ?
                     ORDER BY start_time"
                ))
                .bind(start)
                .bind(end)
                .fetch_all(self.pool)
                .await
            }
        }
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(BookingRow::into_booking).collect())
    }

    /// Update a booking's status.
    ///
    /// Returns the updated booking, or None if not found.
    pub async fn update_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a booking by ID.
    ///
    /// Returns true if a booking was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}
