//! Scheduling engine for slotbook.
//!
//! Resolves business hours, enumerates candidate slots, computes per-slot
//! availability and runs the booking lifecycle. The no-double-booking
//! invariant is enforced by re-checking the overlap predicate inside the
//! same transaction that inserts or moves a booking.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;
use tracing::{info, warn};

use super::booking::{Booking, BookingStatus};
use super::repository::BookingRepository;
use crate::catalog::ServiceRepository;
use crate::client::ClientRepository;
use crate::db::Database;
use crate::settings::SettingsRepository;
use crate::staff::StaffRepository;
use crate::{Result, SlotbookError};

/// Booking lifecycle errors.
#[derive(Error, Debug)]
pub enum BookingError {
    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A referenced record exists but is not active.
    #[error("{0} is not active")]
    Inactive(&'static str),

    /// The requested interval falls outside business hours.
    #[error("requested time falls outside business hours")]
    OutsideBusinessHours,

    /// The requested interval overlaps an existing booking.
    #[error("the requested slot is not available")]
    SlotConflict,

    /// Infrastructure failure.
    #[error(transparent)]
    Store(#[from] SlotbookError),
}

/// A candidate start time on the slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Hour of day.
    pub hour: u32,
    /// Minute within the hour.
    pub minute: u32,
}

/// A slot with its availability for a given staff member and duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAvailability {
    /// Hour of day.
    pub hour: u32,
    /// Minute within the hour.
    pub minute: u32,
    /// Whether a booking of the requested duration can start here.
    pub available: bool,
}

/// One entry in a merged daily schedule.
#[derive(Debug, Clone)]
pub enum ScheduleItem {
    /// A booking starting at this slot.
    Booked {
        /// Slot start time.
        time: NaiveDateTime,
        /// The booking occupying the slot.
        booking: Booking,
    },
    /// An unoccupied slot.
    Free {
        /// Slot start time.
        time: NaiveDateTime,
    },
}

/// Enumerate the slot grid for `[start_hour, end_hour)` stepped by
/// `granularity_minutes` within each hour.
///
/// Pure function of its inputs; a zero granularity yields no slots.
pub fn enumerate_slots(start_hour: u32, end_hour: u32, granularity_minutes: u32) -> Vec<Slot> {
    let mut slots = Vec::new();
    if granularity_minutes == 0 {
        return slots;
    }
    for hour in start_hour..end_hour {
        let mut minute = 0;
        while minute < 60 {
            slots.push(Slot { hour, minute });
            minute += granularity_minutes;
        }
    }
    slots
}

/// The closing instant of the business day on `date`.
fn business_end_on(date: NaiveDate, end_hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(end_hour as i64)
}

/// Scheduling engine over the persistence and settings stores.
pub struct ScheduleService<'a> {
    db: &'a Database,
}

impl<'a> ScheduleService<'a> {
    /// Create a new ScheduleService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the business hours as `(start_hour, end_hour)`.
    ///
    /// Falls back to the compiled-in defaults when unset.
    pub async fn business_hours(&self) -> Result<(u32, u32)> {
        SettingsRepository::new(self.db.pool()).business_hours().await
    }

    /// Set the business hours.
    ///
    /// Both hours must lie in `[0, 24)` with `start < end`.
    pub async fn set_business_hours(&self, start_hour: u32, end_hour: u32) -> Result<()> {
        if end_hour >= 24 || start_hour >= end_hour {
            return Err(SlotbookError::Validation(format!(
                "invalid business hours {start_hour}-{end_hour}"
            )));
        }

        let settings = SettingsRepository::new(self.db.pool());
        settings
            .set(
                crate::settings::KEY_BUSINESS_HOURS_START,
                &start_hour.to_string(),
            )
            .await?;
        settings
            .set(
                crate::settings::KEY_BUSINESS_HOURS_END,
                &end_hour.to_string(),
            )
            .await?;
        info!(start_hour, end_hour, "Business hours updated");
        Ok(())
    }

    /// Enumerate the slot grid for the configured business hours and
    /// granularity.
    pub async fn slots(&self) -> Result<Vec<Slot>> {
        let settings = SettingsRepository::new(self.db.pool());
        let (start_hour, end_hour) = settings.business_hours().await?;
        let granularity = settings.slot_minutes().await?;
        Ok(enumerate_slots(start_hour, end_hour, granularity))
    }

    /// Compute per-slot availability for one staff member and service
    /// duration on a date.
    ///
    /// A slot is available iff the candidate interval stays within business
    /// hours and overlaps no existing non-cancelled booking for the staff
    /// member. Deterministic for a fixed database snapshot.
    pub async fn compute_availability(
        &self,
        date: NaiveDate,
        service_duration_minutes: u32,
        staff_id: i64,
    ) -> Result<Vec<SlotAvailability>> {
        let settings = SettingsRepository::new(self.db.pool());
        let (start_hour, end_hour) = settings.business_hours().await?;
        let granularity = settings.slot_minutes().await?;

        let existing = BookingRepository::new(self.db.pool())
            .list_by_date(date, Some(staff_id))
            .await?;

        let day_start = date.and_time(NaiveTime::MIN);
        let business_end = business_end_on(date, end_hour);
        let duration = Duration::minutes(service_duration_minutes as i64);

        let mut result = Vec::new();
        for slot in enumerate_slots(start_hour, end_hour, granularity) {
            let slot_start =
                day_start + Duration::hours(slot.hour as i64) + Duration::minutes(slot.minute as i64);
            let slot_end = slot_start + duration;

            let available = slot_end <= business_end
                && !existing.iter().any(|b| b.overlaps(slot_start, slot_end));

            result.push(SlotAvailability {
                hour: slot.hour,
                minute: slot.minute,
                available,
            });
        }

        Ok(result)
    }

    /// Check whether the half-open interval `[start, end)` is free on a
    /// staff member's timeline.
    ///
    /// `exclude_booking_id` lets a reschedule ignore its own prior booking.
    pub async fn is_slot_free(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        staff_id: i64,
        exclude_booking_id: Option<i64>,
    ) -> Result<bool> {
        let overlapping = BookingRepository::new(self.db.pool())
            .find_overlapping(staff_id, start, end, exclude_booking_id)
            .await?;
        Ok(overlapping.is_empty())
    }

    /// Create a booking for a client, service and staff member starting at
    /// `start`.
    ///
    /// The service must be active, the staff member active and the client
    /// known; the interval must fit within business hours on the start date
    /// (no cross-midnight bookings). The overlap check and the insert run in
    /// one transaction so concurrent calls cannot double-book a staff
    /// member.
    pub async fn create_booking(
        &self,
        client_id: i64,
        service_id: i64,
        staff_id: i64,
        start: NaiveDateTime,
    ) -> std::result::Result<Booking, BookingError> {
        let service = ServiceRepository::new(self.db.pool())
            .get_by_id(service_id)
            .await?
            .ok_or(BookingError::NotFound("service"))?;
        if !service.is_active {
            return Err(BookingError::Inactive("service"));
        }

        let staff = StaffRepository::new(self.db.pool())
            .get_by_id(staff_id)
            .await?
            .ok_or(BookingError::NotFound("staff member"))?;
        if !staff.is_active {
            return Err(BookingError::Inactive("staff member"));
        }

        ClientRepository::new(self.db.pool())
            .get_by_id(client_id)
            .await?
            .ok_or(BookingError::NotFound("client"))?;

        let end = start + Duration::minutes(service.duration);
        self.check_business_hours(start, end).await?;

        // Conflict check and insert must be one atomic unit: two concurrent
        // requests for the same interval would otherwise both see it free.
        let mut tx = self.db.begin().await?;

        let conflicts: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM appointments
             WHERE staff_id = ? AND status != 'cancelled'
               AND start_time < ? AND end_time > ?",
        )
        .bind(staff_id)
        .bind(end)
        .bind(start)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        if conflicts.0 > 0 {
            warn!(staff_id, %start, "Booking rejected: slot conflict");
            return Err(BookingError::SlotConflict);
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO appointments (client_id, service_id, staff_id, start_time, end_time, status)
             VALUES (?, ?, ?, ?, ?, 'pending') RETURNING id",
        )
        .bind(client_id)
        .bind(service_id)
        .bind(staff_id)
        .bind(start)
        .bind(end)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;

        info!(booking_id = id, client_id, staff_id, %start, "Booking created");

        let booking = BookingRepository::new(self.db.pool())
            .get_by_id(id)
            .await?
            .ok_or(BookingError::NotFound("booking"))?;
        Ok(booking)
    }

    /// Move a booking to a new start time, keeping its original duration.
    ///
    /// The booking's own interval is ignored by the conflict check, so a
    /// booking can be shifted within or next to its current slot.
    pub async fn reschedule(
        &self,
        booking_id: i64,
        new_start: NaiveDateTime,
    ) -> std::result::Result<Booking, BookingError> {
        let repo = BookingRepository::new(self.db.pool());
        let booking = repo
            .get_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound("booking"))?;

        let new_end = new_start + booking.duration();
        self.check_business_hours(new_start, new_end).await?;

        let mut tx = self.db.begin().await?;

        let conflicts: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM appointments
             WHERE staff_id = ? AND status != 'cancelled'
               AND start_time < ? AND end_time > ?
               AND id != ?",
        )
        .bind(booking.staff_id)
        .bind(new_end)
        .bind(new_start)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;

        if conflicts.0 > 0 {
            warn!(booking_id, %new_start, "Reschedule rejected: slot conflict");
            return Err(BookingError::SlotConflict);
        }

        sqlx::query("UPDATE appointments SET start_time = ?, end_time = ? WHERE id = ?")
            .bind(new_start)
            .bind(new_end)
            .bind(booking_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;

        info!(booking_id, %new_start, "Booking rescheduled");

        let booking = repo
            .get_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound("booking"))?;
        Ok(booking)
    }

    /// Update a booking's status.
    ///
    /// All transitions between pending, confirmed and cancelled are allowed.
    pub async fn update_status(
        &self,
        booking_id: i64,
        new_status: BookingStatus,
    ) -> std::result::Result<Booking, BookingError> {
        let updated = BookingRepository::new(self.db.pool())
            .update_status(booking_id, new_status)
            .await?
            .ok_or(BookingError::NotFound("booking"))?;
        info!(booking_id, status = %new_status, "Booking status updated");
        Ok(updated)
    }

    /// Hard-delete a booking.
    pub async fn delete_booking(&self, booking_id: i64) -> std::result::Result<(), BookingError> {
        let deleted = BookingRepository::new(self.db.pool())
            .delete(booking_id)
            .await?;
        if !deleted {
            return Err(BookingError::NotFound("booking"));
        }
        info!(booking_id, "Booking deleted");
        Ok(())
    }

    /// Get a booking by ID.
    pub async fn get_booking(&self, booking_id: i64) -> std::result::Result<Booking, BookingError> {
        BookingRepository::new(self.db.pool())
            .get_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound("booking"))
    }

    /// List non-cancelled bookings for a date, optionally restricted to one
    /// staff member.
    pub async fn bookings_for_date(
        &self,
        date: NaiveDate,
        staff_id: Option<i64>,
    ) -> Result<Vec<Booking>> {
        BookingRepository::new(self.db.pool())
            .list_by_date(date, staff_id)
            .await
    }

    /// Merged daily view of booked and free slots.
    ///
    /// Slots covered by the tail of a running booking are omitted; each
    /// booking appears once, at its starting slot.
    pub async fn daily_schedule(
        &self,
        date: NaiveDate,
        staff_id: Option<i64>,
    ) -> Result<Vec<ScheduleItem>> {
        let settings = SettingsRepository::new(self.db.pool());
        let (start_hour, end_hour) = settings.business_hours().await?;
        let granularity = settings.slot_minutes().await?;

        let bookings = BookingRepository::new(self.db.pool())
            .list_by_date(date, staff_id)
            .await?;

        let day_start = date.and_time(NaiveTime::MIN);
        let mut schedule = Vec::new();

        for slot in enumerate_slots(start_hour, end_hour, granularity) {
            let slot_time =
                day_start + Duration::hours(slot.hour as i64) + Duration::minutes(slot.minute as i64);

            if let Some(booking) = bookings.iter().find(|b| b.start_time == slot_time) {
                schedule.push(ScheduleItem::Booked {
                    time: slot_time,
                    booking: booking.clone(),
                });
                continue;
            }

            // Slots inside a running booking are occupied but not listed
            let occupied = bookings
                .iter()
                .any(|b| b.start_time <= slot_time && slot_time < b.end_time);
            if !occupied {
                schedule.push(ScheduleItem::Free { time: slot_time });
            }
        }

        Ok(schedule)
    }

    /// Reject intervals outside the business day (also catches
    /// cross-midnight requests).
    async fn check_business_hours(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> std::result::Result<(), BookingError> {
        let (start_hour, end_hour) = self.business_hours().await?;
        let business_end = business_end_on(start.date(), end_hour);

        if start.hour() < start_hour || end > business_end {
            return Err(BookingError::OutsideBusinessHours);
        }
        Ok(())
    }
}
