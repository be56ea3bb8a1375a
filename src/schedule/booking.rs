//! Booking model for slotbook.
//!
//! A booking occupies a half-open interval `[start_time, end_time)` on one
//! staff member's timeline.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// Booking lifecycle status.
///
/// All transitions between statuses are allowed; a cancelled booking may be
/// reopened so mistaken cancellations stay correctable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStatus {
    /// Requested but not yet confirmed.
    #[default]
    Pending,
    /// Confirmed by the business.
    Confirmed,
    /// Cancelled; the interval no longer blocks the timeline.
    Cancelled,
}

impl BookingStatus {
    /// Convert status to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("unknown booking status: {s}")),
        }
    }
}

/// Booking entity linking a client, a service and a staff member over a
/// half-open time interval.
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID.
    pub id: i64,
    /// ID of the booked client.
    pub client_id: i64,
    /// ID of the booked catalog service.
    pub service_id: i64,
    /// ID of the staff member performing the service.
    pub staff_id: i64,
    /// Start of the interval (inclusive).
    pub start_time: NaiveDateTime,
    /// End of the interval (exclusive).
    pub end_time: NaiveDateTime,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Record creation timestamp.
    pub created_at: String,
}

impl Booking {
    /// Check whether this booking overlaps the half-open interval
    /// `[start, end)`.
    ///
    /// A booking ending exactly when another starts does not overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && self.end_time > start
    }

    /// Check if this booking is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Duration of the booked interval.
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}

/// Internal struct for mapping database rows to Booking.
#[derive(sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: i64,
    pub client_id: i64,
    pub service_id: i64,
    pub staff_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: String,
    pub created_at: String,
}

impl BookingRow {
    pub(crate) fn into_booking(self) -> Booking {
        Booking {
            id: self.id,
            client_id: self.client_id,
            service_id: self.service_id,
            staff_id: self.staff_id,
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status.parse().unwrap_or(BookingStatus::Pending),
            created_at: self.created_at,
        }
    }
}

/// Data for creating a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// ID of the booked client.
    pub client_id: i64,
    /// ID of the booked catalog service.
    pub service_id: i64,
    /// ID of the staff member performing the service.
    pub staff_id: i64,
    /// Start of the interval (inclusive).
    pub start_time: NaiveDateTime,
    /// End of the interval (exclusive).
    pub end_time: NaiveDateTime,
}

impl NewBooking {
    /// Create a new booking request.
    pub fn new(
        client_id: i64,
        service_id: i64,
        staff_id: i64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            client_id,
            service_id,
            staff_id,
            start_time,
            end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 25)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn booking(start: NaiveDateTime, end: NaiveDateTime) -> Booking {
        Booking {
            id: 1,
            client_id: 1,
            service_id: 1,
            staff_id: 1,
            start_time: start,
            end_time: end,
            status: BookingStatus::Pending,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_from_str_unknown() {
        assert!("done".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(BookingStatus::Confirmed.to_string(), "confirmed");
    }

    #[test]
    fn test_overlaps_inside() {
        let b = booking(dt(14, 0), dt(14, 30));
        assert!(b.overlaps(dt(14, 15), dt(14, 45)));
        assert!(b.overlaps(dt(13, 45), dt(14, 15)));
        assert!(b.overlaps(dt(13, 0), dt(15, 0)));
    }

    #[test]
    fn test_overlaps_boundary_is_free() {
        let b = booking(dt(14, 0), dt(14, 30));
        // Half-open intervals: touching at a boundary is not an overlap
        assert!(!b.overlaps(dt(14, 30), dt(15, 0)));
        assert!(!b.overlaps(dt(13, 30), dt(14, 0)));
    }

    #[test]
    fn test_overlaps_disjoint() {
        let b = booking(dt(14, 0), dt(14, 30));
        assert!(!b.overlaps(dt(15, 0), dt(15, 30)));
        assert!(!b.overlaps(dt(12, 0), dt(12, 30)));
    }

    #[test]
    fn test_duration() {
        let b = booking(dt(14, 0), dt(14, 45));
        assert_eq!(b.duration(), chrono::Duration::minutes(45));
    }
}
