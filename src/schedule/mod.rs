//! Scheduling engine for slotbook.
//!
//! Slot enumeration, availability computation and the booking lifecycle.

mod booking;
mod repository;
mod service;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use repository::BookingRepository;
pub use service::{
    enumerate_slots, BookingError, ScheduleItem, ScheduleService, Slot, SlotAvailability,
};
