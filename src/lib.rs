//! slotbook - appointment scheduling backend for a small service business.
//!
//! Two core engines over a shared SQLite store: a scheduling engine that
//! computes slot availability and enforces the no-double-booking invariant,
//! and an authentication guard with a per-account lockout state machine.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod notify;
pub mod schedule;
pub mod settings;
pub mod staff;
pub mod validation;

pub use auth::{
    hash_password, verify_password, Account, AccountRepository, AuthError, AuthService,
    PasswordError, Role, LOCKOUT_MINUTES, MAX_FAILED_ATTEMPTS, MIN_PASSWORD_LENGTH,
};
pub use catalog::{CatalogService, NewService, ServiceDefinition, ServiceRepository, ServiceUpdate};
pub use client::{Client, ClientRepository, ClientService, ClientUpdate, NewClient};
pub use config::Config;
pub use db::{Database, DbPool};
pub use error::{Result, SlotbookError};
pub use schedule::{
    enumerate_slots, Booking, BookingError, BookingRepository, BookingStatus, NewBooking,
    ScheduleItem, ScheduleService, Slot, SlotAvailability,
};
pub use settings::SettingsRepository;
pub use staff::{NewStaffMember, StaffError, StaffMember, StaffRepository, StaffService};
pub use validation::ValidationError;
