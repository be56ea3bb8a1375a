//! Staff members for slotbook.
//!
//! This module provides the staff entity, repository and guarded service
//! layer.

mod repository;
mod service;
mod types;

pub use repository::StaffRepository;
pub use service::{StaffError, StaffService};
pub use types::{NewStaffMember, StaffMember, DEFAULT_STAFF_COLOR};
