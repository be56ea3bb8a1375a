//! Service catalog for slotbook.
//!
//! Bookable services with durations and prices.

mod repository;
mod service;
mod types;

pub use repository::ServiceRepository;
pub use service::CatalogService;
pub use types::{NewService, ServiceDefinition, ServiceUpdate};
