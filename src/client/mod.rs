//! Client records for slotbook.
//!
//! This module provides the client entity, repository and service layer.

mod repository;
mod service;
mod types;

pub use repository::ClientRepository;
pub use service::{ClientService, SEARCH_LIMIT};
pub use types::{Client, ClientUpdate, NewClient};
