//! Service catalog model for slotbook.

/// A bookable service with a fixed duration and price.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceDefinition {
    /// Unique service ID.
    pub id: i64,
    /// Service name (unique).
    pub name: String,
    /// Duration in minutes.
    pub duration: i64,
    /// Price of the service.
    pub price: f64,
    /// Whether the service can be booked.
    pub is_active: bool,
}

/// Data for creating a new catalog service.
#[derive(Debug, Clone)]
pub struct NewService {
    /// Service name.
    pub name: String,
    /// Duration in minutes.
    pub duration: u32,
    /// Price of the service (defaults to 0).
    pub price: f64,
    /// Whether the service is active (defaults to true).
    pub is_active: bool,
}

impl NewService {
    /// Create a new service with the required fields.
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
            price: 0.0,
            is_active: true,
        }
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Set the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Data for updating an existing catalog service.
///
/// Existing bookings keep their original interval when the duration changes;
/// only new bookings pick up the new duration.
#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    /// New name.
    pub name: Option<String>,
    /// New duration in minutes.
    pub duration: Option<u32>,
    /// New price.
    pub price: Option<f64>,
    /// New active status.
    pub is_active: Option<bool>,
}

impl ServiceUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new duration.
    pub fn duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set a new price.
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the active flag.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Check if this update contains no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.duration.is_none()
            && self.price.is_none()
            && self.is_active.is_none()
    }
}
