//! Client model for slotbook.

/// Client entity representing a customer of the business.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Client {
    /// Unique client ID.
    pub id: i64,
    /// Client name.
    pub name: String,
    /// Contact email (unique).
    pub email: String,
    /// Contact phone (optional).
    pub phone: Option<String>,
    /// Free-form notes (optional).
    pub notes: Option<String>,
    /// Record creation timestamp.
    pub created_at: String,
}

/// Data for creating a new client.
#[derive(Debug, Clone)]
pub struct NewClient {
    /// Client name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone (optional).
    pub phone: Option<String>,
    /// Free-form notes (optional).
    pub notes: Option<String>,
}

impl NewClient {
    /// Create a new client with the required fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            notes: None,
        }
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Data for updating an existing client.
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone (Some(None) clears it).
    pub phone: Option<Option<String>>,
    /// New notes (Some(None) clears them).
    pub notes: Option<Option<String>>,
}

impl ClientUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set or clear the phone number.
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Set or clear the notes.
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Check if this update contains no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.notes.is_none()
    }
}
