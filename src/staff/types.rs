//! Staff model for slotbook.

/// Default identity color assigned to new staff members.
pub const DEFAULT_STAFF_COLOR: &str = "#2196F3";

/// Staff member entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StaffMember {
    /// Unique staff ID.
    pub id: i64,
    /// Staff member name.
    pub name: String,
    /// Identity color for calendar views.
    pub color: String,
    /// Whether the staff member can be booked.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: String,
}

/// Data for creating a new staff member.
#[derive(Debug, Clone)]
pub struct NewStaffMember {
    /// Staff member name.
    pub name: String,
    /// Identity color for calendar views.
    pub color: String,
}

impl NewStaffMember {
    /// Create a new staff member with the default color.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_STAFF_COLOR.to_string(),
        }
    }

    /// Set the identity color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}
