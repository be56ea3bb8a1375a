//! Account model for slotbook.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

/// Account role for permission management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Role {
    /// Staff login tied to one staff member's agenda.
    #[default]
    Staff,
    /// Administrator with full access.
    Admin,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// Login account entity.
///
/// `failed_attempts` and `locked_until` are mutated only by the
/// authentication state machine and the administrative unlock.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// Linked staff member, when the account belongs to one.
    pub staff_id: Option<i64>,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Consecutive failed login attempts since the last success.
    pub failed_attempts: i64,
    /// Lockout expiry; logins are rejected until this instant passes.
    pub locked_until: Option<NaiveDateTime>,
    /// Whether the next login must be followed by a password change.
    pub must_change_password: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

impl Account {
    /// Check if this account is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check if the account is locked out at the given instant.
    pub fn is_locked_at(&self, now: NaiveDateTime) -> bool {
        matches!(self.locked_until, Some(until) if until > now)
    }
}

/// Internal struct for mapping database rows to Account.
#[derive(sqlx::FromRow)]
pub(crate) struct AccountRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub staff_id: Option<i64>,
    pub is_active: bool,
    pub failed_attempts: i64,
    pub locked_until: Option<NaiveDateTime>,
    pub must_change_password: bool,
    pub created_at: String,
}

impl AccountRow {
    pub(crate) fn into_account(self) -> Account {
        Account {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role.parse().unwrap_or(Role::Staff),
            staff_id: self.staff_id,
            is_active: self.is_active,
            failed_attempts: self.failed_attempts,
            locked_until: self.locked_until,
            must_change_password: self.must_change_password,
            created_at: self.created_at,
        }
    }
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login username.
    pub username: String,
    /// Password hash (pre-hashed with Argon2).
    pub password_hash: String,
    /// Account role (defaults to Staff).
    pub role: Role,
    /// Linked staff member (optional).
    pub staff_id: Option<i64>,
}

impl NewAccount {
    /// Create a new account with the required fields.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role: Role::Staff,
            staff_id: None,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Link the account to a staff member.
    pub fn with_staff_id(mut self, staff_id: i64) -> Self {
        self.staff_id = Some(staff_id);
        self
    }
}
