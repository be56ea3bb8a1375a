//! Business settings for slotbook.
//!
//! Key-value settings stored in the database, with compiled-in defaults for
//! the keys the scheduling engine depends on.

use sqlx::SqlitePool;

use crate::{Result, SlotbookError};

/// Default opening hour when no setting is stored.
pub const DEFAULT_START_HOUR: u32 = 12;

/// Default closing hour when no setting is stored.
pub const DEFAULT_END_HOUR: u32 = 20;

/// Default slot granularity in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 15;

/// Setting key for the opening hour.
pub const KEY_BUSINESS_HOURS_START: &str = "business_hours_start";

/// Setting key for the closing hour.
pub const KEY_BUSINESS_HOURS_END: &str = "business_hours_end";

/// Setting key for the slot granularity.
pub const KEY_SLOT_DURATION: &str = "slot_duration";

/// Compiled-in default value for a known setting key.
fn default_for(key: &str) -> Option<String> {
    match key {
        KEY_BUSINESS_HOURS_START => Some(DEFAULT_START_HOUR.to_string()),
        KEY_BUSINESS_HOURS_END => Some(DEFAULT_END_HOUR.to_string()),
        KEY_SLOT_DURATION => Some(DEFAULT_SLOT_MINUTES.to_string()),
        _ => None,
    }
}

/// Repository for key-value business settings.
pub struct SettingsRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new SettingsRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a setting value by key.
    ///
    /// Falls back to the compiled-in default when the key has never been set.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let stored: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| SlotbookError::Database(e.to_string()))?;

        Ok(stored.map(|(v,)| v).or_else(|| default_for(key)))
    }

    /// Set a setting value, creating the key if it doesn't exist.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool)
        .await
        .map_err(|e| SlotbookError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the configured business hours as `(start_hour, end_hour)`.
    pub async fn business_hours(&self) -> Result<(u32, u32)> {
        let start = self
            .get(KEY_BUSINESS_HOURS_START)
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_START_HOUR);
        let end = self
            .get(KEY_BUSINESS_HOURS_END)
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_END_HOUR);
        Ok((start, end))
    }

    /// Get the configured slot granularity in minutes.
    pub async fn slot_minutes(&self) -> Result<u32> {
        let minutes = self
            .get(KEY_SLOT_DURATION)
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SLOT_MINUTES);
        Ok(minutes)
    }
}
