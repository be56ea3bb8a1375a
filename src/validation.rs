//! Input validation for slotbook record keeping.
//!
//! Validation rules for client and service catalog fields. Scheduling and
//! authentication rules live in their own modules.

use thiserror::Error;

/// Minimum name length.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum name length.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 150;

/// Minimum phone length.
pub const MIN_PHONE_LENGTH: usize = 7;

/// Maximum phone length.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Maximum service duration in minutes (8 hours).
pub const MAX_DURATION_MINUTES: u32 = 480;

/// Maximum service price.
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name is empty or whitespace.
    #[error("name cannot be empty")]
    NameEmpty,

    /// Name is too short.
    #[error("name must be at least {MIN_NAME_LENGTH} characters")]
    NameTooShort,

    /// Name is too long.
    #[error("name must be at most {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    /// Email is empty.
    #[error("email is required")]
    EmailEmpty,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,

    /// Phone is too long or too short.
    #[error("phone must be {MIN_PHONE_LENGTH}-{MAX_PHONE_LENGTH} characters")]
    PhoneInvalidLength,

    /// Phone contains invalid characters.
    #[error("invalid phone format")]
    PhoneInvalidFormat,

    /// Service duration is out of range.
    #[error("duration must be between 1 and {MAX_DURATION_MINUTES} minutes")]
    DurationOutOfRange,

    /// Service price is out of range.
    #[error("price must be between 0 and {MAX_PRICE}")]
    PriceOutOfRange,
}

impl From<ValidationError> for crate::SlotbookError {
    fn from(e: ValidationError) -> Self {
        crate::SlotbookError::Validation(e.to_string())
    }
}

/// Validate a person or service name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    let char_count = name.chars().count();
    if char_count < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort);
    }
    if char_count > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

/// Validate an email address.
///
/// This is intentionally simple - we don't try to fully validate email
/// format, just catch obvious mistakes.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    // Must contain exactly one @ with text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::EmailInvalidFormat);
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() {
        return Err(ValidationError::EmailInvalidFormat);
    }

    // Domain must contain at least one dot and not be empty on either side
    if !domain.contains('.') {
        return Err(ValidationError::EmailInvalidFormat);
    }

    let domain_parts: Vec<&str> = domain.split('.').collect();
    if domain_parts.iter().any(|p| p.is_empty()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    if email.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Validate a phone number.
///
/// Phone is optional; pass only non-empty values. Allows digits, spaces,
/// dashes, parentheses and a leading plus.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();

    let char_count = phone.chars().count();
    if !(MIN_PHONE_LENGTH..=MAX_PHONE_LENGTH).contains(&char_count) {
        return Err(ValidationError::PhoneInvalidLength);
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    let valid = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
    if !valid {
        return Err(ValidationError::PhoneInvalidFormat);
    }

    Ok(())
}

/// Validate a service duration in minutes.
pub fn validate_duration(duration: u32) -> Result<(), ValidationError> {
    if duration == 0 || duration > MAX_DURATION_MINUTES {
        return Err(ValidationError::DurationOutOfRange);
    }
    Ok(())
}

/// Validate a service price.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !(0.0..=MAX_PRICE).contains(&price) {
        return Err(ValidationError::PriceOutOfRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_ok() {
        assert!(validate_name("Ana García").is_ok());
        assert!(validate_name("Jo").is_ok());
    }

    #[test]
    fn test_validate_name_empty() {
        assert_eq!(validate_name(""), Err(ValidationError::NameEmpty));
        assert_eq!(validate_name("   "), Err(ValidationError::NameEmpty));
    }

    #[test]
    fn test_validate_name_too_short() {
        assert_eq!(validate_name("A"), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn test_validate_name_too_long() {
        let long = "a".repeat(101);
        assert_eq!(validate_name(&long), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn test_validate_email_ok() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.co").is_ok());
    }

    #[test]
    fn test_validate_email_empty() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailEmpty));
    }

    #[test]
    fn test_validate_email_bad_format() {
        assert_eq!(
            validate_email("no-at-sign"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("two@@example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("@example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("ana@nodot"),
            Err(ValidationError::EmailInvalidFormat)
        );
        assert_eq!(
            validate_email("ana@example..com"),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_validate_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(150));
        assert_eq!(validate_email(&long), Err(ValidationError::EmailTooLong));
    }

    #[test]
    fn test_validate_phone_ok() {
        assert!(validate_phone("+54 11 4321-5678").is_ok());
        assert!(validate_phone("(011) 4321 5678").is_ok());
        assert!(validate_phone("1143215678").is_ok());
    }

    #[test]
    fn test_validate_phone_bad_length() {
        assert_eq!(
            validate_phone("123"),
            Err(ValidationError::PhoneInvalidLength)
        );
        assert_eq!(
            validate_phone(&"1".repeat(21)),
            Err(ValidationError::PhoneInvalidLength)
        );
    }

    #[test]
    fn test_validate_phone_bad_chars() {
        assert_eq!(
            validate_phone("phone12345"),
            Err(ValidationError::PhoneInvalidFormat)
        );
    }

    #[test]
    fn test_validate_duration() {
        assert!(validate_duration(30).is_ok());
        assert!(validate_duration(480).is_ok());
        assert_eq!(
            validate_duration(0),
            Err(ValidationError::DurationOutOfRange)
        );
        assert_eq!(
            validate_duration(481),
            Err(ValidationError::DurationOutOfRange)
        );
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(2500.0).is_ok());
        assert_eq!(validate_price(-1.0), Err(ValidationError::PriceOutOfRange));
        assert_eq!(
            validate_price(1_000_001.0),
            Err(ValidationError::PriceOutOfRange)
        );
    }
}
