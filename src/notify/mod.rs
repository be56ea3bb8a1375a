//! Reminder message construction for slotbook.
//!
//! Builds reminder text and WhatsApp click-to-chat URLs. Actually delivering
//! messages is up to the caller.

use chrono::NaiveDateTime;

/// Build a WhatsApp click-to-chat URL for a phone number and message.
///
/// Non-digit characters are stripped from the phone number. An empty phone
/// yields an empty URL.
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    let encoded = urlencoding::encode(message);
    format!("https://wa.me/{digits}?text={encoded}")
}

/// Build the standard appointment reminder text.
pub fn reminder_message(
    business_name: &str,
    client_name: &str,
    service_name: &str,
    start: NaiveDateTime,
) -> String {
    let time = start.format("%H:%M");
    let date = start.format("%d/%m");
    format!(
        "Hi {client_name}! This is a reminder of your {service_name} appointment \
         at {business_name} on {date} at {time}. See you soon!"
    )
}

/// Build a WhatsApp URL carrying the standard reminder for a booking.
///
/// Returns an empty string when the client has no phone number.
pub fn whatsapp_reminder(
    business_name: &str,
    client_name: &str,
    phone: Option<&str>,
    service_name: &str,
    start: NaiveDateTime,
) -> String {
    let Some(phone) = phone else {
        return String::new();
    };
    let message = reminder_message(business_name, client_name, service_name, start);
    whatsapp_url(phone, &message)
}
