// Input validation for signup, login and event APIs
//
// Required-field and format rules first, then byte limits on every field
// before anything reaches Argon2 or storage.

use chrono::{NaiveDate, NaiveTime};

use crate::api::events::EventRequest;
use crate::auth::routes::{LoginRequest, SignupRequest};
use crate::services::{ServiceError, ServiceResult};

// =============================================================================
// Limits
// =============================================================================

/// Minimum password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// RFC 5321 caps a forward path at 256 octets; 320 covers local@domain generously.
pub const MAX_EMAIL_BYTES: usize = 320;

/// Maximum password size. Argon2 cost grows with input length.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Maximum size for a first or last name.
pub const MAX_PERSON_NAME_BYTES: usize = 256;

/// Maximum size for event name and location.
pub const MAX_EVENT_NAME_BYTES: usize = 2 * 1024; // 2 KB

/// Maximum size for event description and food details.
pub const MAX_EVENT_DESCRIPTION_BYTES: usize = 10 * 1024; // 10 KB

/// Generic message for size-limit violations.
pub const VALIDATION_ERROR_MESSAGE: &str = "Input exceeds allowed limits";

// =============================================================================
// Signup / login
// =============================================================================

/// Signup input after trimming, normalization and rule checks
#[derive(Debug, Clone)]
pub struct ValidatedSignup {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Login input after trimming and normalization
#[derive(Debug, Clone)]
pub struct ValidatedLogin {
    pub email: String,
    pub password: String,
}

/// Lowercase and trim an email so lookups and the unique constraint agree
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_signup(req: &SignupRequest) -> ServiceResult<ValidatedSignup> {
    let (Some(email), Some(password), Some(first_name), Some(last_name)) = (
        present(&req.email),
        req.password.as_deref().filter(|p| !p.is_empty()),
        present(&req.first_name),
        present(&req.last_name),
    ) else {
        return Err(ServiceError::validation(
            "Email, password, and name are required.",
        ));
    };

    check_limit("email", email, MAX_EMAIL_BYTES)?;
    check_limit("password", password, MAX_PASSWORD_BYTES)?;
    check_limit("first_name", first_name, MAX_PERSON_NAME_BYTES)?;
    check_limit("last_name", last_name, MAX_PERSON_NAME_BYTES)?;

    let email = normalize_email(email);
    validate_email(&email)?;
    validate_password(password)?;

    Ok(ValidatedSignup {
        email,
        password: password.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
}

pub fn validate_login(req: &LoginRequest) -> ServiceResult<ValidatedLogin> {
    let (Some(email), Some(password)) = (
        present(&req.email),
        req.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ServiceError::validation("Email and password are required."));
    };

    check_limit("email", email, MAX_EMAIL_BYTES)?;
    check_limit("password", password, MAX_PASSWORD_BYTES)?;

    Ok(ValidatedLogin {
        email: normalize_email(email),
        password: password.to_string(),
    })
}

/// Require `local@domain` with both parts non-empty and no whitespace
pub fn validate_email(email: &str) -> ServiceResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ServiceError::validation(
            "Invalid email address. Please provide a valid email address.",
        ));
    }
    Ok(())
}

/// At least 8 characters with a lowercase letter, an uppercase letter and a digit
pub fn validate_password(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ServiceError::validation(format!(
            "Password must be at least {} characters.",
            MIN_PASSWORD_CHARS
        )));
    }

    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(ServiceError::validation(
            "Password must contain at least one lowercase letter, uppercase letter, and number.",
        ));
    }
    Ok(())
}

// =============================================================================
// Events
// =============================================================================

/// Event input with every required field present and date/time parsed
#[derive(Debug, Clone)]
pub struct ValidatedEvent {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub food_details: Option<String>,
}

pub fn validate_event(req: &EventRequest) -> ServiceResult<ValidatedEvent> {
    let fields = (
        present(&req.name),
        present(&req.description),
        present(&req.location),
        present(&req.date),
        present(&req.time),
    );
    let (Some(name), Some(description), Some(location), Some(date), Some(time)) = fields else {
        let missing: Vec<&str> = [
            ("name", fields.0),
            ("description", fields.1),
            ("location", fields.2),
            ("date", fields.3),
            ("time", fields.4),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| field)
        .collect();
        return Err(ServiceError::validation(format!(
            "All fields are required (name, description, location, date, and time). Missing: {}",
            missing.join(", ")
        )));
    };
    let food_details = present(&req.food_details);

    check_limit("name", name, MAX_EVENT_NAME_BYTES)?;
    check_limit("location", location, MAX_EVENT_NAME_BYTES)?;
    check_limit("description", description, MAX_EVENT_DESCRIPTION_BYTES)?;
    if let Some(details) = food_details {
        check_limit("food_details", details, MAX_EVENT_DESCRIPTION_BYTES)?;
    }

    Ok(ValidatedEvent {
        name: name.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        date: parse_date(date)?,
        time: parse_time(time)?,
        food_details: food_details.map(str::to_string),
    })
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ServiceError::validation(format!(
            "Invalid date '{}': expected YYYY-MM-DD.",
            value
        ))
    })
}

/// Parse an `HH:MM` or `HH:MM:SS` time of day
pub fn parse_time(value: &str) -> ServiceResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            ServiceError::validation(format!(
                "Invalid time '{}': expected HH:MM or HH:MM:SS.",
                value
            ))
        })
}

// =============================================================================
// Helpers
// =============================================================================

/// Trimmed value, or None when absent or blank
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn check_limit(field: &str, value: &str, max_bytes: usize) -> ServiceResult<()> {
    if value.len() > max_bytes {
        tracing::warn!(
            "{} exceeds limit: {} bytes (max: {})",
            field,
            value.len(),
            max_bytes
        );
        return Err(ServiceError::validation(VALIDATION_ERROR_MESSAGE));
    }
    Ok(())
}
