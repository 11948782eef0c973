//! Input validation for API requests.
//!
//! For collecting multiple validation errors and returning them as an
//! ApiError, use the `ValidationErrorBuilder` from the `error` module.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating user identifiers (alphanumeric plus ._-, 3-50 chars)
    static ref USER_ID_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9][a-zA-Z0-9._-]{2,49}$"
    ).unwrap();

    /// Regex for validating email addresses
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    /// Regex for validating phone numbers (digits with optional +, spaces, dashes)
    static ref PHONE_REGEX: Regex = Regex::new(
        r"^\+?[0-9][0-9 ()-]{5,19}$"
    ).unwrap();
}

/// Validate a user identifier
pub fn validate_user_id(user_id: &str) -> Result<(), String> {
    if user_id.is_empty() {
        return Err("User ID is required".to_string());
    }

    if !USER_ID_REGEX.is_match(user_id) {
        return Err(
            "User ID must be 3-50 characters, alphanumeric with dots, dashes or underscores"
                .to_string(),
        );
    }

    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if name.len() > 100 {
        return Err("Name is too long (max 100 characters)".to_string());
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 100 {
        return Err("Email is too long (max 100 characters)".to_string());
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a phone number
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.is_empty() {
        return Err("Phone is required".to_string());
    }

    if !PHONE_REGEX.is_match(phone) {
        return Err("Invalid phone number format".to_string());
    }

    Ok(())
}

/// Validate a password at registration time
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 6 {
        return Err("Password is too short (min 6 characters)".to_string());
    }

    if password.len() > 128 {
        return Err("Password is too long (max 128 characters)".to_string());
    }

    Ok(())
}

/// Validate a catalog page number (TMDB accepts 1-500)
pub fn validate_page(page: u32) -> Result<(), String> {
    if page == 0 || page > 500 {
        return Err("Page must be between 1 and 500".to_string());
    }

    Ok(())
}

/// Validate a search query. An empty query is allowed; the catalog
/// facade defines what it returns for one.
pub fn validate_query(query: &str) -> Result<(), String> {
    if query.len() > 256 {
        return Err("Search query is too long (max 256 characters)".to_string());
    }

    Ok(())
}
