//! Registration and login endpoints.
//!
//! Both operations are stateless request/response: no tokens, no server
//! sessions. The client keeps its own authenticated flag. Login failures
//! return one generic message whether the user is unknown or the password
//! is wrong.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::db::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{
    validate_email, validate_name, validate_password, validate_phone, validate_user_id,
};

const INVALID_CREDENTIALS: &str = "Invalid User ID or password";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn validate_register_request(request: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_user_id(&request.user_id) {
        errors.add("user_id", e);
    }
    if let Err(e) = validate_name(&request.name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_password(&request.password) {
        errors.add("password", e);
    }
    if let Err(e) = validate_email(&request.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_phone(&request.phone) {
        errors.add("phone", e);
    }

    errors.finish()
}

/// Register a new user.
///
/// The pre-check SELECT gives the friendly conflict message; a race past
/// it is still caught by the UNIQUE constraints, which map to 409 as well.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    validate_register_request(&request)?;

    let existing: Option<(String,)> =
        sqlx::query_as("SELECT user_id FROM users WHERE user_id = ? OR email = ?")
            .bind(&request.user_id)
            .bind(&request.email)
            .fetch_optional(&state.db)
            .await?;

    if existing.is_some() {
        return Err(ApiError::conflict("User ID or Email already exists"));
    }

    let password_hash = hash_password(&request.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal("Registration failed")
    })?;

    let now = chrono::Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO users (user_id, name, password_hash, email, phone, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&request.user_id)
    .bind(&request.name)
    .bind(&password_hash)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&now)
    .bind(&now)
    .execute(&state.db)
    .await?;

    tracing::info!("Registered user {}", request.user_id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user_id: request.user_id,
        }),
    ))
}

/// Log a user in. Never mutates the user row and never returns the hash.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if request.user_id.is_empty() {
        errors.add("user_id", "User ID is required");
    }
    if request.password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.finish()?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE user_id = ?")
        .bind(&request.user_id)
        .fetch_optional(&state.db)
        .await?;

    // Same message for unknown user and wrong password
    let user = user.ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: user.into(),
    }))
}
