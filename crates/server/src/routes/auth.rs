use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Minimal shape check: something@something.tld, no whitespace.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));

const MIN_PASSWORD_LEN: usize = 6;

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Register a new account
///
/// Validates presence of all fields, email shape, and password length,
/// then rejects duplicate emails (case-insensitive) with 409.
pub async fn register(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<RegisterRequest>,
) -> ServerResult<impl IntoResponse> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(ServerError::BadRequest(
            "Name, email, and password are required".to_string(),
        ));
    }

    if !EMAIL_RE.is_match(&request.email) {
        return Err(ServerError::BadRequest("Invalid email format".to_string()));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ServerError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = state
        .store
        .add_user(&request.name, &request.email, &request.password)?;

    metrics::counter!("refind_registrations_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Registration successful",
            "user": user.public(),
        })),
    ))
}

/// Log in with email and password
///
/// 404 when the email is unknown, 401 when the password does not match.
pub async fn login(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<impl IntoResponse> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ServerError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = state
        .store
        .find_user_by_email(&request.email)
        .ok_or(ServerError::UserNotFound)?;

    // Plain-text comparison is the stored contract of this service.
    if user.password != request.password {
        return Err(ServerError::WrongPassword);
    }

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": user.public(),
    })))
}

/// List all users with passwords stripped
pub async fn list_users(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let users: Vec<_> = state.store.list_users().iter().map(|u| u.public()).collect();

    Ok(Json(json!({ "users": users })))
}
