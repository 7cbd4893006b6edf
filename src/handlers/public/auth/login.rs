// handlers/public/auth/login.rs - POST /auth/login handler

use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::users::{verify_password, UserRepository};
use crate::error::ApiError;

/// POST /auth/login - Exchange email + password for a bearer token
pub async fn post(payload: Result<Json<Value>, JsonRejection>) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let (email, password) = credentials_from_payload(&payload)?;

    let pool = DatabaseManager::pool().await?;
    let user = UserRepository::new(pool)
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&user.password_hash, &password) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = generate_jwt(Claims::new(user.id, user.email.clone())).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to generate token")
    })?;

    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    Ok(Json(json!({
        "token": token,
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
        },
        "expires_in": expires_in,
    })))
}

fn credentials_from_payload(payload: &Value) -> Result<(String, String), ApiError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    let mut field_errors = HashMap::new();
    let email = match obj.get("email").and_then(Value::as_str) {
        Some(email) if !email.trim().is_empty() => Some(email.trim().to_string()),
        _ => {
            field_errors.insert("email".to_string(), "This field is required".to_string());
            None
        }
    };
    let password = match obj.get("password").and_then(Value::as_str) {
        Some(password) if !password.is_empty() => Some(password.to_string()),
        _ => {
            field_errors.insert("password".to_string(), "This field is required".to_string());
            None
        }
    };

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid credentials payload", Some(field_errors)));
    }

    Ok((email.unwrap(), password.unwrap()))
}
