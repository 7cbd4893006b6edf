// handlers/public/auth/register.rs - POST /auth/register handler

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::database::manager::DatabaseManager;
use crate::database::users::UserRepository;
use crate::error::ApiError;

const MIN_PASSWORD_LENGTH: usize = 8;

/// POST /auth/register - Create a user account
///
/// Returns the public view of the account; the password digest never leaves
/// the database layer.
pub async fn post(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let registration = registration_from_payload(&payload)?;

    let pool = DatabaseManager::pool().await?;
    let user = UserRepository::new(pool)
        .insert(&registration.email, &registration.name, &registration.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "email": user.email,
            "name": user.name,
        })),
    ))
}

struct Registration {
    email: String,
    name: String,
    password: String,
}

fn registration_from_payload(payload: &Value) -> Result<Registration, ApiError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    let mut field_errors = HashMap::new();

    let email = match obj.get("email").and_then(Value::as_str).map(str::trim) {
        Some(email) if email.contains('@') => Some(email.to_string()),
        Some(_) => {
            field_errors.insert("email".to_string(), "Must be a valid email address".to_string());
            None
        }
        None => {
            field_errors.insert("email".to_string(), "This field is required".to_string());
            None
        }
    };

    let name = match obj.get("name").and_then(Value::as_str).map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => {
            field_errors.insert("name".to_string(), "This field is required".to_string());
            None
        }
    };

    let password = match obj.get("password").and_then(Value::as_str) {
        Some(password) if password.len() >= MIN_PASSWORD_LENGTH => Some(password.to_string()),
        Some(_) => {
            field_errors.insert(
                "password".to_string(),
                format!("Must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
            None
        }
        None => {
            field_errors.insert("password".to_string(), "This field is required".to_string());
            None
        }
    };

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid registration payload", Some(field_errors)));
    }

    Ok(Registration {
        email: email.unwrap(),
        name: name.unwrap(),
        password: password.unwrap(),
    })
}
