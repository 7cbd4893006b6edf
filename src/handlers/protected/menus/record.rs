// handlers/protected/menus/record.rs - GET/PUT/PATCH/DELETE /menus/:id handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use axum::Extension;
use serde_json::Value;

use crate::api::menu::{draft_from_payload, patch_from_payload, MenuDetail};
use crate::database::manager::DatabaseManager;
use crate::database::menus::MenuRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /menus/:id - Get a single owned menu
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MenuDetail>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let menu = MenuRepository::new(pool)
        .find_for_owner(user.user_id, id)
        .await?
        .ok_or_else(|| menu_not_found(id))?;

    Ok(Json(MenuDetail::from(&menu)))
}

/// PUT /menus/:id - Replace all writable fields of an owned menu
pub async fn put(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MenuDetail>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let pool = DatabaseManager::pool().await?;
    let repo = MenuRepository::new(pool);

    // Ownership check before payload validation, so a foreign id is a 404
    // even when the payload is invalid
    repo.find_for_owner(user.user_id, id)
        .await?
        .ok_or_else(|| menu_not_found(id))?;

    let draft = draft_from_payload(&payload)?;
    let menu = repo
        .update_for_owner(user.user_id, id, &draft)
        .await?
        .ok_or_else(|| menu_not_found(id))?;

    Ok(Json(MenuDetail::from(&menu)))
}

/// PATCH /menus/:id - Change only the fields present in the payload
pub async fn patch(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MenuDetail>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let pool = DatabaseManager::pool().await?;
    let repo = MenuRepository::new(pool);

    let existing = repo
        .find_for_owner(user.user_id, id)
        .await?
        .ok_or_else(|| menu_not_found(id))?;

    let draft = patch_from_payload(&payload)?.apply(&existing);
    let menu = repo
        .update_for_owner(user.user_id, id, &draft)
        .await?
        .ok_or_else(|| menu_not_found(id))?;

    Ok(Json(MenuDetail::from(&menu)))
}

/// DELETE /menus/:id - Delete an owned menu
pub async fn delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let deleted = MenuRepository::new(pool)
        .delete_for_owner(user.user_id, id)
        .await?;

    if !deleted {
        return Err(menu_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn menu_not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("menu {} not found", id))
}
