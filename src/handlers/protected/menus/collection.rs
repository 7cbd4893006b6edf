// handlers/protected/menus/collection.rs - GET/POST /menus handlers

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use axum::Extension;
use serde_json::Value;

use crate::api::menu::{draft_from_payload, MenuDetail, MenuSummary};
use crate::database::manager::DatabaseManager;
use crate::database::menus::MenuRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /menus - List the caller's menus, newest first
pub async fn get(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MenuSummary>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let menus = MenuRepository::new(pool).list_for_owner(user.user_id).await?;

    Ok(Json(menus.iter().map(MenuSummary::from).collect()))
}

/// POST /menus - Create a menu owned by the caller
pub async fn post(
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuDetail>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let draft = draft_from_payload(&payload)?;

    let pool = DatabaseManager::pool().await?;
    let menu = MenuRepository::new(pool).insert(user.user_id, &draft).await?;

    Ok((StatusCode::CREATED, Json(MenuDetail::from(&menu))))
}
