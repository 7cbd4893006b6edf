use sqlx::PgPool;
use uuid::Uuid;

use crate::api::menu::MenuDraft;
use crate::database::manager::DatabaseError;
use crate::database::models::menu::Menu;

const MENU_COLUMNS: &str = "id, owner_id, title, time_minutes, price, description, created_at";

/// Owner-scoped access to the menus table.
///
/// Every statement carries the `owner_id` predicate, so a record owned by a
/// different user is indistinguishable from one that does not exist.
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All menus owned by `owner_id`, newest first
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Menu>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM menus WHERE owner_id = $1 ORDER BY id DESC",
            MENU_COLUMNS
        );
        let menus = sqlx::query_as::<_, Menu>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(menus)
    }

    /// Single menu by id, only if owned by `owner_id`
    pub async fn find_for_owner(
        &self,
        owner_id: Uuid,
        menu_id: i64,
    ) -> Result<Option<Menu>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM menus WHERE id = $1 AND owner_id = $2",
            MENU_COLUMNS
        );
        let menu = sqlx::query_as::<_, Menu>(&sql)
            .bind(menu_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(menu)
    }

    /// Insert a new menu. The owner comes from the authenticated caller,
    /// never from the payload.
    pub async fn insert(&self, owner_id: Uuid, draft: &MenuDraft) -> Result<Menu, DatabaseError> {
        let sql = format!(
            "INSERT INTO menus (owner_id, title, time_minutes, price, description) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            MENU_COLUMNS
        );
        let menu = sqlx::query_as::<_, Menu>(&sql)
            .bind(owner_id)
            .bind(&draft.title)
            .bind(draft.time_minutes)
            .bind(draft.price)
            .bind(&draft.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(menu)
    }

    /// Replace the writable fields of an owned menu. Returns None when the
    /// record is absent or owned by someone else.
    pub async fn update_for_owner(
        &self,
        owner_id: Uuid,
        menu_id: i64,
        draft: &MenuDraft,
    ) -> Result<Option<Menu>, DatabaseError> {
        let sql = format!(
            "UPDATE menus SET title = $1, time_minutes = $2, price = $3, description = $4 \
             WHERE id = $5 AND owner_id = $6 RETURNING {}",
            MENU_COLUMNS
        );
        let menu = sqlx::query_as::<_, Menu>(&sql)
            .bind(&draft.title)
            .bind(draft.time_minutes)
            .bind(draft.price)
            .bind(&draft.description)
            .bind(menu_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(menu)
    }

    /// Delete an owned menu. Returns false when the record is absent or
    /// owned by someone else.
    pub async fn delete_for_owner(
        &self,
        owner_id: Uuid,
        menu_id: i64,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1 AND owner_id = $2")
            .bind(menu_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
