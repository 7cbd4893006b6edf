use crate::database::manager::DatabaseManager;

const SCHEMA_SQL: &str = include_str!("../../../schema.sql");

pub async fn handle() -> anyhow::Result<()> {
    let pool = DatabaseManager::pool().await?;

    // Statements are separated by semicolons; the schema has no embedded ones
    for statement in SCHEMA_SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(&pool).await?;
    }

    println!("Schema applied");
    Ok(())
}
