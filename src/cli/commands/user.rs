use crate::database::manager::DatabaseManager;
use crate::database::users::UserRepository;

pub async fn handle_create(email: &str, name: &str, password: &str) -> anyhow::Result<()> {
    let pool = DatabaseManager::pool().await?;
    let user = UserRepository::new(pool).insert(email, name, password).await?;

    println!("Created user {} ({})", user.email, user.id);
    Ok(())
}
