use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::user::User;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password_hash, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn insert(&self, email: &str, name: &str, password: &str) -> Result<User, UserError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(UserError::AlreadyExists(email.to_string()));
        }

        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, name, password_hash) VALUES ($1, $2, $3, $4) \
             RETURNING id, email, name, password_hash, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(name)
        .bind(hash_password(password))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            // The existence check above races with concurrent inserts
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                Err(UserError::AlreadyExists(email.to_string()))
            }
            Err(e) => Err(UserError::Database(e.into())),
        }
    }
}

/// Salted SHA-256 digest, stored as "salt:hex"
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}:{}", salt, digest(&salt, password))
}

pub fn verify_password(stored: &str, password: &str) -> bool {
    match stored.split_once(':') {
        Some((salt, hash)) => digest(salt, password) == hash,
        None => false,
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let stored = hash_password("correct horse");
        assert!(verify_password(&stored, "correct horse"));
        assert!(!verify_password(&stored, "wrong horse"));
    }

    #[test]
    fn distinct_salts_per_hash() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("not-a-valid-entry", "anything"));
    }
}
