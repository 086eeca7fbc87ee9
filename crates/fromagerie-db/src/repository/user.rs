//! # User Repository
//!
//! Account storage. Authentication itself (passwords, sessions, tokens)
//! is handled by the deployment's identity layer; this table only maps
//! identities to roles so the access rules have something to check.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fromagerie_core::User;

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user. Usernames are unique.
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, username = %user.username, role = %user.role.as_str(), "Inserting user");

        sqlx::query("INSERT INTO users (id, username, role, created_at) VALUES (?, ?, ?, ?)")
            .bind(&user.id)
            .bind(&user.username)
            .bind(user.role)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetches a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Fetches a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("User", username))
    }

    /// Lists all users, newest first.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use fromagerie_core::Role;

    #[tokio::test]
    async fn test_role_round_trips_through_text_column() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        for role in [
            Role::Admin,
            Role::ProductManager,
            Role::SalesManager,
            Role::Guest,
        ] {
            let user = User::new(format!("user-{}", role.as_str()), role);
            db.users().insert(&user).await.unwrap();

            let loaded = db.users().get_by_id(&user.id).await.unwrap();
            assert_eq!(loaded.role, role);
        }
    }

    #[tokio::test]
    async fn test_lookup_by_username() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let rivka = User::new("rivka", Role::SalesManager);
        db.users().insert(&rivka).await.unwrap();

        let loaded = db.users().get_by_username("rivka").await.unwrap();
        assert_eq!(loaded.id, rivka.id);

        let err = db.users().get_by_username("nobody").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.users()
            .insert(&User::new("dup", Role::Guest))
            .await
            .unwrap();
        let err = db
            .users()
            .insert(&User::new("dup", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
