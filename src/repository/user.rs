use chrono::Utc;
use sqlx::SqlitePool;

use super::new_id;
use crate::types::User;

pub struct UserRepository<'a> {
    db: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at, username")
            .fetch_all(self.db)
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.db)
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(self.db)
            .await
    }

    /// Matches the identifier against email or username, whichever it is.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?1 OR username = ?1 LIMIT 1")
            .bind(identifier)
            .fetch_optional(self.db)
            .await
    }

    /// Inserts a user; `password` must already be hashed.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<User, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, name, email, username, password, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
               RETURNING *"#,
        )
        .bind(new_id())
        .bind(name)
        .bind(email)
        .bind(username)
        .bind(password)
        .bind(now)
        .fetch_one(self.db)
        .await
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1").bind(id).execute(self.db).await?;
        Ok(result.rows_affected())
    }
}
