use std::{future::Future, time::Duration};

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::Repository;
use crate::{
    error::AppError,
    model::{Note, User},
};

pub struct PgRepository {
    db: Pool<Postgres>,
    timeout: Duration,
}

impl PgRepository {
    pub fn new(db: Pool<Postgres>, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        salt: &str,
    ) -> Result<User, AppError> {
        let query = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password, salt) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(email)
        .bind(password)
        .bind(salt)
        .fetch_one(&self.db);

        self.bounded(query).await.map_err(|e| match e {
            AppError::Database(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                AppError::EmailTaken
            }
            other => other,
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let query = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db);

        self.bounded(query).await
    }

    async fn create_note(
        &self,
        user_id: i32,
        title: &str,
        content: &str,
    ) -> Result<Note, AppError> {
        let query = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (title, content, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(title)
        .bind(content)
        .bind(user_id)
        .fetch_one(&self.db);

        self.bounded(query).await
    }

    async fn find_note(&self, id: i32, user_id: i32) -> Result<Option<Note>, AppError> {
        let query = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.db);

        self.bounded(query).await
    }

    async fn update_note(
        &self,
        id: i32,
        user_id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Note>, AppError> {
        let query = sqlx::query_as::<_, Note>(
            "UPDATE notes \
             SET title = COALESCE($1, title), content = COALESCE($2, content), updated_at = NOW() \
             WHERE id = $3 AND user_id = $4 \
             RETURNING *",
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db);

        self.bounded(query).await
    }

    async fn delete_note(&self, id: i32, user_id: i32) -> Result<u64, AppError> {
        let query = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db);

        let result = self.bounded(query).await?;
        Ok(result.rows_affected())
    }
}
