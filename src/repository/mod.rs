use async_trait::async_trait;

use crate::{
    error::AppError,
    model::{Note, User},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgRepository;

/// Storage for users and notes.
///
/// Every note method is scoped by owner as well as id, and every call is a
/// single storage operation: update and delete never read first and write after.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Fails with [`AppError::EmailTaken`] when the email already exists.
    async fn create_user(&self, email: &str, password: &str, salt: &str)
        -> Result<User, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn create_note(&self, user_id: i32, title: &str, content: &str)
        -> Result<Note, AppError>;

    async fn find_note(&self, id: i32, user_id: i32) -> Result<Option<Note>, AppError>;

    /// `None` when no note matches both `id` and `user_id`.
    async fn update_note(
        &self,
        id: i32,
        user_id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Note>, AppError>;

    /// Number of rows removed, 0 or 1.
    async fn delete_note(&self, id: i32, user_id: i32) -> Result<u64, AppError>;
}
