use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::Repository;
use crate::{
    error::AppError,
    model::{Note, User},
};

/// In-process stand-in for postgres. Each method holds the lock for its whole
/// body, which gives the same single-step semantics as the SQL statements.
#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    notes: Vec<Note>,
    next_user_id: i32,
    next_note_id: i32,
}

impl MemoryRepository {
    /// Unscoped read, for asserting on state the API would hide.
    pub fn note(&self, id: i32) -> Option<Note> {
        let tables = self.tables.lock().unwrap();
        tables.notes.iter().find(|n| n.id == id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn note_count(&self) -> usize {
        self.tables.lock().unwrap().notes.len()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        salt: &str,
    ) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailTaken);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password: password.to_string(),
            salt: salt.to_string(),
            created_at: Some(Utc::now()),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_note(
        &self,
        user_id: i32,
        title: &str,
        content: &str,
    ) -> Result<Note, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_note_id += 1;
        let now = Utc::now();
        let note = Note {
            id: tables.next_note_id,
            title: title.to_string(),
            content: content.to_string(),
            user_id,
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.notes.push(note.clone());
        Ok(note)
    }

    async fn find_note(&self, id: i32, user_id: i32) -> Result<Option<Note>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .notes
            .iter()
            .find(|n| n.id == id && n.user_id == user_id)
            .cloned())
    }

    async fn update_note(
        &self,
        id: i32,
        user_id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Note>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(note) = tables
            .notes
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        else {
            return Ok(None);
        };

        if let Some(title) = title {
            note.title = title.to_string();
        }
        if let Some(content) = content {
            note.content = content.to_string();
        }
        note.updated_at = Some(Utc::now());
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: i32, user_id: i32) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.notes.len();
        tables.notes.retain(|n| !(n.id == id && n.user_id == user_id));
        Ok((before - tables.notes.len()) as u64)
    }
}
