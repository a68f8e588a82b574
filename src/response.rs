use chrono::prelude::*;
use serde::Serialize;

use crate::model::{Note, User};

/// A user as it may leave the server: no hash, no salt.
#[derive(Serialize, Debug)]
pub struct FilteredUser {
    pub id: i32,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&User> for FilteredUser {
    fn from(user: &User) -> Self {
        FilteredUser {
            id: user.id,
            email: user.email.to_owned(),
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct FilteredNote {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Note> for FilteredNote {
    fn from(note: &Note) -> Self {
        FilteredNote {
            id: note.id,
            title: note.title.to_owned(),
            content: note.content.to_owned(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub success: bool,
    pub user: FilteredUser,
}

#[derive(Serialize, Debug)]
pub struct NoteResponse {
    pub success: bool,
    pub note: FilteredNote,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}
