use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;

use crate::{
    error::AppError,
    jwt_auth::{expired_cookie, issue_token, session_cookie, TokenClaims},
    password::{generate_salt, hash_password, verify_password},
    request::*,
    response::*,
    AppState,
};

fn parse_note_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidId(raw.to_string()))
}

pub async fn register_user_handler(
    State(data): State<Arc<AppState>>,
    AppJson(body): AppJson<RegisterUser>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&body.email);
    if email.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let salt = generate_salt();
    let hashed_password = hash_password(&body.password, &salt)?;

    let user = data
        .db
        .create_user(&email, &hashed_password, salt.as_str())
        .await?;

    info!(user_id = user.id, "Registered user");
    Ok(Json(UserResponse {
        success: true,
        user: FilteredUser::from(&user),
    }))
}

pub async fn login_user_handler(
    State(data): State<Arc<AppState>>,
    AppJson(body): AppJson<LoginUser>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&body.email);
    let user = data
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&body.password, &user.password) {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(
        user.id,
        &user.email,
        data.config.jwt_secret.as_bytes(),
        data.config.jwt_maxage,
    )?;
    let cookie = session_cookie(token.to_owned(), data.config.jwt_maxage);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(TokenResponse {
            success: true,
            token,
        }),
    ))
}

pub async fn logout_handler() -> Result<impl IntoResponse, AppError> {
    Ok((
        [(header::SET_COOKIE, expired_cookie().to_string())],
        Json(MessageResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    ))
}

pub async fn post_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(token): Extension<TokenClaims>,
    AppJson(body): AppJson<PostNote>,
) -> Result<impl IntoResponse, AppError> {
    let note = data
        .db
        .create_note(token.id, &body.title, &body.content)
        .await?;

    Ok(Json(NoteResponse {
        success: true,
        note: FilteredNote::from(&note),
    }))
}

pub async fn get_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let note_id = parse_note_id(&id)?;
    let note = data
        .db
        .find_note(note_id, token.id)
        .await?
        .ok_or(AppError::NoteNotFound)?;

    Ok(Json(NoteResponse {
        success: true,
        note: FilteredNote::from(&note),
    }))
}

pub async fn update_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<String>,
    AppJson(body): AppJson<UpdateNote>,
) -> Result<impl IntoResponse, AppError> {
    let note_id = parse_note_id(&id)?;
    if body.title.is_none() && body.content.is_none() {
        return Err(AppError::Validation(
            "Provide a title or content to update".to_string(),
        ));
    }

    let note = data
        .db
        .update_note(
            note_id,
            token.id,
            body.title.as_deref(),
            body.content.as_deref(),
        )
        .await?
        .ok_or(AppError::NoteNotFound)?;

    Ok(Json(NoteResponse {
        success: true,
        note: FilteredNote::from(&note),
    }))
}

pub async fn delete_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let note_id = parse_note_id(&id)?;
    let deleted = data.db.delete_note(note_id, token.id).await?;
    if deleted == 0 {
        return Err(AppError::NoteNotFound);
    }

    info!(note_id, user_id = token.id, "Deleted note");
    Ok(Json(MessageResponse {
        success: true,
        message: "Note deleted successfully".to_string(),
    }))
}
