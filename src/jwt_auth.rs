use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::AppError, AppState};

pub const COOKIE_NAME: &str = "NoteApp";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Id of the user the token was issued to.
    pub id: i32,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn issue_token(
    user_id: i32,
    email: &str,
    secret: &[u8],
    maxage_minutes: i64,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let exp = chrono::Duration::try_minutes(maxage_minutes)
        .filter(|lifetime| *lifetime > chrono::Duration::zero())
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            AppError::Config(format!("Invalid token lifetime: {maxage_minutes} minutes"))
        })?;

    let claims = TokenClaims {
        id: user_id,
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(AppError::TokenEncoding)
}

/// Checks signature and expiry. Depends only on the token, the secret and the clock.
pub fn verify_token(token: Option<&str>, secret: &[u8]) -> Result<TokenClaims, AppError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingToken)?;

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("Rejected token: {e}");
        AppError::InvalidToken(e)
    })
}

pub fn session_cookie(token: String, maxage_minutes: i64) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .max_age(time::Duration::seconds(maxage_minutes.saturating_mul(60)))
        .same_site(SameSite::Lax)
        .http_only(true)
        .build()
}

pub fn expired_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::hours(-1))
        .same_site(SameSite::Lax)
        .http_only(true)
        .build()
}

pub async fn auth(
    cookie_jar: CookieJar,
    State(data): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let token = cookie_jar.get(COOKIE_NAME).map(|cookie| cookie.value());
    let claims = verify_token(token, data.config.jwt_secret.as_bytes())?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
