use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::info;

use crate::error::AppError;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const JWT_KEY: &str = "JWT_KEY";
pub const JWT_MAXAGE: &str = "JWT_MAXAGE";
pub const PORT: &str = "PORT";
pub const DB_TIMEOUT_SECS: &str = "DB_TIMEOUT_SECS";

/// One year, in minutes.
pub const MAX_JWT_MAXAGE: i64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    /// Token and cookie lifetime, in minutes.
    pub jwt_maxage: i64,
    pub port: u16,
    pub db_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup(JWT_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config(format!("{JWT_KEY} must be set")))?;

        let jwt_maxage = parse_or(&lookup, JWT_MAXAGE, 60 * 24 * 28)?;
        if !(1..=MAX_JWT_MAXAGE).contains(&jwt_maxage) {
            return Err(AppError::Config(format!(
                "{JWT_MAXAGE} must be between 1 and {MAX_JWT_MAXAGE} minutes, got {jwt_maxage}"
            )));
        }

        Ok(Self {
            jwt_secret,
            jwt_maxage,
            port: parse_or(&lookup, PORT, 3000)?,
            db_timeout: Duration::from_secs(parse_or(&lookup, DB_TIMEOUT_SECS, 5)?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {key} value {raw:?}: {e}"))),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
