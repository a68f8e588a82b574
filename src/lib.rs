use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod jwt_auth;
pub mod model;
pub mod password;
pub mod repository;
pub mod request;
pub mod response;
pub mod route;

#[cfg(test)]
mod tests;

use config::Config;
use repository::Repository;

pub struct AppState {
    pub db: Arc<dyn Repository>,
    pub config: Config,
}
