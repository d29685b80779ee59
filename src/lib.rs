pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    auth_service::AuthService,
    file_store::{FileStore, LocalFileStore},
    photo_service::PhotoService,
};
use crate::utils::token::SessionTokens;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub photo_service: PhotoService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let files = Arc::new(LocalFileStore::new(config.uploads_dir.clone()));
        Self::with_file_store(pool, config, files)
    }

    pub fn with_file_store(pool: SqlitePool, config: Config, files: Arc<dyn FileStore>) -> Self {
        let tokens = SessionTokens::new(&config.jwt_secret, config.jwt_issuer.clone());
        let auth_service = AuthService::new(pool.clone(), tokens);
        let photo_service = PhotoService::new(pool.clone(), files);

        Self {
            pool,
            config: Arc::new(config),
            auth_service,
            photo_service,
        }
    }
}
