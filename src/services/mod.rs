pub mod auth_service;
pub mod file_store;
pub mod photo_service;
