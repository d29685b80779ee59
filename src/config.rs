use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub uploads_dir: PathBuf,
    pub max_body_bytes: usize,
    /// When false, mutating routes accept requests without a session token and
    /// the caller is identified by the `X-UserID` header.
    pub require_auth: bool,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let log_format = match get_env_or("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" | "text" => LogFormat::Pretty,
            other => {
                return Err(Error::Config(format!(
                    "Invalid value for LOG_FORMAT: {}",
                    other
                )))
            }
        };

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            database_url: get_env_or("DATABASE_URL", "sqlite://photos.db"),
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_issuer: get_env_or("JWT_ISSUER", "photo-gallery"),
            uploads_dir: PathBuf::from(get_env_or("UPLOADS_DIR", "uploads")),
            max_body_bytes: get_env_parse_or("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            require_auth: get_env_parse_or("REQUIRE_AUTH", true)?,
            log_format,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_default_when_unset() {
        let value: u32 = get_env_parse_or("PHOTO_GALLERY_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn parse_rejects_garbage() {
        env::set_var("PHOTO_GALLERY_TEST_BAD_BOOL", "maybe");
        let err = get_env_parse_or("PHOTO_GALLERY_TEST_BAD_BOOL", true).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("PHOTO_GALLERY_TEST_BAD_BOOL")));
    }
}
