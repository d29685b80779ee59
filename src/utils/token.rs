use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::user::User;

/// Sessions always live for a full day; there is no refresh flow.
pub const SESSION_TTL_HOURS: i64 = 24;

pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub.parse().map_err(|_| Error::unauthorized())
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
}

impl SessionTokens {
    pub fn new(secret: &str, issuer: impl Into<String>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
        }
    }

    pub fn issue(&self, user: &User, issued_at: DateTime<Utc>) -> Result<IssuedToken> {
        let expires_at = issued_at + Duration::hours(SESSION_TTL_HOURS);
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[self.issuer.as_str()]);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 42,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let tokens = SessionTokens::new("secret", "photo-gallery");
        let now = Utc::now();
        let issued = tokens.issue(&user(), now).unwrap();

        let claims = tokens.verify(&issued.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "photo-gallery");
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_HOURS * 3600);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn rejects_foreign_secret_and_issuer() {
        let ours = SessionTokens::new("secret", "photo-gallery");
        let issued = ours.issue(&user(), Utc::now()).unwrap();

        let other_secret = SessionTokens::new("other", "photo-gallery");
        assert!(other_secret.verify(&issued.token).is_err());

        let other_issuer = SessionTokens::new("secret", "someone-else");
        assert!(other_issuer.verify(&issued.token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = SessionTokens::new("secret", "photo-gallery");
        let long_ago = Utc::now() - Duration::hours(SESSION_TTL_HOURS + 1);
        let issued = tokens.issue(&user(), long_ago).unwrap();
        assert!(tokens.verify(&issued.token).is_err());
    }
}
