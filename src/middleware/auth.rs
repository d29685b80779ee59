use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::Error;
use crate::utils::token::{Claims, SESSION_COOKIE};
use crate::AppState;

/// Legacy identity header, honoured only when `REQUIRE_AUTH` is off.
pub const USER_ID_HEADER: &str = "x-userid";

/// Session cookie first, then `Authorization: Bearer`.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

pub async fn require_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let strict = state.config.require_auth;

    let Some(token) = session_token(req.headers()) else {
        if strict {
            return Error::Unauthorized("Missing session token".to_string()).into_response();
        }
        return next.run(req).await;
    };

    match state.auth_service.tokens().verify(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "rejected session token");
            if strict {
                Error::Unauthorized("Invalid session token".to_string()).into_response()
            } else {
                next.run(req).await
            }
        }
    }
}

/// The user a mutating request acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for CallerId {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return claims.user_id().map(CallerId);
        }

        if state.config.require_auth {
            return Err(Error::unauthorized());
        }

        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .map(CallerId)
            .ok_or_else(Error::unauthorized)
    }
}

/// Requires the caller to act as `user_id` when sessions are enforced. Legacy
/// mode accepts any caller.
pub fn ensure_self(state: &AppState, caller: Option<CallerId>, user_id: i64) -> Result<(), Error> {
    if !state.config.require_auth {
        return Ok(());
    }
    match caller {
        Some(CallerId(id)) if id == user_id => Ok(()),
        _ => {
            tracing::warn!(target_user = user_id, caller = ?caller, "rejected action on another account");
            Err(Error::unauthorized())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; token=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_used_without_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn cleared_cookie_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(session_token(&headers), None);
    }
}
