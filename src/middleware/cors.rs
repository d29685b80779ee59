use axum::http::{header, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Mirrors the request origin so the session cookie can travel with
/// credentialed browser requests.
pub fn session_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static(super::auth::USER_ID_HEADER),
        ])
}
