#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use photo_gallery_backend::{
    config::{Config, LogFormat, DEFAULT_MAX_BODY_BYTES},
    database::pool::{create_pool, run_migrations},
    routes, AppState,
};
use serde_json::{json, Value as JsonValue};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "photo-gallery-test-boundary";

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub state: AppState,
    // Keeps the uploads directory alive for the duration of the test.
    pub uploads: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: JsonValue,
    pub raw: Vec<u8>,
}

impl TestResponse {
    pub fn set_cookie(&self) -> String {
        self.headers
            .get(header::SET_COOKIE)
            .expect("missing Set-Cookie header")
            .to_str()
            .unwrap()
            .to_string()
    }
}

pub async fn setup_app(require_auth: bool) -> TestApp {
    let uploads = tempfile::tempdir().expect("tempdir");
    let config = Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        database_max_connections: 1,
        jwt_secret: "test_secret_key".into(),
        jwt_issuer: "photo-gallery-test".into(),
        uploads_dir: uploads.path().join("uploads"),
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        require_auth,
        log_format: LogFormat::Pretty,
    };

    let pool = create_pool(&config).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");

    let state = AppState::new(pool.clone(), config);
    let app = routes::router(state.clone());

    TestApp {
        app,
        pool,
        state,
        uploads,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let raw = to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec();
    let body = serde_json::from_slice(&raw).unwrap_or(JsonValue::Null);
    TestResponse {
        status,
        headers,
        body,
        raw,
    }
}

pub fn request(
    method: Method,
    uri: &str,
    body: Option<JsonValue>,
    headers: &[(&str, String)],
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("authorization", format!("Bearer {}", token))
}

pub fn user_header(user_id: i64) -> (&'static str, String) {
    ("x-userid", user_id.to_string())
}

pub fn multipart_request(
    uri: &str,
    field: &str,
    filename: &str,
    data: &[u8],
    headers: &[(&str, String)],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    for (name, value) in headers {
        builder = builder.header(*name, value);
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn register(app: &Router, username: &str, email: &str, password: &str) -> TestResponse {
    send(
        app,
        request(
            Method::POST,
            "/users/register",
            Some(json!({ "username": username, "email": email, "password": password })),
            &[],
        ),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        request(
            Method::POST,
            "/users/login",
            Some(json!({ "email": email, "password": password })),
            &[],
        ),
    )
    .await
}

/// Registers and logs in, returning the user id and session token.
pub async fn signed_in_user(app: &Router, username: &str, email: &str) -> (i64, String) {
    let registered = register(app, username, email, "secret123").await;
    assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);
    let user_id = registered.body["user"]["id"].as_i64().expect("user id");

    let logged_in = login(app, email, "secret123").await;
    assert_eq!(logged_in.status, StatusCode::OK, "{:?}", logged_in.body);
    let token = logged_in.body["token"].as_str().expect("token").to_string();

    (user_id, token)
}

pub async fn create_photo(app: &Router, user_id: i64, url: &str, headers: &[(&str, String)]) -> i64 {
    let resp = send(
        app,
        request(
            Method::POST,
            "/photos",
            Some(json!({ "user_id": user_id, "url": url })),
            headers,
        ),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{:?}", resp.body);
    resp.body["photo"]["id"].as_i64().expect("photo id")
}

pub async fn photo_url(pool: &SqlitePool, photo_id: i64) -> Option<String> {
    sqlx::query_scalar::<_, String>("SELECT url FROM photos WHERE id = ?")
        .bind(photo_id)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn photo_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photos")
        .fetch_one(pool)
        .await
        .unwrap()
}
