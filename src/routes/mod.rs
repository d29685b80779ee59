pub mod docs;
pub mod health;
pub mod photos;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{any, get, post, put},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{auth::require_session, cors::session_cors};
use crate::services::file_store::UPLOADS_ROUTE;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/logout", any(users::logout))
        .route("/photos", get(photos::list_photos))
        .route("/photos/user/:user_id", get(photos::list_user_photos));

    let protected = Router::new()
        .route(
            "/users/:user_id",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/photos", post(photos::create_photo))
        .route(
            "/photos/:photo_id",
            put(photos::update_photo).delete(photos::delete_photo),
        )
        .route("/photos/upload/:user_id", post(photos::upload_photo))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    public
        .merge(protected)
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&state.config.uploads_dir))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(session_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
