use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::{
    dto::auth_dto::{
        LoginPayload, LoginResponse, MessageResponse, RegisterPayload, RegisterResponse,
        UpdateUserPayload,
    },
    error::Result,
    middleware::auth::{ensure_self, CallerId},
    utils::{
        extract::{JsonBody, PathParam},
        time::to_cookie_expiry,
        token::{SESSION_COOKIE, SESSION_TTL_HOURS},
    },
    AppState,
};

#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid body, email or password", body = MessageResponse),
        (status = 500, description = "Storage failure, e.g. duplicate email", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let user = state.auth_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "HttpOnly session cookie `token`"))),
        (status = 400, description = "Invalid body", body = MessageResponse),
        (status = 401, description = "Invalid email or password", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<LoginPayload>,
) -> Result<impl IntoResponse> {
    let issued = state.auth_service.login(payload).await?;

    let cookie = Cookie::build((SESSION_COOKIE, issued.token.clone()))
        .path("/")
        .http_only(true)
        .expires(to_cookie_expiry(issued.expires_at))
        .max_age(time::Duration::hours(SESSION_TTL_HOURS));

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".to_string(),
            token: issued.token,
            expires_at: issued.expires_at,
        }),
    ))
}

/// Only clears the client cookie; issued tokens stay valid until they expire.
#[utoipa::path(
    post,
    path = "/users/logout",
    tag = "users",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let cleared = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH);

    (jar.add(cleared), Json(MessageResponse::new("Logout successful")))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid payload", body = MessageResponse),
        (status = 401, description = "Not signed in as this user", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    caller: Option<CallerId>,
    PathParam(user_id): PathParam<i64>,
    JsonBody(payload): JsonBody<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    ensure_self(&state, caller, user_id)?;
    state.auth_service.update_user(user_id, payload).await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and their photos deleted", body = MessageResponse),
        (status = 401, description = "Not signed in as this user", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: Option<CallerId>,
    PathParam(user_id): PathParam<i64>,
) -> Result<impl IntoResponse> {
    ensure_self(&state, caller, user_id)?;
    state.auth_service.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
