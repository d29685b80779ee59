use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    auth_dto::{
        LoginPayload, LoginResponse, MessageResponse, RegisterPayload, RegisterResponse,
        UpdateUserPayload, UserResponse,
    },
    photo_dto::{CreatePhotoPayload, PhotoCreatedResponse, PhotoResponse, UpdatePhotoPayload},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::users::logout,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::photos::list_photos,
        crate::routes::photos::list_user_photos,
        crate::routes::photos::create_photo,
        crate::routes::photos::update_photo,
        crate::routes::photos::delete_photo,
        crate::routes::photos::upload_photo,
    ),
    components(schemas(
        RegisterPayload,
        LoginPayload,
        UpdateUserPayload,
        UserResponse,
        RegisterResponse,
        LoginResponse,
        MessageResponse,
        CreatePhotoPayload,
        UpdatePhotoPayload,
        PhotoResponse,
        PhotoCreatedResponse,
    )),
    tags(
        (name = "users", description = "Registration, sessions and accounts"),
        (name = "photos", description = "Photo records and uploads")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
