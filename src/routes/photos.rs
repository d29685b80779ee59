use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::{
        auth_dto::MessageResponse,
        photo_dto::{CreatePhotoPayload, PhotoCreatedResponse, PhotoResponse, UpdatePhotoPayload},
    },
    error::{Error, Result},
    middleware::auth::{ensure_self, CallerId},
    utils::extract::{JsonBody, PathParam},
    AppState,
};

const UPLOAD_FIELD: &str = "photo";

#[utoipa::path(
    get,
    path = "/photos",
    tag = "photos",
    responses(
        (status = 200, description = "Every photo", body = [PhotoResponse]),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_photos(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let photos = state.photo_service.list().await?;
    let items: Vec<PhotoResponse> = photos.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/photos/user/{user_id}",
    tag = "photos",
    params(
        ("user_id" = i64, Path, description = "Owner ID")
    ),
    responses(
        (status = 200, description = "Photos owned by the user", body = [PhotoResponse]),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_user_photos(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
) -> Result<impl IntoResponse> {
    let photos = state.photo_service.list_by_user(user_id).await?;
    let items: Vec<PhotoResponse> = photos.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/photos",
    tag = "photos",
    request_body = CreatePhotoPayload,
    responses(
        (status = 201, description = "Photo created", body = PhotoCreatedResponse),
        (status = 400, description = "Invalid payload", body = MessageResponse),
        (status = 401, description = "Not signed in as the owner", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn create_photo(
    State(state): State<AppState>,
    caller: Option<CallerId>,
    JsonBody(payload): JsonBody<CreatePhotoPayload>,
) -> Result<impl IntoResponse> {
    ensure_self(&state, caller, payload.user_id)?;
    let photo = state.photo_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(PhotoCreatedResponse {
            message: "Photo created successfully".to_string(),
            photo: photo.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/photos/{photo_id}",
    tag = "photos",
    params(
        ("photo_id" = i64, Path, description = "Photo ID")
    ),
    request_body = UpdatePhotoPayload,
    responses(
        (status = 200, description = "Photo updated", body = MessageResponse),
        (status = 400, description = "Invalid payload", body = MessageResponse),
        (status = 401, description = "Caller does not own the photo", body = MessageResponse),
        (status = 404, description = "Photo not found", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn update_photo(
    State(state): State<AppState>,
    caller: Option<CallerId>,
    PathParam(photo_id): PathParam<i64>,
    body: std::result::Result<Json<UpdatePhotoPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    // Existence and ownership are settled before the body is looked at.
    let photo = state
        .photo_service
        .owned_photo(photo_id, caller.map(|CallerId(id)| id))
        .await?;
    let Json(payload) = body?;

    state.photo_service.update(&photo, payload).await?;
    Ok(Json(MessageResponse::new("Photo updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/photos/{photo_id}",
    tag = "photos",
    params(
        ("photo_id" = i64, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Photo deleted", body = MessageResponse),
        (status = 401, description = "Caller does not own the photo", body = MessageResponse),
        (status = 404, description = "Photo not found", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn delete_photo(
    State(state): State<AppState>,
    caller: Option<CallerId>,
    PathParam(photo_id): PathParam<i64>,
) -> Result<impl IntoResponse> {
    state
        .photo_service
        .delete(photo_id, caller.map(|CallerId(id)| id))
        .await?;
    Ok(Json(MessageResponse::new("Photo deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/photos/upload/{user_id}",
    tag = "photos",
    params(
        ("user_id" = i64, Path, description = "Owner ID")
    ),
    responses(
        (status = 201, description = "File stored and photo created", body = PhotoCreatedResponse),
        (status = 400, description = "No `photo` file in the form", body = MessageResponse),
        (status = 401, description = "Not signed in as the owner", body = MessageResponse),
        (status = 500, description = "File or storage failure", body = MessageResponse)
    )
)]
#[axum::debug_handler]
pub async fn upload_photo(
    State(state): State<AppState>,
    caller: Option<CallerId>,
    PathParam(user_id): PathParam<i64>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse> {
    ensure_self(&state, caller, user_id)?;

    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "upload is not multipart");
        missing_file()
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!(error = %e, "failed to read multipart field");
        missing_file()
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string).ok_or_else(missing_file)?;
        let data = field.bytes().await.map_err(|e| {
            tracing::debug!(error = %e, "failed to read upload body");
            missing_file()
        })?;

        let photo = state.photo_service.upload(user_id, &filename, data).await?;
        return Ok((
            StatusCode::CREATED,
            Json(PhotoCreatedResponse {
                message: "Photo uploaded successfully".to_string(),
                photo: photo.into(),
            }),
        ));
    }

    Err(missing_file())
}

fn missing_file() -> Error {
    Error::BadRequest("Error getting file from form-data".to_string())
}
