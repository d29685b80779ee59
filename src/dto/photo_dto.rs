use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::photo::Photo;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePhotoPayload {
    pub user_id: i64,
    #[validate(length(min = 1, max = 300))]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePhotoPayload {
    #[validate(length(min = 1, max = 300))]
    pub url: Option<String>,
}

/// Outward shape of a photo; the owner id stays server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhotoResponse {
    pub id: i64,
    pub url: String,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            url: photo.url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoCreatedResponse {
    pub message: String,
    pub photo: PhotoResponse,
}
