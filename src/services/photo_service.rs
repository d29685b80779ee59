use std::sync::Arc;

use bytes::Bytes;
use sqlx::SqlitePool;

use crate::dto::photo_dto::{CreatePhotoPayload, UpdatePhotoPayload};
use crate::error::{Error, Result};
use crate::models::photo::Photo;
use crate::services::file_store::{storage_key, FileStore};
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct PhotoService {
    pool: SqlitePool,
    files: Arc<dyn FileStore>,
}

impl PhotoService {
    pub fn new(pool: SqlitePool, files: Arc<dyn FileStore>) -> Self {
        Self { pool, files }
    }

    pub async fn create(&self, payload: CreatePhotoPayload) -> Result<Photo> {
        validate(&payload)?;

        if !self.user_exists(payload.user_id).await? {
            return Err(Error::NotFound("User not found".to_string()));
        }

        self.insert(payload.user_id, &payload.url).await
    }

    pub async fn list(&self) -> Result<Vec<Photo>> {
        let photos = sqlx::query_as::<_, Photo>("SELECT id, user_id, url FROM photos ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::storage("Error fetching photos"))?;

        Ok(photos)
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Photo>> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT id, user_id, url FROM photos WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::storage("Error fetching photos"))?;

        Ok(photos)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Photo> {
        let photo = sqlx::query_as::<_, Photo>("SELECT id, user_id, url FROM photos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::storage("Error fetching photo"))?;

        photo.ok_or_else(|| Error::NotFound("Photo not found".to_string()))
    }

    /// Applies a patch to a photo already resolved by [`Self::owned_photo`].
    pub async fn update(&self, photo: &Photo, payload: UpdatePhotoPayload) -> Result<Photo> {
        validate(&payload)?;

        let updated = sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos
            SET url = COALESCE(?, url)
            WHERE id = ?
            RETURNING id, user_id, url
            "#,
        )
        .bind(payload.url)
        .bind(photo.id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::storage("Error updating photo"))?;

        tracing::info!(photo_id = photo.id, user_id = photo.user_id, "photo updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64, caller: Option<i64>) -> Result<()> {
        self.owned_photo(id, caller).await?;

        sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::storage("Error deleting photo"))?;

        tracing::info!(photo_id = id, user_id = ?caller, "photo deleted");
        Ok(())
    }

    /// Re-uploading the same file name for a user overwrites the stored bytes
    /// and adds another row pointing at the same locator.
    pub async fn upload(&self, user_id: i64, original_filename: &str, data: Bytes) -> Result<Photo> {
        let key = storage_key(user_id, original_filename)
            .ok_or_else(|| Error::BadRequest("Error getting file from form-data".to_string()))?;

        let locator = self.files.save(&key, data).await.map_err(|e| {
            tracing::error!(error = %e, key = %key, "file store rejected upload");
            Error::Internal("Error saving file".to_string())
        })?;

        let photo = self.insert(user_id, &locator).await?;
        tracing::info!(photo_id = photo.id, user_id, locator = %photo.url, "photo uploaded");
        Ok(photo)
    }

    async fn insert(&self, user_id: i64, url: &str) -> Result<Photo> {
        let photo = sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (user_id, url) VALUES (?, ?) RETURNING id, user_id, url",
        )
        .bind(user_id)
        .bind(url)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::storage("Error creating photo"))?;

        Ok(photo)
    }

    /// Not found comes before the ownership check. `caller` is `None` when the
    /// request carries no identity, which never owns anything.
    pub async fn owned_photo(&self, id: i64, caller: Option<i64>) -> Result<Photo> {
        let photo = self.get_by_id(id).await?;
        if !caller.is_some_and(|user_id| photo.is_owned_by(user_id)) {
            tracing::warn!(photo_id = id, caller = ?caller, "rejected mutation by non-owner");
            return Err(Error::unauthorized());
        }
        Ok(photo)
    }

    async fn user_exists(&self, user_id: i64) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::storage("Error retrieving user"))?;

        Ok(found.is_some())
    }
}
