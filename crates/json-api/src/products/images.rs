//! Base64 image payloads and their upload to the media store.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use marketplace_app::{
    domain::accounts::records::UserId,
    media::{MediaError, MediaService, NewImage},
};

/// An image sent inline with a product request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImagePayload {
    /// Original file name, used to derive the stored name.
    pub file_name: String,

    /// `image/jpeg` or `image/png`.
    pub content_type: String,

    /// Base64-encoded file contents.
    pub data: String,
}

impl ImagePayload {
    /// Decode and check the image before any side effect happens.
    pub(crate) fn decode(self) -> Result<NewImage, StatusError> {
        let bytes = STANDARD.decode(self.data.trim()).map_err(|_ignored| {
            StatusError::bad_request()
                .brief(format!("image {} is not valid base64", self.file_name))
        })?;

        let image = NewImage {
            file_name: self.file_name,
            content_type: self.content_type,
            bytes,
        };

        image
            .validate()
            .map_err(|source| StatusError::bad_request().brief(source.to_string()))?;

        Ok(image)
    }
}

pub(crate) fn decode_all(payloads: Vec<ImagePayload>) -> Result<Vec<NewImage>, StatusError> {
    payloads.into_iter().map(ImagePayload::decode).collect()
}

/// Upload `images` in order. If one fails, the ones already stored are
/// removed again.
pub(crate) async fn upload_all(
    media: &dyn MediaService,
    owner: UserId,
    images: Vec<NewImage>,
) -> Result<Vec<String>, StatusError> {
    let mut urls = Vec::with_capacity(images.len());

    for image in images {
        match media.upload_image(owner, image).await {
            Ok(url) => urls.push(url),
            Err(source) => {
                error!("failed to upload product image: {source}");

                discard(media, &urls).await;

                return Err(upload_error(&source));
            }
        }
    }

    Ok(urls)
}

/// Best-effort removal of images that will not be referenced by any product.
pub(crate) async fn discard(media: &dyn MediaService, urls: &[String]) {
    if urls.is_empty() {
        return;
    }

    if let Err(source) = media.delete_images(urls).await {
        warn!(count = urls.len(), "failed to discard unused images: {source}");
    }
}

fn upload_error(source: &MediaError) -> StatusError {
    if source.is_invalid_image() {
        StatusError::bad_request().brief(source.to_string())
    } else {
        StatusError::internal_server_error()
    }
}
