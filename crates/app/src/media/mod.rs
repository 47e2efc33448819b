//! Product image storage.
//!
//! Images live in a third-party media store; the catalog only keeps their
//! public URLs.

mod cloudinary;
mod errors;

use async_trait::async_trait;
use mockall::automock;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig, public_id_from_url};
pub use errors::MediaError;

use crate::domain::accounts::records::UserId;

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// An image to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct NewImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for NewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl NewImage {
    /// # Errors
    ///
    /// Rejects content types other than JPEG and PNG, and images over
    /// [`MAX_IMAGE_BYTES`].
    pub fn validate(&self) -> Result<(), MediaError> {
        if !ALLOWED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(MediaError::UnsupportedContentType(self.content_type.clone()));
        }

        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::TooLarge(self.bytes.len()));
        }

        Ok(())
    }

    /// File name without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }
}

#[automock]
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Store an image under the owner's folder and return its public URL.
    async fn upload_image(&self, owner: UserId, image: NewImage) -> Result<String, MediaError>;

    /// Delete previously uploaded images by URL.
    async fn delete_images(&self, urls: &[String]) -> Result<(), MediaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(content_type: &str, len: usize) -> NewImage {
        NewImage {
            file_name: "photo.front.png".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0; len],
        }
    }

    #[test]
    fn jpeg_and_png_are_accepted() {
        assert!(image("image/png", 10).validate().is_ok());
        assert!(image("image/jpeg", 10).validate().is_ok());
    }

    #[test]
    fn other_content_types_are_rejected() {
        let result = image("image/gif", 10).validate();

        assert!(
            matches!(result, Err(MediaError::UnsupportedContentType(ref t)) if t == "image/gif"),
            "expected UnsupportedContentType, got {result:?}"
        );
    }

    #[test]
    fn oversized_images_are_rejected() {
        assert!(image("image/png", MAX_IMAGE_BYTES).validate().is_ok());

        let result = image("image/png", MAX_IMAGE_BYTES + 1).validate();

        assert!(
            matches!(result, Err(MediaError::TooLarge(_))),
            "expected TooLarge, got {result:?}"
        );
    }

    #[test]
    fn stem_drops_only_the_last_extension() {
        assert_eq!(image("image/png", 1).stem(), "photo.front");

        let bare = NewImage {
            file_name: "photo".to_string(),
            ..image("image/png", 1)
        };
        assert_eq!(bare.stem(), "photo");
    }
}
