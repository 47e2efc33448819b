//! Cloudinary client for product images.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use jiff::Timestamp;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    domain::accounts::records::UserId,
    media::{MediaError, MediaService, NewImage},
};

pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Configuration for a Cloudinary account.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    /// API root, e.g. `"https://api.cloudinary.com/v1_1"`.
    pub api_base: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,

    /// Unsigned upload preset.
    pub upload_preset: String,

    /// Top-level folder all product images are stored under.
    pub folder: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http: Client,
}

impl CloudinaryClient {
    #[must_use]
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{path}",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl MediaService for CloudinaryClient {
    async fn upload_image(&self, owner: UserId, image: NewImage) -> Result<String, MediaError> {
        image.validate()?;

        let body = serde_json::json!({
            "file": format!("data:{};base64,{}", image.content_type, BASE64.encode(&image.bytes)),
            "upload_preset": self.config.upload_preset,
            "folder": format!("{}/u{owner}", self.config.folder),
            "public_id": format!("{}-{}", image.stem(), Timestamp::now().as_millisecond()),
        });

        let response = self
            .http
            .post(self.url("image/upload"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaError::UnexpectedResponse(format!(
                "upload request failed with status {status}: {text}"
            )));
        }

        let parsed: UploadResponse = response.json().await?;

        debug!(owner = %owner, url = %parsed.secure_url, "uploaded image");

        Ok(parsed.secure_url)
    }

    async fn delete_images(&self, urls: &[String]) -> Result<(), MediaError> {
        let public_ids: Vec<(&str, String)> = urls
            .iter()
            .filter_map(|url| {
                let id = public_id_from_url(url, &self.config.folder);

                if id.is_none() {
                    warn!(url = %url, "skipping image outside the media folder");
                }

                id.map(|id| ("public_ids[]", id))
            })
            .collect();

        if public_ids.is_empty() {
            return Ok(());
        }

        let response = self
            .http
            .delete(self.url("resources/image/upload"))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&public_ids)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MediaError::UnexpectedResponse(format!(
                "delete request failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Recover the public id from a delivery URL: the path from `folder` onward,
/// without the file extension.
///
/// Returns `None` when the URL is not under `folder`.
#[must_use]
pub fn public_id_from_url(url: &str, folder: &str) -> Option<String> {
    let needle = format!("/{folder}/");
    let start = url.find(&needle)? + 1;
    let path = &url[start..];

    let id = match path.rsplit_once('.') {
        Some((id, extension)) if !extension.contains('/') => id,
        _ => path,
    };

    Some(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_id_strips_version_and_extension() {
        let url = "https://res.cloudinary.com/demo/image/upload/v1712/mama-ologi/u7/shea-1712000.png";

        assert_eq!(
            public_id_from_url(url, "mama-ologi").as_deref(),
            Some("mama-ologi/u7/shea-1712000")
        );
    }

    #[test]
    fn public_id_without_extension_is_kept_whole() {
        let url = "https://res.cloudinary.com/demo/image/upload/mama-ologi/u7/shea";

        assert_eq!(
            public_id_from_url(url, "mama-ologi").as_deref(),
            Some("mama-ologi/u7/shea")
        );
    }

    #[test]
    fn urls_outside_the_folder_have_no_public_id() {
        let url = "https://example.com/images/shea.png";

        assert_eq!(public_id_from_url(url, "mama-ologi"), None);
    }

    #[tokio::test]
    async fn deleting_only_foreign_urls_makes_no_request() {
        let client = CloudinaryClient::new(CloudinaryConfig {
            api_base: "http://127.0.0.1:9".to_string(),
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            upload_preset: "preset".to_string(),
            folder: "mama-ologi".to_string(),
        });

        let result = client
            .delete_images(&["https://example.com/images/shea.png".to_string()])
            .await;

        assert!(result.is_ok(), "expected no request, got {result:?}");
    }
}
