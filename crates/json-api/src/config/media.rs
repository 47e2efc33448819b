//! Media Config

use clap::Args;
use marketplace_app::media::CloudinaryConfig;

/// Cloudinary settings.
#[derive(Debug, Args)]
pub struct MediaConfig {
    /// Cloudinary API root
    #[arg(
        long,
        env = "CLOUDINARY_API_BASE",
        default_value = "https://api.cloudinary.com/v1_1"
    )]
    pub api_base: String,

    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloud_name: String,

    #[arg(long, env = "CLOUDINARY_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub api_secret: String,

    /// Unsigned upload preset
    #[arg(long, env = "CLOUDINARY_UPLOAD_PRESET")]
    pub upload_preset: String,

    /// Folder product images are stored under
    #[arg(long, env = "CLOUDINARY_FOLDER", default_value = "mama-ologi")]
    pub folder: String,
}

impl MediaConfig {
    #[must_use]
    pub fn cloudinary_config(&self) -> CloudinaryConfig {
        CloudinaryConfig {
            api_base: self.api_base.clone(),
            cloud_name: self.cloud_name.clone(),
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            upload_preset: self.upload_preset.clone(),
            folder: self.folder.clone(),
        }
    }
}
