//! Server configuration module

use clap::Parser;
use marketplace_app::context::AppSettings;

use crate::config::{
    auth::AuthConfig, db::DatabaseConfig, media::MediaConfig, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod media;
pub(crate) mod observability;
pub(crate) mod server;

/// Marketplace JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "marketplace-json", about = "Marketplace JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Product image store settings.
    #[command(flatten)]
    pub media: MediaConfig,

    /// Session token settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings the application services are built from.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            database_max_connections: self.database.max_connections,
            run_migrations: self.database.run_migrations,
            session_token_ttl_hours: self.auth.session_token_ttl_hours,
            cloudinary: self.media.cloudinary_config(),
        }
    }
}
