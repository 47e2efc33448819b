//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        lists::{ListsService, PgListsService},
        products::{PgProductsService, ProductsService},
    },
    media::{CloudinaryClient, CloudinaryConfig, MediaService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Connection settings the services are built from.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,
    pub session_token_ttl_hours: u32,
    pub cloudinary: CloudinaryConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub lists: Arc<dyn ListsService>,
    pub accounts: Arc<dyn AccountsService>,
    pub auth: Arc<dyn AuthService>,
    pub media: Arc<dyn MediaService>,
}

impl AppContext {
    /// Build application context from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max(
            &settings.database_url,
            settings.database_max_connections,
        )
        .await
        .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        let db = Db::new(pool.clone());
        let media: Arc<dyn MediaService> = Arc::new(CloudinaryClient::new(settings.cloudinary));

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone(), Arc::clone(&media))),
            lists: Arc::new(PgListsService::new(db.clone())),
            accounts: Arc::new(PgAccountsService::new(db)),
            auth: Arc::new(PgAuthService::new(pool, settings.session_token_ttl_hours)),
            media,
        })
    }
}
