//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{accounts::PgAccountsService, lists::PgListsService, products::PgProductsService},
    media::MockMediaService,
};

use super::db::TestDb;

pub struct TestContext {
    /// Keeps the database alive for the duration of the test.
    _db: TestDb,
    pub products: PgProductsService,
    pub lists: PgListsService,
    pub accounts: PgAccountsService,
    pub auth: PgAuthService,
}

impl TestContext {
    /// Services over a fresh database, with a media store that accepts any
    /// deletion and refuses uploads.
    pub async fn new() -> Self {
        let mut media = MockMediaService::new();
        media.expect_delete_images().returning(|_| Ok(()));
        media.expect_upload_image().never();

        Self::with_media(media).await
    }

    /// Services over a fresh database, using `media` for image side effects.
    pub async fn with_media(media: MockMediaService) -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            products: PgProductsService::new(db.clone(), Arc::new(media)),
            lists: PgListsService::new(db.clone()),
            accounts: PgAccountsService::new(db),
            auth: PgAuthService::new(test_db.pool().clone(), 24),
            _db: test_db,
        }
    }
}
