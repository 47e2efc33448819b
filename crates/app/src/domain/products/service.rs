//! Products service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    database::Db,
    domain::{
        accounts::{records::UserId, repository::PgAccountsRepository},
        products::{
            data::{NewProduct, PAGE_SIZE, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductDetails, ProductId, ProductPage, ProductRecord},
            repository::PgProductsRepository,
        },
    },
    media::MediaService,
};

#[derive(Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    accounts: PgAccountsRepository,
    media: Arc<dyn MediaService>,
}

impl fmt::Debug for PgProductsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgProductsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, media: Arc<dyn MediaService>) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            accounts: PgAccountsRepository::new(),
            media,
        }
    }
}

/// Number of pages needed to show `count` products.
fn page_count(count: i64) -> u32 {
    let page_size = i64::from(PAGE_SIZE);
    let pages = (count.max(0) + page_size - 1) / page_size;

    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn create_product(
        &self,
        owner: UserId,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let mut tx = self.db.begin().await?;

        let account = match self.accounts.get_account(&mut tx, owner).await {
            Ok(account) => account,
            Err(sqlx::Error::RowNotFound) => return Err(ProductsServiceError::Forbidden),
            Err(error) => return Err(error.into()),
        };

        if !account.role.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let created = self.repository.create_product(&mut tx, owner, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_products(&self, page: u32) -> Result<ProductPage, ProductsServiceError> {
        if page == 0 {
            return Err(ProductsServiceError::InvalidPage);
        }

        let limit = i64::from(PAGE_SIZE);
        let offset = i64::from(page - 1) * limit;

        let mut tx = self.db.begin().await?;

        let count = self.repository.count_products(&mut tx).await?;
        let products = self.repository.list_products(&mut tx, limit, offset).await?;

        tx.commit().await?;

        Ok(ProductPage {
            page,
            page_count: page_count(count),
            products,
        })
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product_details(
        &self,
        product: ProductId,
    ) -> Result<ProductDetails, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let details = self.repository.get_product_details(&mut tx, product).await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn update_product(
        &self,
        actor: UserId,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let Some(current) = self.repository.lock_product(&mut tx, product).await? else {
            return Err(ProductsServiceError::NotFound);
        };

        if current.owner_id != actor {
            return Err(ProductsServiceError::Forbidden);
        }

        let updated = self.repository.update_product(&mut tx, product, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn soft_delete_product(
        &self,
        product: ProductId,
        remaining_images: Vec<String>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self
            .repository
            .soft_delete_product(&mut tx, product, remaining_images)
            .await?;

        tx.commit().await?;

        Ok(deleted)
    }

    async fn delete_product(
        &self,
        actor: UserId,
        product: ProductId,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(current) = self.repository.lock_product(&mut tx, product).await? else {
            return Err(ProductsServiceError::NotFound);
        };

        if current.owner_id != actor {
            return Err(ProductsServiceError::Forbidden);
        }

        // The row lock is held across the media call; dropping `tx` on failure
        // releases it and leaves the product untouched.
        if !current.images.is_empty() {
            self.media
                .delete_images(&current.images)
                .await
                .map_err(|error| {
                    warn!(product = %product, error = %error, "failed to delete product images");
                    ProductsServiceError::Media(error)
                })?;
        }

        let deleted = self
            .repository
            .soft_delete_product(&mut tx, product, Vec::new())
            .await?;

        tx.commit().await?;

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Creates a product owned by `owner`, who must be an admin.
    async fn create_product(
        &self,
        owner: UserId,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve one 1-indexed page of live products.
    async fn list_products(&self, page: u32) -> Result<ProductPage, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve a single live product with its owner's contact details.
    async fn get_product_details(
        &self,
        product: ProductId,
    ) -> Result<ProductDetails, ProductsServiceError>;

    /// Apply the fields present in `update`. Only the owner may update.
    async fn update_product(
        &self,
        actor: UserId,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Mark a product deleted, keeping only `remaining_images`.
    async fn soft_delete_product(
        &self,
        product: ProductId,
        remaining_images: Vec<String>,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Delete the product's images from the media store, then soft-delete it.
    async fn delete_product(
        &self,
        actor: UserId,
        product: ProductId,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
