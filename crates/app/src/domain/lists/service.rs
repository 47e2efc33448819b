//! Lists service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::records::UserId,
        lists::{
            errors::ListsServiceError,
            records::{ListKind, Snapshot},
            repository::PgListsRepository,
        },
        products::records::ProductId,
    },
};

#[derive(Debug, Clone)]
pub struct PgListsService {
    db: Db,
    repository: PgListsRepository,
}

impl PgListsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgListsRepository::new(),
        }
    }
}

#[async_trait]
impl ListsService for PgListsService {
    async fn upsert(
        &self,
        kind: ListKind,
        user: UserId,
        product: ProductId,
        quantity: Option<u32>,
    ) -> Result<Snapshot, ListsServiceError> {
        let quantity = kind.resolve_quantity(quantity)?;

        let mut tx = self.db.begin().await?;

        let stored = self
            .repository
            .upsert_line(&mut tx, kind, user, product, quantity)
            .await?;

        if stored.is_none() {
            return Err(ListsServiceError::InvalidReference);
        }

        let snapshot = self.repository.snapshot(&mut tx, kind, user).await?;

        tx.commit().await?;

        Ok(snapshot)
    }

    async fn remove(
        &self,
        kind: ListKind,
        user: UserId,
        product: ProductId,
    ) -> Result<Snapshot, ListsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .remove_line(&mut tx, kind, user, product)
            .await?;

        if rows_affected == 0 {
            return Err(ListsServiceError::MissingEntry);
        }

        let snapshot = self.repository.snapshot(&mut tx, kind, user).await?;

        tx.commit().await?;

        Ok(snapshot)
    }

    async fn snapshot(&self, kind: ListKind, user: UserId) -> Result<Snapshot, ListsServiceError> {
        let mut tx = self.db.begin().await?;

        let snapshot = self.repository.snapshot(&mut tx, kind, user).await?;

        tx.commit().await?;

        Ok(snapshot)
    }
}

#[automock]
#[async_trait]
pub trait ListsService: Send + Sync {
    /// Add a product to a list, keeping the larger of the stored and incoming
    /// quantities, and return the resulting list.
    async fn upsert(
        &self,
        kind: ListKind,
        user: UserId,
        product: ProductId,
        quantity: Option<u32>,
    ) -> Result<Snapshot, ListsServiceError>;

    /// Remove a product from a list and return what remains.
    async fn remove(
        &self,
        kind: ListKind,
        user: UserId,
        product: ProductId,
    ) -> Result<Snapshot, ListsServiceError>;

    /// Read a list with its computed totals.
    async fn snapshot(&self, kind: ListKind, user: UserId) -> Result<Snapshot, ListsServiceError>;
}
