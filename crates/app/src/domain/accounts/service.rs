//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::{
            data::NewAccount,
            errors::AccountsServiceError,
            records::{AccountCredentials, AccountRecord, AccountSession, Role, UserId},
            repository::PgAccountsRepository,
        },
        lists::{records::ListKind, repository::PgListsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
    lists: PgListsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
            lists: PgListsRepository::new(),
        }
    }

    async fn create_with_role(
        &self,
        account: NewAccount,
        role: Role,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_account(&mut tx, account, role).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError> {
        self.create_with_role(account, Role::Customer).await
    }

    async fn create_admin(
        &self,
        account: NewAccount,
    ) -> Result<AccountRecord, AccountsServiceError> {
        self.create_with_role(account, Role::Admin).await
    }

    async fn get_account(&self, user: UserId) -> Result<AccountRecord, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let account = self.repository.get_account(&mut tx, user).await?;

        tx.commit().await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<AccountCredentials, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self.repository.find_by_email(&mut tx, email).await?;

        tx.commit().await?;

        Ok(credentials)
    }

    async fn find_by_email_with_lists(
        &self,
        email: &str,
    ) -> Result<AccountSession, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self.repository.find_by_email(&mut tx, email).await?;
        let user = credentials.account.id;

        let wishlist = self.lists.snapshot(&mut tx, ListKind::Wishlist, user).await?;
        let cart = self.lists.snapshot(&mut tx, ListKind::Cart, user).await?;

        tx.commit().await?;

        Ok(AccountSession {
            credentials,
            wishlist,
            cart,
        })
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Register a customer account.
    async fn create_account(&self, account: NewAccount)
    -> Result<AccountRecord, AccountsServiceError>;

    /// Register an account with the admin role.
    async fn create_admin(&self, account: NewAccount)
    -> Result<AccountRecord, AccountsServiceError>;

    async fn get_account(&self, user: UserId) -> Result<AccountRecord, AccountsServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<AccountCredentials, AccountsServiceError>;

    /// Look up credentials together with the account's wishlist and cart,
    /// read in one transaction.
    async fn find_by_email_with_lists(
        &self,
        email: &str,
    ) -> Result<AccountSession, AccountsServiceError>;
}
