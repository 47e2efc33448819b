//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        accounts::{AccountsService, AccountsServiceError, data::NewAccount, records::UserId},
        products::{
            ProductsService, ProductsServiceError, data::NewProduct, records::ProductRecord,
        },
    },
    test::TestContext,
};

pub(crate) fn new_account(email: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone: Some("+2348000000000".to_string()),
        address: None,
        street: None,
        state: None,
        country: None,
    }
}

pub(crate) fn new_product(price: Decimal, weight: Decimal, discount: Decimal) -> NewProduct {
    NewProduct {
        title: "Test product".to_string(),
        price,
        discount,
        weight,
        description: "A product used in tests".to_string(),
        stock: 10,
        images: Vec::new(),
    }
}

pub(crate) async fn create_admin(ctx: &TestContext) -> Result<UserId, AccountsServiceError> {
    ctx.accounts
        .create_admin(new_account("admin@example.com"))
        .await
        .map(|account| account.id)
}

pub(crate) async fn create_customer(
    ctx: &TestContext,
    email: &str,
) -> Result<UserId, AccountsServiceError> {
    ctx.accounts
        .create_account(new_account(email))
        .await
        .map(|account| account.id)
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    owner: UserId,
    price: Decimal,
    weight: Decimal,
    discount: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(owner, new_product(price, weight, discount))
        .await
}
