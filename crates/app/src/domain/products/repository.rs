//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::try_get_u32,
    domain::{
        accounts::records::UserId,
        products::{
            data::{NewProduct, ProductUpdate},
            records::{ProductDetails, ProductId, ProductRecord, ProductSummary},
        },
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_DETAILS_SQL: &str = include_str!("sql/get_product_details.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SOFT_DELETE_PRODUCT_SQL: &str = include_str!("sql/soft_delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserId,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(owner.into_i64())
            .bind(product.title)
            .bind(product.price)
            .bind(product.discount)
            .bind(product.weight)
            .bind(product.description)
            .bind(stock_to_i32(product.stock)?)
            .bind(product.images)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        query_as::<Postgres, ProductSummary>(LIST_PRODUCTS_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductDetails, sqlx::Error> {
        query_as::<Postgres, ProductDetails>(GET_PRODUCT_DETAILS_SQL)
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a live product and hold its row lock until the transaction ends.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let stock = update.stock.map(stock_to_i32).transpose()?;

        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(update.title)
            .bind(update.price)
            .bind(update.discount)
            .bind(update.weight)
            .bind(update.description)
            .bind(stock)
            .bind(update.images)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn soft_delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        remaining_images: Vec<String>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SOFT_DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(remaining_images)
            .fetch_one(&mut **tx)
            .await
    }
}

fn stock_to_i32(stock: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(stock).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            owner_id: UserId::from_i64(row.try_get("owner_id")?),
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            discount: row.try_get("discount")?,
            weight: row.try_get("weight")?,
            description: row.try_get("description")?,
            stock: try_get_u32(row, "stock")?,
            images: row.try_get("images")?,
            deleted: row.try_get("deleted")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            weight: row.try_get("weight")?,
            description: row.try_get("description")?,
            stock: try_get_u32(row, "stock")?,
            discount: row.try_get("discount")?,
            image: row.try_get("image")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductDetails {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductRecord::from_row(row)?,
            owner_first_name: row.try_get("owner_first_name")?,
            owner_last_name: row.try_get("owner_last_name")?,
            owner_phone: row.try_get("owner_phone")?,
        })
    }
}
