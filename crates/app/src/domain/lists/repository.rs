//! Lists Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::try_get_u32,
    domain::{
        accounts::records::UserId,
        lists::records::{ListKind, ListLine, Snapshot},
        products::records::ProductId,
    },
};

const UPSERT_WISHLIST_LINE_SQL: &str = include_str!("sql/upsert_wishlist_line.sql");
const UPSERT_CART_LINE_SQL: &str = include_str!("sql/upsert_cart_line.sql");
const REMOVE_WISHLIST_LINE_SQL: &str = include_str!("sql/remove_wishlist_line.sql");
const REMOVE_CART_LINE_SQL: &str = include_str!("sql/remove_cart_line.sql");
const WISHLIST_SNAPSHOT_SQL: &str = include_str!("sql/wishlist_snapshot.sql");
const CART_SNAPSHOT_SQL: &str = include_str!("sql/cart_snapshot.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgListsRepository;

impl PgListsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a line, or raise an existing line to `quantity` if it is larger.
    ///
    /// Returns `None` when the product is absent or soft-deleted; the insert
    /// selects from live products only, so nothing is written in that case.
    pub(crate) async fn upsert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ListKind,
        user: UserId,
        product: ProductId,
        quantity: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        let sql = match kind {
            ListKind::Wishlist => UPSERT_WISHLIST_LINE_SQL,
            ListKind::Cart => UPSERT_CART_LINE_SQL,
        };

        query_scalar::<Postgres, i32>(sql)
            .bind(user.into_i64())
            .bind(product.into_i64())
            .bind(quantity)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn remove_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ListKind,
        user: UserId,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let sql = match kind {
            ListKind::Wishlist => REMOVE_WISHLIST_LINE_SQL,
            ListKind::Cart => REMOVE_CART_LINE_SQL,
        };

        let rows_affected = query(sql)
            .bind(user.into_i64())
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn snapshot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ListKind,
        user: UserId,
    ) -> Result<Snapshot, sqlx::Error> {
        let sql = match kind {
            ListKind::Wishlist => WISHLIST_SNAPSHOT_SQL,
            ListKind::Cart => CART_SNAPSHOT_SQL,
        };

        let lines = query_as::<Postgres, ListLine>(sql)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        Ok(Snapshot { kind, lines })
    }
}

/// Read a column that only one of the snapshot shapes carries.
fn try_get_optional<'r, T>(row: &'r PgRow, column: &str) -> sqlx::Result<Option<T>>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    match row.try_get::<T, _>(column) {
        Ok(value) => Ok(Some(value)),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(error) => Err(error),
    }
}

impl<'r> FromRow<'r, PgRow> for ListLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product_stock = match try_get_optional::<i32>(row, "product_stock")? {
            Some(stock) => Some(u32::try_from(stock).map_err(|e| sqlx::Error::ColumnDecode {
                index: "product_stock".to_string(),
                source: Box::new(e),
            })?),
            None => None,
        };

        Ok(Self {
            quantity: try_get_u32(row, "quantity")?,
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            product_title: row.try_get("product_title")?,
            product_price: row.try_get("product_price")?,
            total_price: row.try_get("total_price")?,
            product_weight: row.try_get("product_weight")?,
            total_weight: row.try_get("total_weight")?,
            product_stock,
            product_discount: try_get_optional::<Decimal>(row, "product_discount")?,
        })
    }
}
