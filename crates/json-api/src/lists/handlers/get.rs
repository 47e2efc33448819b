//! Get List Handlers

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::lists::records::{ListKind, ListLine, Snapshot};

use crate::{extensions::*, lists::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListLineResponse {
    pub quantity: u32,
    pub product_id: i64,
    pub product_title: String,
    pub product_price: Decimal,

    /// `price * (1 - discount) * quantity`, rounded to two places
    pub total_price: Decimal,

    pub product_weight: Decimal,
    pub total_weight: Decimal,

    /// Cart lines only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_stock: Option<u32>,

    /// Cart lines only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_discount: Option<Decimal>,
}

impl From<ListLine> for ListLineResponse {
    fn from(line: ListLine) -> Self {
        ListLineResponse {
            quantity: line.quantity,
            product_id: line.product_id.into_i64(),
            product_title: line.product_title,
            product_price: line.product_price,
            total_price: line.total_price,
            product_weight: line.product_weight,
            total_weight: line.total_weight,
            product_stock: line.product_stock,
            product_discount: line.product_discount,
        }
    }
}

/// A wishlist or cart with its computed totals.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListResponse {
    /// `wishlist` or `cart`
    pub kind: String,
    pub lines: Vec<ListLineResponse>,
    pub total_price: Decimal,
    pub total_weight: Decimal,
    pub total_quantity: u64,
}

impl From<Snapshot> for ListResponse {
    fn from(snapshot: Snapshot) -> Self {
        ListResponse {
            kind: snapshot.kind.as_str().to_string(),
            total_price: snapshot.total_price(),
            total_weight: snapshot.total_weight(),
            total_quantity: snapshot.total_quantity(),
            lines: snapshot.lines.into_iter().map(Into::into).collect(),
        }
    }
}

async fn snapshot(kind: ListKind, depot: &mut Depot) -> Result<Json<ListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    let snapshot = state
        .app
        .lists
        .snapshot(kind, user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}

/// Get Wishlist Handler
#[endpoint(
    tags("lists"),
    summary = "Get Wishlist",
    security(("bearer_auth" = []))
)]
pub(crate) async fn wishlist(depot: &mut Depot) -> Result<Json<ListResponse>, StatusError> {
    snapshot(ListKind::Wishlist, depot).await
}

/// Get Cart Handler
#[endpoint(
    tags("lists"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn cart(depot: &mut Depot) -> Result<Json<ListResponse>, StatusError> {
    snapshot(ListKind::Cart, depot).await
}
