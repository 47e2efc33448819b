//! Remove From List Handlers

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use marketplace_app::domain::{lists::records::ListKind, products::records::ProductId};

use crate::{
    extensions::*,
    lists::{errors::into_status_error, get::ListResponse},
    observability::record_list_mutation,
    state::State,
};

async fn remove(
    kind: ListKind,
    product: i64,
    depot: &mut Depot,
) -> Result<Json<ListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    let snapshot = state
        .app
        .lists
        .remove(kind, user, ProductId::from_i64(product))
        .await
        .map_err(into_status_error)?;

    record_list_mutation(kind, "remove");

    Ok(Json(snapshot.into()))
}

/// Remove From Wishlist Handler
#[endpoint(
    tags("lists"),
    summary = "Remove Product From Wishlist",
    security(("bearer_auth" = []))
)]
pub(crate) async fn wishlist(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ListResponse>, StatusError> {
    remove(ListKind::Wishlist, product.into_inner(), depot).await
}

/// Remove From Cart Handler
#[endpoint(
    tags("lists"),
    summary = "Remove Product From Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn cart(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ListResponse>, StatusError> {
    remove(ListKind::Cart, product.into_inner(), depot).await
}
