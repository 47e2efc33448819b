//! Add To List Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::{lists::records::ListKind, products::records::ProductId};

use crate::{
    extensions::*,
    lists::{errors::into_status_error, get::ListResponse},
    observability::record_list_mutation,
    products,
    state::State,
};

/// Add To List Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToListRequest {
    /// Required for carts; wishlists default to one. A smaller quantity than
    /// the one already stored leaves the line unchanged.
    pub quantity: Option<u32>,
}

/// Read the optional request body. An empty body reads as `{}`.
async fn read_request(req: &mut Request) -> Result<AddToListRequest, StatusError> {
    let payload = req
        .payload()
        .await
        .map_err(|source| StatusError::bad_request().brief(source.to_string()))?;

    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(AddToListRequest::default());
    }

    serde_json::from_slice(payload).map_err(|source| {
        StatusError::bad_request().brief(format!("Invalid request body: {source}"))
    })
}

async fn upsert(
    kind: ListKind,
    product: i64,
    request: AddToListRequest,
    depot: &mut Depot,
) -> Result<Json<ListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let product = ProductId::from_i64(product);

    state
        .app
        .products
        .get_product(product)
        .await
        .map_err(products::errors::into_status_error)?;

    let snapshot = state
        .app
        .lists
        .upsert(kind, user, product, request.quantity)
        .await
        .map_err(into_status_error)?;

    record_list_mutation(kind, "upsert");

    Ok(Json(snapshot.into()))
}

/// Add To Wishlist Handler
#[endpoint(
    tags("lists"),
    summary = "Add Product To Wishlist",
    security(("bearer_auth" = [])),
    request_body = AddToListRequest,
    responses(
        (status_code = StatusCode::OK, description = "Wishlist after the change"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn wishlist(
    product: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListResponse>, StatusError> {
    let request = read_request(req).await?;

    upsert(ListKind::Wishlist, product.into_inner(), request, depot).await
}

/// Add To Cart Handler
#[endpoint(
    tags("lists"),
    summary = "Add Product To Cart",
    security(("bearer_auth" = [])),
    request_body = AddToListRequest,
    responses(
        (status_code = StatusCode::OK, description = "Cart after the change"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn cart(
    product: PathParam<i64>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListResponse>, StatusError> {
    let request = read_request(req).await?;

    upsert(ListKind::Cart, product.into_inner(), request, depot).await
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::{lists::ListsServiceError, products::ProductsServiceError};

    use crate::test_helpers::{MockApp, TEST_USER_ID, make_product, make_snapshot};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.authenticated_service(
            Router::with_path("products/{product}")
                .push(Router::with_path("wishlist").post(wishlist))
                .push(Router::with_path("cart").post(cart)),
        )
    }

    fn expect_product(app: &mut MockApp, id: i64) {
        app.products
            .expect_get_product()
            .once()
            .withf(move |product| *product == ProductId::from_i64(id))
            .return_once(move |_| Ok(make_product(id, TEST_USER_ID)));
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_snapshot() -> TestResult {
        let mut app = MockApp::default();

        expect_product(&mut app, 3);

        app.lists
            .expect_upsert()
            .once()
            .withf(|kind, user, product, quantity| {
                *kind == ListKind::Cart
                    && *user == TEST_USER_ID
                    && *product == ProductId::from_i64(3)
                    && *quantity == Some(4)
            })
            .return_once(|kind, _, product, _| Ok(make_snapshot(kind, product)));

        let mut res = TestClient::post("http://example.com/products/3/cart")
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(app))
            .await;

        let body: ListResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.kind, "cart");
        assert_eq!(body.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_wishlist_without_quantity() -> TestResult {
        let mut app = MockApp::default();

        expect_product(&mut app, 3);

        app.lists
            .expect_upsert()
            .once()
            .withf(|kind, _, _, quantity| *kind == ListKind::Wishlist && quantity.is_none())
            .return_once(|kind, _, product, _| Ok(make_snapshot(kind, product)));

        let res = TestClient::post("http://example.com/products/3/wishlist")
            .json(&json!({}))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_wishlist_without_body_defaults_quantity() -> TestResult {
        let mut app = MockApp::default();

        expect_product(&mut app, 3);

        app.lists
            .expect_upsert()
            .once()
            .withf(|kind, _, _, quantity| *kind == ListKind::Wishlist && quantity.is_none())
            .return_once(|kind, _, product, _| Ok(make_snapshot(kind, product)));

        let mut res = TestClient::post("http://example.com/products/3/wishlist")
            .send(&make_service(app))
            .await;

        let body: ListResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.kind, "wishlist");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_with_malformed_body_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.products.expect_get_product().never();
        app.lists.expect_upsert().never();

        let res = TestClient::post("http://example.com/products/3/cart")
            .raw_json("{\"quantity\": -1}")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let mut app = MockApp::default();

        app.products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        app.lists.expect_upsert().never();

        let res = TestClient::post("http://example.com/products/77/cart")
            .json(&json!({ "quantity": 1 }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_cart_without_quantity_returns_400() -> TestResult {
        let mut app = MockApp::default();

        expect_product(&mut app, 3);

        app.lists
            .expect_upsert()
            .once()
            .return_once(|_, _, _, _| Err(ListsServiceError::MissingQuantity));

        let res = TestClient::post("http://example.com/products/3/cart")
            .json(&json!({}))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
