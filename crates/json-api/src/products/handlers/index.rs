//! Product Index Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::products::records::{ProductPage, ProductSummary};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub weight: Decimal,
    pub description: String,
    pub stock: u32,
    pub discount: Decimal,

    /// First image, if any
    pub image: Option<String>,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(product: ProductSummary) -> Self {
        ProductSummaryResponse {
            id: product.id.into_i64(),
            title: product.title,
            price: product.price,
            weight: product.weight,
            description: product.description,
            stock: product.stock,
            discount: product.discount,
            image: product.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The 1-indexed page returned
    pub page: u32,

    /// Number of pages of live products
    pub page_count: u32,

    /// The products on this page
    pub products: Vec<ProductSummaryResponse>,
}

impl From<ProductPage> for ProductsResponse {
    fn from(page: ProductPage) -> Self {
        ProductsResponse {
            page: page.page,
            page_count: page.page_count,
            products: page.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Product Index Handler
///
/// Returns one page of live products, newest first.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Products page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid page"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .products
        .list_products(page.into_inner().unwrap_or(1))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::products::{ProductsServiceError, records::ProductId};

    use crate::test_helpers::MockApp;

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.anonymous_service(Router::with_path("products").get(handler))
    }

    fn summary(id: i64) -> ProductSummary {
        ProductSummary {
            id: ProductId::from_i64(id),
            title: format!("Product {id}"),
            price: Decimal::new(1_000, 2),
            weight: Decimal::ONE,
            description: "Listed for tests".to_string(),
            stock: 3,
            discount: Decimal::ZERO,
            image: None,
        }
    }

    #[tokio::test]
    async fn test_index_defaults_to_first_page() -> TestResult {
        let mut app = MockApp::default();

        app.products
            .expect_list_products()
            .once()
            .withf(|page| *page == 1)
            .return_once(|page| {
                Ok(ProductPage {
                    page,
                    page_count: 2,
                    products: vec![summary(2), summary(1)],
                })
            });

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(app))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.page, 1);
        assert_eq!(body.page_count, 2);
        assert_eq!(
            body.products.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 1]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_page_number() -> TestResult {
        let mut app = MockApp::default();

        app.products
            .expect_list_products()
            .once()
            .withf(|page| *page == 3)
            .return_once(|page| {
                Ok(ProductPage {
                    page,
                    page_count: 3,
                    products: Vec::new(),
                })
            });

        let res = TestClient::get("http://example.com/products?page=3")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_page_zero_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidPage));

        let res = TestClient::get("http://example.com/products?page=0")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
