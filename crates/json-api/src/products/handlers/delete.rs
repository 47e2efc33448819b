//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use marketplace_app::domain::products::records::ProductId;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Handler
///
/// Removes the product's images from the media store, then hides the
/// product. If the images cannot be removed the product stays listed.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Product deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller does not own the product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.user_id_or_401()?;
    let product = ProductId::from_i64(product.into_inner());

    state
        .app
        .products
        .delete_product(actor, product)
        .await
        .map_err(into_status_error)?;

    info!(product_id = %product, "deleted product");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use marketplace_app::{domain::products::ProductsServiceError, media::MediaError};

    use crate::test_helpers::{MockApp, TEST_USER_ID, make_product};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.authenticated_service(Router::with_path("products/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let mut app = MockApp::default();

        app.products
            .expect_delete_product()
            .once()
            .withf(|actor, id| *actor == TEST_USER_ID && *id == ProductId::from_i64(8))
            .return_once(|actor, id| {
                let mut product = make_product(id.into_i64(), actor);

                product.deleted = true;
                product.images.clear();

                Ok(product)
            });

        let res = TestClient::delete("http://example.com/products/8")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_returns_403() -> TestResult {
        let mut app = MockApp::default();

        app.products
            .expect_delete_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::delete("http://example.com/products/8")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_media_failure_returns_500() -> TestResult {
        let mut app = MockApp::default();

        app.products.expect_delete_product().once().return_once(|_, _| {
            Err(ProductsServiceError::Media(MediaError::UnexpectedResponse(
                "status 500".to_string(),
            )))
        });

        let res = TestClient::delete("http://example.com/products/8")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
