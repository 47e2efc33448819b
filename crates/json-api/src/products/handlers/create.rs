//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use marketplace_app::domain::products::data::{MAX_IMAGES, NewProduct, ProductValidationError};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        get::ProductResponse,
        images::{self, ImagePayload},
    },
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub title: String,
    pub price: Decimal,

    /// Fractional discount between 0 and 1, defaults to none
    #[serde(default)]
    pub discount: Decimal,

    pub weight: Decimal,
    pub description: String,
    pub stock: u32,

    /// Up to four JPEG or PNG images
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

/// Create Product Handler
///
/// Uploads the attached images, then stores the product. Only admins may
/// list products.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not an admin"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.user_id_or_401()?;
    let request = json.into_inner();

    let mut product = NewProduct {
        title: request.title,
        price: request.price,
        discount: request.discount,
        weight: request.weight,
        description: request.description,
        stock: request.stock,
        images: Vec::new(),
    };

    product
        .validate()
        .map_err(|source| StatusError::bad_request().brief(source.to_string()))?;

    if request.images.len() > MAX_IMAGES {
        return Err(
            StatusError::bad_request().brief(ProductValidationError::TooManyImages.to_string())
        );
    }

    let uploads = images::decode_all(request.images)?;

    product.images = images::upload_all(state.app.media.as_ref(), owner, uploads).await?;

    let uploaded = product.images.clone();

    let product = match state.app.products.create_product(owner, product).await {
        Ok(product) => product,
        Err(source) => {
            images::discard(state.app.media.as_ref(), &uploaded).await;

            return Err(into_status_error(source));
        }
    };

    info!(product_id = %product.id, owner_id = %owner, "created product");

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use marketplace_app::domain::products::ProductsServiceError;

    use crate::test_helpers::{MockApp, TEST_USER_ID, make_product};

    use super::*;

    const IMAGE_URL: &str = "https://res.cloudinary.com/demo/image/upload/v1/mama-ologi/u1/a.png";

    fn make_service(app: MockApp) -> Service {
        app.authenticated_service(Router::with_path("products").post(handler))
    }

    fn body(images: Vec<Value>) -> Value {
        json!({
            "title": "Ankara fabric",
            "price": "1900.00",
            "weight": "20.00",
            "description": "Six yards of printed cotton",
            "stock": 12,
            "images": images,
        })
    }

    fn png() -> Value {
        json!({
            "file_name": "a.png",
            "content_type": "image/png",
            "data": STANDARD.encode(b"png bytes"),
        })
    }

    #[tokio::test]
    async fn test_create_product_uploads_images_then_stores() -> TestResult {
        let mut app = MockApp::default();

        app.media
            .expect_upload_image()
            .once()
            .withf(|owner, image| *owner == TEST_USER_ID && image.file_name == "a.png")
            .return_once(|_, _| Ok(IMAGE_URL.to_string()));

        app.products
            .expect_create_product()
            .once()
            .withf(|owner, new| {
                *owner == TEST_USER_ID
                    && new.title == "Ankara fabric"
                    && new.discount == Decimal::ZERO
                    && new.images == [IMAGE_URL.to_string()]
            })
            .return_once(|owner, _| Ok(make_product(11, owner)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&body(vec![png()]))
            .send(&make_service(app))
            .await;

        let product: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/products/11"));
        assert_eq!(product.id, 11);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_by_customer_returns_403_and_discards_images() -> TestResult {
        let mut app = MockApp::default();

        app.media
            .expect_upload_image()
            .once()
            .return_once(|_, _| Ok(IMAGE_URL.to_string()));

        app.media
            .expect_delete_images()
            .once()
            .withf(|urls| urls.iter().map(String::as_str).eq([IMAGE_URL]))
            .return_once(|_| Ok(()));

        app.products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::post("http://example.com/products")
            .json(&body(vec![png()]))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_with_too_many_images_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.media.expect_upload_image().never();
        app.products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&body(vec![png(), png(), png(), png(), png()]))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_with_invalid_discount_returns_400() -> TestResult {
        let mut app = MockApp::default();

        app.media.expect_upload_image().never();
        app.products.expect_create_product().never();

        let mut payload = body(Vec::new());

        payload["discount"] = json!("1.5");

        let res = TestClient::post("http://example.com/products")
            .json(&payload)
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_requires_authentication() -> TestResult {
        let service = MockApp::default()
            .anonymous_service(Router::with_path("products").post(handler));

        let res = TestClient::post("http://example.com/products")
            .json(&body(Vec::new()))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
