//! Update Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::products::{
    data::{MAX_IMAGES, ProductUpdate, ProductValidationError},
    records::ProductId,
};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        get::ProductResponse,
        images::{self, ImagePayload},
    },
    state::State,
};

/// Update Product Request
///
/// Absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub description: Option<String>,
    pub stock: Option<u32>,

    /// Existing image URLs to keep. When absent every current image is kept.
    pub retain_images: Option<Vec<String>>,

    /// Images to add after the retained ones.
    #[serde(default)]
    pub new_images: Vec<ImagePayload>,
}

impl UpdateProductRequest {
    fn touches_images(&self) -> bool {
        self.retain_images.is_some() || !self.new_images.is_empty()
    }
}

/// Split `current` into the images to keep and the ones to delete.
fn partition_images(current: Vec<String>, retain: Option<&[String]>) -> (Vec<String>, Vec<String>) {
    match retain {
        Some(retain) => current.into_iter().partition(|url| retain.contains(url)),
        None => (current, Vec::new()),
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller does not own the product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        user_id = tracing::field::Empty,
        product_id = tracing::field::Empty,
        removed_images = tracing::field::Empty,
        added_images = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.user_id_or_401()?;
    let product = ProductId::from_i64(product.into_inner());
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_id", tracing::field::display(actor));
    span.record("product_id", tracing::field::display(product));

    let touches_images = request.touches_images();

    let mut update = ProductUpdate {
        title: request.title,
        price: request.price,
        discount: request.discount,
        weight: request.weight,
        description: request.description,
        stock: request.stock,
        images: None,
    };

    update
        .validate()
        .map_err(|source| StatusError::bad_request().brief(source.to_string()))?;

    let mut removed = Vec::new();
    let mut uploaded = Vec::new();

    if touches_images {
        let current = state
            .app
            .products
            .get_product(product)
            .await
            .map_err(into_status_error)?;

        if current.owner_id != actor {
            return Err(StatusError::forbidden().brief("You may not modify this product"));
        }

        let (mut kept, dropped) =
            partition_images(current.images, request.retain_images.as_deref());

        if kept.len() + request.new_images.len() > MAX_IMAGES {
            return Err(
                StatusError::bad_request().brief(ProductValidationError::TooManyImages.to_string())
            );
        }

        let uploads = images::decode_all(request.new_images)?;

        span.record("removed_images", dropped.len());
        span.record("added_images", uploads.len());

        uploaded = images::upload_all(state.app.media.as_ref(), actor, uploads).await?;
        removed = dropped;

        kept.extend(uploaded.iter().cloned());

        update.images = Some(kept);
    }

    let updated = match state
        .app
        .products
        .update_product(actor, product, update)
        .await
    {
        Ok(updated) => updated,
        Err(source) => {
            images::discard(state.app.media.as_ref(), &uploaded).await;

            return Err(into_status_error(source));
        }
    };

    // The stored record no longer references these.
    images::discard(state.app.media.as_ref(), &removed).await;

    tracing::info!(product_id = %product, "updated product");

    Ok(Json(updated.into()))
}
