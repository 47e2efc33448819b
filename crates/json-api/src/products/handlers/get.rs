//! Get Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::products::records::{ProductDetails, ProductId, ProductRecord};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: i64,

    /// The admin account that listed the product
    pub owner_id: i64,

    pub title: String,

    /// Unit price
    pub price: Decimal,

    /// Fractional discount between 0 and 1
    pub discount: Decimal,

    /// Unit weight
    pub weight: Decimal,

    pub description: String,

    /// Units in stock
    pub stock: u32,

    /// Public image URLs
    pub images: Vec<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_i64(),
            owner_id: product.owner_id.into_i64(),
            title: product.title,
            price: product.price,
            discount: product.discount,
            weight: product.weight,
            description: product.description,
            stock: product.stock,
            images: product.images,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Contact details of the seller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OwnerResponse {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,
    pub owner: OwnerResponse,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        ProductDetailsResponse {
            product: details.product.into(),
            owner: OwnerResponse {
                first_name: details.owner_first_name,
                last_name: details.owner_last_name,
                phone: details.owner_phone,
            },
        }
    }
}

/// Get Product Handler
///
/// Returns a live product together with its seller's contact details.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .products
        .get_product_details(ProductId::from_i64(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
