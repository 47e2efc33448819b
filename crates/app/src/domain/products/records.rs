//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::accounts::records::UserId, ids::TypedId};

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub owner_id: UserId,
    pub title: String,
    pub price: Decimal,
    pub discount: Decimal,
    pub weight: Decimal,
    pub description: String,
    pub stock: u32,
    pub images: Vec<String>,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row; carries only the first image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub weight: Decimal,
    pub description: String,
    pub stock: u32,
    pub discount: Decimal,
    pub image: Option<String>,
}

/// One page of live products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    /// 1-indexed page number.
    pub page: u32,
    pub page_count: u32,
    pub products: Vec<ProductSummary>,
}

/// Product joined with its owner's contact details, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub product: ProductRecord,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_phone: Option<String>,
}
