//! Products Data

use rust_decimal::Decimal;
use thiserror::Error;

/// Listing page size.
pub const PAGE_SIZE: u32 = 10;

/// Maximum number of images attached to one product.
pub const MAX_IMAGES: usize = 4;

pub const MAX_TITLE_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 250;

/// Amounts are stored with two decimal places.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest value a `NUMERIC(17, 2)` price column holds.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_569_325_055, 23_283_064, 0, false, 2);

/// Largest value a `NUMERIC(11, 2)` weight column holds.
pub const MAX_WEIGHT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductValidationError {
    #[error("title must be between 1 and {MAX_TITLE_LENGTH} characters")]
    Title,

    #[error("description must be between 1 and {MAX_DESCRIPTION_LENGTH} characters")]
    Description,

    #[error("price must be between 0 and {MAX_PRICE} with at most {AMOUNT_SCALE} decimal places")]
    Price,

    #[error("weight must be between 0 and {MAX_WEIGHT} with at most {AMOUNT_SCALE} decimal places")]
    Weight,

    #[error("discount must be between 0 and 1 with at most {AMOUNT_SCALE} decimal places")]
    Discount,

    #[error("stock is out of range")]
    Stock,

    #[error("a product can have at most {MAX_IMAGES} images")]
    TooManyImages,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub price: Decimal,
    pub discount: Decimal,
    pub weight: Decimal,
    pub description: String,
    pub stock: u32,
    pub images: Vec<String>,
}

impl NewProduct {
    /// Check the catalog invariants before anything is written.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_price(self.price)?;
        validate_weight(self.weight)?;
        validate_discount(self.discount)?;
        validate_stock(self.stock)?;
        validate_images(&self.images)
    }
}

/// Product Update Data
///
/// Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub description: Option<String>,
    pub stock: Option<u32>,
    pub images: Option<Vec<String>>,
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns the first violated invariant among the fields present.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(weight) = self.weight {
            validate_weight(weight)?;
        }
        if let Some(discount) = self.discount {
            validate_discount(discount)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        if let Some(images) = &self.images {
            validate_images(images)?;
        }

        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), ProductValidationError> {
    let length = title.chars().count();

    if length == 0 || length > MAX_TITLE_LENGTH {
        return Err(ProductValidationError::Title);
    }

    Ok(())
}

fn validate_description(description: &str) -> Result<(), ProductValidationError> {
    let length = description.chars().count();

    if length == 0 || length > MAX_DESCRIPTION_LENGTH {
        return Err(ProductValidationError::Description);
    }

    Ok(())
}

/// Whether `value` fits the stored scale. Trailing zeros do not count.
fn fits_scale(value: Decimal) -> bool {
    value.normalize().scale() <= AMOUNT_SCALE
}

fn validate_price(price: Decimal) -> Result<(), ProductValidationError> {
    if price < Decimal::ZERO || price > MAX_PRICE || !fits_scale(price) {
        return Err(ProductValidationError::Price);
    }

    Ok(())
}

fn validate_weight(weight: Decimal) -> Result<(), ProductValidationError> {
    if weight < Decimal::ZERO || weight > MAX_WEIGHT || !fits_scale(weight) {
        return Err(ProductValidationError::Weight);
    }

    Ok(())
}

fn validate_discount(discount: Decimal) -> Result<(), ProductValidationError> {
    if discount < Decimal::ZERO || discount > Decimal::ONE || !fits_scale(discount) {
        return Err(ProductValidationError::Discount);
    }

    Ok(())
}

fn validate_stock(stock: u32) -> Result<(), ProductValidationError> {
    i32::try_from(stock)
        .map(|_| ())
        .map_err(|_ignored| ProductValidationError::Stock)
}

fn validate_images(images: &[String]) -> Result<(), ProductValidationError> {
    if images.len() > MAX_IMAGES {
        return Err(ProductValidationError::TooManyImages);
    }

    Ok(())
}
