//! List Records

use std::fmt;

use rust_decimal::Decimal;

use crate::domain::{lists::errors::ListsServiceError, products::records::ProductId};

/// The two per-user lists. They share storage shape and merge policy and
/// differ only in which computed fields they expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Wishlist,
    Cart,
}

impl ListKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Cart => "cart",
        }
    }

    /// Turn a caller-supplied quantity into the quantity to store.
    ///
    /// Wishlists default to one; carts require an explicit quantity.
    ///
    /// # Errors
    ///
    /// - [`ListsServiceError::MissingQuantity`] for a cart without a quantity.
    /// - [`ListsServiceError::InvalidQuantity`] for zero or a value that does
    ///   not fit the storage column.
    pub fn resolve_quantity(self, quantity: Option<u32>) -> Result<i32, ListsServiceError> {
        let quantity = match (self, quantity) {
            (_, Some(quantity)) => quantity,
            (Self::Wishlist, None) => 1,
            (Self::Cart, None) => return Err(ListsServiceError::MissingQuantity),
        };

        if quantity == 0 {
            return Err(ListsServiceError::InvalidQuantity);
        }

        i32::try_from(quantity).map_err(|_ignored| ListsServiceError::InvalidQuantity)
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One computed line of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine {
    pub quantity: u32,
    pub product_id: ProductId,
    pub product_title: String,
    pub product_price: Decimal,
    pub total_price: Decimal,
    pub product_weight: Decimal,
    pub total_weight: Decimal,

    /// Only populated for carts.
    pub product_stock: Option<u32>,

    /// Only populated for carts.
    pub product_discount: Option<Decimal>,
}

/// A list as currently stored, joined against live products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub kind: ListKind,
    pub lines: Vec<ListLine>,
}

impl Snapshot {
    #[must_use]
    pub fn empty(kind: ListKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn line(&self, product: ProductId) -> Option<&ListLine> {
        self.lines.iter().find(|line| line.product_id == product)
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(|line| line.total_price).sum()
    }

    #[must_use]
    pub fn total_weight(&self) -> Decimal {
        self.lines.iter().map(|line| line.total_weight).sum()
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn line(product: i64, quantity: u32, total_price: i64, total_weight: i64) -> ListLine {
        ListLine {
            quantity,
            product_id: ProductId::from_i64(product),
            product_title: format!("product {product}"),
            product_price: Decimal::new(total_price, 2),
            total_price: Decimal::new(total_price, 2),
            product_weight: Decimal::new(total_weight, 2),
            total_weight: Decimal::new(total_weight, 2),
            product_stock: None,
            product_discount: None,
        }
    }

    #[test]
    fn wishlist_quantity_defaults_to_one() {
        assert_eq!(ListKind::Wishlist.resolve_quantity(None).ok(), Some(1));
    }

    #[test]
    fn cart_quantity_is_required() {
        let result = ListKind::Cart.resolve_quantity(None);

        assert!(
            matches!(result, Err(ListsServiceError::MissingQuantity)),
            "expected MissingQuantity, got {result:?}"
        );
    }

    #[test]
    fn zero_quantity_is_rejected_for_both_kinds() {
        for kind in [ListKind::Wishlist, ListKind::Cart] {
            let result = kind.resolve_quantity(Some(0));

            assert!(
                matches!(result, Err(ListsServiceError::InvalidQuantity)),
                "expected InvalidQuantity for {kind}, got {result:?}"
            );
        }
    }

    #[test]
    fn oversized_quantity_is_rejected() {
        let result = ListKind::Cart.resolve_quantity(Some(u32::MAX));

        assert!(
            matches!(result, Err(ListsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[test]
    fn aggregates_sum_over_lines() {
        let snapshot = Snapshot {
            kind: ListKind::Cart,
            lines: vec![line(1, 4, 760_000, 8_000), line(2, 2, 15_000, 150)],
        };

        assert_eq!(snapshot.total_price(), Decimal::new(775_000, 2));
        assert_eq!(snapshot.total_weight(), Decimal::new(8_150, 2));
        assert_eq!(snapshot.total_quantity(), 6);
    }

    #[test]
    fn empty_snapshot_totals_are_zero() {
        let snapshot = Snapshot::empty(ListKind::Wishlist);

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_price(), Decimal::ZERO);
        assert_eq!(snapshot.total_weight(), Decimal::ZERO);
        assert_eq!(snapshot.total_quantity(), 0);
    }

    #[test]
    fn line_lookup_matches_product_id() {
        let snapshot = Snapshot {
            kind: ListKind::Wishlist,
            lines: vec![line(7, 1, 100, 100)],
        };

        assert!(snapshot.line(ProductId::from_i64(7)).is_some());
        assert!(snapshot.line(ProductId::from_i64(8)).is_none());
    }
}
