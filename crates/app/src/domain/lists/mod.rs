//! Wishlists and carts

pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::ListsServiceError;
pub use service::*;
