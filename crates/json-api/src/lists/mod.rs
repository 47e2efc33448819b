//! Wishlists and carts

mod errors;
mod handlers;

pub(crate) use handlers::*;
