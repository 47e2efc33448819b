//! Products

pub(crate) mod errors;
mod handlers;
mod images;

pub(crate) use handlers::*;
