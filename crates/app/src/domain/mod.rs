//! Marketplace Domain Concerns

pub mod accounts;
pub mod lists;
pub mod products;
