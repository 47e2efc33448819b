//! Authentication

mod errors;
mod models;
mod passwords;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use passwords::*;
pub use service::*;
pub use token::*;
