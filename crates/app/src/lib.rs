//! Shared application domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod media;

#[cfg(test)]
mod test;
