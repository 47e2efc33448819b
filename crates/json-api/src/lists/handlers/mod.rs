//! List Handlers

pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod upsert;
