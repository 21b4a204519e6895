//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod fetch;
pub(crate) mod query;
