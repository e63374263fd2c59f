//! # Auth Module
//!
//! This module handles the Harvest OAuth2 authorization-code flow and the
//! session gate:
//! - Login redirect and callback code exchange
//! - Session cookie issue and removal
//! - SessionToken extractor for proxied routes

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod tests;

pub use extractors::SessionToken;
pub use routes::auth_routes;
