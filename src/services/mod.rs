// src/services/mod.rs
//
// Clients for the Harvest ID provider and the Harvest REST API

pub mod harvest;
pub mod oauth;

pub use harvest::{HarvestClient, HarvestError};
pub use oauth::{OAuthError, OAuthService};
