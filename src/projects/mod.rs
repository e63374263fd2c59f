//! # Projects Module
//!
//! Session-gated access to the user's Harvest project assignments, raw or
//! reshaped into the catalog the time entry form selects from.

pub mod catalog;
pub mod handlers;
pub mod models;
pub mod routes;


pub use routes::projects_routes;
