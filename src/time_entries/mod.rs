//! Time entry proxy: lists and creates Harvest time entries for the session user.

pub mod handlers;
pub mod routes;
pub mod validators;


pub use routes::time_entries_routes;
