//! Backend API access

mod client;
mod endpoints;
mod errors;

pub use client::{ApiClient, ApiResponse};
pub use endpoints::Endpoint;
pub use errors::ApiError;
