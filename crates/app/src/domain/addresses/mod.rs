//! Addresses

pub mod models;
pub(crate) mod records;
pub mod service;

pub use service::*;
