//! Storefront client: backend session, services and checkout orchestration.

pub mod api;
pub mod auth;
pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod retry;
pub mod session;
