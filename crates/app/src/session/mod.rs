//! Session state: the bearer token, its persistence and the post-login return path.

mod context;
mod errors;
mod store;
mod token;

pub use context::SessionContext;
pub use errors::SessionError;
pub use store::{FileTokenStore, MemoryTokenStore, MockTokenStore, TokenStore, default_token_path};
pub use token::BearerToken;
