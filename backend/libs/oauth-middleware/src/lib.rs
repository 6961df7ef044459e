//! # OAuth Middleware Library
//!
//! Access-token authentication for bookstore Actix services
//!
//! ## Modules
//! - `classifier`: request inspection (public marker, identity headers, token id)
//! - `config`: process-wide token service client settings
//! - `resolver`: remote token resolution and identity header injection
//! - `error`: failure taxonomy for token resolution
//! - `middleware`: Actix `Transform` wiring the resolver into an app or scope
//!
//! ## Trust model
//!
//! `X-Client-Id` and `X-User-Id` are only trustworthy because the resolver
//! removes them from every token-carrying request before the remote lookup
//! and writes them back exclusively from a successful response. Downstream
//! handlers read them through [`classifier::caller_id`] and
//! [`classifier::client_id`]; absence reads as anonymous, not as an error.

pub mod classifier;
pub mod config;
pub mod error;
pub mod middleware;
pub mod resolver;

pub use classifier::{access_token_id, caller_id, client_id, is_public};
pub use config::OAuthSettings;
pub use error::AuthError;
pub use middleware::OAuthMiddleware;
pub use resolver::{AccessToken, TokenResolver};
