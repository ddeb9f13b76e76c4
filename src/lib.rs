//! # session-client
//!
//! Authentication glue for a token-based web API: a persisted bearer token,
//! a request wrapper that attaches it and forces a logout on `401`, social
//! login redirects, and the header links that depend on login state.
//!
//! Browser facilities are injected or returned instead of touched directly:
//! storage is a [`SessionStore`], page changes are [`Redirect`] values.

pub mod client;
pub mod config;
pub mod error;
pub mod nav;
pub mod navigation;
pub mod request;
pub mod social;
pub mod store;

pub use client::{ApiClient, ApiOutcome};
pub use config::ClientConfig;
pub use error::ClientError;
pub use navigation::Redirect;
pub use request::{ApiRequest, Encoding, FileBody};
pub use social::SocialProvider;
pub use store::{FileStore, MemoryStore, SessionStore};
