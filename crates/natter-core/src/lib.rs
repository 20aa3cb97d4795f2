//! natter-core - Core types for the Natter spaces client.
//!
//! This crate holds everything that does not touch the network: credential
//! types, the three credential-attachment policies, the cookie and durable
//! storage abstractions, and pure request builders that turn user input into
//! a transport-neutral [`HttpRequest`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use natter_core::{ApiUrl, AuthPolicy, SpaceRequest, request};
//! use natter_core::cookie::MemoryCookieJar;
//! use natter_core::storage::{MemoryTokenStore, TOKEN_KEY, TokenStore};
//!
//! let api = ApiUrl::new("https://localhost:4567").unwrap();
//! let storage = Arc::new(MemoryTokenStore::default());
//! storage.set(TOKEN_KEY, "abc123").unwrap();
//!
//! let provider = AuthPolicy::BearerToken.provider(Arc::new(MemoryCookieJar::default()), storage);
//! let input = SpaceRequest::new("acme", "bob").unwrap();
//! let req = request::create_space(&api, &input, provider.as_ref()).unwrap();
//!
//! assert_eq!(req.header("Authorization"), Some("Bearer abc123"));
//! ```

pub mod cookie;
pub mod credentials;
pub mod error;
pub mod form;
pub mod model;
pub mod provider;
pub mod request;
pub mod storage;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use form::{LoginForm, LoginSubmission, SpaceForm, Status, SubmissionState, Tone};
pub use model::{
    LoginOutcome, MemberAdded, Message, MessageCreated, RegisteredUser, SpaceCreated, SpaceSummary,
};
pub use provider::{
    AuthPolicy, BearerTokenProvider, CookieProvider, CredentialProvider, CsrfCookieProvider,
};
pub use request::{CookieMode, HttpRequest, Method};
pub use tokens::{BearerToken, CsrfToken};
pub use traits::{Sessions, Spaces};
pub use types::{AddMemberRequest, ApiUrl, MessageRequest, Permissions, SpaceRequest};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
