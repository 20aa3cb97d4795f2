//! natter-http - HTTP-backed Natter client.
//!
//! Sends the transport-neutral requests built by `natter-core` over
//! `reqwest`, keeping the cookie jar in step with the server the way a
//! browser would.

mod client;
mod config;
mod sessions;
mod spaces;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use sessions::HttpSessions;
pub use spaces::HttpSpaces;
