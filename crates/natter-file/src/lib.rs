//! natter-file - File-backed client state.
//!
//! Persists what a browser would keep between page loads: the durable
//! key/value storage holding the bearer token, and the cookie jar holding
//! the session and CSRF cookies. Both live in one JSON state file.

mod cookie_jar;
mod store;
mod token_store;

pub use cookie_jar::FileCookieJar;
pub use store::{StateData, StateFile};
pub use token_store::FileTokenStore;
