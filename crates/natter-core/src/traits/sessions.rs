//! Session establishment trait.

use async_trait::async_trait;

use crate::model::{LoginOutcome, RegisteredUser};
use crate::{Credentials, Result};

/// Creates and ends sessions with the API.
#[async_trait]
pub trait Sessions: Send + Sync {
    /// Exchange credentials for a session cookie and/or bearer token.
    ///
    /// A returned bearer token is persisted under the fixed storage key
    /// before this resolves.
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome>;

    /// End the current session and forget its client-side artifacts.
    async fn logout(&self) -> Result<()>;

    /// Register a new user account.
    async fn register(&self, credentials: Credentials) -> Result<RegisteredUser>;
}
