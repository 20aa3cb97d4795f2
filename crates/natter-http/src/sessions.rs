//! Session establishment over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use natter_core::error::{AuthError, Error};
use natter_core::model::{LoginOutcome, LoginResponse, RegisteredUser};
use natter_core::provider::CredentialProvider;
use natter_core::request;
use natter_core::storage::{TOKEN_KEY, TokenStore};
use natter_core::traits::Sessions;
use natter_core::{Credentials, Result};

use crate::client::{ApiClient, transport_error};

/// Logs in and out against `/sessions` and registers users.
#[derive(Clone)]
pub struct HttpSessions {
    client: ApiClient,
    storage: Arc<dyn TokenStore>,
    provider: Arc<dyn CredentialProvider>,
}

impl HttpSessions {
    /// `provider` authenticates the logout request; login always uses
    /// Basic credentials.
    pub fn new(
        client: ApiClient,
        storage: Arc<dyn TokenStore>,
        provider: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            storage,
            provider,
        }
    }

    /// Forget the bearer token and every cookie for the API.
    fn forget_session(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)?;
        let api = self.client.api();
        self.client.jar().clear(api.as_url())?;
        self.client.jar().clear(&api.endpoint("sessions")?)?;
        Ok(())
    }
}

impl std::fmt::Debug for HttpSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSessions")
            .field("client", &self.client)
            .field("policy", &self.provider.policy())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Sessions for HttpSessions {
    #[instrument(skip(self, credentials), fields(user = %credentials.identifier()))]
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome> {
        let request = request::login(self.client.api(), &credentials)?;

        let response = match self.client.send(request).await {
            Ok(response) => response,
            Err(Error::Protocol(err)) if err.is_auth_error() => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(err) => return Err(err),
        };

        let body = response.bytes().await.map_err(transport_error)?;
        let token_stored = match LoginResponse::parse(&body).token {
            Some(token) => {
                self.storage.set(TOKEN_KEY, &token)?;
                debug!("bearer token stored");
                true
            }
            None => false,
        };

        let landing = self.client.resolve(&self.client.config().landing_page)?;
        info!(token_stored, "logged in");
        Ok(LoginOutcome {
            landing,
            token_stored,
        })
    }

    #[instrument(skip(self), fields(policy = %self.provider.policy()))]
    async fn logout(&self) -> Result<()> {
        let request = request::logout(self.client.api(), self.provider.as_ref())?;

        match self.client.send_empty(request).await {
            Ok(()) => {
                self.forget_session()?;
                info!("logged out");
                Ok(())
            }
            Err(Error::Protocol(err)) if err.is_auth_error() => {
                self.forget_session()?;
                Err(AuthError::SessionExpired.into())
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, credentials), fields(user = %credentials.identifier()))]
    async fn register(&self, credentials: Credentials) -> Result<RegisteredUser> {
        let request = request::register_user(self.client.api(), &credentials)?;
        let user: RegisteredUser = self.client.send_json(request).await?;
        info!(username = %user.username, "user registered");
        Ok(user)
    }
}
