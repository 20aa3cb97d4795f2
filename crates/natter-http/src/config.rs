//! Client configuration.

use std::time::Duration;

use natter_core::ApiUrl;

/// Path of the page shown after a successful login.
pub const DEFAULT_LANDING_PAGE: &str = "/natter.html";

/// Settings shared by every request a client sends.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Natter API.
    pub api_url: ApiUrl,
    /// Where to go after login, resolved against `api_url`.
    pub landing_page: String,
    /// Per-request timeout. `None` waits as long as the server takes.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Accept self-signed certificates, as the local development API uses.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_landing_page(mut self, landing_page: impl Into<String>) -> Self {
        self.landing_page = landing_page.into();
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: ApiUrl::default(),
            landing_page: DEFAULT_LANDING_PAGE.to_string(),
            timeout: None,
            user_agent: concat!("natter/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_invalid_certs: false,
        }
    }
}
