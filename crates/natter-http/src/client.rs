//! Request execution over reqwest.

use std::sync::Arc;

use reqwest::header::{COOKIE, RETRY_AFTER, SET_COOKIE};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use natter_core::cookie::CookieJar;
use natter_core::error::{Error, ProtocolError, TransportError};
use natter_core::model::ApiErrorBody;
use natter_core::{ApiUrl, CookieMode, HttpRequest, Method, Result};

use crate::config::ClientConfig;

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Sends [`HttpRequest`]s and manages the cookie jar.
///
/// Cookies are only read from and written to the jar for requests whose
/// cookie mode is [`CookieMode::Include`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    jar: Arc<dyn CookieJar>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, jar: Arc<dyn CookieJar>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(transport_error)?;

        Ok(Self {
            http,
            config: Arc::new(config),
            jar,
        })
    }

    pub fn api(&self) -> &ApiUrl {
        &self.config.api_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn jar(&self) -> &Arc<dyn CookieJar> {
        &self.jar
    }

    /// Send a request, returning the response only if its status is 2xx.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn send(&self, request: HttpRequest) -> Result<reqwest::Response> {
        let include_cookies = request.cookies == CookieMode::Include;

        let mut builder = self
            .http
            .request(to_reqwest(request.method), request.url.clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if include_cookies {
            if let Some(cookies) = self.jar.cookie_header(&request.url)? {
                trace!("attaching cookies");
                builder = builder.header(COOKIE, cookies);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("sending request");
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(%status, "response received");

        if include_cookies {
            let set_cookies: Vec<String> = response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .map(str::to_string)
                .collect();
            if !set_cookies.is_empty() {
                self.jar.store(response.url(), &set_cookies)?;
            }
        }

        if status.is_success() {
            Ok(response)
        } else {
            let error = parse_error_response(response).await;
            warn!(status = error.status, error = ?error.error, "request rejected");
            Err(Error::Protocol(error))
        }
    }

    /// Send a request and decode its JSON body.
    pub async fn send_json<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            Error::Transport(TransportError::Decode {
                message: e.to_string(),
            })
        })
    }

    /// Send a request whose response body is not needed.
    pub async fn send_empty(&self, request: HttpRequest) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    /// Resolve a path such as the landing page against the API URL.
    pub(crate) fn resolve(&self, reference: &str) -> Result<url::Url> {
        self.config.api_url.join(reference)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api", &self.config.api_url.as_str())
            .finish_non_exhaustive()
    }
}

async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    let error = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ApiErrorBody>(&body)
            .ok()
            .and_then(|body| body.error),
        Err(_) => None,
    };

    ProtocolError::new(
        status.as_u16(),
        status.canonical_reason().map(str::to_string),
    )
    .with_error(error)
    .with_retry_after(retry_after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use natter_core::cookie::MemoryCookieJar;

    #[test]
    fn client_uses_configured_api() {
        let api = ApiUrl::new("http://127.0.0.1:4567").unwrap();
        let client =
            ApiClient::new(ClientConfig::new(api), Arc::new(MemoryCookieJar::default())).unwrap();
        assert_eq!(client.api().as_str(), "http://127.0.0.1:4567/");
    }

    #[test]
    fn landing_page_resolves_against_origin() {
        let api = ApiUrl::new("https://localhost:4567/api/").unwrap();
        let client =
            ApiClient::new(ClientConfig::new(api), Arc::new(MemoryCookieJar::default())).unwrap();
        assert_eq!(
            client.resolve("/natter.html").unwrap().as_str(),
            "https://localhost:4567/natter.html"
        );
    }
}
