//! Credential attachment policies.
//!
//! A [`CredentialProvider`] decides how an outgoing request proves who sent
//! it. Exactly one provider is chosen when a client is constructed and the
//! three policies are never combined:
//!
//! | policy | cookies | header |
//! |---|---|---|
//! | [`CookieProvider`] | included | none |
//! | [`CsrfCookieProvider`] | included | `X-CSRF-Token` |
//! | [`BearerTokenProvider`] | omitted | `Authorization: Bearer` |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Result;
use crate::cookie::{CSRF_COOKIE, CookieJar, find_cookie};
use crate::error::{AuthError, InvalidInputError};
use crate::request::{AUTHORIZATION, CSRF_HEADER, CookieMode, HttpRequest};
use crate::storage::{TOKEN_KEY, TokenStore};
use crate::tokens::{BearerToken, CsrfToken};

/// Attaches the active session artifact to a request.
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// Which policy this provider implements.
    fn policy(&self) -> AuthPolicy;

    /// Add credentials to `request`.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::MissingCredential`] when the artifact the
    /// policy depends on is absent, so nothing malformed is ever sent.
    fn authorize(&self, request: &mut HttpRequest) -> Result<()>;
}

/// The three trust models for authenticated requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthPolicy {
    /// Rely on the session cookie alone. Open to cross-site request forgery.
    AmbientCookie,
    /// Session cookie plus the `csrfToken` cookie echoed as a header.
    CsrfCookie,
    /// Bearer token from durable storage; cookies are never sent.
    BearerToken,
}

impl AuthPolicy {
    /// Build the provider for this policy over the given stores.
    pub fn provider(
        self,
        jar: Arc<dyn CookieJar>,
        storage: Arc<dyn TokenStore>,
    ) -> Arc<dyn CredentialProvider> {
        match self {
            AuthPolicy::AmbientCookie => Arc::new(CookieProvider),
            AuthPolicy::CsrfCookie => Arc::new(CsrfCookieProvider::new(jar)),
            AuthPolicy::BearerToken => Arc::new(BearerTokenProvider::new(storage)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthPolicy::AmbientCookie => "cookie",
            AuthPolicy::CsrfCookie => "csrf",
            AuthPolicy::BearerToken => "bearer",
        }
    }
}

impl fmt::Display for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cookie" | "ambient-cookie" => Ok(AuthPolicy::AmbientCookie),
            "csrf" | "csrf-cookie" => Ok(AuthPolicy::CsrfCookie),
            "bearer" | "bearer-token" => Ok(AuthPolicy::BearerToken),
            other => Err(InvalidInputError::Other {
                message: format!("unknown auth policy '{}'", other),
            }
            .into()),
        }
    }
}

/// Ambient-cookie policy: the jar's cookies go along, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieProvider;

impl CredentialProvider for CookieProvider {
    fn policy(&self) -> AuthPolicy {
        AuthPolicy::AmbientCookie
    }

    fn authorize(&self, request: &mut HttpRequest) -> Result<()> {
        request.cookies = CookieMode::Include;
        Ok(())
    }
}

/// CSRF-defended cookie policy.
pub struct CsrfCookieProvider {
    jar: Arc<dyn CookieJar>,
}

impl CsrfCookieProvider {
    pub fn new(jar: Arc<dyn CookieJar>) -> Self {
        Self { jar }
    }

    /// Read the token the way a page script would, from non-`HttpOnly`
    /// cookies visible at the request URL.
    fn token_for(&self, request: &HttpRequest) -> Result<CsrfToken> {
        let cookies = self.jar.script_cookies(&request.url)?;
        find_cookie(&cookies, CSRF_COOKIE)
            .map(CsrfToken::new)
            .ok_or_else(|| {
                AuthError::MissingCredential {
                    kind: "csrfToken cookie",
                }
                .into()
            })
    }
}

impl fmt::Debug for CsrfCookieProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfCookieProvider").finish_non_exhaustive()
    }
}

impl CredentialProvider for CsrfCookieProvider {
    fn policy(&self) -> AuthPolicy {
        AuthPolicy::CsrfCookie
    }

    fn authorize(&self, request: &mut HttpRequest) -> Result<()> {
        let token = self.token_for(request)?;
        trace!("attaching CSRF token");
        request.set_header(CSRF_HEADER, token.as_str())?;
        request.cookies = CookieMode::Include;
        Ok(())
    }
}

/// Bearer-token policy.
pub struct BearerTokenProvider {
    storage: Arc<dyn TokenStore>,
}

impl BearerTokenProvider {
    pub fn new(storage: Arc<dyn TokenStore>) -> Self {
        Self { storage }
    }

    fn token(&self) -> Result<BearerToken> {
        self.storage
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(BearerToken::new)
            .ok_or_else(|| {
                AuthError::MissingCredential {
                    kind: "bearer token",
                }
                .into()
            })
    }
}

impl fmt::Debug for BearerTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerTokenProvider").finish_non_exhaustive()
    }
}

impl CredentialProvider for BearerTokenProvider {
    fn policy(&self) -> AuthPolicy {
        AuthPolicy::BearerToken
    }

    fn authorize(&self, request: &mut HttpRequest) -> Result<()> {
        let token = self.token()?;
        trace!("attaching bearer token");
        request.set_header(AUTHORIZATION, token.authorization())?;
        request.cookies = CookieMode::Omit;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::MemoryCookieJar;
    use crate::request::Method;
    use crate::storage::MemoryTokenStore;
    use url::Url;

    fn request() -> HttpRequest {
        HttpRequest::new(
            Method::Post,
            Url::parse("https://localhost:4567/spaces").unwrap(),
        )
    }

    #[test]
    fn policy_parses_cli_names() {
        assert_eq!("cookie".parse::<AuthPolicy>().unwrap(), AuthPolicy::AmbientCookie);
        assert_eq!("csrf".parse::<AuthPolicy>().unwrap(), AuthPolicy::CsrfCookie);
        assert_eq!("bearer".parse::<AuthPolicy>().unwrap(), AuthPolicy::BearerToken);
        assert!("basic".parse::<AuthPolicy>().is_err());
    }

    #[test]
    fn providers_report_their_policy() {
        let jar: Arc<dyn CookieJar> = Arc::new(MemoryCookieJar::default());
        let storage: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::default());
        for policy in [
            AuthPolicy::AmbientCookie,
            AuthPolicy::CsrfCookie,
            AuthPolicy::BearerToken,
        ] {
            let provider = policy.provider(jar.clone(), storage.clone());
            assert_eq!(provider.policy(), policy);
        }
    }

    #[test]
    fn bearer_overrides_cookie_mode() {
        let storage = Arc::new(MemoryTokenStore::default());
        storage.set(TOKEN_KEY, "tok").unwrap();
        let provider = BearerTokenProvider::new(storage);

        let mut req = request();
        req.cookies = CookieMode::Include;
        provider.authorize(&mut req).unwrap();

        assert_eq!(req.cookies, CookieMode::Omit);
        assert_eq!(req.header(AUTHORIZATION), Some("Bearer tok"));
    }

    #[test]
    fn bearer_treats_empty_token_as_missing() {
        let storage = Arc::new(MemoryTokenStore::default());
        storage.set(TOKEN_KEY, "").unwrap();
        let provider = BearerTokenProvider::new(storage);
        assert!(provider.authorize(&mut request()).is_err());
    }

    #[test]
    fn bearer_rejects_token_with_control_characters() {
        let storage = Arc::new(MemoryTokenStore::default());
        storage.set(TOKEN_KEY, "tok\nX-Injected: 1").unwrap();
        let provider = BearerTokenProvider::new(storage);
        let mut req = request();
        assert!(provider.authorize(&mut req).is_err());
        assert_eq!(req.header(AUTHORIZATION), None);
    }

    #[test]
    fn csrf_missing_cookie_leaves_request_untouched() {
        let provider = CsrfCookieProvider::new(Arc::new(MemoryCookieJar::default()));
        let mut req = request();
        let err = provider.authorize(&mut req).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Auth(AuthError::MissingCredential {
                kind: "csrfToken cookie"
            })
        ));
        assert_eq!(req.header(CSRF_HEADER), None);
        assert_eq!(req.cookies, CookieMode::Omit);
    }

    #[test]
    fn cookie_provider_adds_no_headers() {
        let mut req = request();
        CookieProvider.authorize(&mut req).unwrap();
        assert!(req.headers().is_empty());
        assert_eq!(req.cookies, CookieMode::Include);
    }
}
