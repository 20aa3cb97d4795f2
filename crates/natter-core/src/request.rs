//! Transport-neutral requests and the pure builders that produce them.
//!
//! Every builder takes validated input plus, for authenticated endpoints, the
//! active [`CredentialProvider`], and returns a complete [`HttpRequest`]. No
//! I/O happens here; a transport executes the result.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::Result;
use crate::credentials::Credentials;
use crate::error::InvalidInputError;
use crate::provider::CredentialProvider;
use crate::types::{AddMemberRequest, ApiUrl, MessageRequest, RegisterUserRequest, SpaceRequest};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const CSRF_HEADER: &str = "X-CSRF-Token";
pub const APPLICATION_JSON: &str = "application/json";

const SESSIONS: &str = "sessions";
const SPACES: &str = "spaces";
const USERS: &str = "users";

/// Headers whose values are never printed.
const SENSITIVE_HEADERS: [&str; 3] = [AUTHORIZATION, CSRF_HEADER, "Cookie"];

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the jar's cookies accompany a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookieMode {
    /// Send matching cookies and keep any the response sets.
    Include,
    /// No cookie involvement at all.
    #[default]
    Omit,
}

/// A fully built request, ready for a transport to send.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub cookies: CookieMode,
}

impl HttpRequest {
    /// A request without headers, body or cookies.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
            cookies: CookieMode::Omit,
        }
    }

    /// A request carrying `body` as JSON.
    pub fn json<B: Serialize>(method: Method, url: Url, body: &B) -> Result<Self> {
        let body = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: e.to_string(),
        })?;
        let mut request = Self::new(method, url);
        request.set_header(CONTENT_TYPE, APPLICATION_JSON)?;
        request.body = Some(body);
        Ok(request)
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Set a header, replacing any existing value with the same name.
    ///
    /// # Errors
    ///
    /// Values may only contain visible ASCII, spaces and tabs.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if !value.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b)) {
            return Err(InvalidInputError::HeaderValue {
                name: name.to_string(),
            }
            .into());
        }
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value));
        Ok(())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(key, value)| {
                let sensitive = SENSITIVE_HEADERS
                    .iter()
                    .any(|s| key.eq_ignore_ascii_case(s));
                (key.as_str(), if sensitive { "[REDACTED]" } else { value.as_str() })
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}

/// `POST /sessions` with HTTP Basic credentials and ambient cookies.
pub fn login(api: &ApiUrl, credentials: &Credentials) -> Result<HttpRequest> {
    let mut request = HttpRequest::new(Method::Post, api.endpoint(SESSIONS)?);
    request.set_header(CONTENT_TYPE, APPLICATION_JSON)?;
    request.set_header(AUTHORIZATION, credentials.basic_authorization()?)?;
    request.cookies = CookieMode::Include;
    Ok(request)
}

/// `DELETE /sessions` under the active policy.
pub fn logout(api: &ApiUrl, provider: &dyn CredentialProvider) -> Result<HttpRequest> {
    let mut request = HttpRequest::new(Method::Delete, api.endpoint(SESSIONS)?);
    provider.authorize(&mut request)?;
    Ok(request)
}

/// `POST /users`; registration is unauthenticated.
pub fn register_user(api: &ApiUrl, credentials: &Credentials) -> Result<HttpRequest> {
    if credentials.identifier().is_empty() {
        return Err(InvalidInputError::Username {
            value: String::new(),
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    let body = RegisterUserRequest {
        username: credentials.identifier(),
        password: credentials.secret(),
    };
    HttpRequest::json(Method::Post, api.endpoint(USERS)?, &body)
}

/// `POST /spaces` with `{name, owner}` under the active policy.
pub fn create_space(
    api: &ApiUrl,
    input: &SpaceRequest,
    provider: &dyn CredentialProvider,
) -> Result<HttpRequest> {
    let mut request = HttpRequest::json(Method::Post, api.endpoint(SPACES)?, input)?;
    provider.authorize(&mut request)?;
    Ok(request)
}

/// `GET /spaces` under the active policy.
pub fn list_spaces(api: &ApiUrl, provider: &dyn CredentialProvider) -> Result<HttpRequest> {
    let mut request = HttpRequest::new(Method::Get, api.endpoint(SPACES)?);
    provider.authorize(&mut request)?;
    Ok(request)
}

/// `POST /spaces/{id}/messages` under the active policy.
pub fn post_message(
    api: &ApiUrl,
    space_id: u64,
    message: &MessageRequest,
    provider: &dyn CredentialProvider,
) -> Result<HttpRequest> {
    let url = api.endpoint(&format!("{}/{}/messages", SPACES, space_id))?;
    let mut request = HttpRequest::json(Method::Post, url, message)?;
    provider.authorize(&mut request)?;
    Ok(request)
}

/// `GET /spaces/{id}/messages` under the active policy.
pub fn list_messages(
    api: &ApiUrl,
    space_id: u64,
    provider: &dyn CredentialProvider,
) -> Result<HttpRequest> {
    let url = api.endpoint(&format!("{}/{}/messages", SPACES, space_id))?;
    let mut request = HttpRequest::new(Method::Get, url);
    provider.authorize(&mut request)?;
    Ok(request)
}

/// `GET /spaces/{id}/messages/{msgId}` under the active policy.
pub fn read_message(
    api: &ApiUrl,
    space_id: u64,
    msg_id: u64,
    provider: &dyn CredentialProvider,
) -> Result<HttpRequest> {
    let url = api.endpoint(&format!("{}/{}/messages/{}", SPACES, space_id, msg_id))?;
    let mut request = HttpRequest::new(Method::Get, url);
    provider.authorize(&mut request)?;
    Ok(request)
}

/// `POST /spaces/{id}/members` with `{username, permissions}`.
pub fn add_member(
    api: &ApiUrl,
    space_id: u64,
    member: &AddMemberRequest,
    provider: &dyn CredentialProvider,
) -> Result<HttpRequest> {
    let url = api.endpoint(&format!("{}/{}/members", SPACES, space_id))?;
    let mut request = HttpRequest::json(Method::Post, url, member)?;
    provider.authorize(&mut request)?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cookie::{CookieJar, MemoryCookieJar};
    use crate::error::{AuthError, Error};
    use crate::provider::AuthPolicy;
    use crate::storage::{MemoryTokenStore, TOKEN_KEY, TokenStore};

    fn api() -> ApiUrl {
        ApiUrl::new("https://localhost:4567").unwrap()
    }

    fn stores() -> (Arc<MemoryCookieJar>, Arc<MemoryTokenStore>) {
        (
            Arc::new(MemoryCookieJar::default()),
            Arc::new(MemoryTokenStore::default()),
        )
    }

    #[test]
    fn login_request_uses_basic_auth_and_cookies() {
        let req = login(&api(), &Credentials::new("demo", "changeit")).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url.as_str(), "https://localhost:4567/sessions");
        assert_eq!(req.header("authorization"), Some("Basic ZGVtbzpjaGFuZ2VpdA=="));
        assert_eq!(req.header(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(req.cookies, CookieMode::Include);
        assert!(req.body.is_none());
    }

    #[test]
    fn create_space_with_ambient_cookie_policy() {
        let (jar, storage) = stores();
        let provider = AuthPolicy::AmbientCookie.provider(jar, storage);
        let input = SpaceRequest::new("acme", "bob").unwrap();

        let req = create_space(&api(), &input, provider.as_ref()).unwrap();

        assert_eq!(req.url.as_str(), "https://localhost:4567/spaces");
        assert_eq!(req.cookies, CookieMode::Include);
        assert_eq!(req.header(AUTHORIZATION), None);
        assert_eq!(req.header(CSRF_HEADER), None);
        assert_eq!(
            req.body,
            Some(serde_json::json!({"name": "acme", "owner": "bob"}))
        );
    }

    #[test]
    fn create_space_with_csrf_policy() {
        let (jar, storage) = stores();
        jar.store(
            &api().endpoint("sessions").unwrap(),
            &[
                "JSESSIONID=s1; Path=/; HttpOnly".to_string(),
                "csrfToken=t%2F1; Path=/".to_string(),
            ],
        )
        .unwrap();
        let provider = AuthPolicy::CsrfCookie.provider(jar, storage);
        let input = SpaceRequest::new("acme", "bob").unwrap();

        let req = create_space(&api(), &input, provider.as_ref()).unwrap();

        assert_eq!(req.cookies, CookieMode::Include);
        assert_eq!(req.header(CSRF_HEADER), Some("t/1"));
        assert_eq!(req.header(AUTHORIZATION), None);
    }

    #[test]
    fn csrf_policy_cannot_read_http_only_cookie() {
        let (jar, storage) = stores();
        jar.store(
            &api().endpoint("sessions").unwrap(),
            &["csrfToken=hidden; Path=/; HttpOnly".to_string()],
        )
        .unwrap();
        let provider = AuthPolicy::CsrfCookie.provider(jar, storage);
        let input = SpaceRequest::new("acme", "bob").unwrap();

        let err = create_space(&api(), &input, provider.as_ref()).unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(AuthError::MissingCredential { .. })
        ));
    }

    #[test]
    fn create_space_with_bearer_policy() {
        let (jar, storage) = stores();
        storage.set(TOKEN_KEY, "QOUFCLRmc0f4").unwrap();
        let provider = AuthPolicy::BearerToken.provider(jar, storage);
        let input = SpaceRequest::new("acme", "bob").unwrap();

        let req = create_space(&api(), &input, provider.as_ref()).unwrap();

        assert_eq!(req.cookies, CookieMode::Omit);
        assert_eq!(req.header(AUTHORIZATION), Some("Bearer QOUFCLRmc0f4"));
        assert_eq!(req.header(CSRF_HEADER), None);
    }

    #[test]
    fn bearer_policy_fails_fast_without_token() {
        let (jar, storage) = stores();
        let provider = AuthPolicy::BearerToken.provider(jar, storage);
        let input = SpaceRequest::new("acme", "bob").unwrap();

        let err = create_space(&api(), &input, provider.as_ref()).unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(AuthError::MissingCredential { kind: "bearer token" })
        ));
    }

    #[test]
    fn post_message_url() {
        let (jar, storage) = stores();
        let provider = AuthPolicy::AmbientCookie.provider(jar, storage);
        let msg = MessageRequest::new("bob", "hi").unwrap();
        let req = post_message(&api(), 7, &msg, provider.as_ref()).unwrap();
        assert_eq!(req.url.as_str(), "https://localhost:4567/spaces/7/messages");
        assert_eq!(
            req.body,
            Some(serde_json::json!({"author": "bob", "message": "hi"}))
        );
    }

    #[test]
    fn message_read_urls() {
        let (jar, storage) = stores();
        storage.set(TOKEN_KEY, "abc").unwrap();
        let provider = AuthPolicy::BearerToken.provider(jar, storage);

        let list = list_messages(&api(), 3, provider.as_ref()).unwrap();
        assert_eq!(list.method, Method::Get);
        assert_eq!(list.url.as_str(), "https://localhost:4567/spaces/3/messages");
        assert_eq!(list.header(AUTHORIZATION), Some("Bearer abc"));

        let one = read_message(&api(), 3, 12, provider.as_ref()).unwrap();
        assert_eq!(one.url.as_str(), "https://localhost:4567/spaces/3/messages/12");
        assert!(one.body.is_none());
    }

    #[test]
    fn add_member_body() {
        let (jar, storage) = stores();
        let provider = AuthPolicy::AmbientCookie.provider(jar, storage);
        let member =
            AddMemberRequest::new("alice", crate::types::Permissions::new("rw").unwrap()).unwrap();

        let req = add_member(&api(), 3, &member, provider.as_ref()).unwrap();

        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url.as_str(), "https://localhost:4567/spaces/3/members");
        assert_eq!(req.cookies, CookieMode::Include);
        assert_eq!(
            req.body,
            Some(serde_json::json!({"username": "alice", "permissions": "rw"}))
        );
    }

    #[test]
    fn register_user_body() {
        let req = register_user(&api(), &Credentials::new("demo", "changeit")).unwrap();
        assert_eq!(req.url.as_str(), "https://localhost:4567/users");
        assert_eq!(req.cookies, CookieMode::Omit);
        assert_eq!(
            req.body,
            Some(serde_json::json!({"username": "demo", "password": "changeit"}))
        );
    }

    #[test]
    fn set_header_rejects_line_breaks() {
        let mut req = HttpRequest::new(Method::Get, api().endpoint("spaces").unwrap());
        assert!(req.set_header(AUTHORIZATION, "Bearer a\r\nX-Evil: 1").is_err());
        assert_eq!(req.header(AUTHORIZATION), None);
    }

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut req = HttpRequest::new(Method::Get, api().endpoint("spaces").unwrap());
        req.set_header("x-csrf-token", "a").unwrap();
        req.set_header(CSRF_HEADER, "b").unwrap();
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.header(CSRF_HEADER), Some("b"));
    }

    #[test]
    fn debug_redacts_credentials() {
        let req = login(&api(), &Credentials::new("demo", "changeit")).unwrap();
        let debug = format!("{:?}", req);
        assert!(!debug.contains("ZGVtbzpjaGFuZ2VpdA"));
        assert!(debug.contains("[REDACTED]"));
    }
}
