//! Cookie handling.
//!
//! The client keeps its own cookie jar in place of a browser's. Cookies
//! arrive through `Set-Cookie` response headers and are replayed on requests
//! whose cookie mode is [`CookieMode::Include`](crate::CookieMode). Code that
//! needs a cookie value (the CSRF policy) may only read what a page script
//! could read: cookies without the `HttpOnly` attribute.

use std::convert::Infallible;
use std::fmt;
use std::sync::RwLock;

use cookie::Cookie as RawCookie;
use cookie_store::{Cookie, CookieStore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};
use url::Url;

use crate::Result;
use crate::error::StorageError;

/// Name of the script-readable anti-forgery cookie.
pub const CSRF_COOKIE: &str = "csrfToken";

/// Splits a script-visible cookie string (`a=1; b=2`) into decoded pairs.
///
/// Each segment is split on its first `=`; key and value are trimmed and
/// percent-decoded. Segments without `=` or that do not decode to UTF-8 are
/// skipped.
pub fn parse_cookie_string(cookies: &str) -> Vec<(String, String)> {
    cookies
        .split(';')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = urlencoding::decode(key.trim()).ok()?;
            let value = urlencoding::decode(value.trim()).ok()?;
            Some((key.into_owned(), value.into_owned()))
        })
        .collect()
}

/// Returns the decoded value of the first cookie called `name`.
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    parse_cookie_string(cookies)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Cookies received from the API, with browser matching and expiry rules.
///
/// Storage, matching and expiry are handled by [`cookie_store`]. On top of
/// that, a `Domain` attribute naming a public suffix (`co.uk`, `com`) or a
/// dotless name is refused unless it is exactly the responding host, in
/// which case the cookie is kept as host-only.
#[derive(Clone, Default)]
pub struct CookieSet {
    store: CookieStore,
}

impl CookieSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `Set-Cookie` headers received from `url`.
    pub fn apply(&mut self, url: &Url, set_cookies: &[String]) {
        for header in set_cookies {
            let mut raw = match RawCookie::parse(header.clone()) {
                Ok(raw) => raw,
                Err(e) => {
                    debug!(error = %e, "ignoring malformed Set-Cookie header");
                    continue;
                }
            };
            if let Some(domain) = raw.domain().map(|d| d.trim_start_matches('.').to_ascii_lowercase()) {
                if url.host_str().is_some_and(|host| host.eq_ignore_ascii_case(&domain)) {
                    raw.unset_domain();
                } else if is_public_suffix(&domain) {
                    debug!(cookie = raw.name(), %domain, "rejecting cookie for public suffix");
                    continue;
                }
            }
            match self.store.insert_raw(&raw, url) {
                Ok(_) => trace!(cookie = raw.name(), "cookie applied"),
                Err(e) => debug!(cookie = raw.name(), error = %e, "cookie rejected"),
            }
        }
    }

    /// The `Cookie` request header for `url`, including `HttpOnly` cookies.
    pub fn header_for(&self, url: &Url) -> Option<String> {
        let joined = self.join(url, true);
        (!joined.is_empty()).then_some(joined)
    }

    /// What a page script would see for `url` (no `HttpOnly` cookies).
    pub fn script_string(&self, url: &Url) -> String {
        self.join(url, false)
    }

    /// Drop every cookie that would be sent to `url`.
    pub fn clear_for(&mut self, url: &Url) {
        let doomed: Vec<(String, String, String)> = self
            .store
            .matches(url)
            .into_iter()
            .map(|c| {
                (
                    String::from(&c.domain),
                    String::from(&c.path),
                    c.name().to_string(),
                )
            })
            .collect();
        for (domain, path, name) in doomed {
            self.store.remove(&domain, &path, &name);
        }
    }

    /// Names of the live cookies, in storage order.
    pub fn names(&self) -> Vec<&str> {
        self.store.iter_unexpired().map(|c| c.name()).collect()
    }

    /// Number of live cookies.
    pub fn len(&self) -> usize {
        self.store.iter_unexpired().count()
    }

    /// True if no live cookies are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn join(&self, url: &Url, include_http_only: bool) -> String {
        self.store
            .matches(url)
            .into_iter()
            .filter(|c| include_http_only || !c.http_only().unwrap_or(false))
            .map(|c| format!("{}={}", c.name(), c.value()))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Debug for CookieSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSet")
            .field("names", &self.names())
            .finish()
    }
}

// Persisted as the list of cookies, session cookies included.
impl Serialize for CookieSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.store.iter_any())
    }
}

impl<'de> Deserialize<'de> for CookieSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let cookies = Vec::<Cookie<'static>>::deserialize(deserializer)?;
        let store = CookieStore::from_cookies(cookies.into_iter().map(Ok::<_, Infallible>), false)
            .unwrap_or_default();
        Ok(Self { store })
    }
}

/// True for names that must not carry cookies for a whole domain tree:
/// dotless names and entries of the public suffix list.
fn is_public_suffix(domain: &str) -> bool {
    !domain.contains('.') || psl::domain_str(domain).is_none()
}

/// Client-side cookie storage, standing in for the browser's jar.
pub trait CookieJar: Send + Sync {
    /// Record the `Set-Cookie` headers of a response from `url`.
    fn store(&self, url: &Url, set_cookies: &[String]) -> Result<()>;

    /// The `Cookie` header to send with a request to `url`, if any.
    fn cookie_header(&self, url: &Url) -> Result<Option<String>>;

    /// The script-visible cookie string for `url`, like `document.cookie`.
    fn script_cookies(&self, url: &Url) -> Result<String>;

    /// Forget the cookies that apply to `url`.
    fn clear(&self, url: &Url) -> Result<()>;
}

/// An in-memory cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RwLock<CookieSet>,
}

impl MemoryCookieJar {
    /// Snapshot of the stored cookies.
    pub fn snapshot(&self) -> Result<CookieSet> {
        let cookies = self.cookies.read().map_err(|_| StorageError::Poisoned)?;
        Ok(cookies.clone())
    }
}

impl CookieJar for MemoryCookieJar {
    fn store(&self, url: &Url, set_cookies: &[String]) -> Result<()> {
        let mut cookies = self.cookies.write().map_err(|_| StorageError::Poisoned)?;
        cookies.apply(url, set_cookies);
        Ok(())
    }

    fn cookie_header(&self, url: &Url) -> Result<Option<String>> {
        let cookies = self.cookies.read().map_err(|_| StorageError::Poisoned)?;
        Ok(cookies.header_for(url))
    }

    fn script_cookies(&self, url: &Url) -> Result<String> {
        let cookies = self.cookies.read().map_err(|_| StorageError::Poisoned)?;
        Ok(cookies.script_string(url))
    }

    fn clear(&self, url: &Url) -> Result<()> {
        let mut cookies = self.cookies.write().map_err(|_| StorageError::Poisoned)?;
        cookies.clear_for(url);
        Ok(())
    }
}
