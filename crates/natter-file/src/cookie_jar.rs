//! Cookie jar in the state file.

use std::path::Path;

use url::Url;

use natter_core::Result;
use natter_core::cookie::{CookieJar, CookieSet};

use crate::store::StateFile;

/// A [`CookieJar`] persisted to disk, so a session cookie set by one
/// command is sent by the next.
#[derive(Debug, Clone)]
pub struct FileCookieJar {
    file: StateFile,
}

impl FileCookieJar {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            file: StateFile::new(path),
        }
    }

    pub fn from_state(file: StateFile) -> Self {
        Self { file }
    }

    /// All stored cookies.
    pub fn snapshot(&self) -> Result<CookieSet> {
        Ok(self.file.read()?.cookies)
    }
}

impl CookieJar for FileCookieJar {
    fn store(&self, url: &Url, set_cookies: &[String]) -> Result<()> {
        if set_cookies.is_empty() {
            return Ok(());
        }
        self.file
            .update(|data| data.cookies.apply(url, set_cookies))
    }

    fn cookie_header(&self, url: &Url) -> Result<Option<String>> {
        Ok(self.file.read()?.cookies.header_for(url))
    }

    fn script_cookies(&self, url: &Url) -> Result<String> {
        Ok(self.file.read()?.cookies.script_string(url))
    }

    fn clear(&self, url: &Url) -> Result<()> {
        self.file.update(|data| data.cookies.clear_for(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn api() -> Url {
        Url::parse("https://localhost:4567/sessions").unwrap()
    }

    #[test]
    fn cookies_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        FileCookieJar::new(&path)
            .store(
                &api(),
                &[
                    "JSESSIONID=node01abc; Path=/; Secure; HttpOnly".to_string(),
                    "csrfToken=xyz; Path=/; Secure".to_string(),
                ],
            )
            .unwrap();

        let jar = FileCookieJar::new(&path);
        let spaces = Url::parse("https://localhost:4567/spaces").unwrap();
        assert_eq!(
            jar.cookie_header(&spaces).unwrap().as_deref(),
            Some("JSESSIONID=node01abc; csrfToken=xyz")
        );
        assert_eq!(jar.script_cookies(&spaces).unwrap(), "csrfToken=xyz");
    }

    #[test]
    fn clear_empties_the_jar() {
        let dir = TempDir::new().unwrap();
        let jar = FileCookieJar::new(dir.path().join("state.json"));
        jar.store(&api(), &["csrfToken=xyz; Path=/".to_string()])
            .unwrap();

        jar.clear(&api()).unwrap();

        assert!(jar.snapshot().unwrap().is_empty());
        assert_eq!(jar.cookie_header(&api()).unwrap(), None);
    }

    #[test]
    fn jar_and_token_store_share_one_file() {
        use natter_core::storage::{TOKEN_KEY, TokenStore};

        let dir = TempDir::new().unwrap();
        let file = StateFile::new(dir.path().join("state.json"));
        let jar = FileCookieJar::from_state(file.clone());
        let tokens = crate::FileTokenStore::from_state(file.clone());

        tokens.set(TOKEN_KEY, "abc").unwrap();
        jar.store(&api(), &["csrfToken=xyz; Path=/".to_string()])
            .unwrap();

        let data = file.read().unwrap();
        assert_eq!(data.storage.get(TOKEN_KEY).map(String::as_str), Some("abc"));
        assert_eq!(data.cookies.names(), vec!["csrfToken"]);
    }
}
