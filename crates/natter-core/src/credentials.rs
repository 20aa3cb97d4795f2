//! Login credentials type.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::Result;
use crate::error::InvalidInputError;

/// Login credentials for Natter authentication.
///
/// Holds the username and password captured from the login form. The value
/// is consumed by the login exchange and not retained afterwards.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use natter_core::Credentials;
///
/// let creds = Credentials::new("alice", "password");
/// assert_eq!(creds.basic_authorization().unwrap(), "Basic YWxpY2U6cGFzc3dvcmQ=");
/// ```
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Returns the identifier (username).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }

    /// Builds the `Authorization: Basic` header value.
    ///
    /// # Errors
    ///
    /// The identifier may not be empty or contain `:`, since the server splits
    /// the decoded pair on the first colon.
    pub fn basic_authorization(&self) -> Result<String> {
        if self.identifier.is_empty() {
            return Err(InvalidInputError::Username {
                value: String::new(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.identifier.contains(':') {
            return Err(InvalidInputError::Username {
                value: self.identifier.clone(),
                reason: "must not contain ':'".to_string(),
            }
            .into());
        }

        let pair = format!("{}:{}", self.identifier, self.secret);
        Ok(format!("Basic {}", STANDARD.encode(pair.as_bytes())))
    }
}

// Hide the secret in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
