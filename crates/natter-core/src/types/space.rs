//! Validated request payloads for the spaces resource.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::Result;
use crate::error::InvalidInputError;

/// Maximum space name length accepted by the API.
pub const MAX_SPACE_NAME_LEN: usize = 255;

/// Maximum username length accepted by the API.
pub const MAX_USERNAME_LEN: usize = 29;

/// Maximum message length accepted by the API.
pub const MAX_MESSAGE_LEN: usize = 1024;

/// Payload for `POST /spaces`.
///
/// Serializes as `{"name": ..., "owner": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceRequest {
    name: String,
    owner: String,
}

impl SpaceRequest {
    /// Validate and build a space creation payload.
    ///
    /// # Errors
    ///
    /// The name must be non-empty and at most 255 characters; the owner
    /// must be 1 to 29 ASCII letters.
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let owner = owner.into();

        if name.is_empty() {
            return Err(InvalidInputError::SpaceName {
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if name.chars().count() > MAX_SPACE_NAME_LEN {
            return Err(InvalidInputError::SpaceName {
                reason: format!("must be at most {} characters", MAX_SPACE_NAME_LEN),
            }
            .into());
        }
        validate_username(&owner, |c| c.is_ascii_alphabetic(), "letters")?;

        Ok(Self { name, owner })
    }

    /// Returns the space name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owner username.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

/// Payload for `POST /spaces/{id}/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRequest {
    author: String,
    message: String,
}

impl MessageRequest {
    /// Validate and build a message payload.
    pub fn new(author: impl Into<String>, message: impl Into<String>) -> Result<Self> {
        let author = author.into();
        let message = message.into();

        validate_username(&author, |c| c.is_ascii_alphanumeric(), "letters or digits")?;
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(InvalidInputError::Message {
                reason: format!("must be at most {} characters", MAX_MESSAGE_LEN),
            }
            .into());
        }

        Ok(Self { author, message })
    }

    /// Returns the author username.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Access granted to a space member: any of `r`, `w` and `d`, in that
/// order. The empty string grants nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Permissions(String);

impl Permissions {
    /// Validate a permission string such as `rw` or `rwd`.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let rest = ["r", "w", "d"]
            .iter()
            .fold(value.as_str(), |rest, flag| {
                rest.strip_prefix(flag).unwrap_or(rest)
            });
        if !rest.is_empty() {
            return Err(InvalidInputError::Permissions { value }.into());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Permissions {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload for `POST /spaces/{id}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddMemberRequest {
    username: String,
    permissions: Permissions,
}

impl AddMemberRequest {
    /// Validate and build a membership payload.
    pub fn new(username: impl Into<String>, permissions: Permissions) -> Result<Self> {
        let username = username.into();
        validate_username(&username, |c| c.is_ascii_alphanumeric(), "letters or digits")?;
        Ok(Self {
            username,
            permissions,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }
}

/// Payload for `POST /users`.
#[derive(Serialize)]
pub(crate) struct RegisterUserRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

fn validate_username(value: &str, allowed: fn(char) -> bool, what: &str) -> Result<()> {
    let len = value.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN || !value.chars().all(allowed) {
        return Err(InvalidInputError::Username {
            value: value.to_string(),
            reason: format!("must be 1 to {} {}", MAX_USERNAME_LEN, what),
        }
        .into());
    }
    Ok(())
}
