//! Response types returned by the Natter API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Response from `POST /spaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceCreated {
    /// The server-assigned space name.
    pub name: String,
    /// Location of the new space, e.g. `/spaces/1`.
    pub uri: String,
}

/// An entry from `GET /spaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSummary {
    pub space_id: u64,
    pub name: String,
    pub owner: String,
}

/// Response from `POST /spaces/{id}/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCreated {
    pub uri: String,
}

/// A message from `GET /spaces/{id}/messages` or
/// `GET /spaces/{id}/messages/{msgId}`.
///
/// The API answers with either the row form (`spaceId`, `msgId`, `msg_time`,
/// `msg_text`) or the link form (`uri`, `time`, `message`); both are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub space_id: u64,
    #[serde(default)]
    pub msg_id: u64,
    pub author: String,
    #[serde(default, alias = "msg_time", alias = "time")]
    pub msg_time: Option<DateTime<Utc>>,
    #[serde(default, alias = "msg_text", alias = "message")]
    pub msg_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Message {
    /// Fill in identifiers the body left out: the space from the request,
    /// the message id from the last segment of `uri`.
    pub fn with_ids(mut self, space_id: u64) -> Self {
        if self.space_id == 0 {
            self.space_id = space_id;
        }
        if self.msg_id == 0 {
            if let Some(id) = self
                .uri
                .as_deref()
                .and_then(|uri| uri.rsplit('/').next())
                .and_then(|last| last.parse().ok())
            {
                self.msg_id = id;
            }
        }
        self
    }

    /// Path of this message under the API.
    pub fn path(&self) -> String {
        format!("/spaces/{}/messages/{}", self.space_id, self.msg_id)
    }
}

/// Response from `POST /spaces/{id}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAdded {
    pub username: String,
    pub permissions: String,
}

/// Response from `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
}

/// Body of a successful `POST /sessions`; the token is optional because
/// cookie-only servers answer with an empty body.
#[derive(Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// Parse a login body, treating anything that is not a JSON object with
    /// a string `token` as "no token".
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// The authenticated page to navigate to.
    pub landing: Url,
    /// Whether a bearer token was written to durable storage.
    pub token_stored: bool,
}

/// Error body format used by the API (`{"error": "..."}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}
