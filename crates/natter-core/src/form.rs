//! Form adapters.
//!
//! Thin wrappers that hold the user's input, run one submission through the
//! core, and turn the outcome into a [`Status`] for whatever renders it. The
//! real failure cause goes to the log; the user sees a fixed message.

use std::fmt;

use tracing::{info, warn};
use url::Url;

use crate::Credentials;
use crate::model::SpaceCreated;
use crate::traits::{Sessions, Spaces};
use crate::types::SpaceRequest;

/// Message shown for any failed space creation.
pub const SPACE_FAILURE: &str = "Error creating space.";

/// Message shown for any failed login.
pub const LOGIN_FAILURE: &str = "Error logging in.";

/// How a status message should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// Feedback for the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub tone: Tone,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            message: message.into(),
        }
    }

    /// The confirmation shown after a space is created.
    pub fn space_created(created: &SpaceCreated) -> Self {
        Self::success(format!(
            "Space {} successfully created. Available at {}",
            created.name, created.uri
        ))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Lifecycle of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// The space creation form: a name and an owner.
#[derive(Debug, Clone, Default)]
pub struct SpaceForm {
    pub name: String,
    pub owner: String,
    state: SubmissionState,
}

impl SpaceForm {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Empty both input fields.
    pub fn clear(&mut self) {
        self.name.clear();
        self.owner.clear();
    }

    /// Submit the current input.
    ///
    /// On success both fields are cleared; on failure they are left as typed.
    pub async fn submit(&mut self, api: &dyn Spaces) -> Status {
        self.state = SubmissionState::Submitting;

        let outcome = match SpaceRequest::new(self.name.as_str(), self.owner.as_str()) {
            Ok(request) => api.create_space(&request).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(created) => {
                info!(name = %created.name, uri = %created.uri, "space created");
                self.clear();
                self.state = SubmissionState::Succeeded;
                Status::space_created(&created)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    status = ?err.status(),
                    local = err.is_local(),
                    policy = %api.policy(),
                    "space creation failed"
                );
                self.state = SubmissionState::Failed;
                Status::error(SPACE_FAILURE)
            }
        }
    }
}

/// What the login page should do after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginSubmission {
    /// Go to the authenticated landing page.
    Navigate(Url),
    /// Stay and show the failure.
    Failed(Status),
}

/// The login form.
///
/// The password is handed to the login exchange and not kept, so after a
/// submission it must be typed again with [`LoginForm::set_password`].
#[derive(Default)]
pub struct LoginForm {
    pub username: String,
    password: String,
    state: SubmissionState,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Replace the password, e.g. when retrying after a failure.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Run the login exchange. The password is handed over and not kept.
    ///
    /// An empty password fails without contacting the API.
    pub async fn submit(&mut self, sessions: &dyn Sessions) -> LoginSubmission {
        if self.password.is_empty() {
            warn!(username = %self.username, "login not attempted: no password");
            self.state = SubmissionState::Failed;
            return LoginSubmission::Failed(Status::error(LOGIN_FAILURE));
        }

        self.state = SubmissionState::Submitting;
        let password = std::mem::take(&mut self.password);
        let credentials = Credentials::new(self.username.as_str(), password);

        match sessions.login(credentials).await {
            Ok(outcome) => {
                self.state = SubmissionState::Succeeded;
                LoginSubmission::Navigate(outcome.landing)
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "login failed");
                self.state = SubmissionState::Failed;
                LoginSubmission::Failed(Status::error(LOGIN_FAILURE))
            }
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("state", &self.state)
            .finish()
    }
}
