//! Scripted authenticator for deterministic tests.
//!
//! Each instance replays one pre-scripted [`Scenario`] after a configurable
//! delay, so an acceptance criterion can name the exact branch it exercises.
//! Scenario names serialize in `snake_case`, matching how behavior files
//! outside this crate refer to them.

use super::{check_credentials, AuthErrorCode, AuthOutcome, Authenticator};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument};

const DEFAULT_DELAY: Duration = Duration::from_millis(100);
/// Long enough that any reasonable caller deadline elapses first.
const DEFAULT_TIMEOUT_STALL: Duration = Duration::from_secs(30);

/// Pre-scripted authentication outcomes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Validate against the credential table like the mock remote.
    Success,
    InvalidCredentials,
    NetworkError,
    #[serde(rename = "server_error_500")]
    ServerError500,
    #[serde(rename = "unauthorized_401")]
    Unauthorized401,
    #[serde(rename = "service_unavailable_503")]
    ServiceUnavailable503,
    /// Stalls far past any caller deadline, then still reports a failure.
    Timeout,
    MalformedResponse,
    #[serde(rename = "rate_limited_429")]
    RateLimited429,
    MaintenanceMode,
    UnknownError,
}

impl Scenario {
    /// Every scenario, for exhaustive sweeps.
    #[must_use]
    pub const fn all() -> [Scenario; 11] {
        [
            Self::Success,
            Self::InvalidCredentials,
            Self::NetworkError,
            Self::ServerError500,
            Self::Unauthorized401,
            Self::ServiceUnavailable503,
            Self::Timeout,
            Self::MalformedResponse,
            Self::RateLimited429,
            Self::MaintenanceMode,
            Self::UnknownError,
        ]
    }

    /// Failure code this scenario reports; `None` for [`Scenario::Success`].
    #[must_use]
    pub const fn code(self) -> Option<AuthErrorCode> {
        match self {
            Self::Success => None,
            Self::InvalidCredentials => Some(AuthErrorCode::InvalidCredentials),
            Self::NetworkError => Some(AuthErrorCode::NetworkError),
            Self::ServerError500 => Some(AuthErrorCode::ServerError500),
            Self::Unauthorized401 => Some(AuthErrorCode::Unauthorized401),
            Self::ServiceUnavailable503 => Some(AuthErrorCode::ServiceUnavailable503),
            Self::Timeout => Some(AuthErrorCode::Timeout),
            Self::MalformedResponse => Some(AuthErrorCode::MalformedResponse),
            Self::RateLimited429 => Some(AuthErrorCode::RateLimited429),
            Self::MaintenanceMode => Some(AuthErrorCode::MaintenanceMode),
            Self::UnknownError => Some(AuthErrorCode::UnknownError),
        }
    }
}

/// Test fake replaying one scenario per instance.
#[derive(Clone, Debug)]
pub struct ScriptedAuthenticator {
    scenario: Scenario,
    delay: Duration,
    timeout_stall: Duration,
    message_override: Option<String>,
}

impl ScriptedAuthenticator {
    #[must_use]
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            delay: DEFAULT_DELAY,
            timeout_stall: DEFAULT_TIMEOUT_STALL,
            message_override: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the scenario's stock failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message_override = Some(message.into());
        self
    }

    /// Shorten the timeout stall so the scenario stays testable.
    #[must_use]
    pub fn with_timeout_stall(mut self, stall: Duration) -> Self {
        self.timeout_stall = stall;
        self
    }

    #[must_use]
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    fn failure(&self, code: AuthErrorCode) -> AuthOutcome {
        let message = self
            .message_override
            .clone()
            .unwrap_or_else(|| code.default_message().to_string());

        AuthOutcome::Failure {
            message,
            code: Some(code),
        }
    }
}

#[async_trait::async_trait]
impl Authenticator for ScriptedAuthenticator {
    #[instrument(skip(self, password), fields(scenario = ?self.scenario))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        if self.scenario == Scenario::Timeout {
            // The wait itself is the simulated symptom; the caller is never
            // errored from this side.
            sleep(self.timeout_stall).await;
            return Ok(self.failure(AuthErrorCode::Timeout));
        }

        sleep(self.delay).await;

        let outcome = match self.scenario.code() {
            None => check_credentials(email, password),
            Some(code) => self.failure(code),
        };
        debug!(email = %email, success = outcome.is_success(), "scripted outcome ready");

        Ok(outcome)
    }
}
