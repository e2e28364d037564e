//! Authentication contract and outcome types.
//!
//! [`Authenticator`] abstracts "verify credentials remotely". Two
//! implementations live here: [`MockRemoteAuthenticator`] simulates a real
//! backend for production wiring, and [`ScriptedAuthenticator`] replays a
//! named scenario so tests can pick the exact branch they exercise. Both are
//! selected by constructor injection; the flow never knows which one it got.

pub mod mock_remote;
pub use self::mock_remote::{MockRemoteAuthenticator, MockRemoteConfig};

pub mod scripted;
pub use self::scripted::{Scenario, ScriptedAuthenticator};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;
use uuid::Uuid;

/// Credential pairs accepted by both authenticator implementations.
pub(crate) const VALID_CREDENTIALS: &[(&str, &str)] = &[
    ("test@company.com", "Password123!"),
    ("demo@company.com", "DemoPass99!"),
    ("qa@company.com", "QualityFirst1"),
];

/// Contract for verifying credentials against a remote party.
///
/// The call suspends for the implementation's configured delay before
/// producing its result. `Ok(Failure { .. })` covers every authentication
/// failure the backend can report; `Err` is reserved for faults in the call
/// itself and is mapped to a generic failure by the flow.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthOutcome>;
}

/// Result of one authentication attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuthOutcome {
    Success { user: UserRecord },
    Failure {
        message: String,
        code: Option<AuthErrorCode>,
    },
}

impl AuthOutcome {
    /// Failure carrying the code's stock message.
    pub(crate) fn failure(code: AuthErrorCode) -> Self {
        Self::Failure {
            message: code.default_message().to_string(),
            code: Some(code),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Authenticated user handed upward on success. The access token is opaque:
/// never parsed, never refreshed, not persisted by this crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub access_token: String,
}

impl UserRecord {
    /// Mint a record for a verified email: fresh id, timestamp-derived token.
    pub(crate) fn issue(email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            access_token: Ulid::new().to_string(),
        }
    }
}

/// Category reported alongside an authentication failure message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthErrorCode {
    NetworkError,
    InvalidCredentials,
    #[serde(rename = "SERVER_ERROR_500")]
    ServerError500,
    #[serde(rename = "UNAUTHORIZED_401")]
    Unauthorized401,
    #[serde(rename = "SERVICE_UNAVAILABLE_503")]
    ServiceUnavailable503,
    Timeout,
    MalformedResponse,
    #[serde(rename = "RATE_LIMITED_429")]
    RateLimited429,
    MaintenanceMode,
    UnknownError,
}

impl AuthErrorCode {
    /// Wire name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ServerError500 => "SERVER_ERROR_500",
            Self::Unauthorized401 => "UNAUTHORIZED_401",
            Self::ServiceUnavailable503 => "SERVICE_UNAVAILABLE_503",
            Self::Timeout => "TIMEOUT",
            Self::MalformedResponse => "MALFORMED_RESPONSE",
            Self::RateLimited429 => "RATE_LIMITED_429",
            Self::MaintenanceMode => "MAINTENANCE_MODE",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Stock user-facing message for failures carrying this code.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::NetworkError => {
                "Unable to connect. Please check your internet connection and try again."
            }
            Self::InvalidCredentials => "Invalid email or password",
            Self::ServerError500 => "Internal server error. Please try again later.",
            Self::Unauthorized401 => "Authentication failed. Please check your credentials.",
            Self::ServiceUnavailable503 => {
                "Service temporarily unavailable. Please try again later."
            }
            Self::Timeout => "Request timed out. Please try again.",
            Self::MalformedResponse => "Invalid server response. Please try again later.",
            Self::RateLimited429 => "Too many attempts. Please wait a moment and try again.",
            Self::MaintenanceMode => {
                "The service is currently under maintenance. Please try again shortly."
            }
            Self::UnknownError => "An unknown error occurred. Please try again.",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Compare credentials against the demo table. Unknown email and wrong
/// password report the same failure so accounts cannot be enumerated.
pub(crate) fn check_credentials(email: &str, password: &str) -> AuthOutcome {
    let matched = VALID_CREDENTIALS
        .iter()
        .any(|(known_email, known_password)| *known_email == email && *known_password == password);

    if matched {
        AuthOutcome::Success {
            user: UserRecord::issue(email),
        }
    } else {
        AuthOutcome::failure(AuthErrorCode::InvalidCredentials)
    }
}
