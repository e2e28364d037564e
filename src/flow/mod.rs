//! Login screen state machine.
//!
//! [`LoginFlow`] owns the observable [`LoginState`] and is the single writer
//! to it. Field edits run the validator and replace the state wholesale;
//! `submit` dispatches at most one authentication call at a time and applies
//! the result when it arrives.
//!
//! State overview, encoded in [`LoginState`] fields:
//! - *Editing*: `is_in_flight == false`, `is_authenticated == false`.
//! - *Submitting*: `is_in_flight == true`.
//! - *Failed*: back to editing with `error_message` set.
//! - *Authenticated*: terminal; edit and submit operations become no-ops.

use crate::auth::{AuthOutcome, Authenticator};
use crate::validator;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

type SuccessCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Everything the rendering layer needs to draw the login screen.
///
/// Replaced wholesale on every transition; `is_submit_enabled` is derived
/// from the fields and field errors and is never set independently.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub is_password_visible: bool,
    pub is_submit_enabled: bool,
    pub is_in_flight: bool,
    pub is_authenticated: bool,
    pub error_message: Option<String>,
}

impl LoginState {
    fn submit_enabled(&self) -> bool {
        !self.email.is_empty()
            && !self.password.is_empty()
            && self.email_error.is_none()
            && self.password_error.is_none()
    }
}

/// Observable state holder for one login screen instance.
///
/// Construct one per screen with the authenticator the composition root
/// selected. All methods take `&self`; mutation happens through the watch
/// channel, so every transition is atomic from a subscriber's point of view.
pub struct LoginFlow {
    state: watch::Sender<LoginState>,
    authenticator: Arc<dyn Authenticator>,
    on_authenticated: Option<SuccessCallback>,
    submit_seq: Arc<AtomicU64>,
}

impl LoginFlow {
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        let (state, _) = watch::channel(LoginState::default());

        Self {
            state,
            authenticator,
            on_authenticated: None,
            submit_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register the callback invoked with the authenticated email, used by
    /// the rendering layer to drive navigation.
    #[must_use]
    pub fn with_on_authenticated(
        mut self,
        callback: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_authenticated = Some(Arc::new(callback));
        self
    }

    /// Watch handle for push-style renderers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    /// Current state for poll-style renderers.
    #[must_use]
    pub fn snapshot(&self) -> LoginState {
        self.state.borrow().clone()
    }

    /// Apply an email edit: revalidate the field, clear any authentication
    /// error, recompute submit eligibility. Ignored once authenticated.
    pub fn on_email_changed(&self, value: &str) {
        self.state.send_modify(|state| {
            if state.is_authenticated {
                return;
            }

            let mut next = LoginState {
                email: value.to_string(),
                email_error: validator::validate_email(value),
                error_message: None,
                ..state.clone()
            };
            next.is_submit_enabled = next.submit_enabled();
            *state = next;
        });
    }

    /// Apply a password edit; the mirror of [`Self::on_email_changed`].
    pub fn on_password_changed(&self, value: &str) {
        self.state.send_modify(|state| {
            if state.is_authenticated {
                return;
            }

            let mut next = LoginState {
                password: value.to_string(),
                password_error: validator::validate_password(value),
                error_message: None,
                ..state.clone()
            };
            next.is_submit_enabled = next.submit_enabled();
            *state = next;
        });
    }

    /// Flip the visibility toggle; touches nothing else.
    pub fn toggle_password_visibility(&self) {
        self.state.send_modify(|state| {
            *state = LoginState {
                is_password_visible: !state.is_password_visible,
                ..state.clone()
            };
        });
    }

    /// Dismiss the current authentication error, if any.
    pub fn clear_error(&self) {
        self.state.send_modify(|state| {
            *state = LoginState {
                error_message: None,
                ..state.clone()
            };
        });
    }

    /// Attempt a login with the current fields.
    ///
    /// No-op unless submit is enabled and no request is in flight. Both
    /// fields are re-checked before dispatch; a re-check failure surfaces
    /// the field message without invoking the authenticator. Otherwise the
    /// authentication call runs on a spawned task and its result is applied
    /// when the delay elapses, unless a newer submit superseded it. Must be
    /// called within a tokio runtime.
    pub fn submit(&self) {
        let mut request = None;

        self.state.send_modify(|state| {
            if !state.is_submit_enabled || state.is_in_flight || state.is_authenticated {
                debug!("submit ignored");
                return;
            }

            let email_error = validator::validate_email(&state.email);
            let password_error = validator::validate_password(&state.password);
            if email_error.is_some() || password_error.is_some() {
                // Email message wins when both fields fail the re-check.
                let message = email_error.clone().or_else(|| password_error.clone());
                let mut next = LoginState {
                    email_error,
                    password_error,
                    error_message: message,
                    ..state.clone()
                };
                next.is_submit_enabled = next.submit_enabled();
                *state = next;
                return;
            }

            let sequence = self.submit_seq.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoginState {
                is_in_flight: true,
                error_message: None,
                ..state.clone()
            };
            request = Some((state.email.clone(), state.password.clone(), sequence));
        });

        let Some((email, password, sequence)) = request else {
            return;
        };

        debug!(email = %email, sequence, "dispatching authentication");

        let authenticator = Arc::clone(&self.authenticator);
        let on_authenticated = self.on_authenticated.clone();
        let submit_seq = Arc::clone(&self.submit_seq);
        let state_tx = self.state.clone();

        tokio::spawn(async move {
            let outcome = match authenticator.authenticate(&email, &password).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(email = %email, "authentication call failed: {error:#}");
                    AuthOutcome::Failure {
                        message: format!("An unexpected error occurred: {error}"),
                        code: None,
                    }
                }
            };

            if submit_seq.load(Ordering::SeqCst) != sequence {
                debug!(email = %email, sequence, "discarding stale authentication result");
                return;
            }

            let mut authenticated_email = None;
            state_tx.send_modify(|state| match &outcome {
                AuthOutcome::Success { user } => {
                    *state = LoginState {
                        is_in_flight: false,
                        is_authenticated: true,
                        error_message: None,
                        ..state.clone()
                    };
                    authenticated_email = Some(user.email.clone());
                }
                AuthOutcome::Failure { message, .. } => {
                    *state = LoginState {
                        is_in_flight: false,
                        error_message: Some(message.clone()),
                        ..state.clone()
                    };
                }
            });

            if let (Some(email), Some(callback)) = (authenticated_email, on_authenticated) {
                callback(&email);
            }
        });
    }
}
