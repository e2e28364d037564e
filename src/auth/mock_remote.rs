//! Mock remote authenticator used by production wiring.
//!
//! Simulates a credential check against a remote service: a fixed delay, a
//! small chance of a transient network failure independent of the
//! credentials, and the shared demo credential table.

use super::{check_credentials, AuthErrorCode, AuthOutcome, Authenticator};
use anyhow::Result;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

const DEFAULT_DELAY: Duration = Duration::from_millis(1500);
const DEFAULT_NETWORK_FAILURE_RATE: f64 = 0.1;

/// Tuning knobs for the simulated remote call.
#[derive(Clone, Copy, Debug)]
pub struct MockRemoteConfig {
    delay: Duration,
    network_failure_rate: f64,
}

impl MockRemoteConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            network_failure_rate: DEFAULT_NETWORK_FAILURE_RATE,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Probability in `[0, 1]` of a simulated transient network failure.
    #[must_use]
    pub fn with_network_failure_rate(mut self, rate: f64) -> Self {
        self.network_failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn network_failure_rate(&self) -> f64 {
        self.network_failure_rate
    }
}

impl Default for MockRemoteConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockRemoteAuthenticator {
    config: MockRemoteConfig,
}

impl MockRemoteAuthenticator {
    #[must_use]
    pub fn new(config: MockRemoteConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Authenticator for MockRemoteAuthenticator {
    #[instrument(skip(self, password))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        sleep(self.config.delay()).await;

        if rand::thread_rng().gen_bool(self.config.network_failure_rate()) {
            warn!(email = %email, "simulated transient network failure");
            return Ok(AuthOutcome::failure(AuthErrorCode::NetworkError));
        }

        let outcome = check_credentials(email, password);
        debug!(email = %email, success = outcome.is_success(), "credential check complete");

        Ok(outcome)
    }
}
