//! Client execution logic with reconnection support.
//!
//! Every new session sends `joinRoom` again, so a reconnect puts the user back
//! into the same room under the same name (the server treats it as a new
//! connection and announces the join).

use std::time::Duration;

use super::{
    error::ClientError,
    session::{SessionConfig, run_client_session},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Decides whether and when to retry after a failed session
///
/// Consecutive connect failures use up the attempt budget. A session that
/// reached the room and then dropped starts a fresh budget.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    max_attempts: u32,
    interval: Duration,
    failures: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(
            MAX_RECONNECT_ATTEMPTS,
            Duration::from_secs(RECONNECT_INTERVAL_SECS),
        )
    }
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            failures: 0,
        }
    }

    /// 1-based number of the attempt about to be made
    pub fn attempt(&self) -> u32 {
        self.failures + 1
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record a failed session.
    ///
    /// Returns the delay before the next attempt, or `None` once the budget is
    /// exhausted.
    pub fn on_failure(&mut self, error: &ClientError) -> Option<Duration> {
        if matches!(error, ClientError::ConnectionLost(_)) {
            self.failures = 0;
        }
        self.failures += 1;

        if self.failures >= self.max_attempts {
            None
        } else {
            Some(self.interval)
        }
    }
}

/// Run the WebSocket client, reconnecting (and re-joining) on connection loss
pub async fn run_client(config: SessionConfig) -> Result<(), ClientError> {
    let mut policy = ReconnectPolicy::default();

    loop {
        tracing::info!(
            "Connecting to {} for room '{}' (attempt {}/{})",
            config.url,
            config.room,
            policy.attempt(),
            policy.max_attempts()
        );

        let error = match run_client_session(&config).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        tracing::warn!("{}", error);
        let Some(delay) = policy.on_failure(&error) else {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                policy.max_attempts()
            );
            return Err(error);
        };

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            delay.as_secs(),
            policy.attempt(),
            policy.max_attempts()
        );
        tokio::time::sleep(delay).await;
    }
}
