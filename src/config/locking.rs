//! Lock timing configuration
//!
//! Heartbeat timeout and sweep interval are deployment tuning knobs, not
//! constants: newsroom deployments with flaky editor connections run with
//! longer timeouts than internal tools.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Session lock timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LockingConfig {
    /// Heartbeat age in seconds beyond which a session counts as expired
    #[serde(default = "default_heartbeat_timeout_secs")]
    pub heartbeat_timeout_secs: u64,

    /// How often the expiry sweep runs, in seconds
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Buffer size of the broadcast channel, in envelopes per receiver
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

impl LockingConfig {
    /// Heartbeat timeout as a chrono duration for registry arithmetic
    pub fn heartbeat_timeout(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.heartbeat_timeout_secs as i64)
    }

    /// Sweep interval as a std duration for the tokio ticker
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate lock timing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.heartbeat_timeout_secs == 0 {
            return Err(ValidationError::InvalidHeartbeatTimeout);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        if self.sweep_interval_secs > self.heartbeat_timeout_secs {
            return Err(ValidationError::SweepSlowerThanTimeout);
        }
        if self.broadcast_capacity == 0 {
            return Err(ValidationError::InvalidBroadcastCapacity);
        }
        Ok(())
    }
}

impl Default for LockingConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout_secs: default_heartbeat_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

fn default_heartbeat_timeout_secs() -> u64 {
    600
}

fn default_sweep_interval_secs() -> u64 {
    30
}

fn default_broadcast_capacity() -> usize {
    128
}
