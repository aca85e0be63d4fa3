//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Heartbeat timeout must be greater than zero")]
    InvalidHeartbeatTimeout,

    #[error("Sweep interval must be greater than zero")]
    InvalidSweepInterval,

    #[error("Sweep interval must not exceed the heartbeat timeout")]
    SweepSlowerThanTimeout,

    #[error("Broadcast channel capacity must be greater than zero")]
    InvalidBroadcastCapacity,
}
