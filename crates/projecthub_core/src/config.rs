//! Core runtime configuration.
//!
//! # Responsibility
//! - Carry tunables for the store and services in one serde-friendly value.
//! - Parse host-provided JSON and reject unusable values up front.
//!
//! # Invariants
//! - Missing JSON fields fall back to `CoreConfig::default()`.
//! - A config returned by `from_json_str` has passed `validate()`.

use crate::model::activity::DEFAULT_RECENT_ACTIVITY_LIMIT;
use crate::model::task::DEFAULT_MAX_ATTACHMENT_BYTES;
use crate::service::latency::LatencyProfile;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_UPCOMING_DEADLINE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Simulated latency applied by services.
    pub latency: LatencyProfile,
    /// Largest accepted attachment in bytes.
    pub max_attachment_bytes: u64,
    /// Activity items shown on the dashboard.
    pub recent_activity_limit: usize,
    /// Upcoming deadlines shown on the dashboard.
    pub upcoming_deadline_limit: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            latency: LatencyProfile::none(),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
            upcoming_deadline_limit: DEFAULT_UPCOMING_DEADLINE_LIMIT,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl CoreConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.latency.scale.is_finite() || self.latency.scale < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "latency.scale must be a finite, non-negative number, got {}",
                self.latency.scale
            )));
        }
        if self.max_attachment_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_attachment_bytes must be greater than zero".to_string(),
            ));
        }
        if self.recent_activity_limit == 0 {
            return Err(ConfigError::Invalid(
                "recent_activity_limit must be greater than zero".to_string(),
            ));
        }
        if self.upcoming_deadline_limit == 0 {
            return Err(ConfigError::Invalid(
                "upcoming_deadline_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
