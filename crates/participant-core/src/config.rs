//! Configuration for participant devices

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ParticipantError, Result};
use crate::types::{MediaDirection, SecurityLevel};

/// Defaults applied to newly built devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub audio_direction: MediaDirection,
    pub video_direction: MediaDirection,
    pub text_direction: MediaDirection,
    pub security_level: SecurityLevel,
    /// Per-subscriber buffer of the async event stream
    pub event_channel_capacity: usize,
    /// Log every emitted event at debug level
    pub log_events: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            audio_direction: MediaDirection::Inactive,
            video_direction: MediaDirection::Inactive,
            text_direction: MediaDirection::Inactive,
            security_level: SecurityLevel::ClearText,
            event_channel_capacity: 64,
            log_events: false,
        }
    }
}

impl DeviceConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: DeviceConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ParticipantError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(ParticipantError::config(
                "event_channel_capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}
