//! Error types for participant-core

use thiserror::Error;

/// Result type for participant-core operations
pub type Result<T> = std::result::Result<T, ParticipantError>;

/// Errors that can occur when working with participants and their devices
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParticipantError {
    /// A device address could not be parsed
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// No device matches the given address
    #[error("Device not found: {address}")]
    DeviceNotFound { address: String },

    /// A device with the same address is already registered
    #[error("Device already exists: {address}")]
    DeviceAlreadyExists { address: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Logging setup error
    #[error("Logging error: {message}")]
    Logging { message: String },

    /// Event stream error
    #[error("Event channel error: {message}")]
    EventChannel { message: String },
}

impl ParticipantError {
    /// Create an invalid address error
    pub fn invalid_address(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a device not found error
    pub fn device_not_found(address: impl Into<String>) -> Self {
        Self::DeviceNotFound {
            address: address.into(),
        }
    }

    /// Create a device already exists error
    pub fn device_already_exists(address: impl Into<String>) -> Self {
        Self::DeviceAlreadyExists {
            address: address.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a logging error
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Create an event channel error
    pub fn event_channel(message: impl Into<String>) -> Self {
        Self::EventChannel {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for ParticipantError {
    fn from(err: toml::de::Error) -> Self {
        ParticipantError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParticipantError::invalid_address("foo", "missing scheme");
        assert_eq!(err.to_string(), "Invalid address 'foo': missing scheme");

        let err = ParticipantError::device_not_found("sip:bob@example.org");
        assert_eq!(err.to_string(), "Device not found: sip:bob@example.org");
    }
}
