//! Media and security classification types for participant devices

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParticipantError;

/// Flow direction of a media channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaDirection {
    /// Direction is unknown or could not be negotiated
    Invalid = -1,
    /// No media flow
    #[default]
    Inactive = 0,
    /// Send only
    SendOnly = 1,
    /// Receive only
    RecvOnly = 2,
    /// Send and receive
    SendRecv = 3,
}

impl MediaDirection {
    /// Map a raw integer value; anything out of range is `Invalid`
    pub fn from_i32(raw: i32) -> Self {
        match raw {
            0 => MediaDirection::Inactive,
            1 => MediaDirection::SendOnly,
            2 => MediaDirection::RecvOnly,
            3 => MediaDirection::SendRecv,
            _ => MediaDirection::Invalid,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// True when the local side sends media
    pub fn sends(self) -> bool {
        matches!(self, MediaDirection::SendOnly | MediaDirection::SendRecv)
    }

    /// True when the local side receives media
    pub fn receives(self) -> bool {
        matches!(self, MediaDirection::RecvOnly | MediaDirection::SendRecv)
    }

    /// SDP attribute name (`a=sendrecv` etc.)
    pub fn as_sdp_attribute(self) -> &'static str {
        match self {
            MediaDirection::Invalid => "invalid",
            MediaDirection::Inactive => "inactive",
            MediaDirection::SendOnly => "sendonly",
            MediaDirection::RecvOnly => "recvonly",
            MediaDirection::SendRecv => "sendrecv",
        }
    }
}

impl fmt::Display for MediaDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sdp_attribute())
    }
}

impl FromStr for MediaDirection {
    type Err = ParticipantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inactive" => Ok(MediaDirection::Inactive),
            "sendonly" => Ok(MediaDirection::SendOnly),
            "recvonly" => Ok(MediaDirection::RecvOnly),
            "sendrecv" => Ok(MediaDirection::SendRecv),
            other => Err(ParticipantError::config(format!("unknown media direction: {}", other))),
        }
    }
}

/// Kind of media stream carried by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Audio,
    Video,
    Text,
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamType::Audio => f.write_str("audio"),
            StreamType::Video => f.write_str("video"),
            StreamType::Text => f.write_str("text"),
        }
    }
}

/// Cryptographic trust classification of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    /// Security failure, e.g. an identity key mismatch
    Unsafe = 0,
    /// No encryption
    #[default]
    ClearText = 1,
    /// Encrypted
    Encrypted = 2,
    /// Encrypted and verified
    Safe = 3,
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityLevel::Unsafe => f.write_str("unsafe"),
            SecurityLevel::ClearText => f.write_str("clear_text"),
            SecurityLevel::Encrypted => f.write_str("encrypted"),
            SecurityLevel::Safe => f.write_str("safe"),
        }
    }
}
