//! Construction of participant devices

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::handle::{DeviceInner, DeviceState, ParticipantDevice, StreamSlot};
use crate::callbacks::CallbackRegistry;
use crate::config::DeviceConfig;
use crate::events::DeviceEventPublisher;
use crate::types::{DeviceAddress, JoiningMethod, MediaDirection, SecurityLevel, UserData};

/// Builder for [`ParticipantDevice`].
///
/// Values not set explicitly come from the [`DeviceConfig`] (or its default).
/// The time of joining is captured at `build()` unless given.
#[derive(Debug, Clone)]
pub struct ParticipantDeviceBuilder {
    address: DeviceAddress,
    config: DeviceConfig,
    name: Option<String>,
    ssrc: u32,
    security_level: Option<SecurityLevel>,
    joining_method: JoiningMethod,
    joined_at: Option<DateTime<Utc>>,
    audio_direction: Option<MediaDirection>,
    video_direction: Option<MediaDirection>,
    text_direction: Option<MediaDirection>,
    user_data: Option<UserDataSlot>,
}

// UserData is not Debug; keep the builder derivable.
#[derive(Clone)]
struct UserDataSlot(UserData);

impl std::fmt::Debug for UserDataSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UserData(..)")
    }
}

impl ParticipantDeviceBuilder {
    pub fn new(address: DeviceAddress) -> Self {
        Self {
            address,
            config: DeviceConfig::default(),
            name: None,
            ssrc: 0,
            security_level: None,
            joining_method: JoiningMethod::default(),
            joined_at: None,
            audio_direction: None,
            video_direction: None,
            text_direction: None,
            user_data: None,
        }
    }

    pub fn config(mut self, config: &DeviceConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn ssrc(mut self, ssrc: u32) -> Self {
        self.ssrc = ssrc;
        self
    }

    pub fn security_level(mut self, level: SecurityLevel) -> Self {
        self.security_level = Some(level);
        self
    }

    pub fn joining_method(mut self, method: JoiningMethod) -> Self {
        self.joining_method = method;
        self
    }

    pub fn joined_at(mut self, at: DateTime<Utc>) -> Self {
        self.joined_at = Some(at);
        self
    }

    /// Time of joining in UNIX epoch seconds
    pub fn time_of_joining(mut self, epoch_secs: i64) -> Self {
        match DateTime::<Utc>::from_timestamp(epoch_secs, 0) {
            Some(at) => self.joined_at = Some(at),
            None => warn!("Ignoring out-of-range time of joining {}", epoch_secs),
        }
        self
    }

    pub fn audio_direction(mut self, direction: MediaDirection) -> Self {
        self.audio_direction = Some(direction);
        self
    }

    pub fn video_direction(mut self, direction: MediaDirection) -> Self {
        self.video_direction = Some(direction);
        self
    }

    pub fn text_direction(mut self, direction: MediaDirection) -> Self {
        self.text_direction = Some(direction);
        self
    }

    pub fn user_data(mut self, user_data: UserData) -> Self {
        self.user_data = Some(UserDataSlot(user_data));
        self
    }

    pub fn build(self) -> ParticipantDevice {
        let config = self.config;
        let state = DeviceState {
            name: self.name,
            security_level: self.security_level.unwrap_or(config.security_level),
            ssrc: self.ssrc,
            audio: StreamSlot {
                direction: self.audio_direction.unwrap_or(config.audio_direction),
                available: false,
            },
            video: StreamSlot {
                direction: self.video_direction.unwrap_or(config.video_direction),
                available: false,
            },
            text: StreamSlot {
                direction: self.text_direction.unwrap_or(config.text_direction),
                available: false,
            },
            ..DeviceState::default()
        };

        debug!(
            "Creating participant device {} (ssrc {:#010x})",
            self.address, state.ssrc
        );

        ParticipantDevice::from_inner(DeviceInner {
            address: self.address,
            joined_at: self.joined_at.unwrap_or_else(Utc::now),
            joining_method: self.joining_method,
            log_events: config.log_events,
            state: RwLock::new(state),
            user_data: RwLock::new(self.user_data.map(|slot| slot.0)),
            callbacks: CallbackRegistry::new(),
            events: DeviceEventPublisher::new(config.event_channel_capacity),
        })
    }
}
