//! Closure-backed listener

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::listener::ParticipantDeviceListener;
use crate::device::ParticipantDevice;
use crate::types::{MediaDirection, ParticipantDeviceState, StreamType, UserData};

type FlagCb = Box<dyn Fn(&ParticipantDevice, bool) + Send + Sync>;
type StateCb = Box<dyn Fn(&ParticipantDevice, ParticipantDeviceState) + Send + Sync>;
type CapabilityCb = Box<dyn Fn(&ParticipantDevice, MediaDirection, StreamType) + Send + Sync>;
type AvailabilityCb = Box<dyn Fn(&ParticipantDevice, bool, StreamType) + Send + Sync>;
type DeviceCb = Box<dyn Fn(&ParticipantDevice) + Send + Sync>;
type ErrorCodeCb = Box<dyn Fn(&ParticipantDevice, i32) + Send + Sync>;

/// A set of optional callbacks registered on a device as one listener.
///
/// ```rust
/// use rvoip_participant_core::{DeviceAddress, ParticipantDeviceBuilder, ParticipantDeviceCbs};
///
/// let device = ParticipantDeviceBuilder::new(DeviceAddress::sip("bob", "example.org")).build();
/// let cbs = ParticipantDeviceCbs::builder()
///     .on_conference_joined(|d| println!("{} joined", d.address()))
///     .build();
/// device.add_callbacks(cbs.clone());
/// device.join();
/// assert!(device.remove_callbacks(&cbs));
/// ```
#[derive(Default)]
pub struct ParticipantDeviceCbs {
    is_speaking_changed: Option<FlagCb>,
    is_muted: Option<FlagCb>,
    state_changed: Option<StateCb>,
    stream_capability_changed: Option<CapabilityCb>,
    stream_availability_changed: Option<AvailabilityCb>,
    conference_joined: Option<DeviceCb>,
    conference_left: Option<DeviceCb>,
    video_display_error_occurred: Option<ErrorCodeCb>,
    user_data: RwLock<Option<UserData>>,
}

impl ParticipantDeviceCbs {
    pub fn builder() -> ParticipantDeviceCbsBuilder {
        ParticipantDeviceCbsBuilder::default()
    }

    pub fn user_data(&self) -> Option<UserData> {
        self.user_data.read().clone()
    }

    pub fn set_user_data(&self, user_data: Option<UserData>) {
        *self.user_data.write() = user_data;
    }
}

impl fmt::Debug for ParticipantDeviceCbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticipantDeviceCbs")
            .field("is_speaking_changed", &self.is_speaking_changed.is_some())
            .field("is_muted", &self.is_muted.is_some())
            .field("state_changed", &self.state_changed.is_some())
            .field("stream_capability_changed", &self.stream_capability_changed.is_some())
            .field("stream_availability_changed", &self.stream_availability_changed.is_some())
            .field("conference_joined", &self.conference_joined.is_some())
            .field("conference_left", &self.conference_left.is_some())
            .field("video_display_error_occurred", &self.video_display_error_occurred.is_some())
            .finish()
    }
}

impl ParticipantDeviceListener for ParticipantDeviceCbs {
    fn on_is_speaking_changed(&self, device: &ParticipantDevice, is_speaking: bool) {
        if let Some(cb) = &self.is_speaking_changed {
            cb(device, is_speaking);
        }
    }

    fn on_is_muted(&self, device: &ParticipantDevice, is_muted: bool) {
        if let Some(cb) = &self.is_muted {
            cb(device, is_muted);
        }
    }

    fn on_state_changed(&self, device: &ParticipantDevice, state: ParticipantDeviceState) {
        if let Some(cb) = &self.state_changed {
            cb(device, state);
        }
    }

    fn on_stream_capability_changed(
        &self,
        device: &ParticipantDevice,
        direction: MediaDirection,
        stream_type: StreamType,
    ) {
        if let Some(cb) = &self.stream_capability_changed {
            cb(device, direction, stream_type);
        }
    }

    fn on_stream_availability_changed(
        &self,
        device: &ParticipantDevice,
        available: bool,
        stream_type: StreamType,
    ) {
        if let Some(cb) = &self.stream_availability_changed {
            cb(device, available, stream_type);
        }
    }

    fn on_conference_joined(&self, device: &ParticipantDevice) {
        if let Some(cb) = &self.conference_joined {
            cb(device);
        }
    }

    fn on_conference_left(&self, device: &ParticipantDevice) {
        if let Some(cb) = &self.conference_left {
            cb(device);
        }
    }

    fn on_video_display_error_occurred(&self, device: &ParticipantDevice, error_code: i32) {
        if let Some(cb) = &self.video_display_error_occurred {
            cb(device, error_code);
        }
    }
}

/// Builder for [`ParticipantDeviceCbs`]
#[derive(Default)]
pub struct ParticipantDeviceCbsBuilder {
    cbs: ParticipantDeviceCbs,
}

impl ParticipantDeviceCbsBuilder {
    pub fn on_is_speaking_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice, bool) + Send + Sync + 'static,
    {
        self.cbs.is_speaking_changed = Some(Box::new(f));
        self
    }

    pub fn on_is_muted<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice, bool) + Send + Sync + 'static,
    {
        self.cbs.is_muted = Some(Box::new(f));
        self
    }

    pub fn on_state_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice, ParticipantDeviceState) + Send + Sync + 'static,
    {
        self.cbs.state_changed = Some(Box::new(f));
        self
    }

    pub fn on_stream_capability_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice, MediaDirection, StreamType) + Send + Sync + 'static,
    {
        self.cbs.stream_capability_changed = Some(Box::new(f));
        self
    }

    pub fn on_stream_availability_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice, bool, StreamType) + Send + Sync + 'static,
    {
        self.cbs.stream_availability_changed = Some(Box::new(f));
        self
    }

    pub fn on_conference_joined<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice) + Send + Sync + 'static,
    {
        self.cbs.conference_joined = Some(Box::new(f));
        self
    }

    pub fn on_conference_left<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice) + Send + Sync + 'static,
    {
        self.cbs.conference_left = Some(Box::new(f));
        self
    }

    pub fn on_video_display_error_occurred<F>(mut self, f: F) -> Self
    where
        F: Fn(&ParticipantDevice, i32) + Send + Sync + 'static,
    {
        self.cbs.video_display_error_occurred = Some(Box::new(f));
        self
    }

    pub fn user_data(self, user_data: UserData) -> Self {
        self.cbs.set_user_data(Some(user_data));
        self
    }

    pub fn build(self) -> Arc<ParticipantDeviceCbs> {
        Arc::new(self.cbs)
    }
}
