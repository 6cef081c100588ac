//! The shared participant device handle

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, trace};

use super::snapshot::DeviceSnapshot;
use crate::callbacks::{CallbackRegistry, ParticipantDeviceListener};
use crate::events::{DeviceEventPublisher, DeviceEventSubscriber, ParticipantDeviceEvent};
use crate::types::{
    DeviceAddress, DisconnectionMethod, JoiningMethod, MediaDirection, ParticipantDeviceState,
    SecurityLevel, StreamType, UserData,
};

/// Per-stream negotiated state
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StreamSlot {
    pub(crate) direction: MediaDirection,
    pub(crate) available: bool,
}

/// Mutable part of a device
#[derive(Debug, Clone, Default)]
pub(crate) struct DeviceState {
    pub(crate) name: Option<String>,
    pub(crate) security_level: SecurityLevel,
    pub(crate) in_conference: bool,
    pub(crate) state: ParticipantDeviceState,
    pub(crate) ssrc: u32,
    pub(crate) audio: StreamSlot,
    pub(crate) video: StreamSlot,
    pub(crate) text: StreamSlot,
    pub(crate) is_speaking: bool,
    pub(crate) is_muted: bool,
    pub(crate) disconnection_method: Option<DisconnectionMethod>,
    pub(crate) disconnection_reason: Option<String>,
}

impl DeviceState {
    fn stream(&self, stream_type: StreamType) -> &StreamSlot {
        match stream_type {
            StreamType::Audio => &self.audio,
            StreamType::Video => &self.video,
            StreamType::Text => &self.text,
        }
    }

    fn stream_mut(&mut self, stream_type: StreamType) -> &mut StreamSlot {
        match stream_type {
            StreamType::Audio => &mut self.audio,
            StreamType::Video => &mut self.video,
            StreamType::Text => &mut self.text,
        }
    }
}

pub(crate) struct DeviceInner {
    pub(crate) address: DeviceAddress,
    pub(crate) joined_at: DateTime<Utc>,
    pub(crate) joining_method: JoiningMethod,
    pub(crate) log_events: bool,
    pub(crate) state: RwLock<DeviceState>,
    pub(crate) user_data: RwLock<Option<UserData>>,
    pub(crate) callbacks: CallbackRegistry,
    pub(crate) events: DeviceEventPublisher,
}

/// One device of a conference participant.
///
/// The handle is reference counted: cloning (or [`acquire`](Self::acquire))
/// takes a reference, dropping (or [`release`](Self::release)) gives it back,
/// and the device is freed with its last handle. Two handles compare equal
/// when they refer to the same device.
#[derive(Clone)]
pub struct ParticipantDevice {
    inner: Arc<DeviceInner>,
}

impl ParticipantDevice {
    pub(crate) fn from_inner(inner: DeviceInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    // ---- reference counting ----

    /// Take an additional reference to this device
    pub fn acquire(&self) -> ParticipantDevice {
        self.clone()
    }

    /// Give back a reference. The device is freed when the last one goes.
    pub fn release(self) {
        drop(self);
    }

    /// Number of live handles to this device
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    // ---- user data ----

    /// Caller-owned payload, if one was set
    pub fn user_data(&self) -> Option<UserData> {
        self.inner.user_data.read().clone()
    }

    /// Replace the caller-owned payload. The previous value is handed back
    /// untouched.
    pub fn set_user_data(&self, user_data: Option<UserData>) -> Option<UserData> {
        std::mem::replace(&mut *self.inner.user_data.write(), user_data)
    }

    // ---- accessors ----

    pub fn address(&self) -> &DeviceAddress {
        &self.inner.address
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.inner.state.read().security_level
    }

    /// Display name of the device, `None` when never set
    pub fn name(&self) -> Option<String> {
        self.inner.state.read().name.clone()
    }

    pub fn is_in_conference(&self) -> bool {
        self.inner.state.read().in_conference
    }

    /// Time of joining as seconds since the UNIX epoch
    pub fn time_of_joining(&self) -> i64 {
        self.inner.joined_at.timestamp()
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.inner.joined_at
    }

    pub fn audio_direction(&self) -> MediaDirection {
        self.stream_direction(StreamType::Audio)
    }

    pub fn video_direction(&self) -> MediaDirection {
        self.stream_direction(StreamType::Video)
    }

    pub fn text_direction(&self) -> MediaDirection {
        self.stream_direction(StreamType::Text)
    }

    pub fn stream_direction(&self, stream_type: StreamType) -> MediaDirection {
        self.inner.state.read().stream(stream_type).direction
    }

    pub fn stream_available(&self, stream_type: StreamType) -> bool {
        self.inner.state.read().stream(stream_type).available
    }

    pub fn ssrc(&self) -> u32 {
        self.inner.state.read().ssrc
    }

    pub fn state(&self) -> ParticipantDeviceState {
        self.inner.state.read().state
    }

    pub fn joining_method(&self) -> JoiningMethod {
        self.inner.joining_method
    }

    pub fn disconnection_method(&self) -> Option<DisconnectionMethod> {
        self.inner.state.read().disconnection_method
    }

    pub fn disconnection_reason(&self) -> Option<String> {
        self.inner.state.read().disconnection_reason.clone()
    }

    pub fn is_speaking(&self) -> bool {
        self.inner.state.read().is_speaking
    }

    pub fn is_muted(&self) -> bool {
        self.inner.state.read().is_muted
    }

    /// Point-in-time copy of every attribute
    pub fn snapshot(&self) -> DeviceSnapshot {
        let state = self.inner.state.read().clone();
        DeviceSnapshot::new(self, state)
    }

    // ---- listeners ----

    /// Register a listener. The device keeps a reference to it until
    /// [`remove_callbacks`](Self::remove_callbacks) is called.
    pub fn add_callbacks(&self, cbs: Arc<dyn ParticipantDeviceListener>) {
        trace!("Adding listener to device {}", self.inner.address);
        self.inner.callbacks.add(cbs);
    }

    /// Unregister a listener; returns false when it was not registered
    pub fn remove_callbacks<L: ParticipantDeviceListener + ?Sized>(&self, cbs: &Arc<L>) -> bool {
        let removed = self.inner.callbacks.remove(cbs);
        trace!(
            "Removing listener from device {} (found: {})",
            self.inner.address,
            removed
        );
        removed
    }

    /// The listener currently being notified, or `None` outside dispatch
    pub fn current_callbacks(&self) -> Option<Arc<dyn ParticipantDeviceListener>> {
        self.inner.callbacks.current()
    }

    pub fn callbacks_count(&self) -> usize {
        self.inner.callbacks.len()
    }

    /// Async stream of every event this device emits from now on
    pub fn subscribe(&self) -> DeviceEventSubscriber {
        self.inner.events.subscribe()
    }

    // ---- state changes ----

    pub fn set_name(&self, name: Option<String>) {
        self.inner.state.write().name = name;
    }

    pub fn set_security_level(&self, level: SecurityLevel) {
        let old = std::mem::replace(&mut self.inner.state.write().security_level, level);
        if old != level {
            debug!(
                "Device {} security level {} -> {}",
                self.inner.address, old, level
            );
        }
    }

    pub fn set_ssrc(&self, ssrc: u32) {
        self.inner.state.write().ssrc = ssrc;
        trace!("Device {} ssrc set to {:#010x}", self.inner.address, ssrc);
    }

    /// Change the membership state; notifies on change
    pub fn set_state(&self, state: ParticipantDeviceState) -> bool {
        let _ordered = self.inner.callbacks.serialize();
        let old = std::mem::replace(&mut self.inner.state.write().state, state);
        if old == state {
            return false;
        }
        debug!("Device {} state {:?} -> {:?}", self.inner.address, old, state);
        self.emit(ParticipantDeviceEvent::StateChanged {
            address: self.inner.address.clone(),
            state,
        });
        true
    }

    /// Change the negotiated direction of one stream; notifies on change
    pub fn set_stream_direction(&self, stream_type: StreamType, direction: MediaDirection) -> bool {
        let _ordered = self.inner.callbacks.serialize();
        let old = {
            let mut state = self.inner.state.write();
            std::mem::replace(&mut state.stream_mut(stream_type).direction, direction)
        };
        if old == direction {
            return false;
        }
        debug!(
            "Device {} {} direction {} -> {}",
            self.inner.address, stream_type, old, direction
        );
        self.emit(ParticipantDeviceEvent::StreamCapabilityChanged {
            address: self.inner.address.clone(),
            direction,
            stream_type,
        });
        true
    }

    /// Mark one stream available or not; notifies on change
    pub fn set_stream_available(&self, stream_type: StreamType, available: bool) -> bool {
        let _ordered = self.inner.callbacks.serialize();
        let old = {
            let mut state = self.inner.state.write();
            std::mem::replace(&mut state.stream_mut(stream_type).available, available)
        };
        if old == available {
            return false;
        }
        debug!(
            "Device {} {} available: {}",
            self.inner.address, stream_type, available
        );
        self.emit(ParticipantDeviceEvent::StreamAvailabilityChanged {
            address: self.inner.address.clone(),
            available,
            stream_type,
        });
        true
    }

    pub fn set_is_speaking(&self, is_speaking: bool) -> bool {
        let _ordered = self.inner.callbacks.serialize();
        let old = std::mem::replace(&mut self.inner.state.write().is_speaking, is_speaking);
        if old == is_speaking {
            return false;
        }
        self.emit(ParticipantDeviceEvent::IsSpeakingChanged {
            address: self.inner.address.clone(),
            is_speaking,
        });
        true
    }

    pub fn set_is_muted(&self, is_muted: bool) -> bool {
        let _ordered = self.inner.callbacks.serialize();
        let old = std::mem::replace(&mut self.inner.state.write().is_muted, is_muted);
        if old == is_muted {
            return false;
        }
        debug!("Device {} muted: {}", self.inner.address, is_muted);
        self.emit(ParticipantDeviceEvent::IsMuted {
            address: self.inner.address.clone(),
            is_muted,
        });
        true
    }

    /// Enter the conference. No-op when already in it.
    pub fn join(&self) -> bool {
        let _ordered = self.inner.callbacks.serialize();
        {
            let mut state = self.inner.state.write();
            if state.in_conference {
                return false;
            }
            state.in_conference = true;
            state.disconnection_method = None;
            state.disconnection_reason = None;
        }
        debug!("Device {} joined the conference", self.inner.address);
        self.set_state(ParticipantDeviceState::Present);
        self.emit(ParticipantDeviceEvent::ConferenceJoined {
            address: self.inner.address.clone(),
        });
        true
    }

    /// Leave the conference. No-op when not in it.
    ///
    /// A device that was speaking reports `IsSpeakingChanged(false)` before
    /// the state change and `ConferenceLeft`.
    pub fn leave(&self, method: Option<DisconnectionMethod>, reason: Option<String>) -> bool {
        let _ordered = self.inner.callbacks.serialize();
        {
            let mut state = self.inner.state.write();
            if !state.in_conference {
                return false;
            }
            state.in_conference = false;
            state.disconnection_method = method;
            state.disconnection_reason = reason.clone();
        }
        self.set_is_speaking(false);
        debug!(
            "Device {} left the conference ({:?}, {})",
            self.inner.address,
            method,
            reason.as_deref().unwrap_or("no reason")
        );
        self.set_state(ParticipantDeviceState::Left);
        self.emit(ParticipantDeviceEvent::ConferenceLeft {
            address: self.inner.address.clone(),
            method,
            reason,
        });
        true
    }

    pub fn report_video_display_error(&self, error_code: i32) {
        let _ordered = self.inner.callbacks.serialize();
        debug!(
            "Device {} video display error {}",
            self.inner.address, error_code
        );
        self.emit(ParticipantDeviceEvent::VideoDisplayErrorOccurred {
            address: self.inner.address.clone(),
            error_code,
        });
    }

    // Callers hold the dispatch order guard, so listeners and subscribers
    // see events in the order the state was written.
    fn emit(&self, event: ParticipantDeviceEvent) {
        if self.inner.log_events {
            debug!("Device {} emitting {}", self.inner.address, event.name());
        }
        self.inner.callbacks.dispatch(self, &event);
        self.inner.events.publish(event);
    }
}

impl PartialEq for ParticipantDevice {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ParticipantDevice {}

impl fmt::Debug for ParticipantDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("ParticipantDevice")
            .field("address", &self.inner.address.to_string())
            .field("name", &state.name)
            .field("state", &state.state)
            .field("in_conference", &state.in_conference)
            .field("ssrc", &state.ssrc)
            .field("listeners", &self.inner.callbacks)
            .finish()
    }
}
