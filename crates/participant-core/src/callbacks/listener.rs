//! Listener trait for participant device notifications

use crate::device::ParticipantDevice;
use crate::events::ParticipantDeviceEvent;
use crate::types::{MediaDirection, ParticipantDeviceState, StreamType};

/// Receives notifications from a [`ParticipantDevice`].
///
/// Every method has a no-op default, so implementors only override what they
/// care about. Methods run synchronously on the thread that changed the
/// device; the device's locks are not held, so calling back into the device
/// is allowed.
pub trait ParticipantDeviceListener: Send + Sync {
    /// The device started or stopped speaking
    fn on_is_speaking_changed(&self, _device: &ParticipantDevice, _is_speaking: bool) {}

    /// The device muted or unmuted itself
    fn on_is_muted(&self, _device: &ParticipantDevice, _is_muted: bool) {}

    /// Membership state changed
    fn on_state_changed(&self, _device: &ParticipantDevice, _state: ParticipantDeviceState) {}

    /// Negotiated direction of a stream changed
    fn on_stream_capability_changed(
        &self,
        _device: &ParticipantDevice,
        _direction: MediaDirection,
        _stream_type: StreamType,
    ) {
    }

    /// A stream became available or unavailable
    fn on_stream_availability_changed(
        &self,
        _device: &ParticipantDevice,
        _available: bool,
        _stream_type: StreamType,
    ) {
    }

    /// The device joined the conference
    fn on_conference_joined(&self, _device: &ParticipantDevice) {}

    /// The device left the conference
    fn on_conference_left(&self, _device: &ParticipantDevice) {}

    /// Rendering the device's video failed
    fn on_video_display_error_occurred(&self, _device: &ParticipantDevice, _error_code: i32) {}
}

/// Route one event to the matching listener method
pub(crate) fn notify(
    listener: &dyn ParticipantDeviceListener,
    device: &ParticipantDevice,
    event: &ParticipantDeviceEvent,
) {
    match event {
        ParticipantDeviceEvent::IsSpeakingChanged { is_speaking, .. } => {
            listener.on_is_speaking_changed(device, *is_speaking)
        }
        ParticipantDeviceEvent::IsMuted { is_muted, .. } => listener.on_is_muted(device, *is_muted),
        ParticipantDeviceEvent::StateChanged { state, .. } => listener.on_state_changed(device, *state),
        ParticipantDeviceEvent::StreamCapabilityChanged {
            direction,
            stream_type,
            ..
        } => listener.on_stream_capability_changed(device, *direction, *stream_type),
        ParticipantDeviceEvent::StreamAvailabilityChanged {
            available,
            stream_type,
            ..
        } => listener.on_stream_availability_changed(device, *available, *stream_type),
        ParticipantDeviceEvent::ConferenceJoined { .. } => listener.on_conference_joined(device),
        ParticipantDeviceEvent::ConferenceLeft { .. } => listener.on_conference_left(device),
        ParticipantDeviceEvent::VideoDisplayErrorOccurred { error_code, .. } => {
            listener.on_video_display_error_occurred(device, *error_code)
        }
    }
}
