//! Participant Device Event System
//!
//! Every notification delivered to registered listeners is also published on a
//! `tokio::sync::broadcast` channel so async consumers can follow a device
//! without registering a listener.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::errors::{ParticipantError, Result};
use crate::types::{
    DeviceAddress, DisconnectionMethod, MediaDirection, ParticipantDeviceState, StreamType,
};

/// Events emitted by a participant device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticipantDeviceEvent {
    /// The device started or stopped speaking
    IsSpeakingChanged {
        address: DeviceAddress,
        is_speaking: bool,
    },

    /// The device muted or unmuted itself
    IsMuted {
        address: DeviceAddress,
        is_muted: bool,
    },

    /// Membership state changed
    StateChanged {
        address: DeviceAddress,
        state: ParticipantDeviceState,
    },

    /// Negotiated direction of one stream changed
    StreamCapabilityChanged {
        address: DeviceAddress,
        direction: MediaDirection,
        stream_type: StreamType,
    },

    /// A stream became available or unavailable
    StreamAvailabilityChanged {
        address: DeviceAddress,
        available: bool,
        stream_type: StreamType,
    },

    /// The device joined the conference
    ConferenceJoined { address: DeviceAddress },

    /// The device left the conference
    ConferenceLeft {
        address: DeviceAddress,
        method: Option<DisconnectionMethod>,
        reason: Option<String>,
    },

    /// Rendering the device's video failed
    VideoDisplayErrorOccurred {
        address: DeviceAddress,
        error_code: i32,
    },
}

impl ParticipantDeviceEvent {
    /// Address of the device that emitted the event
    pub fn address(&self) -> &DeviceAddress {
        match self {
            ParticipantDeviceEvent::IsSpeakingChanged { address, .. }
            | ParticipantDeviceEvent::IsMuted { address, .. }
            | ParticipantDeviceEvent::StateChanged { address, .. }
            | ParticipantDeviceEvent::StreamCapabilityChanged { address, .. }
            | ParticipantDeviceEvent::StreamAvailabilityChanged { address, .. }
            | ParticipantDeviceEvent::ConferenceJoined { address }
            | ParticipantDeviceEvent::ConferenceLeft { address, .. }
            | ParticipantDeviceEvent::VideoDisplayErrorOccurred { address, .. } => address,
        }
    }

    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ParticipantDeviceEvent::IsSpeakingChanged { .. } => "is_speaking_changed",
            ParticipantDeviceEvent::IsMuted { .. } => "is_muted",
            ParticipantDeviceEvent::StateChanged { .. } => "state_changed",
            ParticipantDeviceEvent::StreamCapabilityChanged { .. } => "stream_capability_changed",
            ParticipantDeviceEvent::StreamAvailabilityChanged { .. } => "stream_availability_changed",
            ParticipantDeviceEvent::ConferenceJoined { .. } => "conference_joined",
            ParticipantDeviceEvent::ConferenceLeft { .. } => "conference_left",
            ParticipantDeviceEvent::VideoDisplayErrorOccurred { .. } => "video_display_error_occurred",
        }
    }
}

/// Subscriber wrapper for device events
pub struct DeviceEventSubscriber {
    receiver: broadcast::Receiver<ParticipantDeviceEvent>,
}

impl DeviceEventSubscriber {
    pub fn new(receiver: broadcast::Receiver<ParticipantDeviceEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event
    pub async fn receive(&mut self) -> Result<ParticipantDeviceEvent> {
        self.receiver
            .recv()
            .await
            .map_err(|e| ParticipantError::event_channel(format!("Failed to receive event: {}", e)))
    }

    /// Try to receive an event without waiting
    pub fn try_receive(&mut self) -> Result<Option<ParticipantDeviceEvent>> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(e) => Err(ParticipantError::event_channel(format!(
                "Failed to try receive event: {}",
                e
            ))),
        }
    }
}

/// Broadcast publisher owned by each device
#[derive(Debug)]
pub struct DeviceEventPublisher {
    sender: broadcast::Sender<ParticipantDeviceEvent>,
}

impl DeviceEventPublisher {
    /// Create a publisher buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event; dropped silently when nobody listens
    pub fn publish(&self, event: ParticipantDeviceEvent) {
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            tracing::trace!("No subscribers for {} on {}", event.name(), event.address());
        }
    }

    pub fn subscribe(&self) -> DeviceEventSubscriber {
        DeviceEventSubscriber::new(self.sender.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
