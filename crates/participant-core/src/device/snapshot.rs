//! Serializable point-in-time view of a device

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::handle::{DeviceState, ParticipantDevice};
use crate::types::{
    DeviceAddress, DisconnectionMethod, JoiningMethod, MediaDirection, ParticipantDeviceState,
    SecurityLevel,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub address: DeviceAddress,
    pub name: Option<String>,
    pub security_level: SecurityLevel,
    pub state: ParticipantDeviceState,
    pub in_conference: bool,
    pub joined_at: DateTime<Utc>,
    pub joining_method: JoiningMethod,
    pub disconnection_method: Option<DisconnectionMethod>,
    pub disconnection_reason: Option<String>,
    pub audio_direction: MediaDirection,
    pub video_direction: MediaDirection,
    pub text_direction: MediaDirection,
    pub ssrc: u32,
    pub is_speaking: bool,
    pub is_muted: bool,
}

impl DeviceSnapshot {
    pub(crate) fn new(device: &ParticipantDevice, state: DeviceState) -> Self {
        Self {
            address: device.address().clone(),
            name: state.name,
            security_level: state.security_level,
            state: state.state,
            in_conference: state.in_conference,
            joined_at: device.joined_at(),
            joining_method: device.joining_method(),
            disconnection_method: state.disconnection_method,
            disconnection_reason: state.disconnection_reason,
            audio_direction: state.audio.direction,
            video_direction: state.video.direction,
            text_direction: state.text.direction,
            ssrc: state.ssrc,
            is_speaking: state.is_speaking,
            is_muted: state.is_muted,
        }
    }
}
