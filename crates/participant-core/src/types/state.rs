//! Conference membership states of a participant device

use serde::{Deserialize, Serialize};

/// Lifecycle state of a device within a conference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantDeviceState {
    /// Being added to the conference
    #[default]
    Joining,
    /// In the conference
    Present,
    /// Being removed from the conference
    Leaving,
    /// Removed from the conference
    Left,
    /// Will join once the conference starts
    ScheduledForJoining,
    /// Will leave once the conference ends
    ScheduledForLeaving,
    /// Put the conference on hold
    OnHold,
    /// Being called by the focus and ringing
    Alerting,
    /// Media muted by the focus
    MutedByFocus,
}

/// How the device entered the conference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoiningMethod {
    /// The device called the focus
    #[default]
    DialedIn,
    /// The focus called the device
    DialedOut,
    /// The device hosts the focus
    FocusOwner,
}

/// How the device left the conference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectionMethod {
    /// Removed by the focus or an admin
    Booted,
    /// Hung up on its own
    Departed,
    /// Declined because busy
    Busy,
    /// Dropped because of an error
    Failed,
}
