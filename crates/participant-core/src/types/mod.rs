//! Value types shared by devices, participants and events

pub mod address;
pub mod media;
pub mod state;

pub use address::{DeviceAddress, Scheme};
pub use media::{MediaDirection, SecurityLevel, StreamType};
pub use state::{DisconnectionMethod, JoiningMethod, ParticipantDeviceState};

use std::any::Any;
use std::sync::Arc;

/// Caller-owned opaque payload attached to devices and callback objects.
/// The library stores it and hands it back, nothing more.
pub type UserData = Arc<dyn Any + Send + Sync>;
