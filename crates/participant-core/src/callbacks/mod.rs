//! Listener registration and dispatch for participant devices

pub mod cbs;
pub mod listener;
mod registry;

pub use cbs::{ParticipantDeviceCbs, ParticipantDeviceCbsBuilder};
pub use listener::ParticipantDeviceListener;
pub use registry::same_listener;

pub(crate) use registry::CallbackRegistry;
