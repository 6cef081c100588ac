//! # Participant-Core
//!
//! Participant devices for RVoIP conferences and chat rooms.
//!
//! A [`ParticipantDevice`] is one endpoint of a conference participant: a
//! phone, a laptop, a tablet. The handle is reference counted and exposes:
//!
//! - identity: [`DeviceAddress`], optional display name, [`SecurityLevel`]
//! - conference membership: in-conference flag, time of joining, state
//! - media: audio/video/text [`MediaDirection`] and the RTP SSRC
//! - caller-owned user data the library never looks at
//! - listeners ([`ParticipantDeviceListener`] / [`ParticipantDeviceCbs`])
//!   notified synchronously in registration order, plus an async event stream
//!
//! The conference layer builds devices with [`ParticipantDeviceBuilder`] and
//! drives them through the state-changing methods; applications observe them.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use rvoip_participant_core::prelude::*;
//!
//! let address: DeviceAddress = "sip:alice@example.org;gr=phone".parse().unwrap();
//! let device = ParticipantDeviceBuilder::new(address).name("Alice's phone").build();
//!
//! let joins = Arc::new(AtomicUsize::new(0));
//! let counter = joins.clone();
//! let cbs = ParticipantDeviceCbs::builder()
//!     .on_conference_joined(move |_| { counter.fetch_add(1, Ordering::SeqCst); })
//!     .build();
//! device.add_callbacks(cbs.clone());
//!
//! device.join();
//! assert!(device.is_in_conference());
//! assert_eq!(joins.load(Ordering::SeqCst), 1);
//! ```

pub mod callbacks;
pub mod config;
pub mod device;
pub mod errors;
pub mod events;
pub mod logging;
pub mod participant;
pub mod types;

pub use callbacks::{same_listener, ParticipantDeviceCbs, ParticipantDeviceCbsBuilder, ParticipantDeviceListener};
pub use config::DeviceConfig;
pub use device::{DeviceSnapshot, ParticipantDevice, ParticipantDeviceBuilder};
pub use errors::{ParticipantError, Result};
pub use events::{DeviceEventSubscriber, ParticipantDeviceEvent};
pub use participant::Participant;
pub use types::{
    DeviceAddress, DisconnectionMethod, JoiningMethod, MediaDirection, ParticipantDeviceState,
    Scheme, SecurityLevel, StreamType, UserData,
};

pub mod prelude {
    //! Common imports
    pub use crate::callbacks::{same_listener, ParticipantDeviceCbs, ParticipantDeviceListener};
    pub use crate::config::DeviceConfig;
    pub use crate::device::{ParticipantDevice, ParticipantDeviceBuilder};
    pub use crate::errors::{ParticipantError, Result};
    pub use crate::events::ParticipantDeviceEvent;
    pub use crate::participant::Participant;
    pub use crate::types::{
        DeviceAddress, DisconnectionMethod, MediaDirection, ParticipantDeviceState, SecurityLevel,
        StreamType, UserData,
    };
}
