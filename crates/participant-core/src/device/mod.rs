//! Participant devices: the shared handle, its builder and snapshots

mod builder;
mod handle;
mod snapshot;

pub use builder::ParticipantDeviceBuilder;
pub use handle::ParticipantDevice;
pub use snapshot::DeviceSnapshot;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeviceAddress, MediaDirection, ParticipantDeviceState, StreamType};

    fn device() -> ParticipantDevice {
        ParticipantDeviceBuilder::new(DeviceAddress::sip("alice", "example.org").with_gruu("phone"))
            .ssrc(0xdead_beef)
            .build()
    }

    #[test]
    fn test_acquire_release_balances() {
        let d = device();
        assert_eq!(d.ref_count(), 1);

        let extra = d.acquire();
        assert_eq!(d.ref_count(), 2);
        assert_eq!(extra, d);

        extra.release();
        assert_eq!(d.ref_count(), 1);
    }

    #[test]
    fn test_defaults() {
        let d = device();
        assert_eq!(d.name(), None);
        assert!(!d.is_in_conference());
        assert_eq!(d.state(), ParticipantDeviceState::Joining);
        assert_eq!(d.audio_direction(), MediaDirection::Inactive);
        assert_eq!(d.ssrc(), 0xdead_beef);
        assert!(d.current_callbacks().is_none());
        assert!(d.user_data().is_none());
    }

    #[test]
    fn test_mutators_report_changes() {
        let d = device();
        assert!(d.set_stream_direction(StreamType::Video, MediaDirection::SendOnly));
        assert!(!d.set_stream_direction(StreamType::Video, MediaDirection::SendOnly));
        assert_eq!(d.video_direction(), MediaDirection::SendOnly);

        assert!(d.join());
        assert!(!d.join());
        assert_eq!(d.state(), ParticipantDeviceState::Present);
        assert!(d.leave(None, None));
        assert!(!d.leave(None, None));
        assert_eq!(d.state(), ParticipantDeviceState::Left);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let d = device();
        d.set_name(Some("Alice's phone".to_string()));
        d.set_is_muted(true);
        let snap = d.snapshot();
        assert_eq!(snap.name.as_deref(), Some("Alice's phone"));
        assert!(snap.is_muted);
        assert_eq!(snap.ssrc, 0xdead_beef);
        assert_eq!(snap.joined_at.timestamp(), d.time_of_joining());
    }
}
