// Participant Device Tests
//
// Accessor, reference counting and user data behaviour of ParticipantDevice.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;

use rvoip_participant_core::{
    DeviceAddress, DeviceConfig, DisconnectionMethod, JoiningMethod, MediaDirection,
    ParticipantDevice, ParticipantDeviceBuilder, ParticipantDeviceState, SecurityLevel,
    StreamType, UserData,
};

fn alice_phone() -> ParticipantDevice {
    let address: DeviceAddress = "\"Alice\" <sip:alice@example.org;gr=urn:uuid:a1>".parse().unwrap();
    ParticipantDeviceBuilder::new(address)
        .ssrc(0x1234_5678)
        .audio_direction(MediaDirection::SendRecv)
        .build()
}

#[test]
fn test_ref_unref_leaves_count_unchanged() {
    let device = alice_phone();
    let before = device.ref_count();

    let extra = device.acquire();
    assert_eq!(device.ref_count(), before + 1);
    extra.release();

    assert_eq!(device.ref_count(), before);
}

#[test]
fn test_clones_share_state() {
    let device = alice_phone();
    let other = device.clone();

    other.set_ssrc(99);
    assert_eq!(device.ssrc(), 99);
    assert_eq!(device, other);

    let stranger = alice_phone();
    assert_ne!(device, stranger);
}

#[test]
fn test_user_data_round_trip() {
    let device = alice_phone();

    // Nothing set yet
    assert!(device.user_data().is_none());

    let payload: UserData = Arc::new(String::from("ui-row-7"));
    assert!(device.set_user_data(Some(payload.clone())).is_none());

    let stored = device.user_data().unwrap();
    assert!(Arc::ptr_eq(&stored, &payload));
    assert_eq!(stored.downcast_ref::<String>().map(String::as_str), Some("ui-row-7"));

    // Replacing hands the old value back without touching it
    let previous = device.set_user_data(None).unwrap();
    assert!(Arc::ptr_eq(&previous, &payload));
    assert!(device.user_data().is_none());
}

#[test]
fn test_user_data_is_not_owned_by_device() {
    let payload: UserData = Arc::new(7u32);
    let device = alice_phone();
    device.set_user_data(Some(payload.clone()));
    assert_eq!(Arc::strong_count(&payload), 2);

    drop(device);
    assert_eq!(Arc::strong_count(&payload), 1);
}

#[test]
fn test_name_absent_until_set() {
    let device = alice_phone();
    assert_eq!(device.name(), None);

    device.set_name(Some("Alice's phone".into()));
    assert_eq!(device.name().as_deref(), Some("Alice's phone"));

    let named = ParticipantDeviceBuilder::new(DeviceAddress::sip("bob", "example.org"))
        .name("Bob's desk phone")
        .build();
    assert_eq!(named.name().as_deref(), Some("Bob's desk phone"));
}

#[test]
fn test_address_is_stable() {
    let device = alice_phone();
    assert_eq!(device.address().user(), Some("alice"));
    assert_eq!(device.address().gruu(), Some("urn:uuid:a1"));
    assert_eq!(device.address().display_name(), Some("Alice"));

    device.join();
    device.set_security_level(SecurityLevel::Safe);
    assert_eq!(device.address().to_string(), "\"Alice\" <sip:alice@example.org;gr=urn:uuid:a1>");
}

#[test]
fn test_time_of_joining_is_epoch_seconds() {
    let before = Utc::now().timestamp();
    let device = alice_phone();
    let after = Utc::now().timestamp();

    let joined = device.time_of_joining();
    assert!(joined >= before && joined <= after);

    // Joining later does not move the timestamp
    device.join();
    assert_eq!(device.time_of_joining(), joined);

    let fixed = ParticipantDeviceBuilder::new(DeviceAddress::sip("carol", "example.org"))
        .time_of_joining(1_700_000_000)
        .build();
    assert_eq!(fixed.time_of_joining(), 1_700_000_000);
}

#[test]
fn test_media_directions_are_independent() {
    let device = alice_phone();
    assert_eq!(device.audio_direction(), MediaDirection::SendRecv);
    assert_eq!(device.video_direction(), MediaDirection::Inactive);
    assert_eq!(device.text_direction(), MediaDirection::Inactive);

    device.set_stream_direction(StreamType::Video, MediaDirection::RecvOnly);
    device.set_stream_direction(StreamType::Text, MediaDirection::SendOnly);

    assert_eq!(device.audio_direction(), MediaDirection::SendRecv);
    assert_eq!(device.video_direction(), MediaDirection::RecvOnly);
    assert_eq!(device.text_direction(), MediaDirection::SendOnly);
    assert_eq!(device.stream_direction(StreamType::Video), MediaDirection::RecvOnly);
}

#[test]
fn test_config_defaults_and_overrides() {
    let config = DeviceConfig {
        audio_direction: MediaDirection::SendRecv,
        video_direction: MediaDirection::SendRecv,
        security_level: SecurityLevel::Encrypted,
        ..DeviceConfig::default()
    };

    let device = ParticipantDeviceBuilder::new(DeviceAddress::sip("dave", "example.org"))
        .video_direction(MediaDirection::Inactive)
        .config(&config)
        .joining_method(JoiningMethod::DialedOut)
        .build();

    assert_eq!(device.audio_direction(), MediaDirection::SendRecv);
    // Explicit values win regardless of call order
    assert_eq!(device.video_direction(), MediaDirection::Inactive);
    assert_eq!(device.security_level(), SecurityLevel::Encrypted);
    assert_eq!(device.joining_method(), JoiningMethod::DialedOut);
}

#[test]
fn test_join_and_leave() {
    let device = alice_phone();
    assert!(!device.is_in_conference());
    assert_eq!(device.state(), ParticipantDeviceState::Joining);

    assert!(device.join());
    assert!(device.is_in_conference());
    assert_eq!(device.state(), ParticipantDeviceState::Present);

    device.set_is_speaking(true);
    assert!(device.leave(Some(DisconnectionMethod::Booted), Some("kicked by admin".into())));
    assert!(!device.is_in_conference());
    assert!(!device.is_speaking());
    assert_eq!(device.state(), ParticipantDeviceState::Left);
    assert_eq!(device.disconnection_method(), Some(DisconnectionMethod::Booted));
    assert_eq!(device.disconnection_reason().as_deref(), Some("kicked by admin"));

    // Rejoining clears the disconnection details
    assert!(device.join());
    assert_eq!(device.disconnection_method(), None);
    assert_eq!(device.disconnection_reason(), None);
}

#[test]
fn test_handle_is_shareable_across_threads() {
    let device = alice_phone();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let device = device.acquire();
            std::thread::spawn(move || {
                device.set_ssrc(i);
                device.ref_count()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap() >= 1);
    }
    assert_eq!(device.ref_count(), 1);
    assert!(device.ssrc() < 8);
}

#[test]
fn test_snapshot_serializes() {
    let device = alice_phone();
    device.set_security_level(SecurityLevel::Encrypted);
    device.join();

    let json = serde_json::to_value(device.snapshot()).unwrap();
    assert_eq!(json["address"], "\"Alice\" <sip:alice@example.org;gr=urn:uuid:a1>");
    assert_eq!(json["security_level"], "encrypted");
    assert_eq!(json["state"], "present");
    assert_eq!(json["in_conference"], true);
    assert_eq!(json["audio_direction"], "sendrecv");
    assert_eq!(json["ssrc"], 0x1234_5678);
}
