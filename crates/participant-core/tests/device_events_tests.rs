// Device Event Stream Tests
//
// Async subscribers see the same notifications as registered listeners.

use std::time::Duration;

use rvoip_participant_core::{
    DeviceAddress, DeviceConfig, DisconnectionMethod, MediaDirection, ParticipantDeviceBuilder,
    ParticipantDeviceEvent, ParticipantDeviceState, StreamType,
};

fn address() -> DeviceAddress {
    DeviceAddress::sip("carol", "example.org").with_gruu("laptop")
}

#[tokio::test]
async fn test_subscriber_sees_join_sequence() {
    let device = ParticipantDeviceBuilder::new(address()).build();
    let mut events = device.subscribe();

    device.join();

    let first = events.receive().await.unwrap();
    assert_eq!(
        first,
        ParticipantDeviceEvent::StateChanged {
            address: address(),
            state: ParticipantDeviceState::Present,
        }
    );
    let second = events.receive().await.unwrap();
    assert_eq!(second, ParticipantDeviceEvent::ConferenceJoined { address: address() });
    assert!(events.try_receive().unwrap().is_none());
}

#[tokio::test]
async fn test_subscriber_in_other_task() {
    let device = ParticipantDeviceBuilder::new(address()).build();
    let mut events = device.subscribe();

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while seen.len() < 3 {
            seen.push(events.receive().await.unwrap().name());
        }
        seen
    });

    let producer = device.acquire();
    tokio::task::spawn_blocking(move || {
        producer.set_stream_direction(StreamType::Video, MediaDirection::SendRecv);
        producer.set_stream_available(StreamType::Video, true);
        producer.set_is_speaking(true);
    })
    .await
    .unwrap();

    let seen = tokio::time::timeout(Duration::from_secs(2), watcher)
        .await
        .expect("watcher finished")
        .unwrap();
    assert_eq!(
        seen,
        vec![
            "stream_capability_changed",
            "stream_availability_changed",
            "is_speaking_changed",
        ]
    );
}

#[tokio::test]
async fn test_leave_event_carries_reason() {
    let device = ParticipantDeviceBuilder::new(address()).build();
    device.join();

    let mut events = device.subscribe();
    device.leave(Some(DisconnectionMethod::Departed), Some("hung up".into()));

    // StateChanged(Left) first, then ConferenceLeft
    let _ = events.receive().await.unwrap();
    match events.receive().await.unwrap() {
        ParticipantDeviceEvent::ConferenceLeft { address: a, method, reason } => {
            assert_eq!(a, address());
            assert_eq!(method, Some(DisconnectionMethod::Departed));
            assert_eq!(reason.as_deref(), Some("hung up"));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_subscriber_lags() {
    let config = DeviceConfig {
        event_channel_capacity: 2,
        ..DeviceConfig::default()
    };
    let device = ParticipantDeviceBuilder::new(address()).config(&config).build();
    let mut events = device.subscribe();

    for i in 0..5 {
        device.set_is_muted(i % 2 == 0);
    }

    // Overflowed receivers report the lag as an error
    assert!(events.receive().await.is_err());
}
