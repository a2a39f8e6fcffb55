//! Integration tests for link acquisition and the uplink control flow

mod common;

use motorwatch_core::{
    Credentials, DeliveryOutcome, FixedTime, LinkConfig, LinkError, LinkManager, LinkState,
    Reading, RecordingDelay, Uplink,
};

use common::{RecordingTransport, ScriptedRadio};

fn manager(radio: ScriptedRadio, config: LinkConfig) -> LinkManager<ScriptedRadio, RecordingDelay> {
    LinkManager::new(radio, RecordingDelay::new(), config)
}

#[test]
fn acquisition_uses_configured_credentials() {
    let config = LinkConfig::new(Credentials::new("plant-floor", "hunter2"));
    let mut link = manager(ScriptedRadio::new(&[false, false, true]), config);

    let info = link.acquire_link().unwrap();

    assert_eq!(link.driver().last_ssid, Some("plant-floor"));
    assert_eq!(link.delay().pauses(), &[500, 500]);
    assert_eq!(info.rssi_dbm, -72);
    assert_eq!(link.state(), LinkState::Connected(info));
}

#[test]
fn acquisition_spends_whole_budget_when_radio_stays_down() {
    let mut link = manager(ScriptedRadio::new(&[false]), LinkConfig::default());

    let err = link.acquire_link().unwrap_err();

    assert_eq!(err, LinkError::Unavailable { attempts: 60 });
    assert_eq!(link.delay().total_ms(), 30_000);
    assert_eq!(link.state(), LinkState::Disconnected);
}

#[test]
fn custom_poll_pacing_is_honoured() {
    let config = LinkConfig::default().poll_interval_ms(100).max_attempts(5);
    let mut link = manager(ScriptedRadio::new(&[false]), config);

    assert!(link.acquire_link().is_err());
    assert_eq!(link.delay().pauses(), &[100; 5]);
}

#[test]
fn uplink_timestamps_come_from_injected_clock() {
    let mut clock = FixedTime::new(1_000_000);
    let link = manager(ScriptedRadio::new(&[true]), LinkConfig::default());
    let mut uplink = Uplink::new(link, RecordingTransport::default());
    uplink.start().unwrap();

    for _ in 0..3 {
        let reading = Reading::sampled_now(65.5, 0.02, 1500, &clock);
        assert_eq!(uplink.deliver(reading), DeliveryOutcome::Success(0.5));
        clock.advance(10);
    }

    let stamps: Vec<u64> = uplink.transport().sent.iter().map(|r| r.timestamp).collect();
    assert_eq!(stamps, vec![1_000_000, 1_000_010, 1_000_020]);
}

#[test]
fn dropped_link_is_reacquired_before_send() {
    // Up for acquisition and the first delivery, then down for good
    let link = manager(ScriptedRadio::drops_after(4), LinkConfig::default().max_attempts(2));
    let mut uplink = Uplink::new(link, RecordingTransport::default());
    uplink.start().unwrap();

    let first = uplink.deliver(Reading::new(50.0, 0.01, 1450, 1));
    assert!(first.is_success());

    let second = uplink.deliver(Reading::new(50.0, 0.01, 1450, 2));

    assert_eq!(second, DeliveryOutcome::LinkUnavailable);
    assert_eq!(uplink.link().driver().begins, 2);
    assert_eq!(uplink.link().delay().pauses(), &[500, 500]);
    assert_eq!(uplink.transport().sent.len(), 1);
}

#[test]
fn service_runs_independently_of_delivery() {
    let link = manager(ScriptedRadio::new(&[true]), LinkConfig::default());
    let mut uplink = Uplink::new(link, RecordingTransport::default());

    for _ in 0..4 {
        uplink.service();
    }

    assert_eq!(uplink.transport().serviced, 4);
    assert!(uplink.transport().sent.is_empty());
}
