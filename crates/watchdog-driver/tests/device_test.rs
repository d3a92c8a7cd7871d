//! Integration tests for the watchdog device handle against a scripted port.

mod common;

use std::io;
use std::time::{Duration, Instant};

use common::{fast_config, watchdog, watchdog_with, Event, ScriptedConnector};
use watchdog_driver::{ChannelPolicy, DriverConfig, TransportError, WatchdogError};
use watchdog_protocol::{Channel, LineMode, Params, ProtocolError, RelayMode, SwitchState};

fn sample_params() -> Params {
    Params {
        alarm: Duration::from_secs(15 * 60),
        reset_press: Duration::from_millis(200),
        hard_reset_hold: Duration::from_secs(6),
        hard_reset_release: Duration::from_secs(2),
        hard_reset_press: Duration::from_millis(200),
        channel1: RelayMode::Reset,
        channel2: RelayMode::Power,
        reset_limit: 10,
        channel3: LineMode::Off,
        temp_threshold: 80,
    }
}

// ============================================================================
// Ping and Version
// ============================================================================

#[test]
fn test_ping_session() {
    let port = ScriptedConnector::new().reply(b"~A");
    let dog = watchdog(&port);

    assert!(dog.ping().unwrap());
    assert_eq!(
        port.events(),
        vec![
            Event::Open("ttyACM0".to_string()),
            Event::Write(b"~U".to_vec()),
            Event::Read(b"~A".to_vec()),
            Event::Close,
        ]
    );
}

#[test]
fn test_ping_wrong_ack() {
    let port = ScriptedConnector::new().reply(b"~U");
    let dog = watchdog(&port);

    match dog.ping().unwrap_err() {
        WatchdogError::Protocol(ProtocolError::BadAcknowledge { actual, .. }) => {
            assert_eq!(actual, b"~U".to_vec());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_ping_no_reply() {
    let port = ScriptedConnector::new();
    let dog = watchdog(&port);

    let err = dog.ping().unwrap_err();
    assert!(matches!(err, WatchdogError::Transport(TransportError::NothingRead)));
}

#[test]
fn test_version_strips_line_feed() {
    let port = ScriptedConnector::new().reply(b"~IWatchDog v2.4\n");
    let dog = watchdog(&port);

    assert_eq!(dog.version().unwrap(), "WatchDog v2.4");
    assert_eq!(port.writes(), vec![b"~I".to_vec()]);
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn test_read_params() {
    let port = ScriptedConnector::new().reply(b"~FF262212A050");
    let dog = watchdog(&port);

    assert_eq!(dog.read_params().unwrap(), sample_params());
    assert_eq!(port.writes(), vec![b"~F".to_vec()]);
}

#[test]
fn test_read_params_wrong_mnemonic() {
    let port = ScriptedConnector::new().reply(b"~IF262212A050");
    let dog = watchdog(&port);

    match dog.read_params().unwrap_err() {
        WatchdogError::Protocol(ProtocolError::UnexpectedReply { expected, actual }) => {
            assert_eq!(expected, b"~F".to_vec());
            assert_eq!(actual, b"~IF262212A050".to_vec());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_read_params_noisy_payload() {
    let port = ScriptedConnector::new().reply(b"~FF26Q212A0ZZ");
    let dog = watchdog(&port);

    let params = dog.read_params().unwrap();
    assert_eq!(params.alarm, Duration::from_secs(15 * 60));
    assert_eq!(params.hard_reset_release, Duration::ZERO);
    assert_eq!(params.temp_threshold, 0);
}

#[test]
fn test_write_params() {
    let port = ScriptedConnector::new().reply(b"~W");
    let dog = watchdog(&port);

    dog.write_params(&sample_params()).unwrap();
    assert_eq!(port.writes(), vec![b"~WF262212A050".to_vec()]);
}

#[test]
fn test_write_params_wrong_reply() {
    let port = ScriptedConnector::new().reply(b"~F");
    let dog = watchdog(&port);

    let err = dog.write_params(&sample_params()).unwrap_err();
    assert!(matches!(
        err,
        WatchdogError::Protocol(ProtocolError::UnexpectedReply { .. })
    ));
}

// ============================================================================
// Channel and State Commands
// ============================================================================

#[test]
fn test_channel_commands() {
    let port = ScriptedConnector::new().reply(b"~M").reply(b"~S").reply(b"~R");
    let dog = watchdog(&port);

    dog.touch(Channel::One).unwrap();
    dog.turn_on(Channel::Two).unwrap();
    dog.turn_off(Channel::Two).unwrap();

    assert_eq!(
        port.writes(),
        vec![b"~M1".to_vec(), b"~S2".to_vec(), b"~R2".to_vec()]
    );
}

#[test]
fn test_channel_three_rejected_without_traffic() {
    let port = ScriptedConnector::new();
    let dog = watchdog(&port);

    let err = dog.touch(Channel::Three).unwrap_err();
    assert!(matches!(
        err,
        WatchdogError::Protocol(ProtocolError::UnsupportedChannel {
            channel: Channel::Three,
            ..
        })
    ));
    assert!(port.events().is_empty());
}

#[test]
fn test_channel_three_ignored_by_policy() {
    let port = ScriptedConnector::new();
    let config = DriverConfig {
        channel_policy: ChannelPolicy::Ignore,
        ..fast_config()
    };
    let dog = watchdog_with(&port, config);

    dog.turn_on(Channel::Three).unwrap();
    dog.turn_off(Channel::Three).unwrap();
    assert!(port.events().is_empty());
}

#[test]
fn test_pause_and_light() {
    let port = ScriptedConnector::new()
        .reply(b"~P")
        .reply(b"~P")
        .reply(b"~L");
    let dog = watchdog(&port);

    dog.pause(SwitchState::On).unwrap();
    dog.pause(SwitchState::Off).unwrap();
    dog.light(SwitchState::On).unwrap();

    assert_eq!(
        port.writes(),
        vec![b"~P1".to_vec(), b"~P0".to_vec(), b"~L1".to_vec()]
    );
}

#[test]
fn test_touch_wrong_reply() {
    let port = ScriptedConnector::new().reply(b"~A");
    let dog = watchdog(&port);

    assert!(dog.touch(Channel::One).is_err());
}

// ============================================================================
// Commands Without Replies
// ============================================================================

#[test]
fn test_test_actions_do_not_read() {
    let port = ScriptedConnector::new().reply(b"~Tleftover");
    let dog = watchdog(&port);

    dog.reset().unwrap();
    dog.hard_reset().unwrap();
    dog.power_off().unwrap();

    assert_eq!(
        port.writes(),
        vec![b"~T1".to_vec(), b"~T2".to_vec(), b"~T3".to_vec()]
    );
    assert!(!port.events().iter().any(|e| matches!(e, Event::Read(_))));
    assert_eq!(port.pending_replies(), 1);
}

#[test]
fn test_enter_bootloader() {
    let port = ScriptedConnector::new();
    let dog = watchdog(&port);

    dog.enter_bootloader().unwrap();
    assert_eq!(
        port.events(),
        vec![
            Event::Open("ttyACM0".to_string()),
            Event::Write(b"~D".to_vec()),
            Event::Close,
        ]
    );
}

#[test]
fn test_read_input() {
    let port = ScriptedConnector::new().reply(b"~G1");
    let dog = watchdog(&port);

    assert_eq!(dog.read_input().unwrap(), b"1".to_vec());
}

// ============================================================================
// Transport Behavior
// ============================================================================

#[test]
fn test_port_opened_per_exchange() {
    let port = ScriptedConnector::new().reply(b"~A").reply(b"~A");
    let dog = watchdog(&port);

    dog.ping().unwrap();
    dog.ping().unwrap();

    let opens = port
        .events()
        .iter()
        .filter(|e| matches!(e, Event::Open(_)))
        .count();
    let closes = port.events().iter().filter(|e| **e == Event::Close).count();
    assert_eq!(opens, 2);
    assert_eq!(closes, 2);
}

#[test]
fn test_open_failure() {
    let port = ScriptedConnector::new().fail_open(io::ErrorKind::PermissionDenied);
    let dog = watchdog(&port);

    let err = dog.version().unwrap_err();
    assert!(matches!(
        err,
        WatchdogError::Transport(TransportError::Open { .. })
    ));
    assert!(err.to_string().contains("ttyACM0"));
}

#[test]
fn test_read_failure_closes_port() {
    let port = ScriptedConnector::new().fail_read(io::ErrorKind::TimedOut);
    let dog = watchdog(&port);

    let err = dog.read_params().unwrap_err();
    assert!(matches!(err, WatchdogError::Transport(TransportError::Read(_))));
    assert_eq!(port.events().last(), Some(&Event::Close));
}

#[test]
fn test_failure_is_not_retried() {
    let port = ScriptedConnector::new()
        .fail_read(io::ErrorKind::TimedOut)
        .reply(b"~A");
    let dog = watchdog(&port);

    assert!(dog.ping().is_err());
    assert_eq!(port.writes().len(), 1);
    assert_eq!(port.pending_replies(), 1);
}

#[test]
fn test_settle_delay_before_read() {
    let port = ScriptedConnector::new().reply(b"~A");
    let config = DriverConfig {
        settle_delay_ms: 50,
        ..DriverConfig::default()
    };
    let dog = watchdog_with(&port, config);

    let start = Instant::now();
    dog.ping().unwrap();
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn test_name() {
    let port = ScriptedConnector::new();
    let dog = watchdog(&port);
    assert_eq!(dog.name(), "ttyACM0");
}
