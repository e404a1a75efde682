//! Settings scenarios: snapshot publication and peer checks

use fieldcalc::settings::{Settings, TRACE_BITS};
use fieldcalc::ConfigError;

#[test]
fn test_snapshot_round_trips_through_toml() {
    let local = Settings::current();
    let text = local.to_toml().unwrap();
    assert!(text.contains("trace_bits"));
    let parsed = Settings::from_toml(&text).unwrap();
    assert_eq!(parsed, local);
    local.ensure_compatible(&parsed).unwrap();
}

#[test]
fn test_peer_with_other_trace_width_rejected() {
    let local = Settings::current();
    let mut peer = local.clone();
    peer.trace_bits = if TRACE_BITS == 64 { 16 } else { 64 };
    match local.ensure_compatible(&peer) {
        Err(ConfigError::Incompatible { setting, .. }) => assert_eq!(setting, "trace_bits"),
        other => panic!("expected incompatible trace width, got {other:?}"),
    }
}

#[test]
fn test_malformed_snapshot_rejected() {
    assert!(matches!(
        Settings::from_toml("trace_bits = \"wide\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_snapshot_logged() {
    let logs = crate::test_utils::capture_logs(|| Settings::current().log()).contents();
    assert!(logs.contains("fieldcalc settings"));
    assert!(logs.contains("trace_bits"));
}
