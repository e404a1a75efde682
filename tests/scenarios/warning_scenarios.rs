//! Trace collision warnings

use crate::test_utils::capture_logs;
use fieldcalc::settings::WARNING_TRACE;
use fieldcalc::{Trace, TraceT, FRAME_BITS};

fn overflowing_push() {
    let mut trace = Trace::new();
    trace.push((1 as TraceT) << FRAME_BITS);
    trace.pop();
}

#[test]
fn test_overflow_reported_iff_enabled() {
    let logs = capture_logs(overflowing_push).contents();
    assert_eq!(logs.contains("trace frame truncated"), WARNING_TRACE);
}

#[cfg(feature = "warning-trace")]
#[test]
fn test_warning_target() {
    let logs = capture_logs(overflowing_push).contents();
    assert!(logs.contains("WARN"));
    assert!(logs.contains("fieldcalc::trace"));
}

#[test]
fn test_fitting_push_is_silent() {
    let logs = capture_logs(|| {
        let mut trace = Trace::new();
        trace.push(1);
        trace.pop();
    })
    .contents();
    assert!(!logs.contains("truncated"));
}

#[test]
fn test_wide_salt_reported_iff_enabled() {
    let logs = capture_logs(|| {
        let mut trace = Trace::new();
        trace.push(1);
        let _ = trace.hash(TraceT::MAX);
        trace.pop();
    })
    .contents();
    assert_eq!(logs.contains("code point salt truncated"), WARNING_TRACE);
}

#[cfg(feature = "warning-trace")]
#[test]
fn test_wrapped_frame_reported() {
    let logs = capture_logs(|| {
        let mut trace = Trace::new();
        trace.push_wide(7);
        trace.push(1);
        trace.pop();
        trace.pop();
    })
    .contents();
    assert!(logs.contains("trace frame wrapped"));
}
