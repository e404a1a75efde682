//! Trace scenarios: push/pop, scoped calls, cycles, keys

use fieldcalc::{code_point, Trace, TraceCall, TraceCycle, TraceKey, TraceReset, TraceT};
use fieldcalc::settings::TRACE_BITS;
use proptest::prelude::*;

#[test]
fn test_push_pop_sequence() {
    let mut trace = Trace::new();
    trace.push(15);
    assert_eq!(trace.hash(0), 15);
    trace.push(120);
    let two = trace.hash(0);
    trace.push(48);
    let three = trace.hash(0);
    if TRACE_BITS == 64 {
        assert_eq!(two as u64, (120u64 << 8) | 15);
        assert_eq!(three as u64, (48u64 << 16) | (120u64 << 8) | 15);
    }
    assert_ne!(two, three);
    trace.pop();
    assert_eq!(trace.hash(0), two);
    trace.pop();
    assert_eq!(trace.hash(0), 15);
    trace.pop();
    assert_eq!(trace.hash(0), 0);
    assert!(trace.is_empty());
}

#[test]
fn test_scoped_calls_restore_in_reverse() {
    let mut trace = Trace::new();
    let mut recorded = Vec::new();
    {
        let mut a = TraceCall::new(&mut trace, 15);
        recorded.push(a.hash(0));
        {
            let mut b = TraceCall::new(&mut a, 120);
            recorded.push(b.hash(0));
            {
                let c = TraceCall::new(&mut b, 48);
                recorded.push(c.hash(0));
            }
            assert_eq!(b.hash(0), recorded[1]);
        }
        assert_eq!(a.hash(0), recorded[0]);
    }
    assert_eq!(trace.hash(0), 0);
    assert!(trace.is_empty());
}

#[test]
fn test_early_return_pops() {
    fn region(trace: &mut Trace, bail: bool) -> TraceT {
        let mut call = TraceCall::new(trace, 3);
        if bail {
            return call.hash(0);
        }
        let inner = TraceCall::new(&mut call, 4);
        inner.hash(0)
    }

    let mut trace = Trace::new();
    let short = region(&mut trace, true);
    assert!(trace.is_empty());
    let long = region(&mut trace, false);
    assert!(trace.is_empty());
    assert_ne!(short, long);
}

#[test]
fn test_cycle_reproducibility() {
    let mut trace = Trace::new();
    let mut recorded = Vec::new();
    {
        let mut i = TraceCycle::new(&mut trace, 0);
        while i < 10 {
            recorded.push(i.hash(0));
            i += 1;
        }
    }
    for target in 0..10 {
        let mut i = TraceCycle::new(&mut trace, 0);
        while i < target {
            i.advance();
        }
        assert_eq!(i.hash(0), recorded[target as usize]);
    }
    assert!(trace.is_empty());
}

#[test]
fn test_code_points_within_a_cycle() {
    fn body(trace: &mut Trace) -> Vec<TraceT> {
        let mut points = Vec::new();
        let mut i = TraceCycle::new(trace, 0);
        while i < 3 {
            points.push(i.hash(code_point!()));
            points.push(i.hash(code_point!()));
            i += 1;
        }
        points
    }

    let mut trace = Trace::new();
    let first = body(&mut trace);
    assert_eq!(body(&mut trace), first);
    let mut distinct = first.clone();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), first.len());
}

#[test]
fn test_keyed_processes_distinct() {
    let mut trace = Trace::new();
    let mut hashes = Vec::new();
    for key in ["alpha", "beta", "gamma"] {
        let k = TraceKey::hashed(&mut trace, key);
        hashes.push(k.hash(0));
    }
    assert!(trace.is_empty());
    hashes.sort_unstable();
    hashes.dedup();
    assert_eq!(hashes.len(), 3);
}

#[test]
fn test_reset_isolates_region() {
    let mut trace = Trace::new();
    trace.push(1);
    let inside = {
        let mut reset = TraceReset::new(&mut trace);
        let call = TraceCall::new(&mut reset, 2);
        call.hash(0)
    };
    assert_eq!(inside, 2);
    assert!(trace.is_empty());
}

proptest! {
    #[test]
    fn nested_calls_restore_every_level(tags in prop::collection::vec(any::<TraceT>(), 1..24)) {
        fn descend(trace: &mut Trace, tags: &[TraceT], seen: &mut Vec<TraceT>) {
            let Some((&tag, rest)) = tags.split_first() else {
                return;
            };
            let before = trace.hash(0);
            {
                let mut call = TraceCall::new(trace, tag);
                descend(&mut call, rest, seen);
            }
            seen.push(before);
            assert_eq!(trace.hash(0), before);
        }

        let mut trace = Trace::new();
        let mut seen = Vec::new();
        descend(&mut trace, &tags, &mut seen);
        prop_assert_eq!(seen.len(), tags.len());
        prop_assert!(trace.is_empty());
        prop_assert_eq!(trace.hash(0), 0);
    }

    #[test]
    fn cycles_distinct_at_any_depth(depth in 0usize..20, key in any::<Option<TraceT>>()) {
        let mut trace = Trace::new();
        if let Some(key) = key {
            trace.push_wide(key);
        }
        for tag in 0..depth {
            trace.push(tag as TraceT);
        }
        let mut seen = Vec::new();
        {
            let mut i = TraceCycle::new(&mut trace, 0);
            while i < 8 {
                seen.push(i.hash(0));
                i.advance();
            }
        }
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), 8);
    }
}
