//! Lock scenarios: two threads incrementing a shared counter

use fieldcalc::{parallel_for, Execution, Lock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

const PER_THREAD: usize = 5000;

// Read-modify-write in two steps, so that unguarded updates can be lost.
fn bump(counter: &AtomicUsize) {
    let v = counter.load(Ordering::Relaxed);
    thread::yield_now();
    counter.store(v + 1, Ordering::Relaxed);
}

fn race<const E: bool>() -> usize
where
    fieldcalc::Switch<E>: fieldcalc::LockSwitch,
{
    let lock = Lock::<E>::new();
    let counter = AtomicUsize::new(0);
    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                for _ in 0..PER_THREAD {
                    let _guard = lock.guard();
                    bump(&counter);
                }
            });
        }
    });
    counter.load(Ordering::Relaxed)
}

#[test]
fn test_enabled_lock_excludes() {
    assert_eq!(race::<true>(), 2 * PER_THREAD);
}

#[test]
fn test_disabled_lock_compiles_out() {
    assert!(race::<false>() <= 2 * PER_THREAD);
    assert_eq!(std::mem::size_of::<Lock<false>>(), 0);
}

#[test]
fn test_lock_guards_parallel_loop() {
    let lock = Lock::<true>::new();
    let counter = AtomicUsize::new(0);
    parallel_for(Execution::Parallel { threads: 4 }, 2 * PER_THREAD, |_, _| {
        let _guard = lock.guard();
        bump(&counter);
    });
    assert_eq!(counter.load(Ordering::Relaxed), 2 * PER_THREAD);
}

#[test]
fn test_manual_set_and_unset() {
    let lock = Lock::<true>::new();
    lock.set();
    assert!(!lock.test());
    // SAFETY: acquired by `set` above
    unsafe { lock.unset() };
    assert!(lock.test());
    // SAFETY: acquired by `test` above
    unsafe { lock.unset() };
}
