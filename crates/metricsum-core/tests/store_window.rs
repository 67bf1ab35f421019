#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use metricsum_core::{ManualClock, SampleStore, SweepReport, TimeWindow};

const SEC: i64 = 1_000_000_000;
const T0: i64 = 1_700_000_000 * SEC;

fn store_at(start: i64) -> (Arc<ManualClock>, SampleStore) {
    let clock = Arc::new(ManualClock::new(start));
    let store = SampleStore::with_clock(TimeWindow::from_nanos(10 * SEC), clock.clone());
    (clock, store)
}

#[test]
fn sums_every_insert_inside_the_window() {
    let clock = Arc::new(ManualClock::ticking(T0, 1));
    let store = SampleStore::with_clock(TimeWindow::from_nanos(10 * SEC), clock.clone());

    for v in [3, -1, 40, 0, 8] {
        store.insert("req", v);
    }
    assert_eq!(store.sum_since("req", T0 - 1), 50);
    assert_eq!(store.sample_count(), 5);
}

#[test]
fn unknown_name_sums_to_zero() {
    let (_clock, store) = store_at(T0);
    assert_eq!(store.sum_since("nope", i64::MIN), 0);
    assert_eq!(store.window_sum("nope"), 0);
    assert_eq!(store.series_count(), 0);
}

#[test]
fn names_are_case_sensitive() {
    let (clock, store) = store_at(T0);
    store.insert("CPU", 1);
    clock.advance(1);
    store.insert("cpu", 2);
    assert_eq!(store.sum_since("CPU", 0), 1);
    assert_eq!(store.sum_since("cpu", 0), 2);
}

#[test]
fn sum_excludes_sample_exactly_at_cutoff() {
    let (clock, store) = store_at(T0);
    let at = store.insert("m", 4);
    clock.advance(1);
    store.insert("m", 6);

    assert_eq!(at, T0);
    assert_eq!(store.sum_since("m", T0), 6);
    assert_eq!(store.sum_since("m", T0 - 1), 10);
    assert_eq!(store.sum_since("m", T0 + 1), 0);
}

#[test]
fn evict_keeps_sample_exactly_at_cutoff() {
    let (clock, store) = store_at(T0);
    store.insert("a", 1);
    clock.advance(1);
    store.insert("a", 2);
    store.insert("b", 5);

    let report = store.evict(T0 + 1);
    assert_eq!(report.samples_removed, 1);
    assert_eq!(report.series_removed, 0);
    assert_eq!(store.dump(), vec![
        ("a".to_string(), vec![(T0 + 1, 2)]),
        ("b".to_string(), vec![(T0 + 1, 5)]),
    ]);
}

#[test]
fn evict_applies_across_all_names_and_prunes_empty_series() {
    let (clock, store) = store_at(T0);
    store.insert("old", 1);
    store.insert("mixed", 2);
    clock.advance(5 * SEC);
    store.insert("mixed", 3);
    store.insert("new", 4);

    let report = store.evict(T0 + SEC);
    assert_eq!(report, SweepReport { cutoff: T0 + SEC, samples_removed: 2, series_removed: 1 });
    assert_eq!(store.series_count(), 2);
    assert_eq!(store.sum_since("old", 0), 0);
    assert_eq!(store.sum_since("mixed", 0), 3);
    assert_eq!(store.sum_since("new", 0), 4);
}

#[test]
fn evict_is_idempotent_for_a_fixed_cutoff() {
    let (clock, store) = store_at(T0);
    for _ in 0..4 {
        store.insert("x", 1);
        clock.advance(SEC);
    }
    let first = store.evict(T0 + 2 * SEC);
    let after_first = store.dump();
    let second = store.evict(T0 + 2 * SEC);

    assert_eq!(first.samples_removed, 2);
    assert_eq!(second.samples_removed, 0);
    assert_eq!(second.series_removed, 0);
    assert_eq!(store.dump(), after_first);
}

#[test]
fn same_nanosecond_insert_overwrites() {
    let (_clock, store) = store_at(T0);
    store.insert("dup", 5);
    store.insert("dup", 9);
    assert_eq!(store.sample_count(), 1);
    assert_eq!(store.sum_since("dup", T0 - 1), 9);
}

#[test]
fn window_sum_and_sweep_follow_the_clock() {
    let (clock, store) = store_at(T0);
    store.insert("w", 10);
    clock.advance(4 * SEC);
    store.insert("w", 20);

    clock.advance(7 * SEC); // first sample is now 11s old
    assert_eq!(store.window_sum("w"), 20);

    let report = store.sweep();
    assert_eq!(report.cutoff, T0 + SEC);
    assert_eq!(report.samples_removed, 1);
    assert_eq!(store.sum_since("w", 0), 20);
}

#[test]
fn cpu_scenario() {
    let (clock, store) = store_at(T0);
    store.insert("cpu", 5);
    clock.set(T0 + SEC);
    store.insert("cpu", 7);

    assert_eq!(store.sum_since("cpu", T0 - 1), 12);
    store.evict(T0 + SEC);
    assert_eq!(store.sum_since("cpu", T0 - 1), 7);
}

#[test]
fn sum_saturates_instead_of_wrapping() {
    let clock = Arc::new(ManualClock::ticking(T0, 1));
    let store = SampleStore::with_clock(TimeWindow::default(), clock);
    store.insert("big", i64::MAX);
    store.insert("big", 1);
    assert_eq!(store.sum_since("big", 0), i64::MAX);
}

#[test]
fn parallel_inserts_lose_nothing() {
    let clock = Arc::new(ManualClock::ticking(T0, 1));
    let store = Arc::new(SampleStore::with_clock(TimeWindow::from_nanos(10 * SEC), clock));

    let threads = 8;
    let per_thread = 500;
    let mut handles = Vec::new();
    for t in 0..threads {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..per_thread {
                store.insert("hot", (t * per_thread + i) as i64);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let n = (threads * per_thread) as i64;
    assert_eq!(store.sample_count(), n as usize);
    assert_eq!(store.sum_since("hot", T0 - 1), n * (n - 1) / 2);
}

#[test]
fn sums_and_sweeps_race_inserts_safely() {
    let clock = Arc::new(ManualClock::ticking(T0, 1));
    let store = Arc::new(SampleStore::with_clock(TimeWindow::from_nanos(10 * SEC), clock));

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    store.insert(&format!("s{}", w % 2), 1);
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..1_000 {
                let s = store.sum_since("s0", T0 - 1) + store.sum_since("s1", T0 - 1);
                assert!((0..=4_000).contains(&s));
                // Cutoff below every timestamp: the sweep must not drop anything.
                store.evict(T0);
            }
        })
    };

    for w in writers {
        w.join().unwrap();
    }
    reader.join().unwrap();

    assert_eq!(store.sum_since("s0", T0 - 1) + store.sum_since("s1", T0 - 1), 4_000);
}
