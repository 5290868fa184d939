//! Readers racing reloads must only ever see whole chains.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use filter_chain::filter::{FilterManager, ReloadPolicy};

mod common;

const READERS: usize = 8;
const READS_PER_READER: usize = 10_000;
const LOADS: usize = 100;

fn stress(policy: ReloadPolicy, allowed: &[Vec<&str>]) {
    let manager = Arc::new(FilterManager::with_policy(common::registry(), policy));

    let valid_a = common::descriptors(&["tag", "slow", "tag"]);
    let valid_b = common::descriptors(&["slow", "tag"]);
    let invalid = common::descriptors(&["tag", "missing", "slow", "offline"]);

    thread::scope(|scope| {
        let writer = scope.spawn(|| {
            for i in 0..LOADS {
                let descriptors = match i % 4 {
                    0 => &valid_a,
                    2 => &valid_b,
                    _ => &invalid,
                };
                let _ = manager.load(descriptors);
            }
        });

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                scope.spawn(|| {
                    let mut last_generation = 0;
                    for _ in 0..READS_PER_READER {
                        let chain = manager.get_filters();

                        assert!(chain.generation() >= last_generation, "generation went backwards");
                        last_generation = chain.generation();

                        let names = chain.names();
                        assert!(
                            allowed.iter().any(|expected| *expected == names),
                            "observed torn chain {:?}",
                            names
                        );
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    });
}

#[test]
fn test_concurrent_reload_reject_policy() {
    stress(
        ReloadPolicy::Reject,
        &[vec![], vec!["tag", "slow", "tag"], vec!["slow", "tag"]],
    );
}

#[test]
fn test_concurrent_reload_skip_policy() {
    stress(
        ReloadPolicy::Skip,
        &[
            vec![],
            vec!["tag", "slow", "tag"],
            vec!["slow", "tag"],
            vec!["tag", "slow"],
        ],
    );
}

#[test]
fn test_rejected_reloads_do_not_advance_generation() {
    let manager = FilterManager::with_policy(common::registry(), ReloadPolicy::Reject);
    let valid = common::descriptors(&["tag"]);
    let invalid = common::descriptors(&["offline"]);

    for i in 0..LOADS {
        let _ = manager.load(if i % 2 == 0 { &valid } else { &invalid });
    }

    assert_eq!(manager.generation(), (LOADS / 2) as u64);
}

#[test]
fn test_readers_not_blocked_by_slow_init() {
    let manager = Arc::new(FilterManager::new(common::registry()));
    manager.load(&common::descriptors(&["tag"])).unwrap();

    let slow = vec![filter_chain::FilterDescriptor::new("slow").with_option("delay_ms", 500)];
    let loading = Arc::new(AtomicBool::new(true));

    thread::scope(|scope| {
        let writer = {
            let manager = manager.clone();
            let loading = loading.clone();
            scope.spawn(move || {
                manager.load(&slow).unwrap();
                loading.store(false, Ordering::SeqCst);
            })
        };

        // Give the writer time to enter the slow init.
        thread::sleep(Duration::from_millis(50));

        let started = Instant::now();
        let chain = manager.get_filters();
        let waited = started.elapsed();

        assert!(loading.load(Ordering::SeqCst), "reload finished before the read");
        assert_eq!(chain.names(), vec!["tag"]);
        assert!(waited < Duration::from_millis(250), "reader waited {:?}", waited);

        writer.join().unwrap();
    });

    assert_eq!(manager.get_filters().names(), vec!["slow"]);
}
