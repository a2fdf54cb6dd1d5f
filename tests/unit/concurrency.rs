//! Concurrent compute-if-absent.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use rulegen::annotation::ProcessorScopeCache;
use rulegen::models::DependencySet;
use rulegen::test_utils::{CountingResolver, StubResolver, dep};

const THREADS: usize = 16;

#[test]
fn test_same_key_resolved_once() {
    let stub = StubResolver::new().processor(dep("x", "dagger"), ["dagger.Processor"]);
    let resolver =
        Arc::new(CountingResolver::new(stub).with_delay(Duration::from_millis(50)));
    let cache = Arc::new(ProcessorScopeCache::new(resolver.clone()));
    let set = DependencySet::single(dep("x", "dagger"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            let set = set.clone();
            thread::spawn(move || {
                barrier.wait();
                cache.scope(&set).unwrap()
            })
        })
        .collect();

    let scopes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(resolver.calls(), 1);
    assert!(scopes.iter().all(|s| Arc::ptr_eq(s, &scopes[0])));
}

#[test]
fn test_distinct_keys_resolved_in_parallel() {
    let mut stub = StubResolver::new();
    for i in 0..THREADS {
        stub = stub.processor(dep("x", &format!("p{i}")), [format!("p{i}.Processor")]);
    }
    let resolver =
        Arc::new(CountingResolver::new(stub).with_delay(Duration::from_millis(20)));
    let cache = Arc::new(ProcessorScopeCache::new(resolver.clone()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Every thread asks for its own key and a shared one.
                cache.scopes_for([dep("x", &format!("p{i}")), dep("x", "p0")]).unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(resolver.calls(), THREADS);
    assert_eq!(cache.len(), THREADS);
}
