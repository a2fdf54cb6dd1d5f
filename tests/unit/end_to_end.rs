//! The two reference grouping scenarios, driven through a stub resolver.

use std::sync::Arc;

use rulegen::annotation::{MarkerCoordinate, ProcessorScopeCache};
use rulegen::models::DependencySet;
use rulegen::test_utils::{StubResolver, dep};

fn cache(stub: StubResolver) -> ProcessorScopeCache {
    ProcessorScopeCache::with_matcher(
        Arc::new(stub),
        MarkerCoordinate::new("com.example.auto", "auto-value"),
    )
}

#[test]
fn test_marker_without_extensions_gets_own_combined_scope() {
    let d1 = dep("x", "d1");
    let d2 = dep("com.example.auto", "auto-value");
    let cache = cache(
        StubResolver::new()
            .processor(d1.clone(), ["d1.Processor"])
            .processor(d2.clone(), ["auto.Processor"]),
    );

    let scopes = cache.scopes_for([d1.clone(), d2.clone()]).unwrap();

    assert_eq!(scopes.len(), 2);
    assert_eq!(scopes[0].dependencies(), &DependencySet::single(d1));
    assert_eq!(scopes[1].dependencies(), &DependencySet::single(d2));
    assert!(!scopes[1].has_extensions());
}

#[test]
fn test_extension_joins_marker_in_combined_scope() {
    let d1 = dep("x", "d1");
    let d2 = dep("com.example.auto", "auto-value");
    let d3 = dep("other", "d3");
    let cache = cache(
        StubResolver::new()
            .processor(d1.clone(), ["d1.Processor"])
            .processor(d2.clone(), ["auto.Processor"])
            .extension(d3.clone(), ["d3.Extension"]),
    );

    let scopes = cache.scopes_for([d1.clone(), d2.clone(), d3.clone()]).unwrap();

    assert_eq!(scopes.len(), 2);
    assert_eq!(scopes[0].dependencies(), &DependencySet::single(d1));
    assert_eq!(scopes[1].dependencies(), &DependencySet::new([d2, d3]).unwrap());
    assert!(scopes[1].has_extensions());
    assert_eq!(scopes[1].processors(), ["auto.Processor"]);
}
