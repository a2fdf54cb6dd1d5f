//! Cache identity, marker folding, idempotence, and empty-processor detection.

use std::sync::Arc;

use rulegen::annotation::{MarkerCoordinate, ProcessorScopeCache};
use rulegen::core::RulegenError;
use rulegen::models::{Dependency, DependencySet, Project};
use rulegen::test_utils::{CountingResolver, StubResolver, dep, init_test_logging};

fn stub() -> StubResolver {
    StubResolver::new()
        .processor(dep("x", "dagger"), ["dagger.Processor"])
        .processor(dep("y", "butterknife"), ["butterknife.Processor"])
        .processor(dep("com.google.auto.value", "auto-value"), ["auto.value.Processor"])
        .extension(dep("other", "parcel"), ["parcel.Extension"])
        .empty(dep("x", "annotations"))
}

fn counting_cache() -> (Arc<CountingResolver<StubResolver>>, ProcessorScopeCache) {
    let resolver = Arc::new(CountingResolver::new(stub()));
    let cache = ProcessorScopeCache::new(resolver.clone());
    (resolver, cache)
}

#[test]
fn test_set_equal_keys_share_scope() {
    init_test_logging(None);
    let (resolver, cache) = counting_cache();

    let forward = DependencySet::new([dep("x", "dagger"), dep("y", "butterknife")]).unwrap();
    let backward = DependencySet::new([dep("y", "butterknife"), dep("x", "dagger")]).unwrap();

    let a = cache.scope(&forward).unwrap();
    let b = cache.scope(&backward).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(resolver.calls(), 1);
}

#[test]
fn test_marker_never_returned_as_singleton() {
    let (_, cache) = counting_cache();
    let marker = dep("com.google.auto.value", "auto-value");

    let scopes = cache
        .scopes_for([dep("x", "dagger"), marker.clone(), dep("y", "butterknife")])
        .unwrap();

    let containing_marker: Vec<_> =
        scopes.iter().filter(|s| s.dependencies().contains(&marker)).collect();
    assert_eq!(containing_marker.len(), 1);
    assert_eq!(scopes.len(), 3);
    // The combined scope comes last.
    assert!(scopes.last().unwrap().dependencies().contains(&marker));
}

#[test]
fn test_scopes_for_is_idempotent() {
    let (resolver, cache) = counting_cache();
    let deps = vec![
        dep("x", "dagger"),
        dep("com.google.auto.value", "auto-value"),
        dep("other", "parcel"),
    ];

    let first = cache.scopes_for(deps.clone()).unwrap();
    let calls = resolver.calls();
    let second = cache.scopes_for(deps).unwrap();

    assert_eq!(first, second);
    assert_eq!(resolver.calls(), calls);
    // three singletons plus one combined set
    assert_eq!(calls, 4);
}

#[test]
fn test_input_order_does_not_matter() {
    let (_, cache) = counting_cache();
    let forward = cache
        .scopes_for([dep("x", "dagger"), dep("y", "butterknife"), dep("other", "parcel")])
        .unwrap();
    let backward = cache
        .scopes_for([dep("other", "parcel"), dep("y", "butterknife"), dep("x", "dagger")])
        .unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn test_empty_processor_detection() {
    let (_, cache) = counting_cache();

    assert!(cache.has_empty_processors([dep("x", "annotations")]).unwrap());
    assert!(!cache.has_empty_processors([dep("x", "dagger")]).unwrap());
    // Grouping is not applied: the extension-only dependency is empty on its own.
    assert!(cache.has_empty_processors([dep("other", "parcel")]).unwrap());
}

#[test]
fn test_failed_resolution_is_retried() {
    let (resolver, cache) = counting_cache();
    let dagger = dep("x", "dagger");
    let set = DependencySet::single(dagger.clone());

    resolver.inner().set_failing(&dagger, true);
    let err = cache.scopes_for([dagger.clone()]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RulegenError>(),
        Some(RulegenError::ResolutionFailure { coordinate, .. }) if coordinate == "x:dagger:1.0"
    ));
    assert!(cache.get(&set).is_none());

    resolver.inner().set_failing(&dagger, false);
    let scopes = cache.scopes_for([dagger]).unwrap();
    assert_eq!(scopes.len(), 1);
    assert_eq!(resolver.calls_for(&set), 2);
}

#[test]
fn test_unknown_configuration() {
    let project = Project::parse(
        r#"
[project]
name = "shop"

[[targets]]
name = "ui"
path = "libs/ui"
kind = "android_library"

[targets.configurations]
annotationProcessor = ["x:dagger:1.0"]
"#,
        "rulegen.toml",
    )
    .unwrap();
    let target = project.target("libs/ui").unwrap();
    let cache = ProcessorScopeCache::with_matcher(Arc::new(stub()), MarkerCoordinate::default());

    let err = cache.scopes_for_configuration(&project, target, "kapt").unwrap_err();
    assert_eq!(
        err.to_string(),
        "No valid configuration found for 'kapt' in project 'shop:libs/ui'"
    );

    let scopes = cache.scopes_for_configuration(&project, target, "annotationProcessor").unwrap();
    assert_eq!(scopes.len(), 1);
    let has_empty = cache
        .has_empty_processors_for_configuration(&project, target, "annotationProcessor")
        .unwrap();
    assert!(!has_empty);
}

#[test]
fn test_published_scopes_sorted() {
    let (_, cache) = counting_cache();
    cache.scopes_for([dep("y", "butterknife"), dep("x", "dagger")]).unwrap();

    let keys: Vec<Dependency> =
        cache.scopes().iter().map(|s| s.dependencies().first().clone()).collect();
    assert_eq!(keys, vec![dep("x", "dagger"), dep("y", "butterknife")]);
    assert_eq!(cache.len(), 2);
}
