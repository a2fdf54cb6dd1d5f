//! Rule composition determinism and processor rule stability.

use std::sync::Arc;

use rulegen::annotation::ProcessorScopeCache;
use rulegen::composer::{ProcessorRuleComposer, ResourceRuleComposer};
use rulegen::config::GeneratorConfig;
use rulegen::models::Project;
use rulegen::resolver::GraphScopeResolver;
use rulegen::test_utils::fixtures::SAMPLE_MANIFEST;
use rulegen::writer::BuckFileWriter;

fn project() -> Project {
    Project::parse(SAMPLE_MANIFEST, "rulegen.toml").unwrap()
}

#[test]
fn test_resource_rules_identical_across_runs() {
    let config = GeneratorConfig::default();
    let first = project();
    let second = project();

    for target in first.sorted_targets().into_iter().filter(|t| t.kind.is_android()) {
        let other = second.target(&target.path).unwrap();
        let a = ResourceRuleComposer::compose_default(&first, target, &config).unwrap();
        let b = ResourceRuleComposer::compose_default(&second, other, &config).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_processor_file_identical_across_runs() {
    let render = || {
        let project = project();
        let cache = ProcessorScopeCache::new(Arc::new(GraphScopeResolver::new(&project).unwrap()));
        // Visit targets in reverse to make sure publication order is irrelevant.
        for target in project.sorted_targets().into_iter().rev() {
            if target.configurations.contains_key("annotationProcessor") {
                cache.scopes_for_configuration(&project, target, "annotationProcessor").unwrap();
            }
        }
        let rules = ProcessorRuleComposer::compose(&cache.scopes());
        BuckFileWriter::new().render(&rules).unwrap()
    };

    let first = render();
    assert_eq!(first, render());
    assert!(first.contains("java_annotation_processor("));
    assert!(first.contains("    isolate_class_loader = True,"));
}

#[test]
fn test_resource_rule_references_siblings() {
    let project = project();
    let app = project.target("app").unwrap();
    let rule = ResourceRuleComposer::compose_default(&project, app, &GeneratorConfig::default())
        .unwrap();

    // libs/model is not Android, libs/annotations is provided
    assert_eq!(rule.deps(), ["//.rulegen/ext:material-1.9.0.aar", "//libs/ui:res_ui"]);
}
