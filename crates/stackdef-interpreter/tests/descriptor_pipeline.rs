//! End-to-end tests over the bundled Log Search and Infra descriptors

use proptest::prelude::*;
use serde_json::json;
use stackdef_interpreter::validation::codes;
use stackdef_interpreter::{
    load_file, load_str, parse_descriptor, parse_str, read_descriptor, to_string,
    ComponentCategory, DependencyScope, DescriptorError, DescriptorFormat, ServiceModel,
    StackCatalog,
};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;

fn descriptors_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../descriptors")
}

fn logsearch_path() -> PathBuf {
    descriptors_dir().join("LOGSEARCH/service.yaml")
}

fn logsearch() -> ServiceModel {
    load_file(logsearch_path()).expect("bundled Log Search descriptor loads")
}

fn logsearch_yaml() -> String {
    std::fs::read_to_string(logsearch_path()).unwrap()
}

fn package_names(packages: Vec<&stackdef_interpreter::Package>) -> Vec<&str> {
    packages.into_iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_logsearch_loads_cleanly() {
    let model = logsearch();
    assert_eq!(model.name(), "LOGSEARCH");
    assert_eq!(model.descriptor().version, "0.5.0");
    assert!(model.warnings().is_empty(), "{:?}", model.warnings());

    let masters: Vec<_> = model
        .components_by_category(ComponentCategory::Master)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(masters, vec!["LOGSEARCH_SERVER"]);

    let server = model.component("LOGSEARCH_SERVER").unwrap();
    let script = server.command_script.as_ref().unwrap();
    assert_eq!(script.timeout, Duration::from_secs(1800));
    assert!(server.cardinality.allows(0, 3));
    assert!(!server.cardinality.allows(2, 3));

    let feeder = model.component("LOGSEARCH_LOGFEEDER").unwrap();
    assert_eq!(feeder.cardinality.min_instances(5), 5);
}

#[test]
fn test_server_config_types_are_its_own() {
    let model = logsearch();
    let config_types = model.config_types("LOGSEARCH_SERVER").unwrap();
    assert_eq!(
        config_types,
        vec![
            "infra-solr-env",
            "logsearch-properties",
            "logsearch-env",
            "logsearch-common-env",
            "logsearch-log4j",
            "logsearch-service_logs-solrconfig",
            "logsearch-audit_logs-solrconfig",
            "logsearch-common-properties",
        ]
    );
    assert!(!config_types.contains(&"logfeeder-env"));

    let merged = model.merged_config_types("LOGSEARCH_SERVER").unwrap();
    assert_eq!(merged.len(), model.service_config_types().len());
    assert_eq!(&merged[..8], &config_types[..]);
}

#[test]
fn test_redhat_packages() {
    let model = logsearch();
    let packages = model.packages_for_os("redhat7").unwrap();
    let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ambari-logsearch-logfeeder",
            "ambari-logsearch-portal",
            "ambari-infra-solr-client",
        ]
    );
    assert_eq!(
        packages[1].condition.as_deref(),
        Some("should_install_logsearch_portal")
    );
    assert!(packages[0].skip_upgrade);

    // The debian block is a different block, not merged in
    let debian = model.os_specific_for("ubuntu16").unwrap();
    let redhat = model.os_specific_for("redhat7").unwrap();
    assert!(!std::ptr::eq(debian, redhat));
    assert!(model.packages_for_os("redhat8").is_none());
    assert!(model.packages_for_os("RedHat7").is_none());
}

#[test]
fn test_installable_packages_follow_conditions() {
    let model = logsearch();
    let mut conditions = BTreeMap::new();
    conditions.insert("should_install_infra_solr_client".to_string(), true);

    assert_eq!(
        package_names(model.installable_packages("suse12", &conditions)),
        vec!["ambari-logsearch-logfeeder", "ambari-infra-solr-client"]
    );
    assert_eq!(
        package_names(model.upgradable_packages("suse12")),
        vec!["ambari-infra-solr-client"]
    );
    assert_eq!(
        model.condition_names().into_iter().collect::<Vec<_>>(),
        vec![
            "should_install_infra_solr_client",
            "should_install_logsearch_portal"
        ]
    );
}

#[test]
fn test_dependency_and_log_queries() {
    let model = logsearch();
    let deps = model.auto_deploy_dependencies("LOGSEARCH_SERVER").unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].name.to_string(), "AMBARI_INFRA/INFRA_SOLR_CLIENT");
    assert_eq!(deps[0].scope, DependencyScope::Host);

    assert_eq!(
        model.primary_log("LOGSEARCH_SERVER").unwrap().unwrap().log_id,
        "logsearch_app"
    );
    assert!(model.dependencies_of("LOGSEARCH_LOGFEEDER").unwrap().is_empty());
    assert!(matches!(
        model.primary_log("LOGSEARCH_PORTAL"),
        Err(DescriptorError::UnknownComponent { .. })
    ));

    assert_eq!(model.default_quick_links().unwrap().file_name, "quicklinks.json");
    assert_eq!(model.default_theme().unwrap().file_name, "theme.json");
}

#[test]
fn test_round_trip_across_formats() {
    let original = read_descriptor(logsearch_path()).unwrap();

    for format in DescriptorFormat::ALL {
        let text = to_string(&original, format).unwrap();
        let reparsed = parse_str(&text, format)
            .unwrap_or_else(|e| panic!("{} round trip failed: {}\n{}", format, e, text));
        assert_eq!(reparsed, original, "{} round trip changed the descriptor", format);
    }
}

#[test]
fn test_second_primary_log_fails_validation() {
    let yaml = logsearch_yaml().replacen(
        "      - logId: logsearch_perf\n",
        "      - logId: logsearch_perf\n        primary: true\n",
        1,
    );
    let err = load_str(&yaml, DescriptorFormat::Yaml).unwrap_err();
    match err {
        DescriptorError::Validation { service, report } => {
            assert_eq!(service, "LOGSEARCH");
            assert!(report.has(codes::MULTIPLE_PRIMARY_LOGS));
            let violation = report.errors().next().unwrap();
            assert_eq!(violation.path, "components[0].logs");
        }
        other => panic!("expected a validation failure, got {}", other),
    }
}

#[test]
fn test_bad_cardinality_is_malformed() {
    let yaml = logsearch_yaml().replacen("cardinality: 0-1", "cardinality: maybe", 1);
    let err = load_str(&yaml, DescriptorFormat::Yaml).unwrap_err();
    match err {
        DescriptorError::MalformedDescriptor { path, .. } => {
            assert_eq!(path, "components[0].cardinality")
        }
        other => panic!("expected MalformedDescriptor, got {}", other),
    }
}

#[test]
fn test_file_errors_name_the_file() {
    let err = load_file(descriptors_dir().join("MISSING/service.yaml")).unwrap_err();
    assert!(matches!(err, DescriptorError::Io { .. }));

    let err = load_file(descriptors_dir().join("LOGSEARCH/service.xml")).unwrap_err();
    assert!(matches!(err, DescriptorError::UnsupportedFormat(_)));
}

#[test]
fn test_bundled_catalog_resolves() {
    let catalog = StackCatalog::load(descriptors_dir()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.service("AMBARI_INFRA").is_some());

    let report = catalog.validate_cross_references();
    assert!(report.is_valid(), "{}", report);
}

fn component(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "displayName": name,
        "category": "SLAVE",
        "cardinality": "ALL",
        "logs": [ { "logId": "main", "primary": true } ]
    })
}

proptest! {
    #[test]
    fn parsed_component_names_are_unique(
        names in prop::collection::vec(prop::sample::select(vec!["A", "B", "C", "D", "E"]), 0..6)
    ) {
        let tree = json!({
            "name": "SVC",
            "displayName": "Service",
            "version": "1.0.0",
            "components": names.iter().map(|n| component(n)).collect::<Vec<_>>(),
        });
        let distinct: HashSet<&str> = names.iter().copied().collect();

        match parse_descriptor(&tree) {
            Ok(descriptor) => {
                let parsed: HashSet<&str> =
                    descriptor.components.iter().map(|c| c.name.as_str()).collect();
                prop_assert_eq!(parsed.len(), descriptor.components.len());
                prop_assert_eq!(distinct.len(), names.len());
            }
            Err(err) => {
                prop_assert!(err.is_malformed());
                prop_assert!(distinct.len() < names.len());
            }
        }
    }
}
