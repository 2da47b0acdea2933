use scopie_kernel::config::{FileFormat, load_manifest, load_manifest_str};
use scopie_kernel::prelude::*;
use serial_test::serial;
use std::io::Write;
use tempfile::Builder;

const TOML: &str = r#"
[[scopes]]
names = ["featured"]
type = "boolean"

[[scopes]]
names = ["by_degree"]
default = "asc"
except = ["export", ""]
"#;

#[test]
#[serial]
fn loads_manifest_from_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(TOML.as_bytes()).unwrap();

    let registry = load_manifest(file.path()).unwrap().into_registry();
    assert_eq!(registry.len(), 2);

    let by_degree = registry.get("by_degree").unwrap();
    assert_eq!(by_degree.except().iter().collect::<Vec<_>>(), ["export"]);

    let scopes = scopie_kernel::sequencer::current_scopes(&registry, &Params::new(), Some("export")).unwrap();
    assert!(scopes.is_empty());
}

#[test]
#[serial]
fn yaml_manifest_with_typed_default() {
    let yaml = "scopes:\n  - names: [per_page]\n    type: integer\n    default: 20\n    in: paging\n";
    let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let registry = load_manifest(file.path()).unwrap().into_registry();
    let per_page = registry.get("per_page").unwrap();
    assert_eq!(per_page.namespace(), Some("paging"));

    let scopes = scopie_kernel::sequencer::current_scopes(&registry, &Params::new(), None).unwrap();
    assert_eq!(scopes.get("per_page"), Some(&Param::Int(20)));

    let params = Params::new().with("paging", Params::new().with("per_page", "50"));
    let scopes = scopie_kernel::sequencer::current_scopes(&registry, &params, None).unwrap();
    assert_eq!(scopes.get("per_page"), Some(&Param::Int(50)));
}

#[test]
fn manifest_extends_an_existing_registry() {
    let mut registry = ScopeRegistry::new();
    registry.declare(["by_degree"], ScopeOptions::default());
    registry.declare(["page"], ScopeOptions::default());

    load_manifest_str(TOML, FileFormat::Toml).unwrap().declare_on(&mut registry);

    let names: Vec<_> = registry.iter().map(ScopeDefinition::name).collect();
    assert_eq!(names, ["by_degree", "page", "featured"]);
    assert!(registry.get("by_degree").unwrap().has_default());
}

#[test]
fn malformed_manifest_reports_context() {
    let err = load_manifest_str("[[scopes]]\nnames = 1\n", FileFormat::Toml).unwrap_err();
    assert!(matches!(err, ScopeError::Config { .. }));
    assert!(err.to_string().starts_with("Scope manifest error (Failed to deserialize manifest)"));
}
