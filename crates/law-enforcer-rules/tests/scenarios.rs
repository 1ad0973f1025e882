//! End-to-end checks of the built-in rules against snapshot fixtures.

use law_enforcer_core::{snapshot, Analyzer, AnnotationMatcher, ScanMode, Violation};
use law_enforcer_rules::default_registry;
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scenarios")
}

fn scan(name: &str) -> Vec<Violation> {
    let unit = snapshot::load_file(&fixture_dir().join(name)).expect("Failed to load fixture");
    AnnotationMatcher::new(default_registry())
        .scan_unit(&unit)
        .collect()
}

#[test]
fn settable_property_breaks_immutable() {
    let violations = scan("1_immutable_settable.unit.json");
    assert_eq!(violations.len(), 1);
    let v = &violations[0];
    assert_eq!(v.code, "LE002");
    assert_eq!(
        v.message,
        "Mutable fields and properties are not allowed in this class or struct"
    );
    assert_eq!((v.location.line, v.location.column), (1, 2));
}

#[test]
fn readonly_field_honors_immutable() {
    assert!(scan("2_immutable_readonly_field.unit.json").is_empty());
}

#[test]
fn string_parameter_breaks_no_primitive_types() {
    let violations = scan("3_no_primitive_string.unit.json");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "LE001");
    assert_eq!(
        violations[0].message,
        "Primitive types are not allowed in this method"
    );
    assert_eq!(violations[0].location.offset, 15);
}

#[test]
fn user_type_parameter_honors_no_primitive_types() {
    assert!(scan("4_no_primitive_widget.unit.json").is_empty());
}

#[test]
fn public_auto_property_class_is_poco() {
    assert!(scan("5_poco_public.unit.json").is_empty());
}

#[test]
fn internal_class_is_not_poco() {
    let violations = scan("6_poco_internal.unit.json");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "LE003");
    assert_eq!(
        violations[0].message,
        "Complex features are not allowed since this class or struct is designed to be serializable"
    );
}

#[test]
fn scanning_twice_yields_the_same_violations() {
    for name in ["1_immutable_settable.unit.json", "6_poco_internal.unit.json"] {
        assert_eq!(scan(name), scan(name));
    }
}

#[test]
fn parallel_scan_matches_sequential_scan() {
    let matcher = AnnotationMatcher::new(default_registry()).mode(ScanMode::Strict);
    for name in [
        "1_immutable_settable.unit.json",
        "3_no_primitive_string.unit.json",
        "5_poco_public.unit.json",
    ] {
        let unit = snapshot::load_file(&fixture_dir().join(name)).expect("Failed to load fixture");
        let sequential: Vec<_> = matcher.scan_unit(&unit).collect();
        let parallel = matcher.scan_parallel(&unit).expect("Strict scan failed");
        assert_eq!(sequential, parallel);
    }
}

#[test]
fn analyzer_reports_all_scenarios_sorted() {
    let result = Analyzer::builder(default_registry())
        .root(fixture_dir())
        .build()
        .expect("Failed to build analyzer")
        .analyze()
        .expect("Analysis failed");

    assert_eq!(result.units_scanned, 6);
    let found: Vec<_> = result
        .violations
        .iter()
        .map(|v| (v.location.file.to_string_lossy().into_owned(), v.code.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("src/M.cs".to_string(), "LE001"),
            ("src/P.cs".to_string(), "LE002"),
            ("src/S.cs".to_string(), "LE003"),
        ]
    );
}
