use anyhow::Result;
use jsonschema::Validator;
use once_cell::sync::Lazy;
use promptframe_io::catalog_json::CatalogJsonError;
use promptframe_io::prelude::*;
use promptframe_io::registry::CatalogError;
use serde_json::Value;

static CATALOG_SCHEMA: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let schema_json: Value = serde_json::from_str(include_str!(
        "../../../schemas/catalog.v1.schema.json"
    ))
    .map_err(|e| format!("invalid catalog schema JSON: {e}"))?;

    Validator::new(&schema_json).map_err(|e| format!("compile catalog schema: {e}"))
});

fn catalog_schema() -> &'static Validator {
    CATALOG_SCHEMA.as_ref().unwrap()
}

fn assert_valid(schema: &Validator, instance: &Value) {
    let mut errors = schema.iter_errors(instance).peekable();
    if errors.peek().is_some() {
        let msgs: Vec<String> = errors.map(|e| e.to_string()).collect();
        panic!("schema validation failed:\n{}", msgs.join("\n"));
    }
}

#[test]
fn builtin_catalog_export_conforms_to_schema() -> Result<()> {
    let json = catalog_to_json_string(&Registry::builtin())?;
    let value: Value = serde_json::from_str(&json)?;

    assert_eq!(value["version"], promptframe_io::version::CATALOG_V);
    assert_valid(catalog_schema(), &value);
    Ok(())
}

#[test]
fn fixture_catalog_conforms_and_loads() -> Result<()> {
    let raw = include_str!("../../../fixtures/catalog.json");
    assert_valid(catalog_schema(), &serde_json::from_str(raw)?);

    let registry = parse_catalog_json_str(raw)?;
    let review = registry
        .framework(&FrameworkId::new("review"))
        .expect("review framework");
    assert_eq!(review.sections.len(), 4);
    assert_eq!(
        registry.inject_section_key(&InjectTarget::new(InjectTarget::ROLE)),
        Some(&SectionKey::new("role"))
    );
    Ok(())
}

#[test]
fn schema_rejects_label_with_colon() {
    let bad = serde_json::json!({
        "version": 1,
        "frameworks": [{
            "id": "x",
            "label": "X",
            "sections": [{ "section_key": "k", "label": "NOTE: A" }]
        }]
    });
    assert!(!catalog_schema().is_valid(&bad));

    let err = parse_catalog_json_str(&bad.to_string()).unwrap_err();
    assert!(matches!(
        err,
        CatalogJsonError::Invalid(CatalogError::LabelContainsColon { .. })
    ));
}

#[test]
fn unsupported_version_is_reported() {
    let err = parse_catalog_json_str(r#"{"version":9,"frameworks":[]}"#).unwrap_err();
    assert_eq!(err.to_string(), "Invalid catalog: unsupported catalog version 9");
}
