//! templatesData 出力テスト

use std::path::Path;
use tempfile::tempdir;
use word_templates::export::{export_catalog, output_path_for_format};
use word_templates_common::{serialize, Catalog, OutputFormat, Template};

fn create_test_catalog() -> Catalog {
    let mut catalog = Catalog::with_default_categories();
    catalog
        .push_template("الحكم", Template::new("1", "حكم", "حكمت المحكمة بما يلي"))
        .unwrap();
    catalog
        .push_template("الشهادة", Template::new("1", "شاهد", "شهد الشاهد بما نصه"))
        .unwrap();
    catalog
}

#[test]
fn test_export_js_to_directory_uses_default_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let catalog = create_test_catalog();

    let written = export_catalog(&catalog, OutputFormat::JavaScript, false, dir.path()).unwrap();
    assert_eq!(written, dir.path().join("templatesData.js"));

    let text = std::fs::read_to_string(&written).unwrap();
    assert!(text.starts_with("const templatesData = {\n    \"الحكم\": ["));
    assert_eq!(text, serialize(&catalog, OutputFormat::JavaScript, false).unwrap());
}

#[test]
fn test_export_json_minified_to_explicit_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out").join("data.json");
    let catalog = create_test_catalog();

    let written = export_catalog(&catalog, OutputFormat::Json, true, &output).unwrap();
    assert_eq!(written, output);

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(!text.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    // 空のカテゴリは出力しない
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn test_export_without_bom() {
    let dir = tempdir().expect("Failed to create temp dir");
    let written =
        export_catalog(&create_test_catalog(), OutputFormat::Json, false, dir.path()).unwrap();

    let bytes = std::fs::read(written).unwrap();
    assert_eq!(bytes.first(), Some(&b'{'));
}

#[test]
fn test_export_empty_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let written = export_catalog(
        &Catalog::with_default_categories(),
        OutputFormat::JavaScript,
        true,
        dir.path(),
    )
    .unwrap();

    let text = std::fs::read_to_string(written).unwrap();
    assert!(text.starts_with("const templatesData = {}"));
}

#[test]
fn test_output_path_for_format() {
    assert_eq!(
        output_path_for_format(Path::new("build"), OutputFormat::Json),
        Path::new("build").join("templatesData.json")
    );
    assert_eq!(
        output_path_for_format(Path::new("build/custom.js"), OutputFormat::JavaScript),
        Path::new("build/custom.js")
    );
}
