//! .doc → .docx 変換テスト
//!
//! LibreOffice の代わりにシェルスクリプトを変換ツールとして使う（Unixのみ）

mod common;

use std::time::Duration;
use tempfile::tempdir;
use word_templates::converter::{convert_to_docx, ConverterSettings};
use word_templates::error::TemplateError;

fn settings(program: &str, timeout: Duration) -> ConverterSettings {
    ConverterSettings {
        program: Some(program.to_string()),
        timeout,
    }
}

#[tokio::test]
async fn test_missing_source_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = convert_to_docx(
        &dir.path().join("missing.doc"),
        &settings("/bin/true", Duration::from_secs(5)),
    )
    .await;

    assert!(matches!(result, Err(TemplateError::FileNotFound(_))));
}

#[cfg(unix)]
mod fake_converter {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// 実行可能なシェルスクリプトを作成
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn script_settings(script: &Path, timeout_ms: u64) -> ConverterSettings {
        settings(&script.to_string_lossy(), Duration::from_millis(timeout_ms))
    }

    fn source_doc(dir: &Path) -> PathBuf {
        let source = dir.join("legacy.doc");
        std::fs::write(&source, b"legacy").unwrap();
        source
    }

    #[tokio::test]
    async fn test_successful_conversion() {
        let dir = tempdir().expect("Failed to create temp dir");
        let fixture = dir.path().join("fixture.docx");
        let body = common::table(&[&["الصلح"], &["1", "k", "long enough content"]]);
        common::write_docx(&fixture, &body);

        // 引数: --headless --convert-to docx --outdir <dir> <source>
        let script = write_script(
            dir.path(),
            "soffice",
            &format!("cp '{}' \"$5/legacy.docx\"", fixture.display()),
        );
        let source = source_doc(dir.path());

        let converted = convert_to_docx(&source, &script_settings(&script, 10_000))
            .await
            .expect("変換失敗");
        assert!(converted.path().ends_with("legacy.docx"));

        let tables = word_templates::extractor::extract_tables(converted.path()).unwrap();
        assert_eq!(tables[0].first_cell(), Some("الصلح"));

        // 破棄すると一時ディレクトリも消える
        let path = converted.path().to_path_buf();
        drop(converted);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_converter_failure_exit_code() {
        let dir = tempdir().expect("Failed to create temp dir");
        let script = write_script(dir.path(), "soffice", "echo 'broken' >&2\nexit 3");
        let source = source_doc(dir.path());

        let err = convert_to_docx(&source, &script_settings(&script, 10_000))
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::Conversion(msg) if msg.contains("broken")));
    }

    #[tokio::test]
    async fn test_converter_without_output() {
        let dir = tempdir().expect("Failed to create temp dir");
        let script = write_script(dir.path(), "soffice", "exit 0");
        let source = source_doc(dir.path());

        let err = convert_to_docx(&source, &script_settings(&script, 10_000))
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::Conversion(_)));
    }

    #[tokio::test]
    async fn test_converter_timeout() {
        let dir = tempdir().expect("Failed to create temp dir");
        let script = write_script(dir.path(), "soffice", "exec sleep 30");
        let source = source_doc(dir.path());

        let started = std::time::Instant::now();
        let err = convert_to_docx(&source, &script_settings(&script, 300))
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::Conversion(_)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
