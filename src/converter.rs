//! 旧形式 .doc → .docx 変換
//!
//! LibreOffice (soffice) をヘッドレスで呼び出す。変換結果は一時ディレクトリに置き、
//! [`ConvertedDocument`] の破棄と同時に削除される。
//! 指定時間内に終わらない場合はプロセスを終了させて変換失敗とする。

use crate::config::Config;
use crate::error::{Result, TemplateError};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Command;

/// 既知のインストール先
const KNOWN_INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files\LibreOffice\program\soffice.exe",
    r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
    "/usr/bin/libreoffice",
    "/usr/bin/soffice",
    "/Applications/LibreOffice.app/Contents/MacOS/soffice",
];

/// PATH から探すコマンド名
const PATH_COMMANDS: &[&str] = &["libreoffice", "soffice"];

/// 変換設定
#[derive(Debug, Clone)]
pub struct ConverterSettings {
    /// 明示指定された変換ツール（未指定なら自動検出）
    pub program: Option<String>,
    pub timeout: Duration,
}

impl ConverterSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.converter_path(),
            timeout: Duration::from_secs(config.conversion_timeout_seconds),
        }
    }
}

/// 変換済み文書（一時ディレクトリごと保持）
#[derive(Debug)]
pub struct ConvertedDocument {
    path: PathBuf,
    _dir: TempDir,
}

impl ConvertedDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 明示指定された変換ツールを解決（パスまたはPATH上のコマンド名）
fn resolve_configured(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    which::which(program).ok()
}

/// 変換ツールを探す
///
/// 明示指定 → 既知のインストール先 → PATH 上の soffice/libreoffice の順。
pub fn find_converter(configured: Option<&str>) -> Option<PathBuf> {
    if let Some(program) = configured {
        if let Some(path) = resolve_configured(program) {
            return Some(path);
        }
        tracing::warn!(program, "指定された変換ツールが見つかりません。自動検出します");
    }

    KNOWN_INSTALL_PATHS
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .or_else(|| PATH_COMMANDS.iter().find_map(|cmd| which::which(cmd).ok()))
}

/// .doc を .docx に変換
pub async fn convert_to_docx(
    source: &Path,
    settings: &ConverterSettings,
) -> Result<ConvertedDocument> {
    if !source.exists() {
        return Err(TemplateError::FileNotFound(source.display().to_string()));
    }

    let program = find_converter(settings.program.as_deref()).ok_or_else(|| {
        TemplateError::Conversion(
            "LibreOffice (soffice) が見つかりません。`word-templates config --set-converter <path>` で指定するか、Wordで .docx に保存してから読み込んでください".into(),
        )
    })?;

    let out_dir = tempfile::Builder::new().prefix("word-templates-").tempdir()?;
    tracing::debug!(
        program = %program.display(),
        source = %source.display(),
        outdir = %out_dir.path().display(),
        "変換ツールを実行"
    );

    let mut command = Command::new(&program);
    command
        .arg("--headless")
        .arg("--convert-to")
        .arg("docx")
        .arg("--outdir")
        .arg(out_dir.path())
        .arg(source)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(settings.timeout, command.output()).await {
        Ok(result) => result.map_err(|e| {
            TemplateError::Conversion(format!("{} を起動できません: {}", program.display(), e))
        })?,
        Err(_) => {
            return Err(TemplateError::Conversion(format!(
                "{}秒以内に変換が終わりませんでした",
                settings.timeout.as_secs_f32()
            )))
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TemplateError::Conversion(format!(
            "変換ツールが失敗しました (code {:?}): {}",
            output.status.code(),
            stderr.trim()
        )));
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let converted = out_dir.path().join(format!("{}.docx", stem));
    if !converted.exists() {
        return Err(TemplateError::Conversion(format!(
            "変換後のファイルが見つかりません: {}",
            converted.display()
        )));
    }

    tracing::info!(converted = %converted.display(), "変換完了");
    Ok(ConvertedDocument {
        path: converted,
        _dir: out_dir,
    })
}
