use crate::error::Result;
use std::path::{Path, PathBuf};
use word_templates_common::{serialize, Catalog, OutputFormat};

/// 出力先を決める（ディレクトリまたは拡張子なしなら既定ファイル名を付ける）
pub fn output_path_for_format(output: &Path, format: OutputFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format.default_file_name())
    } else {
        output.to_path_buf()
    }
}

/// templatesData をファイルに書き出し、書き込んだパスを返す
///
/// UTF-8（BOMなし）で出力する。
pub fn export_catalog(
    catalog: &Catalog,
    format: OutputFormat,
    minify: bool,
    output: &Path,
) -> Result<PathBuf> {
    let code = serialize(catalog, format, minify)?;
    let output_path = output_path_for_format(output, format);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&output_path, code)?;
    tracing::info!(path = %output_path.display(), %format, minify, "エクスポート");
    Ok(output_path)
}
