pub mod docx;

use crate::error::{Result, TemplateError};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use word_templates_common::RawTable;

pub use docx::{extract_tables_from_reader, parse_document_xml};

/// 入力文書の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// そのまま読める .docx
    Docx,
    /// 変換が必要な旧形式 .doc
    LegacyDoc,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "docx" => Ok(DocumentKind::Docx),
            "doc" => Ok(DocumentKind::LegacyDoc),
            _ => Err(TemplateError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// DOCXファイルから表を抽出
pub fn extract_tables(path: &Path) -> Result<Vec<RawTable>> {
    if !path.exists() {
        return Err(TemplateError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let tables = extract_tables_from_reader(BufReader::new(file))?;
    tracing::info!(path = %path.display(), tables = tables.len(), "表を抽出");
    Ok(tables)
}

/// メモリ上のDOCXから表を抽出
pub fn extract_tables_from_bytes(bytes: &[u8]) -> Result<Vec<RawTable>> {
    extract_tables_from_reader(Cursor::new(bytes))
}

/// 表一覧用のラベル（先頭セルを50文字まで）
///
/// `position` は0始まり、表示は1始まり。
pub fn table_label(position: usize, table: &RawTable) -> String {
    let number = position + 1;
    let first_text = match table.rows.first() {
        Some(row) if !row.is_empty() => row[0].clone(),
        _ => format!("表 {}", number),
    };
    let preview = if first_text.chars().count() > 50 {
        format!("{}...", first_text.chars().take(50).collect::<String>())
    } else {
        first_text
    };
    format!("表 {}: {} ({}行)", number, preview, table.row_count())
}
