//! templatesData の生成
//!
//! - JavaScript: `const templatesData = {...};`
//! - JSON: オブジェクトのみ
//!
//! 空のカテゴリは出力しない。非ASCII文字はエスケープせずそのまま出力する。

use crate::catalog::Catalog;
use crate::error::Result;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `const templatesData = ...;`（HTMLから読み込む用）
    #[default]
    JavaScript,
    /// 生のJSON
    Json,
}

impl OutputFormat {
    /// ファイル拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::JavaScript => "js",
            OutputFormat::Json => "json",
        }
    }

    /// 既定の出力ファイル名
    pub fn default_file_name(&self) -> String {
        format!("templatesData.{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "js" | "javascript" => Ok(OutputFormat::JavaScript),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use js or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::JavaScript => write!(f, "js"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// 空でないカテゴリだけを出力するビュー
struct NonEmptyCategories<'a>(&'a Catalog);

impl Serialize for NonEmptyCategories<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, templates) in self.0.iter().filter(|(_, t)| !t.is_empty()) {
            map.serialize_entry(name, templates)?;
        }
        map.end()
    }
}

fn encode(catalog: &Catalog, minify: bool) -> Result<String> {
    let data = NonEmptyCategories(catalog);
    if minify {
        return Ok(serde_json::to_string(&data)?);
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    // serde_json は常に有効なUTF-8を出力する
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// カタログを指定形式のテキストに変換
///
/// ```
/// use word_templates_common::{serialize, Catalog, OutputFormat};
///
/// let catalog = Catalog::with_default_categories();
/// let code = serialize(&catalog, OutputFormat::JavaScript, false).unwrap();
/// assert_eq!(code, "const templatesData = {};");
/// ```
pub fn serialize(catalog: &Catalog, format: OutputFormat, minify: bool) -> Result<String> {
    let json = encode(catalog, minify)?;
    Ok(match format {
        OutputFormat::JavaScript => format!("const templatesData = {};", json),
        OutputFormat::Json => json,
    })
}
