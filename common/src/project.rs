//! プロジェクトファイル形式
//!
//! ```json
//! { "version": "1.0", "templates": { "<カテゴリ>": [ {"num", "keyword", "content"} ] } }
//! ```
//!
//! 保存は常に2スペースインデント（出力時の minify 設定とは無関係）。
//! 空のカテゴリも保存する。

use crate::catalog::Catalog;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// 現在のプロジェクト形式バージョン
pub const PROJECT_VERSION: &str = "1.0";

/// プロジェクトファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub version: String,
    /// `templates` が無い場合は空のカタログ
    #[serde(default)]
    pub templates: Catalog,
}

impl ProjectFile {
    pub fn new(templates: Catalog) -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            templates,
        }
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let project: Self = serde_json::from_str(json)?;
        if project.version != PROJECT_VERSION {
            tracing::warn!(
                version = %project.version,
                expected = PROJECT_VERSION,
                "プロジェクトのバージョンが異なります"
            );
        }
        Ok(project)
    }

    /// 2スペースインデントのJSONに変換
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Template;

    #[test]
    fn test_to_json_uses_two_space_indent_and_keeps_empty_categories() {
        let mut catalog = Catalog::default();
        catalog.add_category("الصلح");
        catalog.add_category("اليمين");
        catalog
            .push_template("اليمين", Template::new("1", "k", "c"))
            .unwrap();

        let json = ProjectFile::new(catalog).to_json().unwrap();
        let expected = "{\n  \"version\": \"1.0\",\n  \"templates\": {\n    \"الصلح\": [],\n    \"اليمين\": [\n      {\n        \"num\": \"1\",\n        \"keyword\": \"k\",\n        \"content\": \"c\"\n      }\n    ]\n  }\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_round_trip() {
        let mut catalog = Catalog::with_default_categories();
        catalog.add_category("مخصص");
        catalog
            .push_template("مخصص", Template::new("1", "a", "أول نموذج"))
            .unwrap();
        catalog
            .push_template("الحكم", Template::new("", "", ""))
            .unwrap();
        catalog.remove_category("الشطب");

        let project = ProjectFile::new(catalog.clone());
        let loaded = ProjectFile::from_json(&project.to_json().unwrap()).unwrap();
        assert_eq!(loaded.templates, catalog);
        assert_eq!(loaded.version, PROJECT_VERSION);
    }

    #[test]
    fn test_missing_templates_yields_empty_catalog() {
        let project = ProjectFile::from_json(r#"{"version": "1.0"}"#).unwrap();
        assert!(project.templates.is_empty());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let json = r#"{"templates": {"الحكم": [{"num": "1"}, {}]}}"#;
        let project = ProjectFile::from_json(json).unwrap();
        let templates = project.templates.templates("الحكم").unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0], Template::new("1", "", ""));
        assert_eq!(templates[1], Template::default());
        assert_eq!(project.version, "");
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ProjectFile::from_json("{\"templates\": [").is_err());
    }
}
