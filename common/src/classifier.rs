//! 表のカテゴリ推定
//!
//! 先頭行の先頭セルに含まれるキーワードからカテゴリを決める。
//! ルールは宣言順に評価し、最初に一致したものを採用する
//! （複数のキーワードが同じ見出しに含まれ得るため順序が優先度になる）。

use crate::error::{Error, Result};
use crate::types::RawTable;
use serde::{Deserialize, Serialize};

/// 一致しなかった場合の既定カテゴリ
pub const DEFAULT_CATEGORY: &str = "الدعوى";

/// 組み込みのキーワード → カテゴリ対応（宣言順が優先順）
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("الدعوى", "الدعوى"),
    ("صندوق الدعوى", "الدعوى"),
    ("الإجابة", "الإجابة"),
    ("صندوق الإجابة", "الإجابة"),
    ("المرافعة", "المرافعة"),
    ("صندوق المرافعة", "المرافعة"),
    ("الأسباب", "الأسباب"),
    ("صندوق الأسباب", "الأسباب"),
    ("الحكم", "الحكم"),
    ("صندوق الحكم", "الحكم"),
    ("الشهادة", "الشهادة"),
    ("الصلح", "الصلح"),
    ("اليمين", "اليمين"),
    ("النكول", "النكول"),
    ("الكفالة", "الكفالة"),
    ("الالتماس", "الالتماس"),
    ("الشطب", "الشطب"),
    ("الغياب", "الغياب"),
    ("الاختصاص", "الاختصاص"),
    ("التمويل", "التمويل"),
    ("العقارات", "العقارات"),
    ("المشاكل", "المشاكل_التقنية"),
];

/// キーワードルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub category: String,
}

/// カテゴリ推定器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classifier {
    #[serde(rename = "default")]
    default_category: String,
    rules: Vec<KeywordRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            rules: CATEGORY_KEYWORDS
                .iter()
                .map(|(keyword, category)| KeywordRule {
                    keyword: keyword.to_string(),
                    category: category.to_string(),
                })
                .collect(),
        }
    }
}

impl Classifier {
    pub fn new(rules: Vec<KeywordRule>, default_category: impl Into<String>) -> Self {
        Self {
            default_category: default_category.into(),
            rules,
        }
    }

    /// JSON文字列から読み込み
    ///
    /// ```
    /// use word_templates_common::Classifier;
    ///
    /// let json = r#"{"default": "عام", "rules": [{"keyword": "حكم", "category": "الحكم"}]}"#;
    /// let classifier = Classifier::from_json(json).unwrap();
    /// assert_eq!(classifier.classify_text("صندوق حكم"), "الحكم");
    /// assert_eq!(classifier.classify_text("أخرى"), "عام");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let classifier: Self = serde_json::from_str(json)?;
        classifier.validate()?;
        Ok(classifier)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.default_category.trim().is_empty() {
            return Err(Error::InvalidMapping("default category is empty".into()));
        }
        if let Some(rule) = self.rules.iter().find(|r| r.keyword.is_empty()) {
            return Err(Error::InvalidMapping(format!(
                "empty keyword for category '{}'",
                rule.category
            )));
        }
        Ok(())
    }

    /// 既定カテゴリを差し替える
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// テキストからカテゴリを推定
    pub fn classify_text<'a>(&'a self, text: &str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| text.contains(rule.keyword.as_str()))
            .map(|rule| rule.category.as_str())
            .unwrap_or(&self.default_category)
    }

    /// 表の先頭セルからカテゴリを推定（先頭セルが無ければ空文字として扱う）
    pub fn classify<'a>(&'a self, table: &RawTable) -> &'a str {
        self.classify_text(table.first_cell().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_keyword() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_text("الشهادة"), "الشهادة");
    }

    #[test]
    fn test_classify_box_heading() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_text("صندوق الإجابة"), "الإجابة");
    }

    #[test]
    fn test_classify_alias_to_other_category() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_text("المشاكل"), "المشاكل_التقنية");
    }

    #[test]
    fn test_classify_earliest_rule_wins() {
        let classifier = Classifier::default();
        // "الحكم" と "الدعوى" の両方を含むが、先に宣言された الدعوى が優先
        assert_eq!(classifier.classify_text("الحكم في الدعوى"), "الدعوى");
        // "الصلح" と "اليمين" では الصلح が先
        assert_eq!(classifier.classify_text("اليمين بعد الصلح"), "الصلح");
    }

    #[test]
    fn test_classify_custom_order_is_respected() {
        let classifier = Classifier::new(
            vec![
                KeywordRule { keyword: "b".into(), category: "B".into() },
                KeywordRule { keyword: "a".into(), category: "A".into() },
            ],
            "Z",
        );
        assert_eq!(classifier.classify_text("a b"), "B");
        assert_eq!(classifier.classify_text("c"), "Z");
    }

    #[test]
    fn test_classify_fallback_to_default() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_text("جدول عام"), DEFAULT_CATEGORY);
        assert_eq!(classifier.classify_text(""), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_classify_table_uses_first_cell_of_first_row() {
        let classifier = Classifier::default();
        let table = RawTable::from(vec![
            vec!["صندوق الأسباب", "الحكم"],
            vec!["1", "kw", "الحكم في القضية"],
        ]);
        assert_eq!(classifier.classify(&table), "الأسباب");

        let headless = RawTable::new(vec![vec![], vec!["الحكم".to_string()]]);
        assert_eq!(classifier.classify(&headless), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_with_default_category() {
        let classifier = Classifier::default().with_default_category("الصلح");
        assert_eq!(classifier.classify_text("لا شيء"), "الصلح");
    }

    #[test]
    fn test_from_json_rejects_empty_keyword() {
        let json = r#"{"default": "A", "rules": [{"keyword": "", "category": "B"}]}"#;
        let err = Classifier::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(_)));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(Classifier::from_json("[]"), Err(Error::Json(_))));
    }
}
