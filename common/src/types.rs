//! テンプレートと表データの型定義
//!
//! - Template: カテゴリ内の1件のテンプレート（番号・キーワード・本文）
//! - RawTable: 文書から抽出した生の表（インポート判定までの一時データ）

use serde::{Deserialize, Deserializer, Serialize};

/// 一覧表示で見せる本文の文字数
const SUMMARY_CHARS: usize = 40;

/// テンプレート
///
/// カテゴリ名は保持しない（カタログのキーで暗黙的に決まる）。
/// 位置（カテゴリ内のインデックス）が識別子になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    #[serde(deserialize_with = "lenient_string")]
    pub num: String,
    #[serde(deserialize_with = "lenient_string")]
    pub keyword: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
}

impl Template {
    pub fn new(
        num: impl Into<String>,
        keyword: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            num: num.into(),
            keyword: keyword.into(),
            content: content.into(),
        }
    }

    /// 一覧表示用の短いラベル（本文は先頭40文字まで）
    pub fn summary(&self) -> String {
        let preview: String = self.content.chars().take(SUMMARY_CHARS).collect();
        format!("[{}] {}: {}...", self.num, self.keyword, preview)
    }
}

/// 文字列・数値・null をすべて文字列として受け取る
///
/// 手作業で編集されたプロジェクトファイルで `"num": 5` のような値を許容する。
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
        Null(()),
    }

    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Text(s) => s,
        Lenient::Integer(n) => n.to_string(),
        Lenient::Float(n) => n.to_string(),
        Lenient::Bool(b) => b.to_string(),
        Lenient::Null(()) => String::new(),
    })
}

/// 文書から抽出した表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 先頭行の先頭セル（表の見出し）
    pub fn first_cell(&self) -> Option<&str> {
        self.rows
            .first()
            .and_then(|row| row.first())
            .map(String::as_str)
    }
}

impl From<Vec<Vec<&str>>> for RawTable {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
        }
    }
}
