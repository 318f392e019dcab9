use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("プロジェクトファイルが見つかりません: {0}（`word-templates init` で作成してください）")]
    ProjectNotFound(String),

    #[error("未対応のファイル形式です: {0}（.docx または .doc を指定してください）")]
    UnsupportedFormat(String),

    #[error("文書の読み込みに失敗: {0}")]
    Parse(String),

    #[error("文書の変換に失敗: {0}")]
    Conversion(String),

    #[error("表 {position} は存在しません（抽出された表: {count}件）")]
    TableNotFound { position: usize, count: usize },

    #[error("「{category}」にテンプレート {position} はありません（{count}件）")]
    TemplateNotFound {
        category: String,
        position: usize,
        count: usize,
    },

    #[error(transparent)]
    Catalog(#[from] word_templates_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
