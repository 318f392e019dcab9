use crate::error::{TemplateError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use word_templates_common::DEFAULT_CATEGORY;

/// 変換ツールのパスを上書きする環境変数
pub const CONVERTER_ENV: &str = "WORD_TEMPLATES_SOFFICE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LibreOffice (soffice) の実行ファイル
    pub converter_path: Option<String>,
    pub conversion_timeout_seconds: u64,
    /// `--project` 省略時のプロジェクトファイル
    pub project_file: String,
    /// 自動インポートでキーワードが一致しなかった場合のカテゴリ
    pub default_category: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            converter_path: None,
            conversion_timeout_seconds: 60,
            project_file: "templates_project.json".into(),
            default_category: DEFAULT_CATEGORY.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TemplateError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("word-templates").join("config.json"))
    }

    /// 変換ツールのパス（環境変数を優先）
    pub fn converter_path(&self) -> Option<String> {
        if let Ok(path) = std::env::var(CONVERTER_ENV) {
            if !path.trim().is_empty() {
                return Some(path);
            }
        }
        self.converter_path.clone()
    }

    pub fn set_converter_path(&mut self, path: String) -> Result<()> {
        self.converter_path = Some(path);
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(TemplateError::Config("タイムアウトは1秒以上を指定してください".into()));
        }
        self.conversion_timeout_seconds = seconds;
        self.save()
    }

    pub fn set_project_file(&mut self, path: String) -> Result<()> {
        self.project_file = path;
        self.save()
    }

    pub fn set_default_category(&mut self, category: String) -> Result<()> {
        if category.trim().is_empty() {
            return Err(TemplateError::Config("カテゴリ名が空です".into()));
        }
        self.default_category = category;
        self.save()
    }
}
