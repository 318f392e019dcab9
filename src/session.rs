//! プロジェクトファイルの読み書き
//!
//! 1回のコマンド実行 = 1セッション。カタログはセッションが単独で所有し、
//! 読み込み時は丸ごと置き換える。

use crate::error::{Result, TemplateError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use word_templates_common::{Catalog, ProjectFile};

#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    pub catalog: Catalog,
}

impl Session {
    /// 新しいプロジェクト（既定カテゴリのみ）
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            catalog: Catalog::with_default_categories(),
        }
    }

    /// 既存のプロジェクトを開く
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TemplateError::ProjectNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let project = ProjectFile::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            categories = project.templates.len(),
            "プロジェクトを読み込み"
        );
        Ok(Self {
            path: path.to_path_buf(),
            catalog: project.templates,
        })
    }

    /// プロジェクトを開く（無ければ新規作成）
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::open(path)
        } else {
            tracing::info!(path = %path.display(), "新規プロジェクトを作成");
            Ok(Self::new(path))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// プロジェクトを保存（2スペースインデント、BOMなし）
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let project = ProjectFile::new(self.catalog.clone());
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &project)?;
        writer.flush()?;
        Ok(())
    }
}
