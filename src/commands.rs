//! サブコマンドの実装
//!
//! 各コマンドはプロジェクトファイルを読み込み、カタログを操作して保存する。
//! 確認ダイアログ・進捗表示・標準出力への表示はここで行い、
//! コアの処理は word_templates_common に任せる。

use crate::cli::{CategoryAction, TemplateAction};
use crate::config::Config;
use crate::converter::{self, ConverterSettings};
use crate::error::{Result, TemplateError};
use crate::export;
use crate::extractor::{self, DocumentKind};
use crate::session::Session;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use word_templates_common::{
    import_all, import_table, serialize, Catalog, Classifier, Error as CatalogError,
    OutputFormat, RawTable, Template,
};

/// 1始まりの位置を0始まりのインデックスに変換
fn index_of(position: usize) -> usize {
    position.saturating_sub(1)
}

/// カテゴリ内の1始まりの位置を検証し、0始まりのインデックスを返す
fn template_index(catalog: &Catalog, category: &str, position: usize) -> Result<usize> {
    let count = catalog
        .templates(category)
        .map(<[Template]>::len)
        .ok_or_else(|| CatalogError::CategoryNotFound(category.to_string()))?;
    if position == 0 || position > count {
        return Err(TemplateError::TemplateNotFound {
            category: category.to_string(),
            position,
            count,
        });
    }
    Ok(index_of(position))
}

fn confirm(prompt: String) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| TemplateError::Prompt(e.to_string()))
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 文書を読み込み表を抽出（.doc は先に変換）
pub async fn load_tables(document: &Path, config: &Config) -> Result<Vec<RawTable>> {
    match DocumentKind::from_path(document)? {
        DocumentKind::Docx => extractor::extract_tables(document),
        DocumentKind::LegacyDoc => {
            let settings = ConverterSettings::from_config(config);
            let pb = spinner(".doc を .docx に変換中...");
            let converted = converter::convert_to_docx(document, &settings).await;
            pb.finish_and_clear();
            let converted = converted?;
            println!("✔ .docx に変換しました");
            extractor::extract_tables(converted.path())
        }
    }
}

pub fn init(project: &Path, force: bool) -> Result<()> {
    if project.exists() && !force {
        println!(
            "プロジェクトは既に存在します: {}（上書きするには --force）",
            project.display()
        );
        return Ok(());
    }

    let session = Session::new(project);
    session.save()?;
    println!(
        "✔ プロジェクトを作成しました: {}（カテゴリ {}件）",
        project.display(),
        session.catalog.len()
    );
    Ok(())
}

pub async fn tables(document: &Path, show: Option<usize>, config: &Config) -> Result<()> {
    let tables = load_tables(document, config).await?;

    if let Some(position) = show {
        let table = tables.get(index_of(position)).ok_or(TemplateError::TableNotFound {
            position,
            count: tables.len(),
        })?;
        println!("{}", extractor::table_label(index_of(position), table));
        println!("---");
        for (i, row) in table.rows.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|c| c.replace('\n', " ⏎ ")).collect();
            println!("{:>3} | {}", i + 1, cells.join(" | "));
        }
        return Ok(());
    }

    if tables.is_empty() {
        println!("表が見つかりません: {}", document.display());
        return Ok(());
    }

    println!("✔ {}件の表を抽出\n", tables.len());
    for (position, table) in tables.iter().enumerate() {
        println!("  {}", extractor::table_label(position, table));
    }
    Ok(())
}

/// 取り込み方法
pub enum ImportMode {
    /// 全表を自動分類
    All { mapping: Option<PathBuf> },
    /// 指定した表を指定カテゴリへ
    Selected { position: usize, category: String },
}

pub async fn import(
    document: &Path,
    mode: ImportMode,
    project: &Path,
    config: &Config,
) -> Result<()> {
    println!("[1/3] 表を抽出中...");
    let tables = load_tables(document, config).await?;
    println!("✔ {}件の表を検出\n", tables.len());

    let mut session = Session::open_or_create(project)?;

    println!("[2/3] テンプレートを取り込み中...");
    match mode {
        ImportMode::All { mapping } => {
            let classifier = match mapping {
                Some(path) => Classifier::from_file(&path)?,
                None => {
                    Classifier::default().with_default_category(config.default_category.clone())
                }
            };
            println!(
                "  分類ルール: {}件（既定: {}）",
                classifier.rules().len(),
                classifier.default_category()
            );
            let report = import_all(&mut session.catalog, &tables, &classifier);
            for entry in &report.tables {
                println!(
                    "  - 表 {} → {}: {}件",
                    entry.position + 1,
                    entry.category,
                    entry.imported
                );
            }
            println!("✔ {}件のテンプレートを取り込みました\n", report.total());
        }
        ImportMode::Selected { position, category } => {
            let table = tables.get(index_of(position)).ok_or(TemplateError::TableNotFound {
                position,
                count: tables.len(),
            })?;
            let imported = import_table(&mut session.catalog, table, &category)?;
            println!("✔ {}件のテンプレートを「{}」に取り込みました\n", imported, category);
        }
    }

    println!("[3/3] プロジェクトを保存中...");
    session.save()?;
    println!("✔ 保存: {}", session.path().display());
    Ok(())
}

pub fn category(action: CategoryAction, project: &Path) -> Result<()> {
    match action {
        CategoryAction::List => {
            let session = Session::open(project)?;
            for (name, templates) in session.catalog.iter() {
                println!("{} ({}件)", name, templates.len());
            }
        }
        CategoryAction::Add { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(TemplateError::Prompt("カテゴリ名が空です".into()));
            }
            let mut session = Session::open_or_create(project)?;
            if session.catalog.add_category(name.as_str()) {
                session.save()?;
                println!("✔ カテゴリを追加しました: {}", name);
            } else {
                println!("カテゴリは既に存在します: {}", name);
            }
        }
        CategoryAction::Remove { name, yes } => {
            let mut session = Session::open(project)?;
            let count = session
                .catalog
                .templates(&name)
                .map(<[Template]>::len)
                .ok_or_else(|| CatalogError::CategoryNotFound(name.clone()))?;

            let prompt = format!("カテゴリ「{}」とテンプレート{}件を削除しますか?", name, count);
            if !yes && !confirm(prompt)? {
                println!("キャンセルしました");
                return Ok(());
            }

            session.catalog.remove_category(&name);
            session.save()?;
            println!("✔ カテゴリを削除しました: {}", name);
        }
    }
    Ok(())
}

/// 本文の入力（ファイル指定を優先）
fn read_content(content: Option<String>, content_file: Option<PathBuf>) -> Result<Option<String>> {
    match content_file {
        Some(path) => {
            if !path.exists() {
                return Err(TemplateError::FileNotFound(path.display().to_string()));
            }
            Ok(Some(std::fs::read_to_string(&path)?))
        }
        None => Ok(content),
    }
}

pub fn template(action: TemplateAction, project: &Path) -> Result<()> {
    match action {
        TemplateAction::List { category } => {
            let session = Session::open(project)?;
            let templates = session
                .catalog
                .templates(&category)
                .ok_or_else(|| CatalogError::CategoryNotFound(category.clone()))?;
            if templates.is_empty() {
                println!("（テンプレートなし）");
            }
            for (i, template) in templates.iter().enumerate() {
                println!("{:>3}. {}", i + 1, template.summary());
            }
        }
        TemplateAction::Show { category, position } => {
            let session = Session::open(project)?;
            let index = template_index(&session.catalog, &category, position)?;
            let template = session.catalog.template(&category, index)?;
            println!("カテゴリ: {}", category);
            println!("番号: {}", template.num);
            println!("キーワード: {}", template.keyword);
            println!("本文:\n{}", template.content);
        }
        TemplateAction::Add { category } => {
            let mut session = Session::open_or_create(project)?;
            let index = session.catalog.add_template(&category)?;
            session.save()?;
            println!(
                "✔ 空のテンプレートを追加しました: {} #{}（`template update` で編集）",
                category,
                index + 1
            );
        }
        TemplateAction::Update {
            category,
            position,
            num,
            keyword,
            content,
            content_file,
        } => {
            let mut session = Session::open(project)?;
            let index = template_index(&session.catalog, &category, position)?;
            let current = session.catalog.template(&category, index)?.clone();
            let content = read_content(content, content_file)?;

            // 編集した値は前後の空白を除去して保存する
            let updated = Template {
                num: num.map(|s| s.trim().to_string()).unwrap_or(current.num),
                keyword: keyword.map(|s| s.trim().to_string()).unwrap_or(current.keyword),
                content: content.map(|s| s.trim().to_string()).unwrap_or(current.content),
            };
            session.catalog.update_template(&category, index, updated)?;
            session.save()?;
            println!("✔ 保存しました: {} #{}", category, position);
        }
        TemplateAction::Remove { category, position, yes } => {
            let mut session = Session::open(project)?;
            let index = template_index(&session.catalog, &category, position)?;
            let summary = session.catalog.template(&category, index)?.summary();

            if !yes && !confirm(format!("このテンプレートを削除しますか? {}", summary))? {
                println!("キャンセルしました");
                return Ok(());
            }

            session.catalog.remove_template(&category, index)?;
            session.save()?;
            println!("✔ 削除しました: {} #{}", category, position);
        }
    }
    Ok(())
}

fn print_stats(session: &Session) {
    let stats = session.catalog.stats();
    println!("テンプレート合計: {}", stats.total_templates);
    println!("カテゴリ: {}", stats.non_empty_categories);
}

pub fn preview(format: OutputFormat, minify: bool, project: &Path) -> Result<()> {
    let session = Session::open(project)?;
    print_stats(&session);
    println!("---");
    println!("{}", serialize(&session.catalog, format, minify)?);
    Ok(())
}

pub fn export(
    format: OutputFormat,
    minify: bool,
    output: Option<PathBuf>,
    project: &Path,
) -> Result<()> {
    let session = Session::open(project)?;
    let output = output.unwrap_or_else(|| PathBuf::from("."));

    let suffix = if minify { ", minify" } else { "" };
    println!("- templatesData を生成中... (形式: {}{})", format, suffix);
    let written = export::export_catalog(&session.catalog, format, minify, &output)?;
    println!("✔ 出力: {}", written.display());
    Ok(())
}

pub fn stats(project: &Path) -> Result<()> {
    let session = Session::open(project)?;
    print_stats(&session);
    Ok(())
}
