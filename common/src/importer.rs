//! 表 → テンプレートのインポート
//!
//! 先頭行は見出しとして常に読み飛ばす。
//! 3列以上あり、3列目（本文）がトリム後10文字を超える行だけを取り込む。
//! 条件を満たさない行は黙って除外する。

use crate::catalog::Catalog;
use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::types::{RawTable, Template};

/// 本文として認める最小文字数（この値を超える必要がある）
pub const MIN_CONTENT_CHARS: usize = 10;

/// 1行をテンプレートに変換（条件を満たさなければ None）
pub fn template_from_row(row: &[String]) -> Option<Template> {
    if row.len() < 3 {
        return None;
    }
    let content = row[2].trim();
    if content.chars().count() <= MIN_CONTENT_CHARS {
        return None;
    }
    Some(Template::new(row[0].trim(), row[1].trim(), content))
}

/// 指定カテゴリに1つの表を取り込み、追加件数を返す
///
/// カテゴリが存在しない場合はカタログを変更せずにエラーを返す。
pub fn import_table(catalog: &mut Catalog, table: &RawTable, category: &str) -> Result<usize> {
    if !catalog.contains(category) {
        return Err(Error::CategoryNotFound(category.to_string()));
    }

    let body = table.rows.iter().skip(1);
    let mut imported = 0;
    let mut dropped = 0;
    for row in body {
        match template_from_row(row) {
            Some(template) => {
                catalog.push_template(category, template)?;
                imported += 1;
            }
            None => dropped += 1,
        }
    }

    tracing::debug!(category, imported, dropped, "表を取り込み");
    Ok(imported)
}

/// 表ごとの取り込み結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableImport {
    /// 抽出された表の位置（0始まり）
    pub position: usize,
    pub category: String,
    pub imported: usize,
}

/// 一括インポートの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub tables: Vec<TableImport>,
}

impl ImportReport {
    /// 追加されたテンプレートの合計
    pub fn total(&self) -> usize {
        self.tables.iter().map(|t| t.imported).sum()
    }
}

/// すべての表をカテゴリ推定しながら取り込む
///
/// 推定したカテゴリが無ければ作成する。空の表や取り込み0件の表は
/// 読み飛ばして次の表へ進む。
pub fn import_all(
    catalog: &mut Catalog,
    tables: &[RawTable],
    classifier: &Classifier,
) -> ImportReport {
    let mut report = ImportReport::default();

    for (position, table) in tables.iter().enumerate() {
        if table.is_empty() {
            continue;
        }

        let category = classifier.classify(table);
        catalog.ensure_category(category);

        match import_table(catalog, table, category) {
            Ok(0) => {}
            Ok(imported) => report.tables.push(TableImport {
                position,
                category: category.to_string(),
                imported,
            }),
            Err(e) => tracing::warn!(position, error = %e, "表の取り込みをスキップ"),
        }
    }

    report
}
