//! テンプレートカタログ
//!
//! カテゴリ名 → テンプレート一覧 の順序付きマップ。
//! カテゴリは挿入順を保持し、重複は許さない。

use crate::error::{Error, Result};
use crate::types::Template;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 既定のカテゴリ（新規プロジェクト作成時の並び順）
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "الدعوى",
    "الإجابة",
    "المرافعة",
    "الأسباب",
    "الحكم",
    "الشهادة",
    "الصلح",
    "اليمين",
    "النكول",
    "الكفالة",
    "الالتماس",
    "الشطب",
    "الغياب",
    "الاختصاص",
    "التمويل",
    "العقارات",
    "المشاكل_التقنية",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryEntry {
    name: String,
    templates: Vec<Template>,
}

/// 件数の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateStats {
    /// 全テンプレート数
    pub total_templates: usize,
    /// テンプレートを1件以上持つカテゴリ数
    pub non_empty_categories: usize,
}

/// カテゴリ名 → テンプレート一覧
///
/// `Default` は空のカタログ。新規プロジェクトは
/// [`Catalog::with_default_categories`] から始める。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CategoryEntry>,
}

impl Catalog {
    /// 既定カテゴリ（すべて空）で初期化
    pub fn with_default_categories() -> Self {
        let mut catalog = Self::default();
        for name in DEFAULT_CATEGORIES {
            catalog.add_category(*name);
        }
        catalog
    }

    fn entry(&self, name: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut CategoryEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::CategoryNotFound(name.to_string()))
    }

    /// カテゴリを追加。既に存在する場合は何もせず false を返す
    pub fn add_category(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push(CategoryEntry {
            name,
            templates: Vec::new(),
        });
        true
    }

    /// カテゴリを存在させる（自動インポート時の分類先）
    pub fn ensure_category(&mut self, name: &str) {
        if !self.contains(name) {
            tracing::debug!(category = name, "カテゴリを自動作成");
            self.add_category(name);
        }
    }

    /// カテゴリとその全テンプレートを削除
    pub fn remove_category(&mut self, name: &str) -> Option<Vec<Template>> {
        let pos = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(pos).templates)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// カテゴリ名（挿入順）
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// (カテゴリ名, テンプレート一覧) を挿入順に列挙
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Template])> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.templates.as_slice()))
    }

    pub fn templates(&self, category: &str) -> Option<&[Template]> {
        self.entry(category).map(|e| e.templates.as_slice())
    }

    pub fn template(&self, category: &str, index: usize) -> Result<&Template> {
        let entry = self
            .entry(category)
            .ok_or_else(|| Error::CategoryNotFound(category.to_string()))?;
        entry.templates.get(index).ok_or(Error::IndexOutOfRange {
            category: category.to_string(),
            index,
            len: entry.templates.len(),
        })
    }

    /// カテゴリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> TemplateStats {
        TemplateStats {
            total_templates: self.entries.iter().map(|e| e.templates.len()).sum(),
            non_empty_categories: self
                .entries
                .iter()
                .filter(|e| !e.templates.is_empty())
                .count(),
        }
    }

    /// テンプレートを末尾に追加
    pub fn push_template(&mut self, category: &str, template: Template) -> Result<()> {
        self.entry_mut(category)?.templates.push(template);
        Ok(())
    }

    /// 空のテンプレートを追加し、そのインデックスを返す
    pub fn add_template(&mut self, category: &str) -> Result<usize> {
        let entry = self.entry_mut(category)?;
        entry.templates.push(Template::default());
        Ok(entry.templates.len() - 1)
    }

    /// 指定位置のテンプレートを上書き（位置は変わらない）
    pub fn update_template(
        &mut self,
        category: &str,
        index: usize,
        template: Template,
    ) -> Result<()> {
        let entry = self.entry_mut(category)?;
        let len = entry.templates.len();
        let slot = entry
            .templates
            .get_mut(index)
            .ok_or_else(|| Error::IndexOutOfRange {
                category: category.to_string(),
                index,
                len,
            })?;
        *slot = template;
        Ok(())
    }

    /// 指定位置のテンプレートを削除（後続は1つずつ前に詰める）
    pub fn remove_template(&mut self, category: &str, index: usize) -> Result<Template> {
        let entry = self.entry_mut(category)?;
        if index >= entry.templates.len() {
            return Err(Error::IndexOutOfRange {
                category: category.to_string(),
                index,
                len: entry.templates.len(),
            });
        }
        Ok(entry.templates.remove(index))
    }
}

// JSONオブジェクトとして (de)serialize する。キー順はカタログの挿入順。
impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.templates)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to template list")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Catalog, A::Error> {
                let mut catalog = Catalog::default();
                while let Some((name, templates)) =
                    access.next_entry::<String, Vec<Template>>()?
                {
                    // 重複キーは最初の位置に後勝ちの値を入れる
                    match catalog.entries.iter_mut().find(|e| e.name == name) {
                        Some(entry) => entry.templates = templates,
                        None => catalog.entries.push(CategoryEntry { name, templates }),
                    }
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
