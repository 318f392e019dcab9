//! Word Templates Common Library
//!
//! 表データからテンプレートカタログを構築し、templatesData を生成する純粋なコア。
//! ファイル・外部プロセスを扱う部分はCLI側に置く。

pub mod types;
pub mod catalog;
pub mod classifier;
pub mod importer;
pub mod serializer;
pub mod project;
pub mod error;

pub use types::{RawTable, Template};
pub use catalog::{Catalog, TemplateStats, DEFAULT_CATEGORIES};
pub use classifier::{Classifier, KeywordRule, CATEGORY_KEYWORDS, DEFAULT_CATEGORY};
pub use importer::{import_all, import_table, template_from_row, ImportReport, TableImport};
pub use serializer::{serialize, OutputFormat};
pub use project::{ProjectFile, PROJECT_VERSION};
pub use error::{Error, Result};
