use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use word_templates_common::OutputFormat;

#[derive(Parser)]
#[command(name = "word-templates")]
#[command(about = "Wordの表からテンプレートを抽出し templatesData を生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// プロジェクトファイル（省略時は設定の project_file）
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 既定カテゴリで新しいプロジェクトを作成
    Init {
        /// 既存のプロジェクトを上書き
        #[arg(long)]
        force: bool,
    },

    /// 文書内の表を一覧表示
    Tables {
        /// Wordファイル (.docx/.doc)
        #[arg(required = true)]
        document: PathBuf,

        /// 指定した表（1始まり）の中身を表示
        #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        show: Option<usize>,
    },

    /// 表をテンプレートとして取り込む
    Import {
        /// Wordファイル (.docx/.doc)
        #[arg(required = true)]
        document: PathBuf,

        /// すべての表を自動分類して取り込む
        #[arg(short, long, conflicts_with_all = ["table", "category"])]
        all: bool,

        /// 取り込む表（1始まり）
        #[arg(
            short,
            long,
            requires = "category",
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        table: Option<usize>,

        /// 取り込み先カテゴリ
        #[arg(short, long, requires = "table")]
        category: Option<String>,

        /// キーワード→カテゴリ対応ファイル（JSON、--all 用）
        #[arg(short, long, requires = "all")]
        mapping: Option<PathBuf>,
    },

    /// カテゴリ管理
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// テンプレート管理
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// 生成コードとテンプレート数を表示
    Preview {
        /// 出力形式 (js/json)
        #[arg(short, long, default_value = "js")]
        format: OutputFormat,

        /// 空白を除去して出力
        #[arg(long)]
        minify: bool,
    },

    /// templatesData をファイルに出力
    Export {
        /// 出力形式 (js/json)
        #[arg(short, long, default_value = "js")]
        format: OutputFormat,

        /// 空白を除去して出力
        #[arg(long)]
        minify: bool,

        /// 出力ファイル/ディレクトリ（省略時: ./templatesData.<ext>）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// テンプレート数を表示
    Stats,

    /// 設定を表示/編集
    Config {
        /// LibreOffice (soffice) のパスを設定
        #[arg(long)]
        set_converter: Option<String>,

        /// 変換のタイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 既定のプロジェクトファイルを設定
        #[arg(long)]
        set_project: Option<String>,

        /// 自動分類の既定カテゴリを設定
        #[arg(long)]
        set_default_category: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// カテゴリ一覧
    List,

    /// カテゴリを追加
    Add {
        name: String,
    },

    /// カテゴリとその全テンプレートを削除
    Remove {
        name: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TemplateAction {
    /// カテゴリ内のテンプレート一覧
    List {
        category: String,
    },

    /// テンプレートの内容を表示
    Show {
        category: String,

        /// 位置（1始まり）
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        position: usize,
    },

    /// 空のテンプレートを追加
    Add {
        category: String,
    },

    /// テンプレートを編集（指定したフィールドだけ上書き）
    Update {
        category: String,

        /// 位置（1始まり）
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        position: usize,

        /// 番号
        #[arg(long)]
        num: Option<String>,

        /// キーワード
        #[arg(long)]
        keyword: Option<String>,

        /// 本文
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,

        /// 本文をファイルから読み込む
        #[arg(long)]
        content_file: Option<PathBuf>,
    },

    /// テンプレートを削除
    Remove {
        category: String,

        /// 位置（1始まり）
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        position: usize,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },
}
