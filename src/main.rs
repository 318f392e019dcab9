use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use word_templates::{cli, commands, config, error};
use cli::{Cli, Commands};
use commands::ImportMode;
use config::Config;
use error::{Result, TemplateError};

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "word_templates=debug,word_templates_common=debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let project = cli
        .project
        .unwrap_or_else(|| PathBuf::from(&config.project_file));

    match cli.command {
        Commands::Init { force } => commands::init(&project, force)?,

        Commands::Tables { document, show } => {
            commands::tables(&document, show, &config).await?;
        }

        Commands::Import { document, all, table, category, mapping } => {
            let mode = match (all, table, category) {
                (true, _, _) => ImportMode::All { mapping },
                (false, Some(position), Some(category)) => {
                    ImportMode::Selected { position, category }
                }
                _ => {
                    return Err(TemplateError::Prompt(
                        "--all または --table と --category を指定してください".into(),
                    ))
                }
            };
            println!("📥 word-templates - 取り込み\n");
            commands::import(&document, mode, &project, &config).await?;
            println!("\n✅ 取り込み完了");
        }

        Commands::Category { action } => commands::category(action, &project)?,

        Commands::Template { action } => commands::template(action, &project)?,

        Commands::Preview { format, minify } => commands::preview(format, minify, &project)?,

        Commands::Export { format, minify, output } => {
            println!("📤 word-templates - エクスポート\n");
            commands::export(format, minify, output, &project)?;
            println!("\n✅ エクスポート完了");
        }

        Commands::Stats => commands::stats(&project)?,

        Commands::Config {
            set_converter,
            set_timeout,
            set_project,
            set_default_category,
            show,
        } => {
            let mut config = config;

            if let Some(path) = set_converter {
                config.set_converter_path(path)?;
                println!("✔ 変換ツールを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if let Some(path) = set_project {
                config.set_project_file(path)?;
                println!("✔ 既定のプロジェクトを設定しました");
            }

            if let Some(category) = set_default_category {
                config.set_default_category(category)?;
                println!("✔ 既定カテゴリを設定しました");
            }

            if show {
                println!("設定:");
                let converter = config.converter_path().unwrap_or_else(|| "自動検出".into());
                println!("  変換ツール: {}", converter);
                println!("  タイムアウト: {}秒", config.conversion_timeout_seconds);
                println!("  プロジェクト: {}", config.project_file);
                println!("  既定カテゴリ: {}", config.default_category);
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✖ {}", e);
            ExitCode::FAILURE
        }
    }
}
