use std::path::{Path, PathBuf};

use clap::Parser;
use scrublens::cli::{Cli, Commands};
use scrublens::config::AppConfig;
use scrublens::history;
use scrublens::provider;
use scrublens::report::{processing_summary, DisclosureReport};
use scrublens::sanitize::{sanitize, AnalysisMode};

fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let dir = PathBuf::from(home).join(".scrublens");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn db_path(config: &AppConfig) -> PathBuf {
    config
        .history
        .path
        .clone()
        .unwrap_or_else(|| dirs_path().join("scrublens.db"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            request,
            response,
            mode,
            dry_run,
        } => {
            cmd_analyze(&cli.config, &request, &response, mode.as_deref(), dry_run).await?;
        }
        Commands::Sanitize { file, mode } => {
            cmd_sanitize(&cli.config, &file, mode.as_deref())?;
        }
        Commands::History {
            tail,
            export,
            format,
        } => {
            cmd_history(&cli.config, tail, export, &format)?;
        }
        Commands::Init => {
            cmd_init(&cli.config)?;
        }
    }

    Ok(())
}

fn resolve_mode(config: &AppConfig, flag: Option<&str>) -> anyhow::Result<AnalysisMode> {
    let label = flag.unwrap_or(&config.analysis.default_mode);
    Ok(label.parse::<AnalysisMode>()?)
}

async fn cmd_analyze(
    config_path: &Path,
    request_path: &Path,
    response_path: &Path,
    mode_flag: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = AppConfig::load_from_path(config_path)?;
    let mode = resolve_mode(&config, mode_flag)?;

    let raw_request = std::fs::read_to_string(request_path)?;
    let raw_response = std::fs::read_to_string(response_path)?;

    if dry_run {
        let (req, req_meta) = sanitize(&raw_request, mode);
        let (resp, resp_meta) = sanitize(&raw_response, mode);
        let report = DisclosureReport::build(&req, &req_meta, &resp, &resp_meta, mode);
        println!("=== Processing Summary ===");
        println!("{}", report.summary);
        println!("==========================");
        println!("\n--- Prompt that would be sent ---\n");
        println!("{}", report.prompt);
        return Ok(());
    }

    let ai = provider::for_model(
        &config.provider.model,
        config.provider.api_key.clone(),
        config.provider.model_name.clone(),
    )?;

    let outcome = provider::run_analysis(ai.as_ref(), &raw_request, &raw_response, mode).await?;

    println!("=== Processing Summary ===");
    println!("{}", outcome.summary);
    println!("==========================\n");
    println!("{}", outcome.reply);

    if config.history.enabled {
        let mut redacted: Vec<String> = outcome.request_meta.redacted_headers.clone();
        redacted.extend(outcome.response_meta.redacted_headers.iter().cloned());
        let record = history::AnalysisRecord {
            id: None,
            exchange_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            mode: mode.to_string(),
            model: config.provider.model.clone(),
            redacted_headers: redacted.join(", "),
            truncated: outcome.request_meta.body_truncated || outcome.response_meta.body_truncated,
            result: outcome.reply.clone(),
        };
        let conn = history::open_db(&db_path(&config))?;
        history::insert_record(&conn, &record)?;
    }

    Ok(())
}

fn cmd_sanitize(config_path: &Path, file: &Path, mode_flag: Option<&str>) -> anyhow::Result<()> {
    // A missing config is fine here; sanitizing needs no provider.
    let config = AppConfig::load_from_path(config_path).ok();
    let label = mode_flag
        .or(config.as_ref().map(|c| c.analysis.default_mode.as_str()))
        .unwrap_or("vulnerability-scan");
    let mode = label.parse::<AnalysisMode>()?;

    let raw = std::fs::read_to_string(file)?;
    let (sanitized, meta) = sanitize(&raw, mode);
    // Reuse the pair summary with an empty counterpart.
    let empty = scrublens::sanitize::ProcessingMetadata::new(mode.header_policy());
    let summary = processing_summary(&meta, &empty);

    println!("{}", sanitized);
    println!("=== Processing Summary ===");
    println!("{}", summary);
    println!("==========================");
    Ok(())
}

fn cmd_history(config_path: &Path, tail: usize, export: bool, format: &str) -> anyhow::Result<()> {
    let config = AppConfig::load_from_path(config_path)?;
    let db = db_path(&config);
    if !db.exists() {
        println!("No history database found. Run 'scrublens init' first.");
        return Ok(());
    }

    let conn = history::open_db(&db)?;

    if export {
        match format {
            "csv" => {
                let csv = history::export::export_csv(&conn)?;
                print!("{}", csv);
            }
            _ => {
                let json = history::export::export_json(&conn)?;
                println!("{}", json);
            }
        }
    } else {
        let records = history::query_recent(&conn, tail)?;
        if records.is_empty() {
            println!("No analyses recorded yet.");
        } else {
            println!(
                "{:<26} {:<24} {:<8} {:<30} {}",
                "TIMESTAMP", "MODE", "MODEL", "REDACTED HEADERS", "TRUNCATED"
            );
            println!("{}", "─".repeat(100));
            for record in &records {
                println!(
                    "{:<26} {:<24} {:<8} {:<30} {}",
                    record.timestamp,
                    record.mode,
                    record.model,
                    record.redacted_headers,
                    record.truncated
                );
            }
        }
    }
    Ok(())
}

fn cmd_init(config_path: &Path) -> anyhow::Result<()> {
    println!("Initializing ScrubLens...");

    let data_dir = dirs_path();
    std::fs::create_dir_all(&data_dir)?;
    println!("  Created data dir: {}", data_dir.display());

    if !config_path.exists() {
        let default_config = include_str!("../templates/default.toml");
        std::fs::write(config_path, default_config)?;
        println!("  Created config: {}", config_path.display());
    } else {
        println!("  Config already exists: {}", config_path.display());
    }

    let db = data_dir.join("scrublens.db");
    history::open_db(&db)?;
    println!("  Initialized database: {}", db.display());

    println!("\nDone! Next steps:");
    println!("  1. Export your API key:  export ANTHROPIC_API_KEY=sk-ant-...");
    println!("  2. Preview a disclosure: scrublens analyze --request req.txt --response resp.txt --dry-run");
    println!("  3. Run an analysis:      scrublens analyze --request req.txt --response resp.txt");
    Ok(())
}
