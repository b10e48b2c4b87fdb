mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, PlanArgs, TranslateArgs};
use markdown_translator::services::walker;
use markdown_translator::types::seconds;
use markdown_translator::{build_walker, GoogleTranslateProvider, TranslateConfig};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Translate(args) => handle_translate_command(args, &cli.output).await,
        Commands::Plan(args) => handle_plan_command(args, &cli.output).await,
    };

    if let Err(e) = result {
        error!("Operation failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_translate_command(args: &TranslateArgs, output_dir: &Path) -> anyhow::Result<()> {
    let config = TranslateConfig {
        input_dir: args.input.clone(),
        output_dir: output_dir.to_path_buf(),
        chunk_lines: args.chunk_lines,
        source_language: args.source.parse()?,
        target_language: args.target.clone(),
        chunk_delay: seconds(args.chunk_delay, "chunk delay")?,
        max_attempts: args.retries,
        retry_delay: seconds(args.retry_delay, "retry delay")?,
        request_timeout: seconds(args.timeout, "timeout")?,
        show_progress: !args.no_progress,
    };

    info!(
        "Translating {} ({} -> {}) into {}",
        config.input_dir.display(),
        config.source_language,
        config.target_language,
        config.output_dir.display()
    );

    let provider = GoogleTranslateProvider::new(config.request_timeout)?;
    let report = build_walker(&config, Box::new(provider))?.run().await?;

    if let Some(report_path) = &args.report {
        let json_content = serde_json::to_string_pretty(&report)
            .context("Failed to serialize translation report")?;

        tokio::fs::write(report_path, json_content)
            .await
            .context("Failed to write translation report")?;

        info!("Report written to: {}", report_path.display());
    }

    if report.failed.is_empty() {
        info!(
            "Translation finished: {}/{} files translated",
            report.translated.len(),
            report.total_files()
        );
    } else {
        warn!(
            "Translation finished: {}/{} files translated, {} skipped",
            report.translated.len(),
            report.total_files(),
            report.failed.len()
        );
    }
    Ok(())
}

async fn handle_plan_command(args: &PlanArgs, output_dir: &Path) -> anyhow::Result<()> {
    markdown_translator::types::validate_language_code(&args.target)?;

    let planned = walker::plan(&args.input, output_dir, &args.target)?;
    if planned.is_empty() {
        warn!("No markdown files found under {}", args.input.display());
        return Ok(());
    }

    println!("\n=== Translation plan ({} files) ===", planned.len());
    for file in &planned {
        println!("  {} -> {}", file.source.display(), file.output.display());
    }

    if let Some(json_path) = &args.json_output {
        let json_content =
            serde_json::to_string_pretty(&planned).context("Failed to serialize plan")?;

        tokio::fs::write(json_path, json_content)
            .await
            .context("Failed to write plan file")?;

        info!("Plan written to: {}", json_path.display());
    }

    Ok(())
}
