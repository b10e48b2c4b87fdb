use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "md-translate")]
#[command(about = "A CLI tool for translating a tree of markdown documents while keeping code, links and HTML intact")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output directory for translated files
    #[arg(short, long, global = true, default_value = "./out", env = "MD_TRANSLATE_OUTPUT")]
    pub output: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate every markdown file under the input directory
    Translate(TranslateArgs),

    /// List source files and their output paths without translating
    Plan(PlanArgs),
}

#[derive(Args)]
pub struct TranslateArgs {
    /// Input directory to walk recursively
    #[arg(value_name = "INPUT_DIR", default_value = "./docs", env = "MD_TRANSLATE_INPUT")]
    pub input: PathBuf,

    /// Number of lines sent to the provider per request
    #[arg(long, default_value = "20", env = "MD_TRANSLATE_CHUNK_LINES")]
    pub chunk_lines: usize,

    /// Source language code, or "auto" to let the provider detect it
    #[arg(long, default_value = "auto", env = "MD_TRANSLATE_SOURCE")]
    pub source: String,

    /// Target language code
    #[arg(short, long, default_value = "fa", env = "MD_TRANSLATE_TARGET")]
    pub target: String,

    /// Pause between chunk requests, in seconds
    #[arg(long, default_value = "0.5", value_name = "SECONDS", env = "MD_TRANSLATE_CHUNK_DELAY")]
    pub chunk_delay: f64,

    /// Maximum provider attempts per chunk
    #[arg(long, default_value = "3", env = "MD_TRANSLATE_RETRIES")]
    pub retries: u32,

    /// Pause between attempts, in seconds
    #[arg(long, default_value = "1.5", value_name = "SECONDS", env = "MD_TRANSLATE_RETRY_DELAY")]
    pub retry_delay: f64,

    /// HTTP request timeout, in seconds
    #[arg(long, default_value = "30", value_name = "SECONDS", env = "MD_TRANSLATE_TIMEOUT")]
    pub timeout: f64,

    /// Write a JSON report of the run
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Input directory to walk recursively
    #[arg(value_name = "INPUT_DIR", default_value = "./docs", env = "MD_TRANSLATE_INPUT")]
    pub input: PathBuf,

    /// Target language code
    #[arg(short, long, default_value = "fa", env = "MD_TRANSLATE_TARGET")]
    pub target: String,

    /// Output the plan to a JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,
}
