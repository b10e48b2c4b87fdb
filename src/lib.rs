//! # Markdown Translator Library
//!
//! Translates a tree of markdown documents through an external translation
//! provider. Code blocks, inline code, images, links and HTML tags are masked
//! before each request and restored afterwards; every `.md` file is written
//! to a mirrored output tree as `<stem>.<lang>.md`.
//!
//! ## Example Usage
//!
//! ```no_run
//! use markdown_translator::{build_walker, GoogleTranslateProvider, TranslateConfig};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TranslateConfig {
//!         input_dir: PathBuf::from("./docs"),
//!         output_dir: PathBuf::from("./out"),
//!         target_language: "fa".to_string(),
//!         ..TranslateConfig::default()
//!     };
//!
//!     let provider = GoogleTranslateProvider::new(config.request_timeout)?;
//!     let report = build_walker(&config, Box::new(provider))?.run().await?;
//!
//!     println!("Translated {} files", report.translated.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod types;

pub use error::{Result, TranslatorError};
pub use services::{
    chunk_lines, output_path, FileTranslator, FileTranslatorOptions, FolderWalker,
    GoogleTranslateProvider, RetryPolicy, SpanProtector, TranslationClient, TranslationProvider,
};
pub use types::{
    Document, FailedFile, MaskedBlock, PlaceholderTable, PlannedFile, ProtectedSpan,
    SourceLanguage, SpanKind, TranslateConfig, TranslatedFile, WalkReport,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wires a validated configuration and a provider into a ready-to-run walker.
pub fn build_walker(
    config: &TranslateConfig,
    provider: Box<dyn TranslationProvider>,
) -> Result<FolderWalker> {
    config.validate()?;

    let retry = RetryPolicy::new(config.max_attempts, config.retry_delay)?;
    let client = TranslationClient::new(provider, retry);
    let translator = FileTranslator::new(
        client,
        FileTranslatorOptions {
            chunk_lines: config.chunk_lines,
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            chunk_delay: config.chunk_delay,
        },
    )?;

    Ok(FolderWalker::new(translator, config.input_dir.clone(), config.output_dir.clone())
        .with_progress(config.show_progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslateConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_lines, 20);
        assert_eq!(config.source_language, SourceLanguage::Auto);
        assert_eq!(config.target_language, "fa");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.chunk_delay, Duration::from_millis(500));
        assert_eq!(config.retry_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let zero_chunk = TranslateConfig {
            chunk_lines: 0,
            ..TranslateConfig::default()
        };
        assert!(zero_chunk.validate().unwrap_err().is_fatal());

        let zero_attempts = TranslateConfig {
            max_attempts: 0,
            ..TranslateConfig::default()
        };
        assert!(zero_attempts.validate().is_err());

        let bad_target = TranslateConfig {
            target_language: "../fa".to_string(),
            ..TranslateConfig::default()
        };
        assert!(bad_target.validate().is_err());
    }

    #[test]
    fn test_source_language_parsing() {
        assert_eq!("auto".parse::<SourceLanguage>().unwrap(), SourceLanguage::Auto);
        assert_eq!("".parse::<SourceLanguage>().unwrap(), SourceLanguage::Auto);
        assert_eq!(
            "en".parse::<SourceLanguage>().unwrap(),
            SourceLanguage::Code("en".to_string())
        );
        assert!("e n".parse::<SourceLanguage>().is_err());
        assert_eq!(SourceLanguage::Auto.to_string(), "auto");
    }

    #[test]
    fn test_seconds_conversion() {
        assert_eq!(types::seconds(1.5, "delay").unwrap(), Duration::from_millis(1500));
        assert_eq!(types::seconds(0.0, "delay").unwrap(), Duration::ZERO);
        assert!(types::seconds(-1.0, "delay").is_err());
        assert!(types::seconds(f64::NAN, "delay").is_err());
    }
}
