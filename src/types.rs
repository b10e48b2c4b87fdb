use crate::error::{Result, TranslatorError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Source language sent to the provider, or the auto-detect sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SourceLanguage {
    #[default]
    Auto,
    Code(String),
}

impl SourceLanguage {
    pub const AUTO: &'static str = "auto";

    pub fn as_str(&self) -> &str {
        match self {
            SourceLanguage::Auto => Self::AUTO,
            SourceLanguage::Code(code) => code,
        }
    }
}

impl FromStr for SourceLanguage {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(Self::AUTO) {
            return Ok(SourceLanguage::Auto);
        }
        validate_language_code(s)?;
        Ok(SourceLanguage::Code(s.to_string()))
    }
}

impl TryFrom<String> for SourceLanguage {
    type Error = TranslatorError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SourceLanguage> for String {
    fn from(value: SourceLanguage) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language codes end up in file names and query strings, so only
/// ASCII alphanumerics and `-` are accepted (`fa`, `pt-BR`, `zh-CN`).
pub fn validate_language_code(code: &str) -> Result<()> {
    let valid = !code.is_empty()
        && code.len() <= 16
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !code.starts_with('-');

    if valid {
        Ok(())
    } else {
        Err(TranslatorError::configuration(format!(
            "invalid language code '{}'",
            code
        )))
    }
}

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub chunk_lines: usize,
    pub source_language: SourceLanguage,
    pub target_language: String,
    pub chunk_delay: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    pub show_progress: bool,
}

impl TranslateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_lines == 0 {
            return Err(TranslatorError::configuration(
                "chunk size must be greater than 0",
            ));
        }

        if self.max_attempts == 0 {
            return Err(TranslatorError::configuration(
                "max attempts must be greater than 0",
            ));
        }

        validate_language_code(&self.target_language)?;

        if let SourceLanguage::Code(code) = &self.source_language {
            validate_language_code(code)?;
        }

        Ok(())
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./docs"),
            output_dir: PathBuf::from("./out"),
            chunk_lines: 20,
            source_language: SourceLanguage::Auto,
            target_language: "fa".to_string(),
            chunk_delay: Duration::from_millis(500),
            max_attempts: 3,
            retry_delay: Duration::from_millis(1500),
            request_timeout: Duration::from_secs(30),
            show_progress: true,
        }
    }
}

/// Converts a seconds value from configuration into a `Duration`.
pub fn seconds(value: f64, name: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        TranslatorError::configuration(format!(
            "{} must be a finite, non-negative number of seconds (got {})",
            name, value
        ))
    })
}

/// A source markdown file split into lines that keep their terminators.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl Document {
    pub fn from_text(path: PathBuf, text: &str) -> Self {
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self { path, lines }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    FencedCode,
    InlineCode,
    Image,
    Link,
    HtmlTag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub token: String,
    pub kind: SpanKind,
    pub original: String,
}

/// Placeholder tokens of one block, in the order they were issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderTable {
    spans: Vec<ProtectedSpan>,
}

impl PlaceholderTable {
    pub fn push(&mut self, span: ProtectedSpan) {
        self.spans.push(span);
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[ProtectedSpan] {
        &self.spans
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.spans
            .iter()
            .find(|span| span.token == token)
            .map(|span| span.original.as_str())
    }

    /// Puts the original spans back into `translated`.
    ///
    /// Later spans can enclose earlier tokens (a link around inline code),
    /// so tokens are substituted newest first.
    pub fn restore(&self, translated: &str) -> String {
        let mut restored = translated.to_string();
        for span in self.spans.iter().rev() {
            if restored.contains(&span.token) {
                restored = restored.replace(&span.token, &span.original);
            }
        }
        restored
    }
}

#[derive(Debug, Clone)]
pub struct MaskedBlock {
    pub text: String,
    pub placeholders: PlaceholderTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub chunks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkReport {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub source_language: SourceLanguage,
    pub target_language: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub translated: Vec<TranslatedFile>,
    pub failed: Vec<FailedFile>,
}

impl WalkReport {
    pub fn total_files(&self) -> usize {
        self.translated.len() + self.failed.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedFile {
    pub source: PathBuf,
    pub output: PathBuf,
}
