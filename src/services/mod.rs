pub mod chunker;
pub mod client;
pub mod file_translator;
pub mod paths;
pub mod protector;
pub mod provider;
pub mod walker;

pub use chunker::chunk_lines;
pub use client::{RetryPolicy, TranslationClient};
pub use file_translator::{FileTranslator, FileTranslatorOptions};
pub use paths::output_path;
pub use protector::SpanProtector;
pub use provider::{GoogleTranslateProvider, TranslationProvider};
pub use walker::FolderWalker;
