use crate::error::{Result, TranslatorError};
use crate::services::chunker::{chunk_count, chunk_lines};
use crate::services::client::TranslationClient;
use crate::services::paths::output_path;
use crate::services::protector::SpanProtector;
use crate::types::{Document, SourceLanguage, TranslatedFile};
use std::borrow::Cow;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FileTranslatorOptions {
    pub chunk_lines: usize,
    pub source_language: SourceLanguage,
    pub target_language: String,
    pub chunk_delay: Duration,
}

/// Translates one markdown file chunk by chunk and writes the result.
pub struct FileTranslator {
    client: TranslationClient,
    protector: SpanProtector,
    options: FileTranslatorOptions,
}

impl FileTranslator {
    pub fn new(client: TranslationClient, options: FileTranslatorOptions) -> Result<Self> {
        if options.chunk_lines == 0 {
            return Err(TranslatorError::configuration(
                "chunk size must be greater than 0",
            ));
        }

        Ok(Self {
            client,
            protector: SpanProtector::new()?,
            options,
        })
    }

    pub fn options(&self) -> &FileTranslatorOptions {
        &self.options
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Nothing is written unless every chunk translated successfully.
    pub async fn translate_file(
        &self,
        source: &Path,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<TranslatedFile> {
        // Map first so a bad path fails before any provider call.
        let output = output_path(
            source,
            input_root,
            output_root,
            &self.options.target_language,
        )?;

        let document = read_document(source).await?;
        let total_chunks = chunk_count(document.lines.len(), self.options.chunk_lines);
        debug!(
            "Translating {} ({} lines, {} chunks)",
            document.path.display(),
            document.lines.len(),
            total_chunks
        );

        let mut translated = String::new();
        for (idx, chunk) in chunk_lines(&document.lines, self.options.chunk_lines)?.enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.options.chunk_delay).await;
            }

            let block = chunk.concat();
            translated.push_str(&self.translate_block(&block).await?);
            debug!("  chunk {}/{} done", idx + 1, total_chunks);
        }

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TranslatorError::FileWrite {
                    path: parent.display().to_string(),
                    source: e,
                })?;
        }

        fs::write(&output, translated)
            .await
            .map_err(|e| TranslatorError::FileWrite {
                path: output.display().to_string(),
                source: e,
            })?;

        Ok(TranslatedFile {
            source: source.to_path_buf(),
            output,
            chunks: total_chunks,
        })
    }

    /// Mask, translate, restore.
    pub async fn translate_block(&self, block: &str) -> Result<String> {
        let masked = self.protector.mask(block);
        let translated = self
            .client
            .translate(
                &masked.text,
                &self.options.source_language,
                &self.options.target_language,
            )
            .await?;
        Ok(masked.placeholders.restore(&translated))
    }
}

pub async fn read_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).await.map_err(|e| TranslatorError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    let text = decode_lossy(&bytes, path);
    Ok(Document::from_text(path.to_path_buf(), &text))
}

/// Decodes UTF-8, replacing invalid sequences with U+FFFD instead of failing.
pub fn decode_lossy(bytes: &[u8], path: &Path) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            warn!(
                "{} contains invalid UTF-8; replaced undecodable bytes",
                path.display()
            );
            text
        }
    }
}
