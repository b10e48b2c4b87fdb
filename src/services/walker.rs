use crate::error::{Result, TranslatorError};
use crate::services::file_translator::FileTranslator;
use crate::services::paths::output_path;
use crate::types::{FailedFile, PlannedFile, WalkReport};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub struct FolderWalker {
    translator: FileTranslator,
    input_root: PathBuf,
    output_root: PathBuf,
    show_progress: bool,
}

impl FolderWalker {
    pub fn new(translator: FileTranslator, input_root: PathBuf, output_root: PathBuf) -> Self {
        Self {
            translator,
            input_root,
            output_root,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Translates every markdown file under the input root.
    ///
    /// Only an invalid input root (or another configuration error) aborts the
    /// walk; any other failure is logged and recorded against its file.
    pub async fn run(&self) -> Result<WalkReport> {
        let started_at = Utc::now();
        let (input_root, output_root) = resolve_roots(&self.input_root, &self.output_root)?;
        let options = self.translator.options();

        let mut report = WalkReport {
            input_root: input_root.clone(),
            output_root: output_root.clone(),
            source_language: options.source_language.clone(),
            target_language: options.target_language.clone(),
            started_at,
            finished_at: started_at,
            translated: Vec::new(),
            failed: Vec::new(),
        };

        let files = discover_markdown_files(&input_root, Some(&output_root));
        if files.is_empty() {
            warn!("No markdown files found under {}", input_root.display());
            report.finished_at = Utc::now();
            return Ok(report);
        }

        info!(
            "Translating {} markdown files with {} from {} into {}",
            files.len(),
            self.translator.provider_name(),
            input_root.display(),
            output_root.display()
        );

        let progress = progress_bar(files.len() as u64, self.show_progress);

        for file in &files {
            if let Ok(relative) = file.strip_prefix(&input_root) {
                progress.set_message(relative.display().to_string());
            }

            match self
                .translator
                .translate_file(file, &input_root, &output_root)
                .await
            {
                Ok(translated) => {
                    progress.suspend(|| {
                        info!(
                            "Translated {} -> {}",
                            translated.source.display(),
                            translated.output.display()
                        )
                    });
                    report.translated.push(translated);
                }
                Err(e) if e.is_fatal() => {
                    progress.abandon();
                    return Err(e);
                }
                Err(e) => {
                    progress.suspend(|| warn!("Failed to translate {}: {}", file.display(), e));
                    report.failed.push(FailedFile {
                        source: file.clone(),
                        error: e.to_string(),
                    });
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        report.finished_at = Utc::now();

        info!(
            "Finished: {} translated, {} failed",
            report.translated.len(),
            report.failed.len()
        );

        Ok(report)
    }
}

/// Lists the files a walk would translate and where each would be written.
pub fn plan(input_root: &Path, output_root: &Path, target_language: &str) -> Result<Vec<PlannedFile>> {
    let (input_root, output_root) = resolve_roots(input_root, output_root)?;

    discover_markdown_files(&input_root, Some(&output_root))
        .into_iter()
        .map(|source| {
            let output = output_path(&source, &input_root, &output_root, target_language)?;
            Ok(PlannedFile { source, output })
        })
        .collect()
}

/// Recursively collects `*.md` files, sorted by name at every level.
///
/// `exclude` prunes a subtree below `root`, which keeps an output directory
/// nested in the input tree from being picked up again. Excluding the root
/// itself prunes nothing.
pub fn discover_markdown_files(root: &Path, exclude: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || exclude.map_or(true, |excluded| entry.path() != excluded)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}

fn is_markdown(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "md")
}

fn resolve_roots(input_root: &Path, output_root: &Path) -> Result<(PathBuf, PathBuf)> {
    if !input_root.is_dir() {
        return Err(TranslatorError::configuration(format!(
            "input directory does not exist or is not a directory: {}",
            input_root.display()
        )));
    }

    let input_root = input_root.canonicalize()?;
    let output_root = if output_root.exists() {
        output_root.canonicalize()?
    } else {
        output_root.to_path_buf()
    };

    Ok((input_root, output_root))
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} files {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
