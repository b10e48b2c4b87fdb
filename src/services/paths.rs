use crate::error::{Result, TranslatorError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn language_suffix() -> &'static Regex {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    SUFFIX.get_or_init(|| Regex::new(r"\.[a-z]{2}$").expect("valid regex"))
}

/// Computes where the translation of `source` is written.
///
/// The directories between `input_root` and the file are recreated under
/// `output_root`, an existing two-letter language suffix is dropped from
/// the stem and `.{target_language}.md` is appended. Nothing on disk is
/// touched.
pub fn output_path(
    source: &Path,
    input_root: &Path,
    output_root: &Path,
    target_language: &str,
) -> Result<PathBuf> {
    let relative = source
        .strip_prefix(input_root)
        .map_err(|_| TranslatorError::PathMapping {
            path: source.display().to_string(),
            reason: format!("not under input root {}", input_root.display()),
        })?;

    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| TranslatorError::PathMapping {
            path: source.display().to_string(),
            reason: "file name is empty or not valid UTF-8".to_string(),
        })?;

    let stem = language_suffix().replace(stem, "");
    let file_name = format!("{}.{}.md", stem, target_language);

    let mut output = output_root.to_path_buf();
    if let Some(parent) = relative.parent().filter(|p| !p.as_os_str().is_empty()) {
        output.push(parent);
    }
    output.push(file_name);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(source: &str) -> PathBuf {
        output_path(Path::new(source), Path::new("/a"), Path::new("/b"), "fa").unwrap()
    }

    #[test]
    fn test_existing_suffix_is_replaced() {
        assert_eq!(map("/a/x/readme.en.md"), PathBuf::from("/b/x/readme.fa.md"));
    }

    #[test]
    fn test_suffix_is_added() {
        assert_eq!(map("/a/x/readme.md"), PathBuf::from("/b/x/readme.fa.md"));
    }

    #[test]
    fn test_file_at_root() {
        assert_eq!(map("/a/index.md"), PathBuf::from("/b/index.fa.md"));
    }

    #[test]
    fn test_deep_structure_is_preserved() {
        assert_eq!(
            map("/a/guide/setup/install.de.md"),
            PathBuf::from("/b/guide/setup/install.fa.md")
        );
    }

    #[test]
    fn test_only_two_lowercase_letters_count_as_suffix() {
        assert_eq!(map("/a/notes.EN.md"), PathBuf::from("/b/notes.EN.fa.md"));
        assert_eq!(map("/a/notes.eng.md"), PathBuf::from("/b/notes.eng.fa.md"));
        assert_eq!(map("/a/v1.2.md"), PathBuf::from("/b/v1.2.fa.md"));
    }

    #[test]
    fn test_only_the_last_suffix_is_stripped() {
        assert_eq!(map("/a/readme.en.de.md"), PathBuf::from("/b/readme.en.fa.md"));
    }

    #[test]
    fn test_source_outside_root_is_rejected() {
        let err = output_path(
            Path::new("/elsewhere/readme.md"),
            Path::new("/a"),
            Path::new("/b"),
            "fa",
        )
        .unwrap_err();
        assert!(matches!(err, TranslatorError::PathMapping { .. }));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        assert_eq!(map("/a/x/y.md"), map("/a/x/y.md"));
    }
}
