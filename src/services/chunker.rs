use crate::error::{Result, TranslatorError};
use std::slice::Chunks;

/// Groups consecutive lines into blocks of at most `size` lines.
///
/// The returned iterator is lazy and yields borrowed slices in document
/// order; the final block may be shorter than `size`.
pub fn chunk_lines<T>(lines: &[T], size: usize) -> Result<Chunks<'_, T>> {
    if size == 0 {
        return Err(TranslatorError::configuration(
            "chunk size must be greater than 0",
        ));
    }
    Ok(lines.chunks(size))
}

/// Number of blocks `chunk_lines` produces for `line_count` lines.
pub fn chunk_count(line_count: usize, size: usize) -> usize {
    if size == 0 {
        0
    } else {
        line_count.div_ceil(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Document;
    use std::path::PathBuf;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_chunks_cover_input_in_order() {
        let input = lines(45);

        for size in [1, 2, 7, 20, 45, 100] {
            let chunks: Vec<&[String]> = chunk_lines(&input, size).unwrap().collect();
            assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= size));
            assert_eq!(chunks.len(), chunk_count(input.len(), size));

            let rebuilt: Vec<String> = chunks.concat();
            assert_eq!(rebuilt, input);
        }
    }

    #[test]
    fn test_last_chunk_may_be_short() {
        let input = lines(5);
        let sizes: Vec<usize> = chunk_lines(&input, 2).unwrap().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_zero_size_is_configuration_error() {
        let input = lines(3);
        let err = chunk_lines(&input, 0).unwrap_err();
        assert!(matches!(err, TranslatorError::Configuration { .. }));
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let input: Vec<String> = Vec::new();
        assert_eq!(chunk_lines(&input, 20).unwrap().count(), 0);
    }

    #[test]
    fn test_terminators_survive_chunking() {
        let text = "first\r\nsecond\n\nfourth without newline";
        let document = Document::from_text(PathBuf::from("a.md"), text);
        assert_eq!(document.lines.len(), 4);

        let joined: String = chunk_lines(&document.lines, 3)
            .unwrap()
            .map(|chunk| chunk.concat())
            .collect();
        assert_eq!(joined, text);
    }
}
