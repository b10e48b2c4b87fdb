use crate::error::{Result, TranslatorError};
use crate::types::{MaskedBlock, PlaceholderTable, ProtectedSpan, SpanKind};
use regex::{Captures, Regex};
use tracing::debug;

/// Masks markdown spans that must reach the output untouched.
pub struct SpanProtector {
    // Applied in this exact order; each pass runs over the output of the previous one.
    patterns: Vec<(SpanKind, Regex)>,
}

impl SpanProtector {
    pub fn new() -> Result<Self> {
        let sources = [
            (SpanKind::FencedCode, r"```[\s\S]*?```"),
            (SpanKind::InlineCode, r"`[^`]+`"),
            (SpanKind::Image, r"!\[[^\]]*\]\([^\)]+\)"),
            (SpanKind::Link, r"\[[^\]]+\]\([^\)]+\)"),
            (SpanKind::HtmlTag, r"<[^>]+>"),
        ];

        let patterns = sources
            .into_iter()
            .map(|(kind, pattern)| {
                Regex::new(pattern)
                    .map(|regex| (kind, regex))
                    .map_err(|e| {
                        TranslatorError::configuration(format!(
                            "invalid {:?} pattern: {}",
                            kind, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn mask(&self, block: &str) -> MaskedBlock {
        let mut placeholders = PlaceholderTable::default();
        let mut counter = 0usize;
        let mut masked = block.to_string();

        for (kind, regex) in &self.patterns {
            let replaced = regex.replace_all(&masked, |caps: &Captures| {
                let token = next_token(&mut counter, block);
                placeholders.push(ProtectedSpan {
                    token: token.clone(),
                    kind: *kind,
                    original: caps[0].to_string(),
                });
                token
            });
            masked = replaced.into_owned();
        }

        if !placeholders.is_empty() {
            debug!("Masked {} protected spans", placeholders.len());
        }

        MaskedBlock {
            text: masked,
            placeholders,
        }
    }
}

impl Default for SpanProtector {
    fn default() -> Self {
        Self::new().expect("built-in span patterns are valid")
    }
}

pub fn placeholder_token(n: usize) -> String {
    format!("{{{{PLACEHOLDER_{}}}}}", n)
}

// Skips numbers whose token already occurs in the raw block.
fn next_token(counter: &mut usize, block: &str) -> String {
    loop {
        *counter += 1;
        let token = placeholder_token(*counter);
        if !block.contains(&token) {
            return token;
        }
    }
}
