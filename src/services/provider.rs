use crate::error::{Result, TranslatorError};
use crate::types::SourceLanguage;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A stateless text translation backend.
///
/// Implementations must be safe to call repeatedly with the same input:
/// the client retries failed calls.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn translate(
        &self,
        text: &str,
        source_language: &SourceLanguage,
        target_language: &str,
    ) -> Result<String>;
}

pub const GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Longest input the public endpoint accepts in one request.
pub const GOOGLE_MAX_CHARS: usize = 5000;

pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    endpoint: Url,
}

impl GoogleTranslateProvider {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_endpoint(GOOGLE_ENDPOINT, timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = Url::parse(endpoint)?;
        Ok(Self { client, endpoint })
    }

    fn request_url(&self, source_language: &SourceLanguage, target_language: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", source_language.as_str())
            .append_pair("tl", target_language)
            .append_pair("dt", "t");
        url
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &SourceLanguage,
        target_language: &str,
    ) -> Result<String> {
        if source_language.as_str() == target_language {
            return Ok(text.to_string());
        }

        // The endpoint trims its input; keep the block's outer whitespace so
        // line terminators between chunks survive.
        let (leading, core, trailing) = split_outer_whitespace(text);
        if core.is_empty() {
            return Ok(text.to_string());
        }

        let length = core.chars().count();
        if length > GOOGLE_MAX_CHARS {
            return Err(TranslatorError::provider(format!(
                "text of {} characters exceeds the {} character limit",
                length, GOOGLE_MAX_CHARS
            )));
        }

        let url = self.request_url(source_language, target_language);
        debug!("Requesting translation of {} characters", length);

        let response = self.client.post(url).form(&[("q", core)]).send().await?;

        if !response.status().is_success() {
            return Err(TranslatorError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let translated = parse_google_response(&body)?;

        Ok(format!("{}{}{}", leading, translated.trim(), trailing))
    }
}

/// Joins the translated segments of a `translate_a/single` response.
///
/// The body looks like `[[["Hallo","Hello",null,null,1], ...], null, "en", ...]`.
pub fn parse_google_response(body: &serde_json::Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslatorError::provider("response has no translation segments"))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(|t| t.as_str()) {
            translated.push_str(text);
        }
    }

    if translated.is_empty() {
        return Err(TranslatorError::provider("response contained an empty translation"));
    }

    Ok(translated)
}

fn split_outer_whitespace(text: &str) -> (&str, &str, &str) {
    let without_leading = text.trim_start();
    let leading = &text[..text.len() - without_leading.len()];
    let core = without_leading.trim_end();
    let trailing = &without_leading[core.len()..];
    (leading, core, trailing)
}
