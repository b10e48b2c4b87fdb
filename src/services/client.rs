use crate::error::{Result, TranslatorError};
use crate::services::provider::TranslationProvider;
use crate::types::SourceLanguage;
use std::time::Duration;
use tracing::{debug, warn};

/// How often a failed provider call is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(TranslatorError::configuration(
                "max attempts must be greater than 0",
            ));
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }
}

pub struct TranslationClient {
    provider: Box<dyn TranslationProvider>,
    retry: RetryPolicy,
}

impl TranslationClient {
    pub fn new(provider: Box<dyn TranslationProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translates `text`, retrying provider failures with a fixed delay.
    ///
    /// Once every attempt has failed the last provider error is returned as
    /// the source of `TranslatorError::TranslationProvider`.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &SourceLanguage,
        target_language: &str,
    ) -> Result<String> {
        let max_attempts = self.retry.max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self
                .provider
                .translate(text, source_language, target_language)
                .await
            {
                Ok(translated) => {
                    if attempt > 1 {
                        debug!("Provider succeeded on attempt {}/{}", attempt, max_attempts);
                    }
                    return Ok(translated);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        "{} translation failed (attempt {}/{}): {}",
                        self.provider.name(),
                        attempt,
                        max_attempts,
                        e
                    );
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => {
                    warn!(
                        "{} translation failed (attempt {}/{}), giving up: {}",
                        self.provider.name(),
                        attempt,
                        max_attempts,
                        e
                    );
                    return Err(TranslatorError::TranslationProvider {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fails the first `failures` calls, then echoes the input.
    struct FlakyProvider {
        failures: usize,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TranslationProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn translate(&self, text: &str, _: &SourceLanguage, _: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(TranslatorError::provider(format!("failure #{}", call)))
            } else {
                Ok(text.to_uppercase())
            }
        }
    }

    fn client(failures: usize, max_attempts: u32) -> (TranslationClient, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FlakyProvider {
            failures,
            calls: Arc::clone(&calls),
        };
        let retry = RetryPolicy::new(max_attempts, Duration::ZERO).unwrap();
        (TranslationClient::new(Box::new(provider), retry), calls)
    }

    #[tokio::test]
    async fn test_success_is_not_retried() {
        let (client, calls) = client(0, 3);

        let result = client.translate("hi", &SourceLanguage::Auto, "fa").await.unwrap();
        assert_eq!(result, "HI");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_on_third_attempt() {
        let (client, calls) = client(2, 3);

        let result = client.translate("hi", &SourceLanguage::Auto, "fa").await.unwrap();
        assert_eq!(result, "HI");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_report_last_error() {
        let (client, calls) = client(3, 3);

        let err = client.translate("hi", &SourceLanguage::Auto, "fa").await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        match err {
            TranslatorError::TranslationProvider { attempts, source } => {
                assert_eq!(attempts, 3);
                assert_eq!(source.to_string(), "Translation provider error: failure #3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_waits_between_attempts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FlakyProvider {
            failures: 1,
            calls: Arc::clone(&calls),
        };
        let retry = RetryPolicy::new(2, Duration::from_millis(30)).unwrap();
        let client = TranslationClient::new(Box::new(provider), retry);

        let started = std::time::Instant::now();
        client.translate("hi", &SourceLanguage::Auto, "fa").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let err = RetryPolicy::new(0, Duration::ZERO).unwrap_err();
        assert!(err.is_fatal());
    }
}
