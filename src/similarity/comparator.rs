use super::scorer::score_with_common;
use super::types::{is_duplicate_score, ComparisonResult};
use crate::core::config::AnalysisConfig;
use crate::core::errors::{AnalysisError, Result};
use crate::source::{ResultSource, TimeoutSource};
use std::sync::Arc;
use tracing::{debug, warn};

/// Compares two keywords by the overlap of their result sets.
#[derive(Clone)]
pub struct KeywordComparator {
    source: Arc<dyn ResultSource>,
    max_results: usize,
}

impl std::fmt::Debug for KeywordComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordComparator")
            .field("source", &self.source.name())
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl KeywordComparator {
    pub fn new<S: ResultSource + 'static>(source: S, config: &AnalysisConfig) -> Self {
        Self::from_shared(Arc::new(source), config)
    }

    /// Builds a comparator over an already shared source. A configured
    /// `source_timeout_ms` wraps the source in a [`TimeoutSource`].
    pub fn from_shared(source: Arc<dyn ResultSource>, config: &AnalysisConfig) -> Self {
        let source: Arc<dyn ResultSource> = match config.source_timeout() {
            Some(limit) => Arc::new(TimeoutSource::new(source, limit)),
            None => source,
        };
        Self {
            source,
            max_results: config.comparison_max_results,
        }
    }

    pub fn source(&self) -> &Arc<dyn ResultSource> {
        &self.source
    }

    /// Fetches both result sets concurrently and scores their overlap.
    ///
    /// Never fails: a keyword whose lookup errors is scored as an empty set,
    /// which forces a score of 0 and no common results.
    pub async fn compare(&self, keyword1: &str, keyword2: &str) -> ComparisonResult {
        let (first, second) = tokio::join!(
            self.fetch_or_empty(keyword1, self.max_results),
            self.fetch_or_empty(keyword2, self.max_results)
        );

        let overlap = score_with_common(&first.urls, &second.urls);
        debug!(
            "Compared '{}' ({} results) with '{}' ({} results): score {}, {} common",
            keyword1,
            first.urls.len(),
            keyword2,
            second.urls.len(),
            overlap.score,
            overlap.common.len()
        );

        let mut degraded_keywords = Vec::new();
        if first.failed {
            degraded_keywords.push(keyword1.to_string());
        }
        if second.failed {
            degraded_keywords.push(keyword2.to_string());
        }

        ComparisonResult {
            keyword1: keyword1.to_string(),
            keyword2: keyword2.to_string(),
            similarity_score: overlap.score,
            common_results: overlap.common,
            is_duplicate: is_duplicate_score(overlap.score),
            degraded_keywords,
        }
    }

    /// [`compare`](Self::compare) with boundary validation of both keywords.
    pub async fn try_compare(&self, keyword1: &str, keyword2: &str) -> Result<ComparisonResult> {
        validate_keyword(keyword1, "keyword1")?;
        validate_keyword(keyword2, "keyword2")?;
        Ok(self.compare(keyword1, keyword2).await)
    }

    pub(crate) async fn fetch_or_empty(&self, keyword: &str, max_results: usize) -> Fetched {
        match self.source.fetch_results(keyword, max_results).await {
            Ok(mut urls) => {
                if urls.len() > max_results {
                    debug!(
                        "Source {} returned {} results for '{}', truncating to {}",
                        self.source.name(),
                        urls.len(),
                        keyword,
                        max_results
                    );
                    urls.truncate(max_results);
                }
                debug!("Fetched {} results for '{}'", urls.len(), keyword);
                Fetched { urls, failed: false }
            }
            Err(e) => {
                warn!(
                    "Lookup for '{}' failed ({}), scoring it as empty: {}",
                    keyword,
                    e.category(),
                    e
                );
                Fetched {
                    urls: Vec::new(),
                    failed: true,
                }
            }
        }
    }
}

pub(crate) struct Fetched {
    pub urls: Vec<String>,
    pub failed: bool,
}

pub(crate) fn validate_keyword(keyword: &str, field: &str) -> Result<()> {
    if keyword.trim().is_empty() {
        return Err(AnalysisError::invalid_field(
            format!("{field} must not be empty"),
            field,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixtureSource;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn fixture() -> FixtureSource {
        FixtureSource::new()
            .with_results("seo tools", ["https://a.com/1", "https://a.com/2"])
            .with_results("seo software", ["https://a.com/2", "https://a.com/1"])
            .with_results("keyword research", ["https://k.com/1", "https://k.com/2"])
            .with_results("content optimization", ["https://c.com/1"])
            .with_unavailable("broken")
    }

    #[tokio::test]
    async fn test_same_results_are_duplicates() {
        let comparator = KeywordComparator::new(fixture(), &AnalysisConfig::default());
        let result = comparator.compare("seo tools", "seo software").await;
        assert_eq!(result.similarity_score, 100);
        assert!(result.is_duplicate);
        assert_eq!(result.common_results.len(), 2);
        assert!(!result.is_degraded());
    }

    #[tokio::test]
    async fn test_disjoint_results() {
        let comparator = KeywordComparator::new(fixture(), &AnalysisConfig::default());
        let result = comparator.compare("keyword research", "content optimization").await;
        assert_eq!(result.similarity_score, 0);
        assert!(!result.is_duplicate);
        assert!(result.common_results.is_empty());
    }

    #[tokio::test]
    async fn test_failed_lookup_degrades_to_zero() {
        let comparator = KeywordComparator::new(fixture(), &AnalysisConfig::default());
        let result = comparator.compare("seo tools", "broken").await;
        assert_eq!(result.similarity_score, 0);
        assert!(!result.is_duplicate);
        assert!(result.common_results.is_empty());
        assert_eq!(result.degraded_keywords, vec!["broken".to_string()]);
    }

    struct RecordingSource {
        requested: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl ResultSource for RecordingSource {
        fn name(&self) -> String {
            "recording".to_string()
        }

        async fn fetch_results(&self, keyword: &str, max_results: usize) -> Result<Vec<String>> {
            self.requested
                .lock()
                .unwrap()
                .push((keyword.to_string(), max_results));
            Ok((0..50).map(|i| format!("https://r.com/{i}")).collect())
        }
    }

    #[tokio::test]
    async fn test_requests_comparison_cap_and_enforces_it() {
        let source = Arc::new(RecordingSource {
            requested: Mutex::new(Vec::new()),
        });
        let comparator = KeywordComparator::from_shared(source.clone(), &AnalysisConfig::default());
        let result = comparator.compare("a", "b").await;

        // both sides truncated to the same 20 URLs
        assert_eq!(result.similarity_score, 100);
        assert_eq!(result.common_results.len(), 20);

        let mut requested = source.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(requested, vec![("a".to_string(), 20), ("b".to_string(), 20)]);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_each_fetch_is_logged_at_debug() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            let comparator = KeywordComparator::new(fixture(), &AnalysisConfig::default());
            runtime.block_on(comparator.compare("seo tools", "content optimization"));
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Fetched 2 results for 'seo tools'"));
        assert!(output.contains("Fetched 1 results for 'content optimization'"));
    }

    #[tokio::test]
    async fn test_try_compare_rejects_blank_keyword() {
        let comparator = KeywordComparator::new(fixture(), &AnalysisConfig::default());
        let err = comparator.try_compare("seo tools", "  ").await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }
}
