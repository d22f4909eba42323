use super::ResultSource;
use crate::core::errors::{AnalysisError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Puts a deadline on every lookup of the wrapped source.
///
/// An expired deadline surfaces as [`AnalysisError::Timeout`], which the
/// comparator treats like any other failed lookup.
#[derive(Debug, Clone)]
pub struct TimeoutSource<S> {
    inner: S,
    limit: Duration,
}

impl<S: ResultSource> TimeoutSource<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ResultSource> ResultSource for TimeoutSource<S> {
    fn name(&self) -> String {
        format!("{}+timeout", self.inner.name())
    }

    async fn fetch_results(&self, keyword: &str, max_results: usize) -> Result<Vec<String>> {
        match timeout(self.limit, self.inner.fetch_results(keyword, max_results)).await {
            Ok(result) => result,
            Err(_) => {
                debug!("Lookup for '{}' exceeded {:?}", keyword, self.limit);
                Err(AnalysisError::timeout(
                    format!("fetch_results({keyword})"),
                    self.limit.as_millis() as u64,
                ))
            }
        }
    }
}
