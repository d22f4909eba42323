use super::comparator::{validate_keyword, KeywordComparator};
use super::types::{ComparisonResult, KeywordSearchResults};
use crate::core::config::AnalysisConfig;
use crate::core::errors::{AnalysisError, Result};
use crate::source::ResultSource;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Batch keyword analysis on top of [`KeywordComparator`].
///
/// Pair comparisons run at most `max_concurrent_comparisons` at a time.
/// Output is ranked by score, highest first; equal scores keep the order in
/// which their pairs were generated.
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    comparator: KeywordComparator,
    config: AnalysisConfig,
}

impl KeywordAnalyzer {
    pub fn new<S: ResultSource + 'static>(source: S, config: AnalysisConfig) -> Result<Self> {
        Self::from_shared(Arc::new(source), config)
    }

    pub fn from_shared(source: Arc<dyn ResultSource>, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            comparator: KeywordComparator::from_shared(source, &config),
            config,
        })
    }

    pub fn comparator(&self) -> &KeywordComparator {
        &self.comparator
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub async fn compare(&self, keyword1: &str, keyword2: &str) -> ComparisonResult {
        self.comparator.compare(keyword1, keyword2).await
    }

    /// Raw result URLs for one keyword, capped at `max_results` or the
    /// configured default. A failed lookup yields an empty list.
    pub async fn search_results(
        &self,
        keyword: &str,
        max_results: Option<usize>,
    ) -> Result<KeywordSearchResults> {
        validate_keyword(keyword, "keyword")?;
        let max_results = max_results.unwrap_or(self.config.default_max_results);
        if max_results == 0 {
            return Err(AnalysisError::invalid_field(
                "max_results must be greater than 0",
                "max_results",
            ));
        }
        let fetched = self.comparator.fetch_or_empty(keyword, max_results).await;
        Ok(KeywordSearchResults::new(keyword, fetched.urls))
    }

    /// Compares every unordered pair of `keywords`.
    ///
    /// Needs at least two keywords. Blank entries are skipped with a warning;
    /// the remaining `n` produce `n * (n - 1) / 2` results, none filtered out
    /// by duplicate status.
    pub async fn analyze_list<K: AsRef<str>>(&self, keywords: &[K]) -> Result<Vec<ComparisonResult>> {
        if keywords.len() < 2 {
            return Err(AnalysisError::invalid_field(
                format!("at least 2 keywords are required, got {}", keywords.len()),
                "keywords",
            ));
        }

        let keywords = non_blank(keywords, "keywords");
        let pairs = unordered_pairs(keywords.as_slice());
        info!(
            "Analyzing {} keywords ({} pairs, up to {} at a time)",
            keywords.len(),
            pairs.len(),
            self.config.max_concurrent_comparisons
        );

        let results = self.run_pairs(pairs).await;
        log_summary("analyze_list", &results);
        Ok(results)
    }

    /// Ranks `candidates` by similarity to `target`. The target itself is
    /// skipped wherever it appears among the candidates, and so are blank
    /// candidates.
    pub async fn find_most_similar<K: AsRef<str>>(
        &self,
        target: &str,
        candidates: &[K],
    ) -> Result<Vec<ComparisonResult>> {
        validate_keyword(target, "target")?;

        let pairs: Vec<(String, String)> = non_blank(candidates, "candidates")
            .into_iter()
            .filter(|candidate| *candidate != target)
            .map(|candidate| (target.to_string(), candidate.to_string()))
            .collect();

        if pairs.is_empty() {
            debug!("No candidates left to compare with '{}'", target);
            return Ok(Vec::new());
        }
        info!("Ranking {} candidates against '{}'", pairs.len(), target);

        let results = self.run_pairs(pairs).await;
        log_summary("find_most_similar", &results);
        Ok(results)
    }

    /// [`analyze_list`](Self::analyze_list) that stops when `cancel` fires.
    ///
    /// Comparisons that have not started are never started; the ones in
    /// flight are abandoned and no partial results are returned. Dropping
    /// the sender without sending does not cancel.
    pub async fn analyze_list_until<K: AsRef<str>>(
        &self,
        keywords: &[K],
        cancel: oneshot::Receiver<()>,
    ) -> Result<Vec<ComparisonResult>> {
        tokio::select! {
            biased;
            _ = cancel_signal(cancel) => {
                info!("analyze_list cancelled");
                Err(AnalysisError::cancelled("analyze_list"))
            }
            results = self.analyze_list(keywords) => results,
        }
    }

    pub async fn find_most_similar_until<K: AsRef<str>>(
        &self,
        target: &str,
        candidates: &[K],
        cancel: oneshot::Receiver<()>,
    ) -> Result<Vec<ComparisonResult>> {
        tokio::select! {
            biased;
            _ = cancel_signal(cancel) => {
                info!("find_most_similar cancelled");
                Err(AnalysisError::cancelled("find_most_similar"))
            }
            results = self.find_most_similar(target, candidates) => results,
        }
    }

    async fn run_pairs(&self, pairs: Vec<(String, String)>) -> Vec<ComparisonResult> {
        let comparator = &self.comparator;
        let start_gate = pacer(self.config.pair_delay());
        let start_gate = start_gate.as_ref();

        // `buffered` keeps generation order and only polls futures it has
        // room for, so unstarted pairs stay unstarted.
        let mut results: Vec<ComparisonResult> = stream::iter(pairs)
            .map(|(keyword1, keyword2)| async move {
                if let Some(gate) = start_gate {
                    gate.lock().await.tick().await;
                }
                comparator.compare(&keyword1, &keyword2).await
            })
            .buffered(self.config.max_concurrent_comparisons)
            .collect()
            .await;

        rank(&mut results);
        results
    }
}

/// Every `(keywords[i], keywords[j])` with `i < j`, outer index ascending.
pub fn unordered_pairs<K: AsRef<str>>(keywords: &[K]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(keywords.len() * keywords.len().saturating_sub(1) / 2);
    for (i, first) in keywords.iter().enumerate() {
        for second in &keywords[i + 1..] {
            pairs.push((first.as_ref().to_string(), second.as_ref().to_string()));
        }
    }
    pairs
}

/// Stable sort by score, highest first.
pub fn rank(results: &mut [ComparisonResult]) {
    results.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));
}

/// Shared start gate: the first tick is immediate, every later one comes at
/// least `delay` after the previous, whatever the concurrency.
fn pacer(delay: Duration) -> Option<Mutex<Interval>> {
    if delay.is_zero() {
        return None;
    }
    let mut ticks = interval(delay);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    Some(Mutex::new(ticks))
}

fn non_blank<'a, K: AsRef<str>>(keywords: &'a [K], field: &str) -> Vec<&'a str> {
    keywords
        .iter()
        .map(|keyword| keyword.as_ref())
        .filter(|keyword| {
            let blank = keyword.trim().is_empty();
            if blank {
                warn!("Skipping blank entry in {}", field);
            }
            !blank
        })
        .collect()
}

async fn cancel_signal(cancel: oneshot::Receiver<()>) {
    if cancel.await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn log_summary(operation: &str, results: &[ComparisonResult]) {
    let duplicates = results.iter().filter(|r| r.is_duplicate).count();
    let degraded = results.iter().filter(|r| r.is_degraded()).count();
    info!(
        "{} finished: {} comparisons, {} duplicates, {} degraded",
        operation,
        results.len(),
        duplicates,
        degraded
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_generation_order() {
        let pairs = unordered_pairs(&["k1", "k2", "k3", "k4"]);
        let expected: Vec<(String, String)> = [
            ("k1", "k2"),
            ("k1", "k3"),
            ("k1", "k4"),
            ("k2", "k3"),
            ("k2", "k4"),
            ("k3", "k4"),
        ]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_pairs_of_short_lists() {
        assert!(unordered_pairs::<&str>(&[]).is_empty());
        assert!(unordered_pairs(&["only"]).is_empty());
    }

    #[test]
    fn test_rank_is_stable() {
        let mut results = vec![
            ComparisonResult::new("k1", "k2", 90, vec![]),
            ComparisonResult::new("k1", "k3", 50, vec![]),
            ComparisonResult::new("k2", "k3", 90, vec![]),
            ComparisonResult::new("k2", "k4", 95, vec![]),
        ];
        rank(&mut results);
        let order: Vec<(&str, &str)> = results
            .iter()
            .map(|r| (r.keyword1.as_str(), r.keyword2.as_str()))
            .collect();
        assert_eq!(order, vec![("k2", "k4"), ("k1", "k2"), ("k2", "k3"), ("k1", "k3")]);
    }
}
