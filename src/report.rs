use crate::core::errors::Result;
use crate::similarity::ComparisonResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a report was produced from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportScope {
    /// All pairs of a keyword list
    List,
    /// Candidates ranked against one target
    Target { target: String },
}

/// A finished analysis run, shaped for storage or an HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysisReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub scope: ReportScope,
    pub keyword_count: usize,
    pub duplicate_pairs: usize,
    pub degraded_comparisons: usize,
    pub comparisons: Vec<ComparisonResult>,
}

impl KeywordAnalysisReport {
    pub fn new(scope: ReportScope, keyword_count: usize, comparisons: Vec<ComparisonResult>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            scope,
            keyword_count,
            duplicate_pairs: comparisons.iter().filter(|c| c.is_duplicate).count(),
            degraded_comparisons: comparisons.iter().filter(|c| c.is_degraded()).count(),
            comparisons,
        }
    }

    pub fn for_list(keyword_count: usize, comparisons: Vec<ComparisonResult>) -> Self {
        Self::new(ReportScope::List, keyword_count, comparisons)
    }

    pub fn for_target(
        target: impl Into<String>,
        candidate_count: usize,
        comparisons: Vec<ComparisonResult>,
    ) -> Self {
        Self::new(
            ReportScope::Target {
                target: target.into(),
            },
            candidate_count,
            comparisons,
        )
    }

    pub fn duplicates(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.comparisons.iter().filter(|c| c.is_duplicate)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
