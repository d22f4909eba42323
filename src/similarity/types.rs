use serde::{Deserialize, Serialize};

/// Pairs scoring strictly above this are duplicates; exactly 70 is not.
pub const DUPLICATE_THRESHOLD: u8 = 70;

/// Outcome of comparing the result sets of two keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub keyword1: String,
    pub keyword2: String,
    /// Rounded Jaccard index of the two result sets, 0..=100
    pub similarity_score: u8,
    /// URLs present in both result sets
    pub common_results: Vec<String>,
    pub is_duplicate: bool,
    /// Keywords whose lookup failed and were scored as empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_keywords: Vec<String>,
}

impl ComparisonResult {
    pub fn new(
        keyword1: impl Into<String>,
        keyword2: impl Into<String>,
        similarity_score: u8,
        common_results: Vec<String>,
    ) -> Self {
        Self {
            keyword1: keyword1.into(),
            keyword2: keyword2.into(),
            similarity_score,
            common_results,
            is_duplicate: is_duplicate_score(similarity_score),
            degraded_keywords: Vec::new(),
        }
    }

    /// True when at least one side was scored as empty because its lookup failed
    pub fn is_degraded(&self) -> bool {
        !self.degraded_keywords.is_empty()
    }

    /// True when `keyword` is either side of the pair
    pub fn involves(&self, keyword: &str) -> bool {
        self.keyword1 == keyword || self.keyword2 == keyword
    }
}

pub fn is_duplicate_score(score: u8) -> bool {
    score > DUPLICATE_THRESHOLD
}

/// Result URLs fetched for a single keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSearchResults {
    pub keyword: String,
    pub results: Vec<String>,
    pub count: usize,
}

impl KeywordSearchResults {
    pub fn new(keyword: impl Into<String>, results: Vec<String>) -> Self {
        Self {
            keyword: keyword.into(),
            count: results.len(),
            results,
        }
    }
}
