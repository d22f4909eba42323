// Core infrastructure modules
pub mod core {
    pub mod config;
    pub mod errors;
}

pub mod report;
pub mod similarity; // scoring, pairwise comparison, batch analysis
pub mod source; // where result URLs come from

// Re-exports for convenience
pub use crate::core::config::AnalysisConfig;
pub use crate::core::errors::{AnalysisError, Result};
pub use report::{KeywordAnalysisReport, ReportScope};
pub use similarity::{
    ComparisonResult, KeywordAnalyzer, KeywordComparator, KeywordSearchResults,
    DUPLICATE_THRESHOLD,
};
pub use source::{FixtureSource, ResultSource, TimeoutSource};
