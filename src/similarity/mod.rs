pub mod analyzer;
pub mod comparator;
pub mod scorer;
pub mod types;

pub use analyzer::{rank, unordered_pairs, KeywordAnalyzer};
pub use comparator::KeywordComparator;
pub use scorer::{intersect, score, score_with_common, Overlap};
pub use types::{is_duplicate_score, ComparisonResult, KeywordSearchResults, DUPLICATE_THRESHOLD};
