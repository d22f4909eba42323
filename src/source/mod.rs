//! Result sources: the capability that turns a keyword into an ordered list
//! of organic result URLs.
//!
//! Real implementations drive a browser or call a search API and own whatever
//! handles that requires. The analysis code only sees [`ResultSource`].

pub mod fixture;
pub mod organic;
pub mod timeout;

pub use fixture::FixtureSource;
pub use organic::{filter_organic_links, DEFAULT_EXCLUDED_HOST};
pub use timeout::TimeoutSource;

use crate::core::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies search-engine result URLs for a keyword.
///
/// Implementations must return at most `max_results` URLs, in rank order.
/// Returning fewer (including none) is fine. Failures are reported as errors
/// and absorbed by the comparator.
#[async_trait]
pub trait ResultSource: Send + Sync {
    fn name(&self) -> String;

    async fn fetch_results(&self, keyword: &str, max_results: usize) -> Result<Vec<String>>;
}

#[async_trait]
impl<S: ResultSource + ?Sized> ResultSource for Arc<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    async fn fetch_results(&self, keyword: &str, max_results: usize) -> Result<Vec<String>> {
        (**self).fetch_results(keyword, max_results).await
    }
}

#[async_trait]
impl<S: ResultSource + ?Sized> ResultSource for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    async fn fetch_results(&self, keyword: &str, max_results: usize) -> Result<Vec<String>> {
        (**self).fetch_results(keyword, max_results).await
    }
}
