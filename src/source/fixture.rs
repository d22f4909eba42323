use super::ResultSource;
use crate::core::errors::{AnalysisError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Canned results keyed by keyword.
///
/// Keywords listed under `unavailable` fail every lookup, which lets a fixture
/// describe a flaky upstream. Unknown keywords yield no results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSource {
    #[serde(default)]
    pub results: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub unavailable: HashSet<String>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results<K, I, U>(mut self, keyword: K, urls: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.results
            .insert(keyword.into(), urls.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_unavailable<K: Into<String>>(mut self, keyword: K) -> Self {
        self.unavailable.insert(keyword.into());
        self
    }

    /// Keywords in the fixture, in sorted order
    pub fn keywords(&self) -> Vec<String> {
        self.results.keys().cloned().collect()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::io(format!("read fixture {}", path.display()), e))?;
        let fixture = Self::from_yaml_str(&contents)?;
        debug!(
            "Loaded fixture {} with {} keywords",
            path.display(),
            fixture.results.len()
        );
        Ok(fixture)
    }
}

#[async_trait]
impl ResultSource for FixtureSource {
    fn name(&self) -> String {
        "fixture".to_string()
    }

    async fn fetch_results(&self, keyword: &str, max_results: usize) -> Result<Vec<String>> {
        if self.unavailable.contains(keyword) {
            return Err(AnalysisError::source_unavailable(
                keyword,
                "marked unavailable in fixture",
            ));
        }
        Ok(self
            .results
            .get(keyword)
            .map(|urls| urls.iter().take(max_results).cloned().collect())
            .unwrap_or_default())
    }
}
