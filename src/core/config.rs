use crate::core::errors::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Tuning knobs for keyword analysis runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Result cap for single-keyword lookups when the caller gives none
    pub default_max_results: usize,
    /// Result cap requested per keyword inside a pairwise comparison
    pub comparison_max_results: usize,
    /// Maximum number of pair comparisons in flight at once
    pub max_concurrent_comparisons: usize,
    /// Minimum gap between the starts of two comparisons, in milliseconds.
    /// Holds across all concurrent comparisons, not per slot.
    pub pair_delay_ms: u64,
    /// Per-fetch deadline in milliseconds (None = left to the source)
    pub source_timeout_ms: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_max_results: 10,
            comparison_max_results: 20,
            max_concurrent_comparisons: 3,
            pair_delay_ms: 0,
            source_timeout_ms: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_max_results == 0 {
            return Err(AnalysisError::configuration(
                "default_max_results must be greater than 0",
                "default_max_results",
            ));
        }
        if self.comparison_max_results == 0 {
            return Err(AnalysisError::configuration(
                "comparison_max_results must be greater than 0",
                "comparison_max_results",
            ));
        }
        if self.max_concurrent_comparisons == 0 {
            return Err(AnalysisError::configuration(
                "max_concurrent_comparisons must be greater than 0",
                "max_concurrent_comparisons",
            ));
        }
        if self.source_timeout_ms == Some(0) {
            return Err(AnalysisError::configuration(
                "source_timeout_ms must be greater than 0 when set",
                "source_timeout_ms",
            ));
        }
        Ok(())
    }

    /// One comparison at a time, starts at least `pair_delay` apart, for
    /// upstreams that block bursts of lookups.
    pub fn sequential(pair_delay: Duration) -> Self {
        Self {
            max_concurrent_comparisons: 1,
            pair_delay_ms: pair_delay.as_millis() as u64,
            ..Self::default()
        }
    }

    pub fn pair_delay(&self) -> Duration {
        Duration::from_millis(self.pair_delay_ms)
    }

    pub fn source_timeout(&self) -> Option<Duration> {
        self.source_timeout_ms.map(Duration::from_millis)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::io(format!("read config {}", path.display()), e))?;
        let config = Self::from_yaml_str(&contents)?;
        debug!("Loaded analysis config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
