//! Set similarity over result URL lists.
//!
//! Lists are treated as sets keyed by exact string equality. Rank order and
//! repeated entries inside one list do not affect the score.

use std::collections::HashSet;

/// Score and overlap computed together from one pass over the inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub score: u8,
    pub common: Vec<String>,
}

/// URLs present in both lists, in first-seen order of `results_a`, each once.
pub fn intersect(results_a: &[String], results_b: &[String]) -> Vec<String> {
    let in_b: HashSet<&str> = results_b.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut common = Vec::new();
    for url in results_a {
        if in_b.contains(url.as_str()) && seen.insert(url.as_str()) {
            common.push(url.clone());
        }
    }
    common
}

/// Jaccard index of the two lists scaled to 0..=100, rounded half up.
///
/// Returns 0 when either side is empty.
pub fn score(results_a: &[String], results_b: &[String]) -> u8 {
    score_with_common(results_a, results_b).score
}

pub fn score_with_common(results_a: &[String], results_b: &[String]) -> Overlap {
    let common = intersect(results_a, results_b);
    if results_a.is_empty() || results_b.is_empty() {
        return Overlap { score: 0, common };
    }

    let distinct_a: HashSet<&str> = results_a.iter().map(String::as_str).collect();
    let distinct_b: HashSet<&str> = results_b.iter().map(String::as_str).collect();
    let union = distinct_a.len() + distinct_b.len() - common.len();

    Overlap {
        score: rounded_percent(common.len(), union),
        common,
    }
}

// floor(100 * n / d + 1/2) in integers
fn rounded_percent(numerator: usize, denominator: usize) -> u8 {
    let percent = (200 * numerator + denominator) / (2 * denominator);
    percent.min(100) as u8
}
