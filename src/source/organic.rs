/// Host whose own links are dropped from scraped result pages by default
pub const DEFAULT_EXCLUDED_HOST: &str = "google.com";

/// Reduces the raw anchors scraped from a result page to organic results.
///
/// Keeps hrefs that start with `http` and do not mention `excluded_host`,
/// preserving page order, then truncates to `max_results`. URLs are passed
/// through verbatim; no normalization happens here or anywhere downstream.
pub fn filter_organic_links<I, S>(hrefs: I, excluded_host: &str, max_results: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    hrefs
        .into_iter()
        .map(Into::into)
        .filter(|href| href.starts_with("http") && !href.contains(excluded_host))
        .take(max_results)
        .collect()
}
