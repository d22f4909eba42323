//! Runs a keyword duplicate analysis over a YAML fixture and prints the
//! report as JSON.
//!
//! ```text
//! keyword_report <fixture.yaml> [--config analysis.yaml] [--target KEYWORD] [-v]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use keyword_dedup::{AnalysisConfig, FixtureSource, KeywordAnalysisReport, KeywordAnalyzer};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML fixture mapping keywords to their result URLs
    fixture: PathBuf,

    /// Analysis settings (caps, concurrency, pacing, timeout)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rank every other fixture keyword against this one instead of
    /// comparing all pairs
    #[arg(long)]
    target: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the report, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_yaml_file(path)?,
        None => AnalysisConfig::default(),
    };
    let fixture = FixtureSource::from_yaml_file(&args.fixture)?;
    let keywords = fixture.keywords();
    info!(
        "Loaded {} keywords from {}",
        keywords.len(),
        args.fixture.display()
    );

    let analyzer = KeywordAnalyzer::new(fixture, config)?;
    let report = match &args.target {
        Some(target) => {
            let comparisons = analyzer.find_most_similar(target, &keywords).await?;
            let candidates = keywords.iter().filter(|k| *k != target).count();
            KeywordAnalysisReport::for_target(target.clone(), candidates, comparisons)
        }
        None => {
            let comparisons = analyzer.analyze_list(&keywords).await?;
            KeywordAnalysisReport::for_list(keywords.len(), comparisons)
        }
    };

    info!(
        "Report {}: {} comparisons, {} duplicate pairs",
        report.id,
        report.comparisons.len(),
        report.duplicate_pairs
    );
    println!("{}", report.to_json_pretty()?);
    Ok(())
}
