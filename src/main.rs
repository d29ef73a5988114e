use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use puck::{info_time, store, warn_time, Config, CrawlStatus, Crawler, HttpFetcher, Result};

/// Scrapes the hockey team statistics table page by page into CSV and JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Only keep teams matching this search term.
    #[arg(short, long, env = "PUCK_TEAM")]
    team: Option<String>,

    /// Directory the CSV and JSON files are written to.
    #[arg(short, long, env = "PUCK_OUTPUT_DIR", default_value = puck::OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Base name of the output files.
    #[arg(long, env = "PUCK_FILE_STEM", default_value = puck::FILE_STEM)]
    file_stem: String,

    #[arg(long, env = "PUCK_BASE_URL", default_value = puck::BASE_URL)]
    base_url: String,

    /// Per-request timeout.
    #[arg(long, env = "PUCK_TIMEOUT_SECS", default_value_t = puck::TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Pause between two page requests.
    #[arg(long, env = "PUCK_DELAY_MS", default_value_t = puck::DELAY_MS)]
    delay_ms: u64,

    /// Stop after this many pages.
    #[arg(long, env = "PUCK_MAX_PAGES")]
    max_pages: Option<usize>,

    #[arg(long, env = "PUCK_USER_AGENT", default_value = puck::USER_AGENT)]
    user_agent: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            base_url: cli.base_url,
            output_dir: cli.output_dir,
            file_stem: cli.file_stem,
            timeout: Duration::from_secs(cli.timeout_secs),
            delay: Duration::from_millis(cli.delay_ms),
            filter_term: cli.team.filter(|t| !t.trim().is_empty()),
            user_agent: cli.user_agent,
            max_pages: cli.max_pages,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = Config::from(Cli::parse());
    config.validate()?;

    info_time!("Started scraping {}", config.base_url);
    let fetcher = HttpFetcher::new(&config)?;
    let outcome = Crawler::new(fetcher, config.clone()).run().await;

    if let CrawlStatus::Failed(e) = &outcome.status {
        warn_time!("Stopped early, keeping what was scraped: {}", e);
    }
    if outcome.skipped_rows > 0 {
        warn_time!("Skipped {} malformed rows", outcome.skipped_rows);
    }

    let written = store::write_all(&outcome.records, &config.output_dir, &config.file_stem).await?;
    match written.csv {
        Some(csv) => info_time!(
            start_time,
            "DONE: {} records saved to {} and {}",
            outcome.records.len(),
            csv.display(),
            written.json.display()
        ),
        None => warn_time!(
            "No data scraped, wrote an empty {}",
            written.json.display()
        ),
    }

    Ok(())
}
