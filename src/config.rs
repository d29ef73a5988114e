use std::path::PathBuf;
use std::time::Duration;

use crate::{
    Error, Result, BASE_URL, DELAY_MS, FILE_STEM, OUTPUT_DIR, TIMEOUT_SECS, USER_AGENT,
};

/// Everything a crawl needs to know, handed to the `Crawler` when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub output_dir: PathBuf,
    /// Base name shared by the `.csv` and `.json` output files.
    pub file_stem: String,
    pub timeout: Duration,
    /// Politeness interval between two page requests.
    pub delay: Duration,
    /// Sent as the `team` query parameter when present.
    pub filter_term: Option<String>,
    pub user_agent: String,
    /// Last page to request. `None` crawls until the site runs out of rows.
    pub max_pages: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: BASE_URL.into(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            file_stem: FILE_STEM.into(),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            delay: Duration::from_millis(DELAY_MS),
            filter_term: None,
            user_agent: USER_AGENT.into(),
            max_pages: None,
        }
    }
}

impl Config {
    /// Rejects values that would make the crawl meaningless before any request is made.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "base url must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be positive".into()));
        }
        if self.file_stem.trim().is_empty() {
            return Err(Error::InvalidConfig("file stem is empty".into()));
        }
        if self.max_pages == Some(0) {
            return Err(Error::InvalidConfig("max pages must be at least 1".into()));
        }
        Ok(())
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.file_stem))
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.file_stem))
    }
}
