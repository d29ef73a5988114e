//! Hockey team statistics scraper.
//! Walks the paginated forms page one page at a time and stores every team-year row
//! as CSV and JSON.

mod config;
mod error;
mod macros;
pub mod parse;
pub mod process;
mod record;
pub mod request;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use process::{CrawlObserver, CrawlOutcome, CrawlStatus, Crawler, LogObserver};
pub use record::{Record, FIELD_NAMES};
pub use request::{Fetch, HttpFetcher};

pub const BASE_URL: &str = "https://www.scrapethissite.com/pages/forms/";
pub const OUTPUT_DIR: &str = "outputs";
pub const FILE_STEM: &str = "hockey_teams";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
pub const TIMEOUT_SECS: u64 = 10;
/// Politeness interval between two page requests.
pub const DELAY_MS: u64 = 1000;
const START_PAGE: usize = 1;
/// Number of cells a data row must have to become a `Record`.
const COLUMNS: usize = 9;
