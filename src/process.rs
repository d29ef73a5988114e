use chrono::{DateTime, Local};

use crate::parse::parse_page;
use crate::request::Fetch;
use crate::{info_time, warn_time, Config, Error, Record, START_PAGE};

/// How a crawl ended.
#[derive(Debug)]
pub enum CrawlStatus {
    /// The site ran out of rows, or the page limit was reached.
    Done,
    /// A page couldn't be fetched. Records from earlier pages are kept.
    Failed(Error),
}

impl CrawlStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, CrawlStatus::Done)
    }
}

/// Everything a finished crawl hands over to the writer.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Page-then-row order.
    pub records: Vec<Record>,
    pub status: CrawlStatus,
    /// Number of fetch calls made, successful or not.
    pub pages_fetched: usize,
    pub skipped_rows: usize,
}

/// Receives progress from the crawl loop. Every method defaults to doing nothing.
pub trait CrawlObserver {
    fn on_page(&mut self, _page_num: usize, _page_records: usize, _total_records: usize) {}
    fn on_skipped_row(&mut self, _page_num: usize, _cell_count: usize) {}
    fn on_finish(&mut self, _status: &CrawlStatus, _total_records: usize) {}
}

impl CrawlObserver for () {}

/// Default observer, prints timestamped progress lines.
#[derive(Debug)]
pub struct LogObserver {
    start_time: DateTime<Local>,
}

impl Default for LogObserver {
    fn default() -> Self {
        LogObserver {
            start_time: Local::now(),
        }
    }
}

impl CrawlObserver for LogObserver {
    fn on_page(&mut self, page_num: usize, page_records: usize, total_records: usize) {
        info_time!("Scraped page {page_num}: {page_records} records, {total_records} total");
    }

    fn on_skipped_row(&mut self, page_num: usize, cell_count: usize) {
        warn_time!("Skipped a row with {cell_count} cells on page {page_num}");
    }

    fn on_finish(&mut self, status: &CrawlStatus, total_records: usize) {
        match status {
            CrawlStatus::Done => info_time!(
                self.start_time,
                "Crawl DONE: {} records",
                total_records
            ),
            CrawlStatus::Failed(e) => warn_time!(
                "Crawl FAILED after {} records: {}",
                total_records,
                e
            ),
        }
    }
}

/// Walks the site one page at a time until it runs out of rows or a request fails.
///
/// The crawler owns the fetcher, so its HTTP client lives exactly as long as the crawl.
pub struct Crawler<F, O = LogObserver> {
    fetcher: F,
    observer: O,
    config: Config,
}

impl<F: Fetch> Crawler<F, LogObserver> {
    pub fn new(fetcher: F, config: Config) -> Self {
        Crawler::with_observer(fetcher, config, LogObserver::default())
    }
}

impl<F: Fetch, O: CrawlObserver> Crawler<F, O> {
    pub fn with_observer(fetcher: F, config: Config, observer: O) -> Self {
        Crawler {
            fetcher,
            observer,
            config,
        }
    }

    /// Runs the crawl to completion. A failed request ends the crawl but is not
    /// returned as an `Err`, it is reported in `CrawlOutcome::status` next to
    /// the records gathered so far.
    pub async fn run(self) -> CrawlOutcome {
        let Crawler {
            fetcher,
            mut observer,
            config,
        } = self;

        let filter_term = config.filter_term.as_deref();
        let mut records = Vec::new();
        let mut skipped_rows = 0;
        let mut pages_fetched = 0;

        let mut page_num = START_PAGE;
        let status = loop {
            pages_fetched += 1;
            let page = match fetcher.fetch(page_num, filter_term).await {
                Ok(html) => parse_page(html).await,
                Err(e) => Err(e),
            };
            let page = match page {
                Ok(page) => page,
                Err(e) => break CrawlStatus::Failed(e),
            };

            if !page.has_more {
                break CrawlStatus::Done;
            }

            for cell_count in &page.skipped {
                observer.on_skipped_row(page_num, *cell_count);
            }
            skipped_rows += page.skipped.len();
            let page_records = page.records.len();
            records.extend(page.records);
            observer.on_page(page_num, page_records, records.len());

            if config.max_pages.is_some_and(|max| page_num >= max) {
                break CrawlStatus::Done;
            }

            tokio::time::sleep(config.delay).await;
            page_num += 1;
        };
        // Release the client before handing the results over.
        drop(fetcher);

        observer.on_finish(&status, records.len());
        CrawlOutcome {
            records,
            status,
            pages_fetched,
            skipped_rows,
        }
    }
}
