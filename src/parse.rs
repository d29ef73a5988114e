use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;

use crate::{Error, Record, Result};

const TABLE_SELECTOR: &str = "table.table";
const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "td";

/// What one page of the site yielded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<Record>,
    /// `false` is the end-of-data signal: no table, or a table without data rows.
    pub has_more: bool,
    /// Cell counts of the rows that were dropped for not having exactly 9 cells.
    pub skipped: Vec<usize>,
}

impl Page {
    fn end_of_data() -> Self {
        Page::default()
    }
}

/// Parses the page on a blocking thread, `Html` is not `Send` so it never crosses an `.await`.
pub(crate) async fn parse_page(html: String) -> Result<Page> {
    spawn_blocking(move || extract(&html)).await?
}

/// Finds the statistics table, drops its header row and turns the remaining rows into records.
///
/// Rows with the wrong number of cells are skipped and reported in `Page::skipped`,
/// the rest of the page is still used.
pub fn extract(html: &str) -> Result<Page> {
    let doc = Html::parse_document(html);

    let table_selector = create_selector(TABLE_SELECTOR)?;
    let row_selector = create_selector(ROW_SELECTOR)?;
    let cell_selector = create_selector(CELL_SELECTOR)?;

    let Some(table) = doc.select(&table_selector).next() else {
        return Ok(Page::end_of_data());
    };

    // First row is the header.
    let rows: Vec<ElementRef> = table.select(&row_selector).skip(1).collect();
    if rows.is_empty() {
        return Ok(Page::end_of_data());
    }

    let mut page = Page {
        records: Vec::with_capacity(rows.len()),
        has_more: true,
        skipped: Vec::new(),
    };
    for row in rows {
        let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
        let cell_count = cells.len();
        match Record::from_cells(cells) {
            Some(record) => page.records.push(record),
            None => page.skipped.push(cell_count),
        }
    }
    Ok(page)
}

/// Text of a cell with every text node trimmed and glued back together.
#[inline]
fn cell_text(cell: ElementRef) -> String {
    cell.text().map(str::trim).collect()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
