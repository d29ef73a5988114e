use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request for page {page} failed: {source}")]
    Request {
        page: usize,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request for page {page} timed out.")]
    Timeout { page: usize },
    #[error("Page {page} answered with HTTP status {status}.")]
    HttpStatus { page: usize, status: u16 },

    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
}

impl Error {
    /// Wraps a `reqwest` failure for `page`, splitting out timeouts and bad statuses.
    pub(crate) fn from_reqwest(page: usize, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout { page }
        } else if let Some(status) = err.status() {
            Error::HttpStatus {
                page,
                status: status.as_u16(),
            }
        } else {
            Error::Request { page, source: err }
        }
    }

    /// True for failures that come from talking to the site, which end a crawl
    /// without losing what was already collected.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Request { .. } | Error::Timeout { .. } | Error::HttpStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_family() {
        assert!(Error::Timeout { page: 3 }.is_transport());
        assert!(Error::HttpStatus { page: 1, status: 503 }.is_transport());
        assert!(!Error::InvalidConfig("timeout".into()).is_transport());
        assert!(!Error::Io(std::io::Error::other("disk")).is_transport());
    }

    #[test]
    fn messages_name_the_page() {
        let msg = Error::HttpStatus { page: 4, status: 404 }.to_string();
        assert_eq!(msg, "Page 4 answered with HTTP status 404.");
        assert_eq!(Error::Timeout { page: 2 }.to_string(), "Request for page 2 timed out.");
    }
}
