use std::future::Future;

use reqwest::Client;

use crate::{Config, Error, Result};

/// Source of raw page markup. The crawl loop only talks to the site through this.
pub trait Fetch {
    /// Requests page `page_num` (1-based), optionally narrowed by `filter_term`,
    /// and returns the response body.
    fn fetch(&self, page_num: usize, filter_term: Option<&str>)
        -> impl Future<Output = Result<String>>;
}

impl<T: Fetch> Fetch for &T {
    async fn fetch(&self, page_num: usize, filter_term: Option<&str>) -> Result<String> {
        (**self).fetch(page_num, filter_term).await
    }
}

/// `Fetch` over HTTP. Holds the one `Client` used for the whole crawl,
/// so connections are reused between pages and released when the fetcher is dropped.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::InvalidConfig(format!("couldn't build HTTP client: {e}")))?;

        Ok(HttpFetcher {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, page_num: usize, filter_term: Option<&str>) -> Result<String> {
        let res = self
            .client
            .get(&self.base_url)
            .query(&page_query(page_num, filter_term))
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| Error::from_reqwest(page_num, e))?;

        let html = res
            .text()
            .await
            .map_err(|e| Error::from_reqwest(page_num, e))?;
        Ok(html)
    }
}

/// Query pairs for one page: `page_num`, plus `team` when filtering.
fn page_query(page_num: usize, filter_term: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("page_num", page_num.to_string())];
    if let Some(term) = filter_term {
        query.push(("team", term.to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use super::*;

    #[test]
    fn query_without_filter() {
        assert_eq!(page_query(1, None), vec![("page_num", "1".to_string())]);
    }

    #[test]
    fn query_with_filter() {
        assert_eq!(
            page_query(12, Some("Boston")),
            vec![("page_num", "12".to_string()), ("team", "Boston".to_string())]
        );
    }

    #[tokio::test]
    async fn fetcher_builds_from_default_config() {
        let fetcher = HttpFetcher::new(&Config::default()).unwrap();
        assert_eq!(fetcher.base_url, crate::BASE_URL);
    }

    /// Answers one connection with `response` and hands back the request head it read.
    async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/pages/forms/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_head(&mut stream).await;
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });
        (base_url, handle)
    }

    async fn read_head(stream: &mut TcpStream) -> String {
        let mut head: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        String::from_utf8(head).unwrap()
    }

    fn local_config(base_url: String) -> Config {
        Config {
            base_url,
            timeout: Duration::from_secs(5),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn bad_status_is_a_transport_failure() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let fetcher = HttpFetcher::new(&local_config(base_url)).unwrap();

        let err = fetcher.fetch(2, Some("New York")).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { page: 2, status: 503 }), "{err:?}");
        assert!(err.is_transport());

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /pages/forms/?page_num=2&team=New+York HTTP/1.1\r\n"),
            "{request}"
        );
        assert!(
            request
                .to_lowercase()
                .contains("user-agent: mozilla/5.0 (windows nt 10.0; win64; x64)\r\n"),
            "{request}"
        );
    }

    #[tokio::test]
    async fn ok_status_returns_body() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: 13\r\nconnection: close\r\n\r\n<html></html>",
        )
        .await;
        let fetcher = HttpFetcher::new(&local_config(base_url)).unwrap();

        let body = fetcher.fetch(1, None).await.unwrap();
        assert_eq!(body, "<html></html>");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /pages/forms/?page_num=1 HTTP/1.1\r\n"), "{request}");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(stream);
        });
        let config = Config {
            timeout: Duration::from_millis(200),
            ..local_config(base_url)
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        let err = fetcher.fetch(1, None).await.unwrap_err();
        assert!(matches!(err, Error::Timeout { page: 1 }), "{err:?}");
        assert!(err.is_transport());
        server.abort();
    }
}
