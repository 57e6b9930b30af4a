//! Plain HTTP transport with a one-shot `curl` fallback.
//!
//! Some athletics sites answer `403` to anything that is not a real browser
//! TLS stack; for those the page is re-requested once through `curl`.

use std::time::Duration;

use reqwest::Client;
use tokio::process::Command;
use tracing::{debug, instrument, warn};
use url::Url;

use rosters_shared::{HttpConfig, Result, RosterError};

/// `Accept` header sent by both transports.
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A fetched document and how it was obtained.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Requested URL.
    pub url: String,
    /// HTTP status (`200` when the curl fallback produced a body).
    pub status: u16,
    /// Response body.
    pub body: String,
    /// Whether the body came from the curl fallback.
    pub via_curl: bool,
}

impl FetchedPage {
    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for roster pages.
pub struct HttpFetcher {
    client: Client,
    config: HttpConfig,
}

impl HttpFetcher {
    /// Build a client from the `[http]` config section.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RosterError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// GET `url`. Non-2xx responses are returned, not raised; a `403` is
    /// retried once through `curl` when enabled. Malformed or non-HTTP URLs
    /// are rejected before any request is made.
    #[instrument(skip(self))]
    pub async fn get(&self, url: &str) -> Result<FetchedPage> {
        let target = parse_http_url(url)?;
        debug!("fetching page");

        let response = self
            .client
            .get(target)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(|e| RosterError::Network(format!("{url}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RosterError::Network(format!("{url}: body read failed: {e}")))?;

        if status == 403 && self.config.curl_fallback {
            warn!(status, "forbidden, trying curl fallback");
            match self.fetch_with_curl(url).await {
                Ok(content) if !content.is_empty() => {
                    return Ok(FetchedPage {
                        url: url.to_string(),
                        status: 200,
                        body: content,
                        via_curl: true,
                    });
                }
                Ok(_) => warn!("curl fallback returned an empty body"),
                Err(e) => warn!(error = %e, "curl fallback failed"),
            }
        }

        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
            via_curl: false,
        })
    }

    async fn fetch_with_curl(&self, url: &str) -> Result<String> {
        let args = curl_args(url, &self.config.user_agent);
        let output = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            Command::new(&self.config.curl_path)
                .args(&args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| RosterError::Network(format!("{url}: curl timed out")))?
        .map_err(|e| RosterError::Network(format!("failed to run {}: {e}", self.config.curl_path)))?;

        if !output.status.success() {
            return Err(RosterError::Network(format!(
                "{url}: curl exited with {}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| RosterError::validation(format!("invalid URL {url:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(RosterError::validation(format!(
            "unsupported URL scheme {other:?} in {url:?}"
        ))),
    }
}

/// Arguments for a silent, redirect-following, compressed curl request.
pub fn curl_args(url: &str, user_agent: &str) -> Vec<String> {
    vec![
        "-s".into(),
        "-L".into(),
        url.into(),
        "-H".into(),
        format!("User-Agent: {user_agent}"),
        "-H".into(),
        format!("Accept: {ACCEPT}"),
        "--compressed".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> HttpConfig {
        HttpConfig {
            timeout_secs: 5,
            ..HttpConfig::default()
        }
    }

    #[test]
    fn curl_args_include_browser_headers() {
        let args = curl_args("https://example.edu/roster", "UA/1.0");
        assert_eq!(args[0], "-s");
        assert_eq!(args[2], "https://example.edu/roster");
        assert!(args.contains(&"User-Agent: UA/1.0".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--compressed"));
    }

    #[tokio::test]
    async fn get_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sports/womens-volleyball/roster/2023-24"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>roster</html>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config()).unwrap();
        let url = format!("{}/sports/womens-volleyball/roster/2023-24", server.uri());
        let page = fetcher.get(&url).await.unwrap();

        assert!(page.is_success());
        assert_eq!(page.body, "<html>roster</html>");
        assert!(!page.via_curl);
    }

    #[tokio::test]
    async fn not_found_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config()).unwrap();
        let page = fetcher.get(&format!("{}/nope", server.uri())).await.unwrap();
        assert_eq!(page.status, 404);
        assert!(!page.is_success());
    }

    #[tokio::test]
    async fn forbidden_keeps_original_page_when_curl_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
            .mount(&server)
            .await;

        let cfg = HttpConfig {
            curl_path: "rosters-test-no-such-curl".into(),
            ..config()
        };
        let fetcher = HttpFetcher::new(&cfg).unwrap();
        let page = fetcher.get(&format!("{}/roster", server.uri())).await.unwrap();

        assert_eq!(page.status, 403);
        assert_eq!(page.body, "blocked");
        assert!(!page.via_curl);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn forbidden_is_replaced_by_curl_body() {
        use std::os::unix::fs::PermissionsExt;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
            .mount(&server)
            .await;

        let dir = std::env::temp_dir().join(format!("rosters-curl-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let stub = dir.join("curl");
        std::fs::write(&stub, "#!/bin/sh\necho '<html>from curl</html>'\n").unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

        let cfg = HttpConfig {
            curl_path: stub.to_string_lossy().into_owned(),
            ..config()
        };
        let fetcher = HttpFetcher::new(&cfg).unwrap();
        let page = fetcher.get(&format!("{}/roster", server.uri())).await.unwrap();

        assert_eq!(page.status, 200);
        assert!(page.is_success());
        assert!(page.via_curl);
        assert_eq!(page.body, "<html>from curl</html>\n");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn malformed_urls_are_rejected() {
        let fetcher = HttpFetcher::new(&config()).unwrap();
        for url in ["not a url", "/sports/vb/roster/2023-24", "ftp://example.edu/roster"] {
            let err = fetcher.get(url).await.unwrap_err();
            assert!(matches!(err, RosterError::Validation { .. }), "{url}: {err}");
        }
    }
}
