//! Session-bound HTTP client for the site.
//!
//! Every request carries the three DLE session cookies plus browser-like
//! headers. A response that turns out to be the site's login page means the
//! cookies were rejected and surfaces as [`LookupError::Unauthenticated`]
//! immediately; there is no retry logic.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, ORIGIN, REFERER, USER_AGENT};

use crate::config::SessionConfig;
use crate::error::{ConfigError, LookupError, ProviderError};

const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36";

pub struct SiteClient {
    http: reqwest::Client,
    base_url: String,
}

impl SiteClient {
    /// Build a client from resolved session settings. The cookie header and
    /// request timeout are fixed for the lifetime of the client.
    pub fn new(config: &SessionConfig) -> Result<Self, ProviderError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(ORIGIN, header_value("base URL", &base_url)?);
        headers.insert(REFERER, header_value("base URL", &format!("{base_url}/"))?);
        headers.insert(COOKIE, header_value("session cookies", &config.cookie_header())?);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(LookupError::Network)?;

        Ok(Self { http, base_url })
    }

    /// POST the site's search form and return the results page body.
    pub async fn search_page(&self, query: &str) -> Result<String, LookupError> {
        let url = format!("{}/index.php", self.base_url);
        let form = [("story", query), ("do", "search"), ("subaction", "search")];
        tracing::debug!(%url, query, "search request");
        let response = self.http.post(&url).form(&form).send().await?;
        self.checked_body(response).await
    }

    /// GET a page by absolute URL or site-relative path.
    pub async fn fetch_page(&self, url: &str) -> Result<String, LookupError> {
        let url = self.absolute(url);
        tracing::debug!(%url, "page request");
        let response = self.http.get(&url).send().await?;
        self.checked_body(response).await
    }

    fn absolute(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    async fn checked_body(&self, response: reqwest::Response) -> Result<String, LookupError> {
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        let html = response.text().await?;
        if looks_like_login_page(&html) {
            tracing::warn!("session cookies rejected, got login page");
            return Err(LookupError::Unauthenticated);
        }
        Ok(html)
    }
}

/// A DLE site answers with its login form when the session cookies are
/// rejected (directly or via redirect). The form is recognizable by its
/// `login_name` field, which regular content pages never carry.
fn looks_like_login_page(html: &str) -> bool {
    html.contains(r#"name="login_name""#) || html.contains("name='login_name'")
}

fn header_value(what: &str, raw: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(raw)
        .map_err(|_| ConfigError::Invalid(format!("{what} contains characters not valid in a header")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            dle_user_id: "42".to_string(),
            dle_password: "abc123".to_string(),
            phpsessid: "sess".to_string(),
            base_url: "https://ranobes.example/".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_absolute_joins_relative_paths() {
        let client = SiteClient::new(&test_config()).unwrap();
        assert_eq!(
            client.absolute("/novels/1-shadow-slave.html"),
            "https://ranobes.example/novels/1-shadow-slave.html"
        );
        assert_eq!(
            client.absolute("novels/1-shadow-slave.html"),
            "https://ranobes.example/novels/1-shadow-slave.html"
        );
    }

    #[test]
    fn test_absolute_keeps_full_urls() {
        let client = SiteClient::new(&test_config()).unwrap();
        assert_eq!(
            client.absolute("https://ranobes.example/novels/2.html"),
            "https://ranobes.example/novels/2.html"
        );
    }

    #[test]
    fn test_login_page_detection() {
        let login = r#"<form method="post"><input name="login_name" type="text"></form>"#;
        assert!(looks_like_login_page(login));
        assert!(!looks_like_login_page("<article>Shadow Slave</article>"));
    }

    #[test]
    fn test_rejects_cookie_values_with_newlines() {
        let mut config = test_config();
        config.phpsessid = "bad\nvalue".to_string();
        assert!(SiteClient::new(&config).is_err());
    }
}
