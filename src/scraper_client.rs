use crate::errors::ScraperError;
use log::info;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, IntoUrl};
use std::time::Duration;
use std::time::Instant;

pub struct ScraperClient {
    client: Client,
}

impl ScraperClient {
    /// Create a new scraper client with the default timeout
    pub fn new_http(user_agent: &str) -> Result<Self, ScraperError> {
        Self::new_with_config(user_agent, Duration::from_secs(30))
    }

    fn new_with_config(user_agent: &str, timeout: Duration) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .default_headers(Self::default_headers(user_agent)?)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    fn default_headers(user_agent: &str) -> Result<HeaderMap, ScraperError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(user_agent)
            .map_err(|err| ScraperError::CustomError(format!("Bad User-Agent: {}", err)))?;
        headers.insert(USER_AGENT, value);
        Ok(headers)
    }

    /// Fetch the page body. A non-success status is an error carrying the code.
    pub async fn fetch_url<U: IntoUrl>(&self, url: U) -> Result<String, ScraperError> {
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?;
        info!("Fetched {}", response.url());
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        info!(
            "Received {} bytes in {:?}",
            body.len(),
            start_time.elapsed()
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_user_agent() {
        let result = ScraperClient::new_http("bad\nagent");
        assert!(matches!(result, Err(ScraperError::CustomError(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_is_fetch_error() {
        let client = ScraperClient::new_http("test-agent").unwrap();
        let result = client.fetch_url("not a url").await;
        assert!(matches!(result, Err(ScraperError::FetchError(_))));
    }

    #[test]
    fn test_status_code_context() {
        let err = ScraperError::HttpStatus {
            status: 503,
            url: "https://example.com/".to_string(),
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(
            err.to_string(),
            "Request to https://example.com/ failed with status 503"
        );
    }
}
