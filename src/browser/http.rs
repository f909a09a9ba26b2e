//! HTTP-backed page implementation
//!
//! This module handles all HTTP requests made on behalf of a [`Page`]:
//! - Building a client that presents a desktop browser user agent
//! - GET requests with a per-navigation timeout
//! - Error classification into timeout, status, and network failures

use crate::browser::document::{query_elements, visible_text};
use crate::browser::{ElementSnapshot, Page};
use crate::config::BrowserConfig;
use crate::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Builds an HTTP client with the configured user agent
///
/// # Example
///
/// ```no_run
/// use partner_scout::browser::build_http_client;
/// use partner_scout::config::BrowserConfig;
///
/// let client = build_http_client(&BrowserConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &BrowserConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.navigation_timeout())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// The markup of one loaded page
#[derive(Debug, Clone)]
struct LoadedPage {
    url: String,
    markup: String,
}

/// A [`Page`] that loads documents with plain HTTP GET requests
///
/// Markup is served as delivered; no scripts run.
pub struct HttpPage {
    client: Client,
    loaded: Option<LoadedPage>,
}

impl HttpPage {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            loaded: None,
        }
    }

    /// Creates a page with a client built from the browser configuration
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        Ok(Self::new(build_http_client(config)?))
    }

    fn loaded(&self) -> Result<&LoadedPage> {
        self.loaded.as_ref().ok_or(ScoutError::NoPageLoaded)
    }
}

#[async_trait]
impl Page for HttpPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        // A failed navigation must not leave the previous page readable
        self.loaded = None;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let markup = response.text().await.map_err(|e| classify_error(url, e))?;

        self.loaded = Some(LoadedPage {
            url: final_url,
            markup,
        });
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.loaded.as_ref().map(|page| page.url.as_str())
    }

    async fn visible_text(&self) -> Result<String> {
        Ok(visible_text(&self.loaded()?.markup))
    }

    async fn rendered_markup(&self) -> Result<String> {
        Ok(self.loaded()?.markup.clone())
    }

    async fn query(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        query_elements(&self.loaded()?.markup, selector)
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> ScoutError {
    if error.is_timeout() {
        ScoutError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        ScoutError::Navigation {
            url: url.to_string(),
            message: "connection refused".to_string(),
        }
    } else {
        ScoutError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
