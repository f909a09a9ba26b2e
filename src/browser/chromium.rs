//! Headless Chromium page implementation
//!
//! Drives a single browser tab over the DevTools protocol, so directories
//! that render their cards client-side can be read after their scripts run:
//! - Launching Chromium with the configured user agent
//! - Navigation bounded by the per-call timeout
//! - Live reads of body `innerText`, the serialized DOM, and selector matches

use crate::browser::document::query_elements;
use crate::browser::{ElementSnapshot, Page};
use crate::config::BrowserConfig;
use crate::{Result, ScoutError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

const BODY_TEXT_SCRIPT: &str = "document.body ? document.body.innerText : ''";

/// A [`Page`] backed by one tab of a headless Chromium process
///
/// Reads go to the live tab, so anything rendered during the settle delay
/// is visible to the extractors.
pub struct ChromiumPage {
    browser: Browser,
    handler: JoinHandle<()>,
    tab: chromiumoxide::Page,
    url: Option<String>,
}

impl ChromiumPage {
    /// Launches Chromium and opens a blank tab
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::Browser` when no Chrome/Chromium binary can be
    /// found or the process fails to start.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let (browser, mut handler) = Browser::launch(launch_config(config)?)
            .await
            .map_err(browser_error)?;

        // The DevTools connection only makes progress while its events are polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("DevTools event error: {}", e);
                }
            }
        });

        let tab = browser
            .new_page("about:blank")
            .await
            .map_err(browser_error)?;

        tracing::debug!("Launched headless Chromium");
        Ok(Self {
            browser,
            handler,
            tab,
            url: None,
        })
    }

    fn loaded_url(&self) -> Result<&str> {
        self.url.as_deref().ok_or(ScoutError::NoPageLoaded)
    }
}

fn launch_config(config: &BrowserConfig) -> Result<LaunchConfig> {
    let mut builder = LaunchConfig::builder()
        .request_timeout(config.navigation_timeout())
        .arg(format!("--user-agent={}", config.user_agent));

    if let Some(path) = &config.chrome_path {
        builder = builder.chrome_executable(path);
    }

    builder.build().map_err(ScoutError::Browser)
}

fn browser_error(error: CdpError) -> ScoutError {
    ScoutError::Browser(error.to_string())
}

#[async_trait]
impl Page for ChromiumPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        self.url = None;

        tracing::debug!("Navigating to {}", url);
        match tokio::time::timeout(timeout, self.tab.goto(url)).await {
            Err(_) => {
                return Err(ScoutError::Timeout {
                    url: url.to_string(),
                })
            }
            Ok(Err(e)) => {
                return Err(ScoutError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
            Ok(Ok(_)) => {}
        }

        let current = self.tab.url().await.map_err(browser_error)?;
        self.url = Some(current.unwrap_or_else(|| url.to_string()));
        Ok(())
    }

    fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    async fn visible_text(&self) -> Result<String> {
        let url = self.loaded_url()?;
        self.tab
            .evaluate(BODY_TEXT_SCRIPT)
            .await
            .map_err(browser_error)?
            .into_value::<String>()
            .map_err(|e| ScoutError::Extraction {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn rendered_markup(&self) -> Result<String> {
        self.loaded_url()?;
        self.tab.content().await.map_err(browser_error)
    }

    async fn query(&self, selector: &str) -> Result<Vec<ElementSnapshot>> {
        let markup = self.rendered_markup().await?;
        query_elements(&markup, selector)
    }

    async fn close(&mut self) -> Result<()> {
        self.url = None;
        let closed = self.browser.close().await.map_err(browser_error);
        self.handler.abort();
        closed.map(|_| ())
    }
}
