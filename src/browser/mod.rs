//! Page capability interface
//!
//! Scraping code talks to a [`Page`]: navigate to a URL, then read the
//! rendered text, markup, anchors, or elements matching a selector. The
//! extraction logic never sees the transport, so tests can drive it with
//! canned content.
//!
//! - `document` - DOM queries over rendered markup
//! - `http` - plain GET requests, markup as served
//! - `chromium` - headless Chromium, for client-side rendered directories

mod chromium;
mod document;
mod http;

pub use chromium::ChromiumPage;
pub use document::{query_elements, resolve_href, visible_text};
pub use http::{build_http_client, HttpPage};

use crate::config::{BrowserConfig, PageEngine};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// An anchor seen on a page, as input to website selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Raw `href` attribute, if present
    pub href: Option<String>,

    /// Visible anchor text
    pub text: String,
}

impl CandidateLink {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            text: text.into(),
        }
    }
}

/// A snapshot of one element matched by a selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Visible text of the element
    pub text: String,

    /// Attribute name to value
    pub attributes: HashMap<String, String>,
}

impl ElementSnapshot {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl From<ElementSnapshot> for CandidateLink {
    fn from(element: ElementSnapshot) -> Self {
        let href = element.attributes.get("href").cloned();
        Self {
            href,
            text: element.text,
        }
    }
}

/// A single page handle, navigated sequentially
///
/// Reads always refer to the most recent successful navigation.
#[async_trait]
pub trait Page: Send + Sync {
    /// Loads `url`, giving up after `timeout`
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// URL of the loaded page after redirects
    fn current_url(&self) -> Option<&str>;

    /// Visible text of the page body
    async fn visible_text(&self) -> Result<String>;

    /// Full rendered markup
    async fn rendered_markup(&self) -> Result<String>;

    /// Snapshots of all elements matching a CSS selector, in document order
    async fn query(&self, selector: &str) -> Result<Vec<ElementSnapshot>>;

    /// All anchors carrying an `href`, in document order
    async fn anchors(&self) -> Result<Vec<CandidateLink>> {
        let elements = self.query("a[href]").await?;
        Ok(elements.into_iter().map(CandidateLink::from).collect())
    }

    /// Releases whatever the page holds open
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens a page using the engine selected in the configuration
pub async fn open_page(config: &BrowserConfig) -> Result<Box<dyn Page>> {
    match config.engine {
        PageEngine::Http => Ok(Box::new(HttpPage::from_config(config)?)),
        PageEngine::Chromium => Ok(Box::new(ChromiumPage::launch(config).await?)),
    }
}
