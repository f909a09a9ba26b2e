//! Profile page visits
//!
//! One visit navigates to a profile, waits for the page to settle, and runs
//! both extractors over what loaded. Failures never escape [`ProfileFetcher::fetch`]:
//! they are logged, recorded against the URL, and turned into an empty pair
//! so the surrounding batch keeps going.

use crate::browser::Page;
use crate::config::Config;
use crate::extract::{EmailExtractor, WebsiteSelector};
use crate::url::site_domain;
use crate::Result;
use std::time::Duration;

/// What one profile visit produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPair {
    pub website: Option<String>,
    pub email: Option<String>,
}

impl ContactPair {
    pub fn is_empty(&self) -> bool {
        self.website.is_none() && self.email.is_none()
    }
}

/// A profile or listing visit that produced nothing because it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// The URL that failed
    pub url: String,

    /// Human-readable reason
    pub message: String,
}

/// Visits profile pages and extracts their website and email
#[derive(Debug, Clone)]
pub struct ProfileFetcher {
    emails: EmailExtractor,
    websites: WebsiteSelector,
    navigation_timeout: Duration,
    settle_delay: Duration,
    max_attempts: u32,
    retry_delay: Duration,
}

impl ProfileFetcher {
    /// Creates a fetcher with a single attempt and no settle delay
    pub fn new(emails: EmailExtractor, websites: WebsiteSelector) -> Self {
        Self {
            emails,
            websites,
            navigation_timeout: Duration::from_secs(20),
            settle_delay: Duration::ZERO,
            max_attempts: 1,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            EmailExtractor::from_config(&config.extraction),
            WebsiteSelector::from_config(&config.extraction),
        )
        .with_timing(
            config.browser.navigation_timeout(),
            config.browser.settle_delay(),
        )
        .with_attempts(config.pacing.max_attempts, config.pacing.retry_delay())
    }

    pub fn with_timing(mut self, navigation_timeout: Duration, settle_delay: Duration) -> Self {
        self.navigation_timeout = navigation_timeout;
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_attempts(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Visits `url` and extracts its contact pair, absorbing any failure
    ///
    /// A failure is logged, appended to `failures`, and yields the empty pair.
    pub async fn fetch<P>(
        &self,
        page: &mut P,
        url: &str,
        failures: &mut Vec<FetchFailure>,
    ) -> ContactPair
    where
        P: Page + ?Sized,
    {
        match self.try_fetch(page, url).await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("Error scraping {}: {}", url, e);
                failures.push(FetchFailure {
                    url: url.to_string(),
                    message: e.to_string(),
                });
                ContactPair::default()
            }
        }
    }

    /// Visits `url` and extracts its contact pair, retrying up to the
    /// configured number of attempts
    pub async fn try_fetch<P>(&self, page: &mut P, url: &str) -> Result<ContactPair>
    where
        P: Page + ?Sized,
    {
        let mut attempt = 1;
        loop {
            match self.visit(page, url).await {
                Ok(pair) => return Ok(pair),
                Err(e) if attempt < self.max_attempts => {
                    tracing::debug!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt,
                        self.max_attempts,
                        url,
                        e
                    );
                    attempt += 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn visit<P>(&self, page: &mut P, url: &str) -> Result<ContactPair>
    where
        P: Page + ?Sized,
    {
        page.navigate(url, self.navigation_timeout).await?;

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        self.extract(&*page, url).await
    }

    /// Runs both extractors over the page that is currently loaded
    ///
    /// Links back to the profile's own site are never chosen as the website.
    pub async fn extract<P>(&self, page: &P, url: &str) -> Result<ContactPair>
    where
        P: Page + ?Sized,
    {
        let markup = page.rendered_markup().await?;
        let text = page.visible_text().await?;

        // Addresses in mailto: attributes only show up in the markup
        let email = self
            .emails
            .extract(&text)
            .or_else(|| self.emails.extract(&markup));

        let anchors = page.anchors().await?;
        let own_site = page
            .current_url()
            .and_then(site_domain)
            .or_else(|| site_domain(url));
        let website = match own_site {
            Some(domain) => self.websites.clone().with_excluded([domain]).select(&anchors),
            None => self.websites.select(&anchors),
        };

        tracing::trace!(
            "Extracted from {}: {} anchors, website={:?}, email={:?}",
            url,
            anchors.len(),
            website,
            email
        );

        Ok(ContactPair { website, email })
    }
}
