//! Directory listing pagination
//!
//! Walks a fixed range of listing pages and gathers one entry per partner
//! card, deduplicated by exact profile URL. A page that fails to load is
//! logged and skipped; collection never stops early.

use crate::browser::{resolve_href, ElementSnapshot, Page};
use crate::config::ListingConfig;
use crate::scrape::FetchFailure;
use crate::url::name_from_slug;
use crate::Result;
use std::collections::HashSet;
use url::Url;

/// One partner card found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Display name
    pub name: String,

    /// Absolute profile page URL
    pub url: String,
}

/// Collects profile URLs from a paginated directory listing
#[derive(Debug, Clone)]
pub struct ListingCollector {
    config: ListingConfig,
}

impl ListingCollector {
    pub fn new(config: ListingConfig) -> Self {
        Self { config }
    }

    /// Visits every configured listing page and returns the unique entries
    /// in the order first seen
    ///
    /// Failed pages are appended to `failures`.
    pub async fn collect<P>(
        &self,
        page: &mut P,
        failures: &mut Vec<FetchFailure>,
    ) -> Vec<ListingEntry>
    where
        P: Page + ?Sized,
    {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let last = self.config.last_page;

        tracing::info!("Collecting partner URLs from all pages...");

        for page_number in self.config.first_page..=last {
            let listing_url = self.config.page_url(page_number);
            tracing::info!("Fetching page {}/{}...", page_number, last);

            match self.collect_page(page, &listing_url).await {
                Ok(found) => {
                    let cards = found.len();
                    for entry in found {
                        if seen.insert(entry.url.clone()) {
                            entries.push(entry);
                        }
                    }
                    tracing::info!(
                        "Found {} partners on this page (total unique: {})",
                        cards,
                        entries.len()
                    );
                }
                Err(e) => {
                    tracing::warn!("Error on page {}: {}", page_number, e);
                    failures.push(FetchFailure {
                        url: listing_url,
                        message: e.to_string(),
                    });
                }
            }
        }

        entries
    }

    /// Loads one listing page and reads its partner cards
    pub async fn collect_page<P>(
        &self,
        page: &mut P,
        listing_url: &str,
    ) -> Result<Vec<ListingEntry>>
    where
        P: Page + ?Sized,
    {
        page.navigate(listing_url, self.config.navigation_timeout()).await?;

        let settle = self.config.settle_delay();
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }

        let base = Url::parse(page.current_url().unwrap_or(listing_url))?;
        let cards = page.query(&self.config.card_selector).await?;

        Ok(cards
            .iter()
            .filter_map(|card| self.entry_from_card(card, &base))
            .collect())
    }

    /// Builds an entry from a card, or None when the card has no usable href
    ///
    /// The name comes from the name attribute with every occurrence of its
    /// prefix removed; cards without the prefixed attribute are named after
    /// their URL slug.
    fn entry_from_card(&self, card: &ElementSnapshot, base: &Url) -> Option<ListingEntry> {
        let url = resolve_href(card.attr("href")?, base)?;

        let prefix = self.config.name_prefix.as_str();
        let from_attribute = card
            .attr(&self.config.name_attribute)
            .filter(|title| prefix.is_empty() || title.contains(prefix))
            .map(|title| title.replace(prefix, "").trim().to_string())
            .filter(|name| !name.is_empty());

        let name = from_attribute
            .or_else(|| name_from_slug(&url))
            .or_else(|| Some(card.text.clone()).filter(|text| !text.is_empty()))
            .unwrap_or_else(|| url.clone());

        Some(ListingEntry { name, url })
    }
}
