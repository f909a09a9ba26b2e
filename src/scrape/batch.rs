//! Sequential batch processing
//!
//! This module drives the profile fetcher over a list of partners:
//! - Deciding per row whether existing data looks absent or wrong
//! - Visiting one profile at a time, in input order
//! - Merging results only into fields that needed them
//! - Pausing after every visit, whatever its outcome
//!
//! Results come back as an explicit [`BatchOutcome`]; nothing accumulates in
//! shared state.

use crate::browser::Page;
use crate::config::Config;
use crate::extract::EmailExtractor;
use crate::records::{ProfileRecord, RunStatistics};
use crate::scrape::{ContactPair, FetchFailure, ListingEntry, ProfileFetcher};
use std::time::Duration;

/// How an existing website or email value looks before a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Present and believable; never touched
    Usable,

    /// Empty
    Missing,

    /// Present but known to be wrong
    Bad,
}

/// Decides whether a row's existing website or email should be replaced
#[derive(Debug, Clone)]
pub struct RescrapePolicy {
    emails: EmailExtractor,
    bad_website_markers: Vec<String>,
}

impl RescrapePolicy {
    pub fn new<I, S>(emails: EmailExtractor, bad_website_markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails,
            bad_website_markers: bad_website_markers
                .into_iter()
                .map(|marker| marker.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            EmailExtractor::from_config(&config.extraction),
            &config.rescrape.bad_website_markers,
        )
    }

    /// A website is bad when a marker such as a login page appears at the
    /// start of a word in it
    pub fn website_state(&self, website: Option<&str>) -> FieldState {
        let website = match website.map(str::trim) {
            Some(w) if !w.is_empty() => w.to_lowercase(),
            _ => return FieldState::Missing,
        };

        if self
            .bad_website_markers
            .iter()
            .any(|marker| contains_word_start(&website, marker))
        {
            FieldState::Bad
        } else {
            FieldState::Usable
        }
    }

    /// An email is bad when the value holds no usable address at all,
    /// e.g. "N/A" or only placeholder domains
    pub fn email_state(&self, email: Option<&str>) -> FieldState {
        match email.map(str::trim) {
            Some(e) if !e.is_empty() => {
                if self.emails.extract(e).is_some() {
                    FieldState::Usable
                } else {
                    FieldState::Bad
                }
            }
            _ => FieldState::Missing,
        }
    }
}

/// True when `needle` occurs in `haystack` not preceded by a letter or digit
fn contains_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(index, _)| {
        !haystack[..index]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric())
    })
}

/// Everything a batch run produced
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Output rows, in input order
    pub records: Vec<ProfileRecord>,

    /// Visits that failed, keyed by URL
    pub failures: Vec<FetchFailure>,

    pub stats: RunStatistics,
}

/// Runs profile visits one after another with a fixed pause between them
#[derive(Debug, Clone)]
pub struct BatchRunner {
    fetcher: ProfileFetcher,
    policy: RescrapePolicy,
    request_delay: Duration,
}

impl BatchRunner {
    pub fn new(fetcher: ProfileFetcher, policy: RescrapePolicy, request_delay: Duration) -> Self {
        Self {
            fetcher,
            policy,
            request_delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ProfileFetcher::from_config(config),
            RescrapePolicy::from_config(config),
            config.pacing.request_delay(),
        )
    }

    /// Fills in missing or bad websites and emails on existing rows
    ///
    /// Rows without a profile URL, and rows whose data already looks right,
    /// are passed through untouched.
    pub async fn enrich<P>(&self, page: &mut P, records: Vec<ProfileRecord>) -> BatchOutcome
    where
        P: Page + ?Sized,
    {
        let total = records.len();
        let mut outcome = BatchOutcome {
            records: Vec::with_capacity(total),
            ..BatchOutcome::default()
        };
        outcome.stats.total = total;

        for (index, mut record) in records.into_iter().enumerate() {
            if !record.has_profile_url() {
                tracing::debug!("Row {} has no profile URL, keeping as is", index + 1);
                outcome.stats.skipped += 1;
                outcome.records.push(record);
                continue;
            }

            let website = self.policy.website_state(record.website.as_deref());
            let email = self.policy.email_state(record.email.as_deref());

            if website == FieldState::Usable && email == FieldState::Usable {
                outcome.stats.skipped += 1;
                outcome.records.push(record);
                continue;
            }

            tracing::info!("Processing {}/{}: {}", index + 1, total, record.name);
            let pair = self.visit(page, &record.profile_url, &mut outcome).await;

            // Existing values survive a visit that found nothing, except
            // websites known to be wrong
            if website != FieldState::Usable {
                match pair.website {
                    Some(found) => record.website = Some(found),
                    None if website == FieldState::Bad => record.website = None,
                    None => {}
                }
            }
            if email != FieldState::Usable {
                if let Some(found) = pair.email {
                    record.email = Some(found);
                }
            }

            outcome.records.push(record);
        }

        outcome.stats.count_found(&outcome.records);
        outcome
    }

    /// Visits every collected partner and builds fresh rows
    pub async fn scrape_all<P>(&self, page: &mut P, entries: Vec<ListingEntry>) -> BatchOutcome
    where
        P: Page + ?Sized,
    {
        let total = entries.len();
        let mut outcome = BatchOutcome {
            records: Vec::with_capacity(total),
            ..BatchOutcome::default()
        };
        outcome.stats.total = total;

        for (index, entry) in entries.into_iter().enumerate() {
            tracing::info!("Processing {}/{}: {}", index + 1, total, entry.name);

            let pair = self.visit(page, &entry.url, &mut outcome).await;

            let mut record = ProfileRecord::new(entry.name, entry.url);
            record.website = pair.website;
            record.email = pair.email;
            outcome.records.push(record);
        }

        outcome.stats.count_found(&outcome.records);
        outcome
    }

    /// One fail-soft profile visit followed by the politeness delay
    async fn visit<P>(&self, page: &mut P, url: &str, outcome: &mut BatchOutcome) -> ContactPair
    where
        P: Page + ?Sized,
    {
        let failures_before = outcome.failures.len();
        let pair = self.fetcher.fetch(page, url, &mut outcome.failures).await;

        outcome.stats.visited += 1;
        if outcome.failures.len() > failures_before {
            outcome.stats.failures += 1;
        }

        if pair.is_empty() {
            tracing::info!("  - No data found");
        } else {
            tracing::info!("  Website: {}", pair.website.as_deref().unwrap_or("N/A"));
            tracing::info!("  Email: {}", pair.email.as_deref().unwrap_or("N/A"));
        }

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        pair
    }
}
