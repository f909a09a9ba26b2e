//! Scraping module for directory and profile visits
//!
//! This module contains the orchestration around a [`crate::browser::Page`]:
//! - Profile visits with fail-soft extraction
//! - Listing pagination and deduplication
//! - Sequential batch processing with request pacing

mod batch;
mod listing;
mod profile;

pub use batch::{BatchOutcome, BatchRunner, FieldState, RescrapePolicy};
pub use listing::{ListingCollector, ListingEntry};
pub use profile::{ContactPair, FetchFailure, ProfileFetcher};
