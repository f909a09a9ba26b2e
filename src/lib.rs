//! Partner-Scout: partner directory contact harvester
//!
//! This crate visits partner-directory profile pages, extracts a contact email
//! and the partner's own website link from each one, and writes the results to
//! CSV or a styled spreadsheet.

pub mod browser;
pub mod config;
pub mod extract;
pub mod records;
pub mod scrape;
pub mod url;

use thiserror::Error;

/// Main error type for Partner-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No page has been loaded")]
    NoPageLoaded,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Extraction failed for {url}: {message}")]
    Extraction { url: String, message: String },

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid listing URL template: {0}")]
    InvalidTemplate(String),
}

/// Result type alias for Partner-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use browser::{open_page, CandidateLink, ChromiumPage, HttpPage, Page};
pub use config::Config;
pub use extract::{EmailExtractor, WebsiteSelector};
pub use records::{ProfileRecord, RecordTable};
pub use scrape::{BatchOutcome, BatchRunner, ContactPair, ListingCollector, ProfileFetcher};
