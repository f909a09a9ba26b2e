//! Configuration module for Partner-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults matching the directory scrapes the tool was
//! built for, so an empty file is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use partner_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("configs/cin7.toml")).unwrap();
//! println!("Request delay: {}ms", config.pacing.request_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserConfig, Config, ExtractionConfig, ListingConfig, PacingConfig, PageEngine,
    RescrapeConfig, SpreadsheetConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{parse_hex_color, validate};
