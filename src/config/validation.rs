use crate::config::types::{
    BrowserConfig, Config, ExtractionConfig, ListingConfig, PacingConfig, SpreadsheetConfig,
};
use crate::ConfigError;
use url::Url;

/// Longest navigation or settle wait accepted, in milliseconds
const MAX_WAIT_MS: u64 = 120_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_browser_config(&config.browser)?;
    validate_pacing_config(&config.pacing)?;
    validate_extraction_config(&config.extraction)?;
    if let Some(listing) = &config.listing {
        validate_listing_config(listing)?;
    }
    validate_spreadsheet_config(&config.spreadsheet)?;
    Ok(())
}

fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.navigation_timeout_ms == 0 || config.navigation_timeout_ms > MAX_WAIT_MS {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be between 1 and {}, got {}",
            MAX_WAIT_MS, config.navigation_timeout_ms
        )));
    }

    if config.settle_delay_ms > MAX_WAIT_MS {
        return Err(ConfigError::Validation(format!(
            "settle_delay_ms must be <= {}, got {}",
            MAX_WAIT_MS, config.settle_delay_ms
        )));
    }

    if let Some(path) = &config.chrome_path {
        if !path.is_file() {
            return Err(ConfigError::Validation(format!(
                "chrome_path '{}' is not a file",
                path.display()
            )));
        }
    }

    Ok(())
}

fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.request_delay_ms > MAX_WAIT_MS || config.retry_delay_ms > MAX_WAIT_MS {
        return Err(ConfigError::Validation(format!(
            "request_delay_ms and retry_delay_ms must be <= {}",
            MAX_WAIT_MS
        )));
    }

    Ok(())
}

fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.priority_keywords.is_empty() {
        return Err(ConfigError::Validation(
            "priority_keywords must contain at least one keyword".to_string(),
        ));
    }

    let lists = [
        ("email_deny", &config.email_deny),
        ("link_exclude", &config.link_exclude),
        ("document_markers", &config.document_markers),
        ("priority_keywords", &config.priority_keywords),
    ];

    // An empty entry would match every string
    for (name, entries) in lists {
        if entries.iter().any(|entry| entry.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} cannot contain empty entries",
                name
            )));
        }
    }

    Ok(())
}

fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    if !config.url_template.contains("{page}") {
        return Err(ConfigError::InvalidTemplate(format!(
            "'{}' has no {{page}} placeholder",
            config.url_template
        )));
    }

    let url = Url::parse(&config.page_url(config.first_page)).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid listing URL '{}': {}",
            config.url_template, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Listing URL '{}' must use HTTP(S)",
            config.url_template
        )));
    }

    if config.first_page > config.last_page {
        return Err(ConfigError::Validation(format!(
            "first_page ({}) must not exceed last_page ({})",
            config.first_page, config.last_page
        )));
    }

    if config.card_selector.trim().is_empty() {
        return Err(ConfigError::Validation(
            "card_selector cannot be empty".to_string(),
        ));
    }

    if config.navigation_timeout_ms == 0
        || config.navigation_timeout_ms > MAX_WAIT_MS
        || config.settle_delay_ms > MAX_WAIT_MS
    {
        return Err(ConfigError::Validation(format!(
            "listing navigation_timeout_ms must be between 1 and {0}, settle_delay_ms <= {0}",
            MAX_WAIT_MS
        )));
    }

    Ok(())
}

fn validate_spreadsheet_config(config: &SpreadsheetConfig) -> Result<(), ConfigError> {
    // Excel limits sheet names to 31 characters
    if config.sheet_name.is_empty() || config.sheet_name.chars().count() > 31 {
        return Err(ConfigError::Validation(format!(
            "sheet_name must be 1-31 characters, got '{}'",
            config.sheet_name
        )));
    }

    parse_hex_color(&config.header_color)?;

    if config
        .column_widths
        .iter()
        .any(|width| !(0.0..=255.0).contains(width))
    {
        return Err(ConfigError::Validation(
            "column_widths must be between 0 and 255".to_string(),
        ));
    }

    Ok(())
}

/// Parses a six-digit hex color such as "4472C4" (a leading '#' is allowed)
pub fn parse_hex_color(color: &str) -> Result<u32, ConfigError> {
    let digits = color.strip_prefix('#').unwrap_or(color);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Validation(format!(
            "header_color must be six hex digits, got '{}'",
            color
        )));
    }

    u32::from_str_radix(digits, 16)
        .map_err(|_| ConfigError::Validation(format!("Invalid header_color '{}'", color)))
}
