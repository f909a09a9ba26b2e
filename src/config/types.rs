use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Desktop Chrome user agent presented to directory sites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for Partner-Scout
///
/// Every section is optional; a missing section takes the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub pacing: PacingConfig,
    pub extraction: ExtractionConfig,
    pub listing: Option<ListingConfig>,
    pub rescrape: RescrapeConfig,
    pub spreadsheet: SpreadsheetConfig,
}

/// How pages are loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageEngine {
    /// Plain HTTP GET; markup as served, no scripts run
    #[default]
    Http,

    /// Headless Chromium over the DevTools protocol; scripts run
    Chromium,
}

/// Page session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Page loader to use
    pub engine: PageEngine,

    /// Chrome/Chromium binary; searched for on the system when unset
    #[serde(rename = "chrome-path")]
    pub chrome_path: Option<PathBuf>,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Upper bound for one profile navigation (milliseconds)
    #[serde(rename = "navigation-timeout-ms")]
    pub navigation_timeout_ms: u64,

    /// Wait after a profile page loads before reading it (milliseconds)
    #[serde(rename = "settle-delay-ms")]
    pub settle_delay_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            engine: PageEngine::default(),
            chrome_path: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            navigation_timeout_ms: 20_000,
            settle_delay_ms: 1_500,
        }
    }
}

impl BrowserConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Request pacing and retry policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay after every profile visit, regardless of outcome (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Navigation attempts per profile URL
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Delay between attempts on the same URL (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1_000,
            max_attempts: 1,
            retry_delay_ms: 2_000,
        }
    }
}

impl PacingConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Substring lists driving the email and website heuristics
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Email domains containing any of these are treated as placeholders
    #[serde(rename = "email-deny")]
    pub email_deny: Vec<String>,

    /// Hrefs containing any of these are never the partner's website
    #[serde(rename = "link-exclude")]
    pub link_exclude: Vec<String>,

    /// Hrefs containing any of these point at documents or resources
    #[serde(rename = "document-markers")]
    pub document_markers: Vec<String>,

    /// Anchor text containing any of these wins immediately
    #[serde(rename = "priority-keywords")]
    pub priority_keywords: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            email_deny: strings(&[
                "example.com",
                "test.com",
                "placeholder",
                "sentry.io",
                "wixpress.com",
                "gravatar.com",
            ]),
            link_exclude: strings(&[
                "facebook.com",
                "twitter.com",
                "x.com",
                "linkedin.com",
                "instagram.com",
                "youtube.com",
                "tiktok.com",
                "mailto:",
                "javascript:",
                "tel:",
            ]),
            document_markers: strings(&[".pdf", ".doc", ".xls", "/resources/", "/media/"]),
            priority_keywords: strings(&[
                "website",
                "visit",
                "company",
                "learn more",
                "view site",
                "get started",
                "sign up",
            ]),
        }
    }
}

/// Paginated directory listing to collect profile URLs from
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Listing URL with a `{page}` placeholder
    #[serde(rename = "url-template")]
    pub url_template: String,

    #[serde(rename = "first-page", default = "default_first_page")]
    pub first_page: u32,

    #[serde(rename = "last-page", default = "default_last_page")]
    pub last_page: u32,

    /// CSS selector matching one partner card link
    #[serde(rename = "card-selector", default = "default_card_selector")]
    pub card_selector: String,

    /// Card attribute holding the display name
    #[serde(rename = "name-attribute", default = "default_name_attribute")]
    pub name_attribute: String,

    /// Prefix stripped from the name attribute
    #[serde(rename = "name-prefix", default = "default_name_prefix")]
    pub name_prefix: String,

    #[serde(rename = "navigation-timeout-ms", default = "default_listing_timeout")]
    pub navigation_timeout_ms: u64,

    #[serde(rename = "settle-delay-ms", default = "default_listing_settle")]
    pub settle_delay_ms: u64,
}

fn default_first_page() -> u32 {
    1
}

fn default_last_page() -> u32 {
    9
}

fn default_card_selector() -> String {
    "a.search-teaser-integration".to_string()
}

fn default_name_attribute() -> String {
    "aria-title".to_string()
}

fn default_name_prefix() -> String {
    "view integration:".to_string()
}

fn default_listing_timeout() -> u64 {
    25_000
}

fn default_listing_settle() -> u64 {
    8_000
}

impl ListingConfig {
    /// Builds the listing URL for one page number
    pub fn page_url(&self, page: u32) -> String {
        self.url_template.replace("{page}", &page.to_string())
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// When an existing CSV value is considered absent or wrong
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RescrapeConfig {
    /// Website values containing any of these (case-insensitive) are re-scraped
    #[serde(rename = "bad-website-markers")]
    pub bad_website_markers: Vec<String>,
}

impl Default for RescrapeConfig {
    fn default() -> Self {
        Self {
            bad_website_markers: strings(&["dearsystems.com", "login"]),
        }
    }
}

/// Styling for the spreadsheet export
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpreadsheetConfig {
    #[serde(rename = "sheet-name")]
    pub sheet_name: String,

    /// Header fill as six hex digits, e.g. "4472C4"
    #[serde(rename = "header-color")]
    pub header_color: String,

    /// Column widths in characters, leftmost first
    #[serde(rename = "column-widths")]
    pub column_widths: Vec<f64>,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Partners".to_string(),
            header_color: "4472C4".to_string(),
            column_widths: vec![35.0, 40.0, 45.0, 40.0],
        }
    }
}
