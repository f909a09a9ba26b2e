//! Email address extraction
//!
//! Finds the first plausible contact address in a block of text, skipping
//! addresses on placeholder or tracking domains.

use crate::config::ExtractionConfig;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is a valid regex")
});

/// Extracts at most one email address from text
///
/// Stateless apart from its lower-cased deny-list; the same input always
/// yields the same output.
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    deny: Vec<String>,
}

impl EmailExtractor {
    /// Creates an extractor that rejects domains containing any deny entry
    pub fn new<I, S>(deny: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            deny: deny
                .into_iter()
                .map(|entry| entry.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(&config.email_deny)
    }

    /// Returns the first non-denylisted address in order of appearance
    ///
    /// # Example
    ///
    /// ```
    /// use partner_scout::EmailExtractor;
    ///
    /// let extractor = EmailExtractor::new(["example.com"]);
    /// let text = "Write to demo@example.com or sales@partner.io";
    /// assert_eq!(extractor.extract(text), Some("sales@partner.io".to_string()));
    /// ```
    pub fn extract(&self, text: &str) -> Option<String> {
        EMAIL_PATTERN
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|email| !self.is_denied(email))
            .map(str::to_string)
    }

    fn is_denied(&self, email: &str) -> bool {
        let domain = match email.rsplit_once('@') {
            Some((_, domain)) => domain.to_lowercase(),
            None => return true,
        };
        self.deny.iter().any(|entry| domain.contains(entry.as_str()))
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}
