//! Outbound website link selection
//!
//! Picks the one anchor on a profile page that most likely points at the
//! partner's own site, as opposed to the directory itself, social profiles,
//! or downloadable documents.
//!
//! # Selection Rules
//!
//! Anchors are scanned once, in document order:
//!
//! 1. Anchors without an `href` are skipped
//! 2. Hrefs containing an exclusion substring are skipped
//! 3. Hrefs containing a document marker are skipped
//! 4. Only `http://` and `https://` targets are considered
//! 5. An anchor whose text contains a priority keyword is returned immediately
//! 6. Otherwise the first surviving href is kept as the fallback

use crate::browser::CandidateLink;
use crate::config::ExtractionConfig;

/// Greedy single-pass selector for a partner's external website
#[derive(Debug, Clone)]
pub struct WebsiteSelector {
    exclude: Vec<String>,
    document_markers: Vec<String>,
    priority_keywords: Vec<String>,
}

impl WebsiteSelector {
    /// Creates a selector from the extraction lists
    ///
    /// Directory domains belong in `link_exclude` alongside the social
    /// platforms, e.g. `cin7.partnerpage.io`, `cin7.com`, `cin7-`.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            exclude: lowercase_all(&config.link_exclude),
            document_markers: lowercase_all(&config.document_markers),
            priority_keywords: lowercase_all(&config.priority_keywords),
        }
    }

    /// Adds extra exclusion substrings, typically the directory's own domain
    pub fn with_excluded<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude
            .extend(extra.into_iter().map(|s| s.as_ref().to_lowercase()));
        self
    }

    /// Selects the partner website among the given anchors
    ///
    /// # Example
    ///
    /// ```
    /// use partner_scout::config::ExtractionConfig;
    /// use partner_scout::{CandidateLink, WebsiteSelector};
    ///
    /// let selector = WebsiteSelector::from_config(&ExtractionConfig::default());
    /// let anchors = vec![
    ///     CandidateLink::new("https://a.com", ""),
    ///     CandidateLink::new("https://b.com", "Website"),
    /// ];
    /// assert_eq!(selector.select(&anchors), Some("https://b.com".to_string()));
    /// ```
    pub fn select(&self, anchors: &[CandidateLink]) -> Option<String> {
        let mut fallback: Option<&str> = None;

        for anchor in anchors {
            let href = match anchor.href.as_deref().map(str::trim) {
                Some(href) if !href.is_empty() => href,
                _ => continue,
            };

            let lowered = href.to_lowercase();

            if self.exclude.iter().any(|skip| lowered.contains(skip.as_str())) {
                continue;
            }

            if self
                .document_markers
                .iter()
                .any(|marker| lowered.contains(marker.as_str()))
            {
                continue;
            }

            if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
                continue;
            }

            let text = anchor.text.trim().to_lowercase();
            if self
                .priority_keywords
                .iter()
                .any(|keyword| text.contains(keyword.as_str()))
            {
                tracing::trace!("Priority website link '{}' ({})", href, text);
                return Some(href.to_string());
            }

            if fallback.is_none() {
                fallback = Some(href);
            }
        }

        fallback.map(str::to_string)
    }
}

impl Default for WebsiteSelector {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str, text: &str) -> CandidateLink {
        CandidateLink::new(href, text)
    }

    fn selector() -> WebsiteSelector {
        WebsiteSelector::default().with_excluded(["directory.com"])
    }

    #[test]
    fn test_priority_match_short_circuits() {
        let anchors = vec![
            link("https://directory.com/x", ""),
            link("https://partner.com", "visit website"),
            link("https://other.com", ""),
        ];
        assert_eq!(
            selector().select(&anchors),
            Some("https://partner.com".to_string())
        );
    }

    #[test]
    fn test_priority_overrides_earlier_fallback() {
        let anchors = vec![link("https://a.com", ""), link("https://b.com", "website")];
        assert_eq!(selector().select(&anchors), Some("https://b.com".to_string()));
    }

    #[test]
    fn test_first_seen_fallback() {
        let anchors = vec![link("https://a.com", ""), link("https://b.com", "")];
        assert_eq!(selector().select(&anchors), Some("https://a.com".to_string()));
    }

    #[test]
    fn test_first_priority_match_wins() {
        let anchors = vec![
            link("https://first.com", "Visit"),
            link("https://second.com", "Company website"),
        ];
        assert_eq!(
            selector().select(&anchors),
            Some("https://first.com".to_string())
        );
    }

    #[test]
    fn test_skips_missing_and_blank_href() {
        let anchors = vec![
            CandidateLink {
                href: None,
                text: "Website".to_string(),
            },
            link("   ", "Website"),
            link("https://partner.com", ""),
        ];
        assert_eq!(
            selector().select(&anchors),
            Some("https://partner.com".to_string())
        );
    }

    #[test]
    fn test_skips_social_and_special_schemes() {
        let anchors = vec![
            link("https://www.LinkedIn.com/company/acme", "Visit us"),
            link("https://x.com/acme", "Website"),
            link("mailto:hello@acme.com", "Website"),
            link("javascript:void(0)", "Website"),
            link("tel:+15551234", "Company"),
        ];
        assert_eq!(selector().select(&anchors), None);
    }

    #[test]
    fn test_skips_documents() {
        let anchors = vec![
            link("https://acme.com/brochure.PDF", "Visit website"),
            link("https://acme.com/media/logo.png", "Company"),
            link("https://acme.com", "Home"),
        ];
        assert_eq!(selector().select(&anchors), Some("https://acme.com".to_string()));
    }

    #[test]
    fn test_requires_http_scheme() {
        let anchors = vec![
            link("/partners/acme", "Website"),
            link("//acme.com", "Website"),
            link("HTTP://ACME.COM", ""),
        ];
        assert_eq!(selector().select(&anchors), Some("HTTP://ACME.COM".to_string()));
    }

    #[test]
    fn test_keyword_match_uses_trimmed_lowercase_text() {
        let anchors = vec![
            link("https://a.com", ""),
            link("https://b.com", "\n   LEARN MORE  \n"),
        ];
        assert_eq!(selector().select(&anchors), Some("https://b.com".to_string()));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(selector().select(&[]), None);
    }
}
