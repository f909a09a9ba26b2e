//! DOM queries over rendered markup
//!
//! This module turns page markup into the views the scrapers consume:
//! - Visible body text (script/style content excluded, block elements on
//!   their own lines)
//! - Element snapshots for a CSS selector
//! - Absolute link resolution

use crate::browser::ElementSnapshot;
use crate::{Result, ScoutError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose content is never visible
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Elements rendered on their own line
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Extracts the visible text of a document's body
///
/// Falls back to the root element when the markup has no `<body>`.
///
/// # Example
///
/// ```
/// use partner_scout::browser::visible_text;
///
/// let html = "<html><body><p>Hello <b>there</b></p><script>var x;</script><p>Bye</p></body></html>";
/// assert_eq!(visible_text(html), "Hello there\nBye");
/// ```
pub fn visible_text(markup: &str) -> String {
    let document = Html::parse_document(markup);

    let mut raw = String::new();
    match Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
    {
        Some(body) => collect_text(body, &mut raw),
        None => collect_text(document.root_element(), &mut raw),
    }

    normalize_lines(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }

        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if HIDDEN_ELEMENTS.contains(&name) {
                continue;
            }

            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push('\n');
            }
            collect_text(child_element, out);
            if block {
                out.push('\n');
            }
        }
    }
}

/// Collapses whitespace within lines and drops blank lines
fn normalize_lines(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Snapshots every element matching `selector`, in document order
///
/// # Returns
///
/// * `Ok(Vec<ElementSnapshot>)` - Matching elements (possibly none)
/// * `Err(ScoutError::Selector)` - The selector does not parse
pub fn query_elements(markup: &str, selector: &str) -> Result<Vec<ElementSnapshot>> {
    let parsed = Selector::parse(selector).map_err(|_| ScoutError::Selector(selector.to_string()))?;
    let document = Html::parse_document(markup);

    Ok(document
        .select(&parsed)
        .map(|element| {
            let mut text = String::new();
            collect_text(element, &mut text);

            ElementSnapshot {
                text: text.split_whitespace().collect::<Vec<_>>().join(" "),
                attributes: element
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
            }
        })
        .collect())
}

/// Resolves an href against the page it was found on
///
/// Returns None for empty hrefs, fragment-only links, non-navigational
/// schemes, and anything that does not resolve to HTTP(S).
pub fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
