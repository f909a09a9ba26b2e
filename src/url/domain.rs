use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use partner_scout::url::extract_domain;
///
/// let url = Url::parse("https://Partners.Example.COM:8443/acme").unwrap();
/// assert_eq!(extract_domain(&url), Some("partners.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the site domain of a URL string, without a leading `www.`
///
/// Used to keep a directory's links to itself out of website selection:
/// a profile on `https://www.linnworks.com/...` yields `linnworks.com`.
///
/// Returns None when the string is not an absolute URL with a host.
pub fn site_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = extract_domain(&parsed)?;
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}
