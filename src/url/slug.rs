use url::Url;

/// Derives a display name from the last path segment of a profile URL
///
/// Hyphens and underscores become spaces and each word is capitalized, so
/// `https://dir.com/partners/acme-cloud-sync/` yields `Acme Cloud Sync`.
///
/// # Examples
///
/// ```
/// use partner_scout::url::name_from_slug;
///
/// assert_eq!(
///     name_from_slug("https://www.linnworks.com/integrations/shopify-plus/"),
///     Some("Shopify Plus".to_string())
/// );
/// ```
pub fn name_from_slug(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;

    let name = segment
        .split(|c| c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
