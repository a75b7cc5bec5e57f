/// URL handling: hostnames, path terms and domain grouping
use regex::Regex;
use std::sync::LazyLock;
use url::{ParseError, Url};

use crate::grouping::Buckets;
use crate::tab_data::TabInfo;

/// Parse a tab URL, tolerating a missing scheme
///
/// Algorithm:
/// 1. Trim; empty input is not a URL
/// 2. Parse as an absolute URL
/// 3. If that fails only because there is no scheme (`github.com/foo`),
///    retry as `https://github.com/foo`
pub fn parse_url(url: &str) -> Option<Url> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", url)).ok(),
        Err(_) => None,
    }
}

/// Extract the hostname from a URL, without a leading "www."
///
/// Never fails: anything unparseable, or a URL without a host, yields "".
///
/// Examples:
/// - https://www.google.com/search → google.com
/// - https://news.bbc.co.uk/article → news.bbc.co.uk
/// - github.com/rust-lang → github.com
pub fn extract_domain(url: &str) -> String {
    parse_url(url)
        .and_then(|parsed| parsed.host_str().map(|host| host.to_lowercase()))
        .map(|host| match host.strip_prefix("www.") {
            Some(stripped) => stripped.to_string(),
            None => host,
        })
        .unwrap_or_default()
}

static PATH_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\-_.0-9]").expect("path separator pattern is valid"));

/// Lowercased URL path with separators and digits turned into spaces
///
/// `https://cnn.com/news1/world-cup` → `" news  world cup"`; "" when the URL is unusable.
pub fn extract_path_terms(url: &str) -> String {
    parse_url(url)
        .map(|parsed| {
            PATH_SEPARATORS
                .replace_all(parsed.path(), " ")
                .to_lowercase()
        })
        .unwrap_or_default()
}

/// Group tabs by hostname, keeping only domains with at least two tabs
///
/// Tabs whose URL has no usable host are left out.
pub fn group_tabs_by_domain(tabs: &[TabInfo]) -> Buckets<TabInfo> {
    let mut buckets = Buckets::new();

    for tab in tabs {
        let domain = extract_domain(&tab.url);
        if !domain.is_empty() {
            buckets.push(&domain, tab.clone());
        }
    }

    buckets.retain_min(2);
    buckets
}
