/// Tab operations behind manual grouping: search by term, pick by domain

use crate::domain::extract_domain;
use crate::tab_data::TabInfo;

/// Tabs whose title or URL contains `term`, ignoring case
pub fn find_tabs_by_term(tabs: &[TabInfo], term: &str) -> Vec<TabInfo> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    tabs.iter()
        .filter(|tab| tab.title.to_lowercase().contains(&term) || tab.url.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

/// Tabs whose hostname (without "www.") is exactly `domain`
pub fn tabs_in_domain(tabs: &[TabInfo], domain: &str) -> Vec<TabInfo> {
    if domain.is_empty() {
        return Vec::new();
    }

    tabs.iter()
        .filter(|tab| extract_domain(&tab.url) == domain)
        .cloned()
        .collect()
}

/// Distinct domains in first-seen order, skipping tabs without one
pub fn unique_domains(tabs: &[TabInfo]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();

    tabs.iter()
        .map(|tab| extract_domain(&tab.url))
        .filter(|domain| !domain.is_empty())
        .filter(|domain| seen.insert(domain.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tab(id: i32, url: &str, title: &str) -> TabInfo {
        TabInfo::new(id, url.to_string(), title.to_string())
    }

    fn sample_tabs() -> Vec<TabInfo> {
        vec![
            create_test_tab(1, "https://github.com/rust-lang", "Rust Language"),
            create_test_tab(2, "https://www.google.com", "Google"),
            create_test_tab(3, "https://docs.rs/serde", "serde - Rust"),
            create_test_tab(4, "https://mail.google.com", "Inbox"),
            create_test_tab(5, "https://google.com/maps", "Maps"),
            create_test_tab(6, "chrome://newtab", "New Tab"),
            create_test_tab(7, "", "Broken"),
        ]
    }

    #[test]
    fn test_find_tabs_by_term() {
        let found = find_tabs_by_term(&sample_tabs(), "RUST");
        let ids: Vec<i32> = found.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_find_tabs_by_term_matches_url() {
        let found = find_tabs_by_term(&sample_tabs(), "maps");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 5);
    }

    #[test]
    fn test_find_tabs_by_empty_term() {
        assert!(find_tabs_by_term(&sample_tabs(), "").is_empty());
        assert!(find_tabs_by_term(&sample_tabs(), "   ").is_empty());
    }

    #[test]
    fn test_tabs_in_domain() {
        let found = tabs_in_domain(&sample_tabs(), "google.com");
        let ids: Vec<i32> = found.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![2, 5]);
        assert!(tabs_in_domain(&sample_tabs(), "").is_empty());
    }

    #[test]
    fn test_unique_domains() {
        let domains = unique_domains(&sample_tabs());

        assert_eq!(
            domains,
            vec!["github.com", "google.com", "docs.rs", "mail.google.com", "newtab"]
        );
    }
}
