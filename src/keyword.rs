/// Rule-based categorization by URL keywords
use crate::category::{Category, CategorySet, BUILT_IN_WEIGHT};
use crate::grouping::{Buckets, GroupingPolicy, OTHER_CATEGORY};
use crate::tab_data::TabInfo;

/// URL rules checked in order; the first category with a matching fragment wins.
pub const URL_RULES: [(&str, &[&str]); 7] = [
    ("Social", &["facebook", "twitter", "instagram", "linkedin", "reddit"]),
    ("Shopping", &["amazon", "ebay", "etsy", "walmart", "shop"]),
    ("Work", &["docs.", "sheets.", "office", "notion", "trello", "jira"]),
    ("News", &["news", "bbc", "cnn", "nytimes", "reuters"]),
    ("Entertainment", &["youtube", "netflix", "hulu", "spotify", "disney"]),
    ("Technology", &["github", "stackoverflow", "dev.", "tech", "apple", "google"]),
    ("Travel", &["travel", "booking", "airbnb", "hotel", "flight"]),
];

/// Keyword classifier with no learning state
///
/// User categories never change what `classify` returns; they only take part in
/// batch grouping.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    user_categories: CategorySet,
    policy: GroupingPolicy,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: GroupingPolicy) -> Self {
        KeywordClassifier {
            user_categories: CategorySet::new(),
            policy,
        }
    }

    /// Keywords are kept for listing only; matching goes by the category name.
    pub fn add_user_category(&mut self, name: &str, keywords: &[String]) {
        self.user_categories
            .insert(Category::user_defined(name, keywords, BUILT_IN_WEIGHT));
    }

    /// Later entries override earlier ones of the same name.
    pub fn add_user_categories<'a, I>(&mut self, categories: I)
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        for (name, keywords) in categories {
            self.add_user_category(name, keywords);
        }
    }

    pub fn remove_user_category(&mut self, name: &str) -> bool {
        self.user_categories.remove(name).is_some()
    }

    pub fn user_categories(&self) -> &CategorySet {
        &self.user_categories
    }

    /// Category of the first URL rule that matches, or "Other"
    pub fn classify(&self, tab: &TabInfo) -> &'static str {
        let url = tab.url.to_lowercase();

        URL_RULES
            .iter()
            .find(|(_, fragments)| fragments.iter().any(|fragment| url.contains(fragment)))
            .map(|(category, _)| *category)
            .unwrap_or(OTHER_CATEGORY)
    }

    /// First user category whose lowercased name occurs in the tab's title or URL
    pub fn match_user_category(&self, tab: &TabInfo) -> Option<&str> {
        let url = tab.url.to_lowercase();
        let title = tab.title.to_lowercase();

        self.user_categories
            .names()
            .find(|name| {
                let needle = name.to_lowercase();
                title.contains(&needle) || url.contains(&needle)
            })
    }

    /// Group a batch by rule category, then apply the grouping policy
    ///
    /// Tabs no rule claims are offered to the user categories before landing in "Other".
    pub fn group_tabs_by_category(&self, tabs: &[TabInfo]) -> Buckets<TabInfo> {
        let mut buckets = Buckets::new();

        for tab in tabs {
            let category = match self.classify(tab) {
                OTHER_CATEGORY => self.match_user_category(tab).unwrap_or(OTHER_CATEGORY),
                rule => rule,
            };
            buckets.push(category, tab.clone());
        }

        log::debug!(
            "Keyword grouping of {} tabs produced {} raw buckets",
            tabs.len(),
            buckets.len()
        );

        self.policy.apply(buckets)
    }

    /// Group by explicit category names; a tab may join every category it mentions
    ///
    /// Categories matching fewer than two tabs are dropped and nothing goes to "Other".
    pub fn group_tabs_by_custom_categories(
        &self,
        tabs: &[TabInfo],
        categories: &[String],
    ) -> Buckets<TabInfo> {
        let mut buckets = Buckets::new();

        for category in categories {
            let needle = category.to_lowercase();
            for tab in tabs {
                if tab.title.to_lowercase().contains(&needle) || tab.url.to_lowercase().contains(&needle) {
                    buckets.push(category, tab.clone());
                }
            }
        }

        buckets.retain_min(self.policy.min_group_size);
        buckets
    }
}
