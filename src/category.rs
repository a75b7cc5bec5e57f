/// Categories and the built-in keyword catalogue
use serde::{Deserialize, Serialize};

/// Weight given to every built-in category
pub const BUILT_IN_WEIGHT: f64 = 1.0;

/// Keyword lists scored by the TF-IDF classifier, in scoring order.
///
/// Keywords are matched literally against lowercased terms.
pub const BUILT_IN_CATEGORIES: [(&str, &[&str]); 9] = [
    (
        "Social",
        &[
            "facebook", "twitter", "instagram", "linkedin", "social", "friend", "profile", "post",
            "feed", "follow", "share", "message", "chat", "comment", "like", "reddit", "community",
            "discord", "slack", "whatsapp",
        ],
    ),
    (
        "Shopping",
        &[
            "amazon", "ebay", "etsy", "walmart", "shop", "store", "buy", "price", "product",
            "cart", "checkout", "order", "shipping", "discount", "deal", "purchase", "sale",
            "shopping", "ecommerce", "marketplace",
        ],
    ),
    (
        "Technology",
        &[
            "github", "stackoverflow", "code", "programming", "developer", "tech", "software",
            "hardware", "app", "computer", "gadget", "digital", "IT", "data", "cloud", "API",
            "algorithm", "javascript", "python", "mobile",
        ],
    ),
    (
        "News",
        &[
            "news", "article", "report", "headline", "journalism", "media", "press", "breaking",
            "latest", "update", "cnn", "bbc", "nytimes", "reuters", "politics", "economy",
            "world", "local", "national", "international",
        ],
    ),
    (
        "Work",
        &[
            "docs", "sheets", "slides", "office", "excel", "word", "powerpoint", "notion",
            "trello", "jira", "asana", "project", "task", "meeting", "calendar", "email",
            "document", "report", "business", "corporate",
        ],
    ),
    (
        "Entertainment",
        &[
            "youtube", "netflix", "hulu", "spotify", "disney", "movie", "video", "music",
            "stream", "play", "game", "watch", "listen", "show", "series", "entertainment", "fun",
            "leisure", "hobby", "podcast",
        ],
    ),
    (
        "Travel",
        &[
            "travel", "trip", "vacation", "flight", "hotel", "booking", "airbnb", "expedia",
            "map", "destination", "tour", "guide", "holiday", "resort", "adventure", "explore",
            "journey", "tourism", "transportation", "lodging",
        ],
    ),
    (
        "Education",
        &[
            "learn", "course", "class", "education", "tutorial", "study", "school", "university",
            "college", "academy", "lecture", "lesson", "training", "teach", "student",
            "knowledge", "skill", "degree", "certificate", "mooc",
        ],
    ),
    (
        "Finance",
        &[
            "bank", "finance", "money", "invest", "stock", "market", "trading", "crypto",
            "bitcoin", "currency", "economy", "fund", "loan", "mortgage", "paypal", "payment",
            "transaction", "wallet", "credit", "debit",
        ],
    ),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryOrigin {
    BuiltIn,
    UserDefined,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
    pub weight: f64,
    pub origin: CategoryOrigin,
}

impl Category {
    pub fn built_in(name: &str, keywords: &[&str]) -> Category {
        Category {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight: BUILT_IN_WEIGHT,
            origin: CategoryOrigin::BuiltIn,
        }
    }

    /// A runtime category; with no keywords the lowercased name is its only keyword.
    pub fn user_defined(name: &str, keywords: &[String], weight: f64) -> Category {
        let keywords = if keywords.is_empty() {
            vec![name.to_lowercase()]
        } else {
            keywords.to_vec()
        };

        Category {
            name: name.to_string(),
            keywords,
            weight,
            origin: CategoryOrigin::UserDefined,
        }
    }

    /// True when any keyword occurs inside `domain`. An empty domain never matches.
    pub fn matches_domain(&self, domain: &str) -> bool {
        !domain.is_empty() && self.keywords.iter().any(|keyword| domain.contains(keyword.as_str()))
    }
}

/// Categories in insertion order, unique by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn built_in() -> Self {
        CategorySet {
            categories: BUILT_IN_CATEGORIES
                .iter()
                .map(|(name, keywords)| Category::built_in(name, keywords))
                .collect(),
        }
    }

    /// Insert or replace by name. A replaced entry keeps its position.
    pub fn insert(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Category> {
        let position = self.categories.iter().position(|c| c.name == name)?;
        Some(self.categories.remove(position))
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// This set overlaid with `overrides`
    ///
    /// Entries of `overrides` replace same-named entries in place; the rest follow
    /// in their own insertion order.
    pub fn merged<'a>(&'a self, overrides: &'a CategorySet) -> Vec<&'a Category> {
        let mut merged: Vec<&Category> = self
            .categories
            .iter()
            .map(|base| overrides.get(&base.name).unwrap_or(base))
            .collect();

        merged.extend(overrides.iter().filter(|c| !self.contains(&c.name)));
        merged
    }
}
