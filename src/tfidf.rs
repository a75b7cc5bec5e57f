/// TF-IDF categorization against category keyword lists
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::category::{Category, CategorySet};
use crate::config::ClassifierConfig;
use crate::corpus::CorpusStatistics;
use crate::grouping::{Buckets, GroupMember, OTHER_CATEGORY};
use crate::tab_data::TabInfo;
use crate::text::DocumentRecord;

/// Score of every category for one tab, in scoring order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    scores: Vec<(String, f64)>,
}

impl ScoreBreakdown {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Serialize for ScoreBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for (category, score) in &self.scores {
            map.serialize_entry(category, score)?;
        }
        map.end()
    }
}

/// Outcome of categorizing one tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub category: String,
    /// Best raw score, reported even when it fell below the floor
    pub confidence: f64,
    pub scores: ScoreBreakdown,
}

/// A tab together with the confidence of the category it was placed in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTab {
    pub tab: TabInfo,
    pub confidence: f64,
}

impl GroupMember for ScoredTab {
    fn tab_id(&self) -> i32 {
        self.tab.id
    }
}

/// Statistical categorizer: keyword overlap weighted by TF-IDF over the current batch
///
/// Holds the user categories for its whole lifetime and the statistics of the
/// last batch passed to `learn`. One batch at a time.
#[derive(Debug, Clone)]
pub struct TfIdfClassifier {
    config: ClassifierConfig,
    built_in: CategorySet,
    user: CategorySet,
    corpus: CorpusStatistics,
}

impl TfIdfClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        TfIdfClassifier {
            config,
            built_in: CategorySet::built_in(),
            user: CategorySet::new(),
            corpus: CorpusStatistics::new(),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn corpus(&self) -> &CorpusStatistics {
        &self.corpus
    }

    /// Add or replace a user category
    ///
    /// Without keywords the lowercased name becomes the only keyword; without a
    /// weight the configured user weight applies.
    pub fn add_user_category(&mut self, name: &str, keywords: &[String], weight: Option<f64>) {
        let weight = weight.unwrap_or(self.config.user_category_weight);
        log::debug!("Adding user category {:?} with weight {}", name, weight);
        self.user.insert(Category::user_defined(name, keywords, weight));
    }

    pub fn add_user_categories<'a, I>(&mut self, categories: I, weight: Option<f64>)
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        for (name, keywords) in categories {
            self.add_user_category(name, keywords, weight);
        }
    }

    /// A built-in shadowed by the removed entry scores again afterwards.
    pub fn remove_user_category(&mut self, name: &str) -> bool {
        self.user.remove(name).is_some()
    }

    /// Built-ins (with user overrides in place) followed by user-only categories
    pub fn categories(&self) -> Vec<&Category> {
        self.built_in.merged(&self.user)
    }

    /// Rebuild corpus statistics from this batch, discarding the previous one.
    pub fn learn(&mut self, tabs: &[TabInfo]) {
        let documents: Vec<DocumentRecord> = tabs.iter().map(DocumentRecord::from_tab).collect();
        self.corpus.learn(&documents);
        log::debug!(
            "Learned {} documents, {} distinct terms",
            self.corpus.total_documents(),
            self.corpus.vocabulary_size()
        );
    }

    /// Sum of TF-IDF over keywords present among the terms, plus the domain bonus, times the weight.
    pub fn score_category(&self, category: &Category, document: &DocumentRecord<'_>) -> f64 {
        let keyword_score: f64 = category
            .keywords
            .iter()
            .filter(|keyword| document.contains_term(keyword))
            .map(|keyword| self.corpus.tf_idf(keyword, document) * category.weight)
            .sum();

        let domain_score = if category.matches_domain(&document.domain) {
            self.config.domain_match_bonus * category.weight
        } else {
            0.0
        };

        keyword_score + domain_score
    }

    /// Pick the highest-scoring category for a tab
    ///
    /// Ties keep the earlier category. A best score under the confidence floor
    /// yields the tab's domain instead, or "Other" when it has none. Works with
    /// stale or empty statistics; unseen terms just count as rare.
    pub fn categorize_tab(&self, tab: &TabInfo) -> Prediction {
        let document = DocumentRecord::from_tab(tab);

        let mut best_category: Option<&str> = None;
        let mut best_score = 0.0;
        let mut scores = Vec::new();

        for category in self.categories() {
            let score = self.score_category(category, &document);
            if score > best_score {
                best_score = score;
                best_category = Some(category.name.as_str());
            }
            scores.push((category.name.clone(), score));
        }

        let category = match best_category {
            Some(name) if best_score >= self.config.confidence_floor => name.to_string(),
            _ if !document.domain.is_empty() => document.domain.clone(),
            _ => OTHER_CATEGORY.to_string(),
        };

        Prediction {
            category,
            confidence: best_score,
            scores: ScoreBreakdown { scores },
        }
    }

    /// Learn from the batch, categorize every tab and apply the grouping policy
    pub fn categorize_tabs(&mut self, tabs: &[TabInfo]) -> Buckets<ScoredTab> {
        self.learn(tabs);

        let mut buckets = Buckets::new();
        for tab in tabs {
            let prediction = self.categorize_tab(tab);
            buckets.push(
                &prediction.category,
                ScoredTab {
                    tab: tab.clone(),
                    confidence: prediction.confidence,
                },
            );
        }

        log::debug!(
            "Categorized {} tabs into {} raw buckets",
            tabs.len(),
            buckets.len()
        );

        self.config.grouping_policy().apply(buckets)
    }
}

impl Default for TfIdfClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tab(id: i32, url: &str, title: &str) -> TabInfo {
        TabInfo::new(id, url.to_string(), title.to_string())
    }

    fn scenario_tabs() -> Vec<TabInfo> {
        vec![
            create_test_tab(1, "github.com/foo", "foo repo"),
            create_test_tab(2, "github.com/bar", "bar issue"),
            create_test_tab(3, "cnn.com/news1", "Breaking: X"),
        ]
    }

    fn best_other_score(prediction: &Prediction, except: &str) -> f64 {
        prediction
            .scores
            .iter()
            .filter(|(name, _)| *name != except)
            .map(|(_, score)| score)
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_scenario_technology_wins() {
        let mut classifier = TfIdfClassifier::new();
        let tabs = scenario_tabs();
        classifier.learn(&tabs);

        assert_eq!(classifier.corpus().document_frequency("github"), 2);
        assert_eq!(classifier.corpus().document_frequency("news"), 1);
        assert_eq!(classifier.corpus().document_frequency("breaking"), 1);

        let prediction = classifier.categorize_tab(&tabs[0]);
        let tf_idf = 0.2 * (4.0f64 / 3.0).ln();

        assert_eq!(prediction.category, "Technology");
        assert!((prediction.confidence - (tf_idf + 0.5)).abs() < 1e-12);
        assert!(prediction.confidence > best_other_score(&prediction, "Technology"));
    }

    #[test]
    fn test_news_tab_scores_news() {
        let mut classifier = TfIdfClassifier::new();
        let tabs = scenario_tabs();
        classifier.learn(&tabs);

        let prediction = classifier.categorize_tab(&tabs[2]);

        assert_eq!(prediction.category, "News");
        assert!(prediction.scores.get("News").unwrap() > 0.5);
    }

    #[test]
    fn test_identical_domains_fall_back_to_domain() {
        let mut classifier = TfIdfClassifier::new();
        let tabs: Vec<TabInfo> = (0..10)
            .map(|id| create_test_tab(id, "https://zzqx.org/qwerty", "qwerty zzqx"))
            .collect();
        classifier.learn(&tabs);

        for tab in &tabs {
            let prediction = classifier.categorize_tab(tab);
            assert_eq!(prediction.confidence, 0.0);
            assert!(prediction.scores.iter().all(|(_, score)| score == 0.0));
            assert_eq!(prediction.category, "zzqx.org");
        }
    }

    #[test]
    fn test_low_signal_without_domain_is_other() {
        let classifier = TfIdfClassifier::new();
        let prediction = classifier.categorize_tab(&create_test_tab(1, "https://", "qwerty"));

        assert_eq!(prediction.category, OTHER_CATEGORY);
        assert_eq!(prediction.confidence, 0.0);
    }

    #[test]
    fn test_cold_corpus_does_not_fail() {
        let classifier = TfIdfClassifier::new();
        let prediction = classifier.categorize_tab(&create_test_tab(1, "https://github.com/x", "code"));

        // Keyword terms have zero IDF without statistics; the domain bonus still applies
        assert_eq!(prediction.category, "Technology");
        assert_eq!(prediction.confidence, 0.5);
    }

    #[test]
    fn test_scores_cover_every_category_in_order() {
        let mut classifier = TfIdfClassifier::new();
        classifier.add_user_category("Research", &[], None);
        let prediction = classifier.categorize_tab(&create_test_tab(1, "https://example.org", "x"));

        let names: Vec<&str> = prediction.scores.iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names[0], "Social");
        assert_eq!(names[9], "Research");
    }

    #[test]
    fn test_user_category_defaults() {
        let mut classifier = TfIdfClassifier::new();
        classifier.add_user_category("Research", &[], None);

        let research = classifier.categories().into_iter().find(|c| c.name == "Research").unwrap();
        assert_eq!(research.keywords, vec!["research"]);
        assert_eq!(research.weight, 1.2);
    }

    #[test]
    fn test_user_category_outranks_built_ins() {
        let mut classifier = TfIdfClassifier::new();
        classifier.add_user_category("Research", &[], None);
        let tabs = vec![
            create_test_tab(1, "https://papers.example.org/p", "Research Paper on X"),
            create_test_tab(2, "https://example.net/a", "Cooking ideas"),
            create_test_tab(3, "https://example.net/b", "Gardening ideas"),
        ];
        classifier.learn(&tabs);

        let prediction = classifier.categorize_tab(&tabs[0]);

        assert_eq!(prediction.category, "Research");
        assert!(prediction.confidence > best_other_score(&prediction, "Research"));
    }

    #[test]
    fn test_explicit_weight_and_keywords() {
        let mut classifier = TfIdfClassifier::new();
        let keywords = vec!["crate".to_string(), "cargo".to_string()];
        classifier.add_user_category("Rust", &keywords, Some(3.0));

        let rust = classifier.categories().into_iter().find(|c| c.name == "Rust").unwrap();
        assert_eq!(rust.keywords, keywords);
        assert_eq!(rust.weight, 3.0);
    }

    #[test]
    fn test_user_category_overrides_built_in() {
        let mut classifier = TfIdfClassifier::new();
        classifier.add_user_category("News", &["gazette".to_string()], None);

        let categories = classifier.categories();
        assert_eq!(categories.len(), 9);
        assert_eq!(categories[3].keywords, vec!["gazette"]);

        assert!(classifier.remove_user_category("News"));
        assert_eq!(classifier.categories()[3].keywords.len(), 20);
    }

    #[test]
    fn test_ties_keep_first_category() {
        let mut classifier = TfIdfClassifier::new();
        let keyword = vec!["zzqx".to_string()];
        classifier.add_user_categories(vec![("First", keyword.as_slice()), ("Second", keyword.as_slice())], None);
        let tabs = vec![
            create_test_tab(1, "https://a.example/zzqx", "zzqx"),
            create_test_tab(2, "https://b.example/", "unrelated"),
        ];
        classifier.learn(&tabs);

        let prediction = classifier.categorize_tab(&tabs[0]);

        assert_eq!(prediction.scores.get("First"), prediction.scores.get("Second"));
        assert_eq!(prediction.category, "First");
    }

    #[test]
    fn test_configurable_floor() {
        let config = ClassifierConfig {
            confidence_floor: 0.6,
            ..ClassifierConfig::default()
        };
        let classifier = TfIdfClassifier::with_config(config);
        let prediction = classifier.categorize_tab(&create_test_tab(1, "https://github.com/x", "code"));

        assert_eq!(prediction.category, "github.com");
        assert_eq!(prediction.confidence, 0.5);
    }

    #[test]
    fn test_categorize_tabs_enforces_minimum_size() {
        let mut classifier = TfIdfClassifier::new();
        let tabs = vec![
            create_test_tab(1, "https://github.com/a", "code review"),
            create_test_tab(2, "https://github.com/b", "python code"),
            create_test_tab(3, "https://www.cnn.com/politics", "Election"),
            create_test_tab(4, "https://qwerty.example/", "asdf"),
            create_test_tab(5, "https://www.amazon.com/cart", "Cart"),
        ];

        let groups = classifier.categorize_tabs(&tabs);

        for (_, members) in groups.iter() {
            assert!(members.len() >= 2);
        }
        let technology: Vec<i32> = groups.get("Technology").unwrap().iter().map(|s| s.tab.id).collect();
        let other: Vec<i32> = groups.get(OTHER_CATEGORY).unwrap().iter().map(|s| s.tab.id).collect();
        assert_eq!(technology, vec![1, 2]);
        assert_eq!(other, vec![3, 4, 5]);
        assert_eq!(classifier.corpus().total_documents(), 5);
    }

    #[test]
    fn test_categorize_tabs_drops_small_other() {
        let mut classifier = TfIdfClassifier::new();
        let tabs = vec![
            create_test_tab(1, "https://github.com/a", "code"),
            create_test_tab(2, "https://github.com/b", "code"),
            create_test_tab(3, "https://qwerty.example/", "asdf"),
        ];

        let groups = classifier.categorize_tabs(&tabs);

        assert_eq!(groups.len(), 1);
        assert!(groups.contains("Technology"));
        assert!(!groups.contains(OTHER_CATEGORY));
    }

    #[test]
    fn test_categorize_tabs_empty_batch() {
        let mut classifier = TfIdfClassifier::new();

        assert!(classifier.categorize_tabs(&[]).is_empty());
        assert!(classifier.corpus().is_empty());
    }

    #[test]
    fn test_learn_twice_same_statistics() {
        let mut classifier = TfIdfClassifier::new();
        let tabs = scenario_tabs();

        classifier.learn(&tabs);
        let first = classifier.corpus().clone();
        classifier.learn(&tabs);

        assert_eq!(classifier.corpus(), &first);
    }

    #[test]
    fn test_prediction_serializes_scores_as_map() {
        let classifier = TfIdfClassifier::new();
        let prediction = classifier.categorize_tab(&create_test_tab(1, "https://github.com/x", "x"));

        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["category"], "Technology");
        assert_eq!(json["scores"]["Technology"], 0.5);
        assert_eq!(json["scores"]["Social"], 0.0);
    }
}
