/// User feedback on ML-suggested groups
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grouping::strip_ml_suffix;
use crate::storage::StorageData;
use crate::tab_data::{TabGroupInfo, TabInfo};
use crate::text::normalize_words;
use crate::tfidf::TfIdfClassifier;

/// Tabs kept with each feedback record
pub const FEEDBACK_SAMPLE_SIZE: usize = 3;

/// Keywords learned from one piece of feedback
pub const MAX_FEEDBACK_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackTab {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub timestamp: f64,
    pub group_id: i32,
    /// Group title without the ML suffix
    pub original_category: String,
    pub is_helpful: bool,
    #[serde(default)]
    pub suggested_category: String,
    #[serde(default)]
    pub comments: String,
    pub tab_count: usize,
    pub tab_sample: Vec<FeedbackTab>,
}

impl Feedback {
    pub fn new(
        group: &TabGroupInfo,
        tabs: &[TabInfo],
        is_helpful: bool,
        suggested_category: &str,
        comments: &str,
        timestamp: f64,
    ) -> Feedback {
        Feedback {
            id: Uuid::new_v4().to_string(),
            timestamp,
            group_id: group.id,
            original_category: strip_ml_suffix(&group.title).to_string(),
            is_helpful,
            suggested_category: suggested_category.trim().to_string(),
            comments: comments.trim().to_string(),
            tab_count: tabs.len(),
            tab_sample: tabs
                .iter()
                .take(FEEDBACK_SAMPLE_SIZE)
                .map(|tab| FeedbackTab {
                    title: tab.title.clone(),
                    url: tab.url.clone(),
                })
                .collect(),
        }
    }

    /// Unhelpful feedback naming a different category is worth learning from.
    pub fn proposes_new_category(&self) -> bool {
        !self.is_helpful
            && !self.suggested_category.is_empty()
            && self.suggested_category != self.original_category
    }
}

/// Distinct title words longer than three characters, first five in tab order
pub fn extract_feedback_keywords(tabs: &[TabInfo]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for tab in tabs {
        for word in normalize_words(&tab.title).split_whitespace() {
            if word.chars().count() > 3 && !keywords.iter().any(|k| k == word) {
                keywords.push(word.to_string());
            }
        }
    }

    keywords.truncate(MAX_FEEDBACK_KEYWORDS);
    keywords
}

/// Record feedback and, when it proposes a better category, teach the classifier
///
/// Returns the keywords given to the new category; empty when nothing was learned.
pub fn apply_feedback(
    feedback: Feedback,
    tabs: &[TabInfo],
    classifier: &mut TfIdfClassifier,
    storage: &mut StorageData,
) -> Vec<String> {
    let learned = if feedback.proposes_new_category() {
        let category = feedback.suggested_category.clone();
        storage.add_category(&category);

        let keywords = extract_feedback_keywords(tabs);
        if keywords.is_empty() {
            // Same registration a reload gives a selected category without keywords
            classifier.add_user_category(&category, &[], None);
        } else {
            let weight = classifier.config().feedback_category_weight;
            classifier.add_user_category(&category, &keywords, Some(weight));
            storage.set_keywords(&category, keywords.clone());
            log::info!("Learned category {:?} from feedback: {:?}", category, keywords);
        }
        keywords
    } else {
        Vec::new()
    };

    storage.ml_feedback.push(feedback);
    learned
}

/// Share of helpful feedback, in whole percent; `None` without any feedback
pub fn helpful_percent(feedback: &[Feedback]) -> Option<u8> {
    if feedback.is_empty() {
        return None;
    }
    let helpful = feedback.iter().filter(|f| f.is_helpful).count();
    Some(((helpful * 100) as f64 / feedback.len() as f64).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab_data::GroupColor;

    fn create_test_tab(id: i32, title: &str) -> TabInfo {
        TabInfo::new(id, format!("https://example.com/{}", id), title.to_string())
    }

    fn ml_group() -> TabGroupInfo {
        TabGroupInfo {
            id: 9,
            title: "Technology (ML)".to_string(),
            color: GroupColor::Green,
        }
    }

    fn sample_tabs() -> Vec<TabInfo> {
        vec![
            create_test_tab(1, "Sourdough starter guide"),
            create_test_tab(2, "Best sourdough recipes!"),
            create_test_tab(3, "Baking bread at home"),
            create_test_tab(4, "Flour types explained"),
        ]
    }

    #[test]
    fn test_feedback_record() {
        let feedback = Feedback::new(&ml_group(), &sample_tabs(), false, " Baking ", "", 1.0);

        assert_eq!(feedback.original_category, "Technology");
        assert_eq!(feedback.suggested_category, "Baking");
        assert_eq!(feedback.tab_count, 4);
        assert_eq!(feedback.tab_sample.len(), FEEDBACK_SAMPLE_SIZE);
        assert!(feedback.proposes_new_category());
    }

    #[test]
    fn test_helpful_or_same_category_proposes_nothing() {
        let helpful = Feedback::new(&ml_group(), &sample_tabs(), true, "Baking", "", 1.0);
        let same = Feedback::new(&ml_group(), &sample_tabs(), false, "Technology", "", 1.0);
        let blank = Feedback::new(&ml_group(), &sample_tabs(), false, "  ", "", 1.0);

        assert!(!helpful.proposes_new_category());
        assert!(!same.proposes_new_category());
        assert!(!blank.proposes_new_category());
    }

    #[test]
    fn test_extract_feedback_keywords() {
        let keywords = extract_feedback_keywords(&sample_tabs());

        assert_eq!(keywords, vec!["sourdough", "starter", "guide", "best", "recipes"]);
    }

    #[test]
    fn test_apply_feedback_teaches_classifier() {
        let mut classifier = TfIdfClassifier::new();
        let mut storage = StorageData::new();
        let tabs = sample_tabs();
        let feedback = Feedback::new(&ml_group(), &tabs, false, "Baking", "wrong group", 1.0);

        let learned = apply_feedback(feedback, &tabs, &mut classifier, &mut storage);

        assert_eq!(learned.len(), 5);
        let baking = classifier.categories().into_iter().find(|c| c.name == "Baking").unwrap();
        assert_eq!(baking.weight, 1.5);
        assert_eq!(baking.keywords, learned);
        assert!(storage.selected_categories.contains(&"Baking".to_string()));
        assert_eq!(storage.keywords_for("Baking"), learned.as_slice());
        assert_eq!(storage.ml_feedback.len(), 1);
    }

    #[test]
    fn test_feedback_without_keywords_matches_reload() {
        let mut classifier = TfIdfClassifier::new();
        let mut storage = StorageData::new();
        let tabs = vec![create_test_tab(1, "A b"), create_test_tab(2, "c d")];
        let feedback = Feedback::new(&ml_group(), &tabs, false, "Cooking", "", 1.0);

        let learned = apply_feedback(feedback, &tabs, &mut classifier, &mut storage);

        assert!(learned.is_empty());
        assert!(storage.keywords_for("Cooking").is_empty());
        let cooking = classifier.categories().into_iter().find(|c| c.name == "Cooking").cloned().unwrap();

        let mut reloaded = TfIdfClassifier::new();
        storage.load_into(&mut crate::keyword::KeywordClassifier::new(), &mut reloaded);
        let after_reload = reloaded.categories().into_iter().find(|c| c.name == "Cooking").cloned().unwrap();

        assert_eq!(cooking.keywords, vec!["cooking"]);
        assert_eq!(cooking.weight, 1.2);
        assert_eq!(cooking, after_reload);
    }

    #[test]
    fn test_apply_helpful_feedback_only_records() {
        let mut classifier = TfIdfClassifier::new();
        let mut storage = StorageData::new();
        let tabs = sample_tabs();
        let feedback = Feedback::new(&ml_group(), &tabs, true, "", "", 1.0);

        let learned = apply_feedback(feedback, &tabs, &mut classifier, &mut storage);

        assert!(learned.is_empty());
        assert_eq!(classifier.categories().len(), 9);
        assert_eq!(storage.ml_feedback.len(), 1);
    }

    #[test]
    fn test_helpful_percent() {
        let tabs = sample_tabs();
        let records = vec![
            Feedback::new(&ml_group(), &tabs, true, "", "", 1.0),
            Feedback::new(&ml_group(), &tabs, true, "", "", 2.0),
            Feedback::new(&ml_group(), &tabs, false, "", "", 3.0),
        ];

        assert_eq!(helpful_percent(&records), Some(67));
        assert_eq!(helpful_percent(&[]), None);
    }
}
