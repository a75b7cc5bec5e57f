/// Storage model for chrome.storage.local

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::CategorySet;
use crate::config::{ClassifierConfig, Settings, SettingsUpdate, DEFAULT_SELECTED_CATEGORIES};
use crate::feedback::Feedback;
use crate::history::ActionHistory;
use crate::keyword::KeywordClassifier;
use crate::tfidf::TfIdfClassifier;

/// Every key this extension reads from storage
pub const STORAGE_KEYS: [&str; 10] = [
    "selectedCategories",
    "userCategoryKeywords",
    "autoGroupNewTabs",
    "preferMLCategorizer",
    "mlConfidenceThreshold",
    "userFeedbackEnabled",
    "classifierConfig",
    "tabGroupHistory",
    "mlFeedback",
    "metrics",
];

/// Kinds of grouping the metrics page tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingAction {
    Ai,
    ManualDomain,
    ManualKeyword,
    ManualCategory,
    UngroupAll,
}

impl GroupingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingAction::Ai => "ai",
            GroupingAction::ManualDomain => "manual-domain",
            GroupingAction::ManualKeyword => "manual-keyword",
            GroupingAction::ManualCategory => "manual-category",
            GroupingAction::UngroupAll => "ungroup-all",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    pub grouping_actions: BTreeMap<String, u32>,
    pub ai_groups_created: u32,
    pub manual_groups_created: u32,
    pub total_ungroup_actions: u32,
    pub last_updated: f64,
}

impl Metrics {
    pub fn track(&mut self, action: GroupingAction, count: u32, now: f64) {
        *self
            .grouping_actions
            .entry(action.as_str().to_string())
            .or_insert(0) += count;

        match action {
            GroupingAction::Ai => self.ai_groups_created += count,
            GroupingAction::ManualDomain
            | GroupingAction::ManualKeyword
            | GroupingAction::ManualCategory => self.manual_groups_created += count,
            GroupingAction::UngroupAll => self.total_ungroup_actions += count,
        }

        self.last_updated = now;
    }
}

/// Everything persisted under the extension's storage keys
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageData {
    pub selected_categories: Vec<String>,
    pub user_category_keywords: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub settings: Settings,
    pub classifier_config: ClassifierConfig,
    pub tab_group_history: ActionHistory,
    pub ml_feedback: Vec<Feedback>,
    pub metrics: Metrics,
}

impl StorageData {
    pub fn new() -> Self {
        StorageData {
            selected_categories: Vec::new(),
            user_category_keywords: BTreeMap::new(),
            settings: Settings::default(),
            classifier_config: ClassifierConfig::default(),
            tab_group_history: ActionHistory::new(),
            ml_feedback: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    /// State written on first install
    pub fn with_defaults() -> Self {
        StorageData {
            selected_categories: DEFAULT_SELECTED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            ..Self::new()
        }
    }

    /// Returns false if the category was already selected.
    pub fn add_category(&mut self, category: &str) -> bool {
        if self.selected_categories.iter().any(|c| c == category) {
            return false;
        }
        self.selected_categories.push(category.to_string());
        true
    }

    /// Unselect a category and forget its keywords
    pub fn remove_category(&mut self, category: &str) -> bool {
        let original_len = self.selected_categories.len();
        self.selected_categories.retain(|c| c != category);
        self.user_category_keywords.remove(category);
        self.selected_categories.len() < original_len
    }

    /// Empty keyword lists are not stored.
    pub fn set_keywords(&mut self, category: &str, keywords: Vec<String>) {
        if keywords.is_empty() {
            self.user_category_keywords.remove(category);
        } else {
            self.user_category_keywords.insert(category.to_string(), keywords);
        }
    }

    pub fn keywords_for(&self, category: &str) -> &[String] {
        self.user_category_keywords
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.settings.apply(update);
    }

    /// Options-page reset: flags and tuning back to defaults, categories untouched
    pub fn reset_settings(&mut self) {
        self.settings = Settings::default();
        self.classifier_config = ClassifierConfig::default();
    }

    /// Forget categories, keywords, history, feedback and metrics; settings are kept.
    pub fn clear_user_data(&mut self) {
        *self = StorageData {
            settings: self.settings.clone(),
            classifier_config: self.classifier_config,
            ..Self::with_defaults()
        };
    }

    /// Register the selected categories with both classifiers
    ///
    /// A selected category named like a built-in only overrides the built-in
    /// keyword list when the user saved keywords for it.
    pub fn load_into(&self, keyword: &mut KeywordClassifier, tfidf: &mut TfIdfClassifier) {
        let built_in = CategorySet::built_in();

        for category in &self.selected_categories {
            let keywords = self.keywords_for(category);
            keyword.add_user_category(category, keywords);

            if built_in.contains(category) && keywords.is_empty() {
                continue;
            }
            tfidf.add_user_category(category, keywords, None);
        }
    }
}

impl Default for StorageData {
    fn default() -> Self {
        Self::new()
    }
}
