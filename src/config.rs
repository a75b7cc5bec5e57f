/// Tuning constants and user settings
use serde::{Deserialize, Serialize};

use crate::grouping::GroupingPolicy;

/// Categories selected on first install
pub const DEFAULT_SELECTED_CATEGORIES: [&str; 5] = ["Social", "Shopping", "Technology", "News", "Work"];

/// Classifier tuning; every field falls back to its default when absent from storage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    /// Best scores below this fall back to the tab's domain
    pub confidence_floor: f64,
    pub user_category_weight: f64,
    /// Weight of categories created from negative feedback
    pub feedback_category_weight: f64,
    /// Flat bonus, times category weight, when a keyword occurs in the hostname
    pub domain_match_bonus: f64,
    pub min_group_size: usize,
}

impl ClassifierConfig {
    pub fn grouping_policy(&self) -> GroupingPolicy {
        GroupingPolicy::new(self.min_group_size)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            confidence_floor: 0.1,
            user_category_weight: 1.2,
            feedback_category_weight: 1.5,
            domain_match_bonus: 0.5,
            min_group_size: 2,
        }
    }
}

/// Flags from the options page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auto_group_new_tabs: bool,
    #[serde(rename = "preferMLCategorizer")]
    pub prefer_ml_categorizer: bool,
    /// Percent, 0 to 100
    #[serde(rename = "mlConfidenceThreshold")]
    pub ml_confidence_threshold: u8,
    pub user_feedback_enabled: bool,
}

impl Settings {
    /// The threshold as a fraction, clamped to 0..=1
    pub fn confidence_threshold(&self) -> f64 {
        f64::from(self.ml_confidence_threshold.min(100)) / 100.0
    }

    pub fn accepts_confidence(&self, confidence: f64) -> bool {
        confidence >= self.confidence_threshold()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            auto_group_new_tabs: false,
            prefer_ml_categorizer: true,
            ml_confidence_threshold: 50,
            user_feedback_enabled: true,
        }
    }
}

/// Options-page changes; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub auto_group_new_tabs: Option<bool>,
    #[serde(rename = "preferMLCategorizer")]
    pub prefer_ml_categorizer: Option<bool>,
    #[serde(rename = "mlConfidenceThreshold")]
    pub ml_confidence_threshold: Option<u8>,
    pub user_feedback_enabled: Option<bool>,
}

impl Settings {
    /// Thresholds above 100 are stored as 100.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(auto_group) = update.auto_group_new_tabs {
            self.auto_group_new_tabs = auto_group;
        }
        if let Some(prefer_ml) = update.prefer_ml_categorizer {
            self.prefer_ml_categorizer = prefer_ml;
        }
        if let Some(threshold) = update.ml_confidence_threshold {
            self.ml_confidence_threshold = threshold.min(100);
        }
        if let Some(feedback) = update.user_feedback_enabled {
            self.user_feedback_enabled = feedback;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_defaults() {
        let config = ClassifierConfig::default();

        assert_eq!(config.confidence_floor, 0.1);
        assert_eq!(config.user_category_weight, 1.2);
        assert_eq!(config.grouping_policy().min_group_size, 2);
    }

    #[test]
    fn test_classifier_config_partial_json() {
        let config: ClassifierConfig = serde_json::from_str(r#"{"confidenceFloor": 0.25}"#).unwrap();

        assert_eq!(config.confidence_floor, 0.25);
        assert_eq!(config.user_category_weight, 1.2);
    }

    #[test]
    fn test_settings_storage_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();

        assert_eq!(json["autoGroupNewTabs"], false);
        assert_eq!(json["preferMLCategorizer"], true);
        assert_eq!(json["mlConfidenceThreshold"], 50);
        assert_eq!(json["userFeedbackEnabled"], true);
    }

    #[test]
    fn test_settings_defaults_when_missing() {
        let settings: Settings = serde_json::from_str(r#"{"autoGroupNewTabs": true}"#).unwrap();

        assert!(settings.auto_group_new_tabs);
        assert!(settings.prefer_ml_categorizer);
        assert_eq!(settings.ml_confidence_threshold, 50);
    }

    #[test]
    fn test_confidence_threshold_clamped() {
        let settings = Settings {
            ml_confidence_threshold: 250,
            ..Settings::default()
        };

        assert_eq!(settings.confidence_threshold(), 1.0);
        assert!(settings.accepts_confidence(1.3));
        assert!(!settings.accepts_confidence(0.9));
    }

    #[test]
    fn test_apply_settings_update() {
        let mut settings = Settings::default();
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"autoGroupNewTabs": true, "mlConfidenceThreshold": 180}"#).unwrap();

        settings.apply(&update);

        assert!(settings.auto_group_new_tabs);
        assert_eq!(settings.ml_confidence_threshold, 100);
        assert!(settings.prefer_ml_categorizer);
        assert!(settings.user_feedback_enabled);
    }
}
