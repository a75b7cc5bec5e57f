/// Message dispatch between browser events and the classifiers
///
/// Event listeners decode a `Request`, hand it to a `Session` and send back
/// the `Response`. Handling is synchronous and never fails.
use serde::{Deserialize, Serialize};

use crate::config::{Settings, SettingsUpdate};
use crate::feedback::{apply_feedback, Feedback};
use crate::grouping::Buckets;
use crate::keyword::KeywordClassifier;
use crate::storage::StorageData;
use crate::tab_data::{TabGroupInfo, TabInfo};
use crate::tfidf::{Prediction, ScoredTab, TfIdfClassifier};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// TF-IDF suggestions for a whole window
    GetPredictions { tabs: Vec<TabInfo> },
    /// One tab, against the rest of its window
    #[serde(rename_all = "camelCase")]
    CategorizeTab {
        tab: TabInfo,
        #[serde(default)]
        tabs: Vec<TabInfo>,
        #[serde(default, alias = "useML")]
        use_ml: bool,
    },
    /// A tab finished loading; only answered when auto-grouping is on
    SuggestCategory { tab: TabInfo, tabs: Vec<TabInfo> },
    /// Rule-based category of a single tab
    Classify { tab: TabInfo },
    GroupByCategory { tabs: Vec<TabInfo> },
    AddCategory {
        name: String,
        #[serde(default)]
        keywords: Vec<String>,
    },
    RemoveCategory { name: String },
    #[serde(rename_all = "camelCase")]
    SubmitFeedback {
        group: TabGroupInfo,
        tabs: Vec<TabInfo>,
        is_helpful: bool,
        #[serde(default)]
        suggested_category: String,
        #[serde(default)]
        comments: String,
        timestamp: f64,
    },
    /// Options page save; only the fields present change
    UpdateSettings { settings: SettingsUpdate },
    ResetSettings,
    /// Drop categories, keywords, history, feedback and metrics
    ClearUserData,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Prediction {
        prediction: Prediction,
    },
    Category {
        category: String,
    },
    #[serde(rename_all = "camelCase")]
    CategorizedTabs {
        categorized_tabs: Buckets<ScoredTab>,
    },
    Groups {
        groups: Buckets<TabInfo>,
    },
    Suggestion {
        suggestion: Option<Prediction>,
    },
    #[serde(rename_all = "camelCase")]
    CategoriesChanged {
        selected_categories: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    FeedbackRecorded {
        learned_keywords: Vec<String>,
    },
    Settings {
        settings: Settings,
    },
}

/// Classifiers and persisted state for one popup or background context
///
/// Created explicitly by its owner; there is no global instance.
#[derive(Debug, Clone)]
pub struct Session {
    keyword: KeywordClassifier,
    tfidf: TfIdfClassifier,
    storage: StorageData,
}

impl Session {
    pub fn new(storage: StorageData) -> Self {
        let config = storage.classifier_config;
        let mut keyword = KeywordClassifier::with_policy(config.grouping_policy());
        let mut tfidf = TfIdfClassifier::with_config(config);
        storage.load_into(&mut keyword, &mut tfidf);

        Session {
            keyword,
            tfidf,
            storage,
        }
    }

    pub fn keyword(&self) -> &KeywordClassifier {
        &self.keyword
    }

    pub fn tfidf(&self) -> &TfIdfClassifier {
        &self.tfidf
    }

    pub fn tfidf_mut(&mut self) -> &mut TfIdfClassifier {
        &mut self.tfidf
    }

    /// Current persisted state; callers write it back after mutating requests.
    pub fn storage(&self) -> &StorageData {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut StorageData {
        &mut self.storage
    }

    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::GetPredictions { tabs } => {
                log::info!("Predicting groups for {} tabs", tabs.len());
                Response::CategorizedTabs {
                    categorized_tabs: self.tfidf.categorize_tabs(&tabs),
                }
            }
            Request::CategorizeTab { tab, tabs, use_ml } => {
                if use_ml {
                    self.learn_window(&tabs);
                    Response::Prediction {
                        prediction: self.tfidf.categorize_tab(&tab),
                    }
                } else {
                    Response::Category {
                        category: self.keyword.classify(&tab).to_string(),
                    }
                }
            }
            Request::SuggestCategory { tab, tabs } => Response::Suggestion {
                suggestion: self.suggest_category(&tab, &tabs),
            },
            Request::Classify { tab } => Response::Category {
                category: self.keyword.classify(&tab).to_string(),
            },
            Request::GroupByCategory { tabs } => Response::Groups {
                groups: self.keyword.group_tabs_by_category(&tabs),
            },
            Request::AddCategory { name, keywords } => {
                self.add_category(&name, keywords);
                Response::CategoriesChanged {
                    selected_categories: self.storage.selected_categories.clone(),
                }
            }
            Request::RemoveCategory { name } => {
                self.remove_category(&name);
                Response::CategoriesChanged {
                    selected_categories: self.storage.selected_categories.clone(),
                }
            }
            Request::SubmitFeedback {
                group,
                tabs,
                is_helpful,
                suggested_category,
                comments,
                timestamp,
            } => {
                if !self.storage.settings.user_feedback_enabled {
                    log::warn!("Ignoring feedback for group {}: feedback is disabled", group.id);
                    return Response::FeedbackRecorded {
                        learned_keywords: Vec::new(),
                    };
                }
                let feedback = Feedback::new(
                    &group,
                    &tabs,
                    is_helpful,
                    &suggested_category,
                    &comments,
                    timestamp,
                );
                if feedback.proposes_new_category() {
                    self.keyword.add_user_category(&feedback.suggested_category, &[]);
                }
                Response::FeedbackRecorded {
                    learned_keywords: apply_feedback(feedback, &tabs, &mut self.tfidf, &mut self.storage),
                }
            }
            Request::UpdateSettings { settings } => {
                self.storage.update_settings(&settings);
                log::info!("Settings updated: {:?}", self.storage.settings);
                Response::Settings {
                    settings: self.storage.settings.clone(),
                }
            }
            Request::ResetSettings => {
                self.storage.reset_settings();
                self.reload();
                Response::Settings {
                    settings: self.storage.settings.clone(),
                }
            }
            Request::ClearUserData => {
                log::warn!("Clearing all user categories, history and feedback");
                self.storage.clear_user_data();
                self.reload();
                Response::CategoriesChanged {
                    selected_categories: self.storage.selected_categories.clone(),
                }
            }
        }
    }

    /// Rebuild both classifiers from storage; corpus statistics start empty.
    fn reload(&mut self) {
        let storage = std::mem::take(&mut self.storage);
        *self = Session::new(storage);
    }

    /// Select a category and register it with both classifiers
    pub fn add_category(&mut self, name: &str, keywords: Vec<String>) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if self.storage.add_category(name) {
            log::info!("Selected category {:?}", name);
        }
        self.keyword.add_user_category(name, &keywords);
        self.tfidf.add_user_category(name, &keywords, None);
        if !keywords.is_empty() {
            self.storage.set_keywords(name, keywords);
        }
    }

    pub fn remove_category(&mut self, name: &str) {
        self.storage.remove_category(name);
        self.keyword.remove_user_category(name);
        self.tfidf.remove_user_category(name);
    }

    /// An empty window keeps the statistics of the last batch.
    fn learn_window(&mut self, tabs: &[TabInfo]) {
        if tabs.is_empty() {
            log::debug!("No window tabs sent; keeping statistics of the last batch");
        } else {
            self.tfidf.learn(tabs);
        }
    }

    fn suggest_category(&mut self, tab: &TabInfo, tabs: &[TabInfo]) -> Option<Prediction> {
        let settings = &self.storage.settings;
        if !settings.auto_group_new_tabs {
            return None;
        }

        if !tabs.is_empty() {
            self.tfidf.learn(tabs);
        }
        let prediction = self.tfidf.categorize_tab(tab);

        if settings.accepts_confidence(prediction.confidence) {
            log::info!(
                "Tab {} looks like {:?} ({:.2})",
                tab.id,
                prediction.category,
                prediction.confidence
            );
            Some(prediction)
        } else {
            None
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(StorageData::with_defaults())
    }
}
