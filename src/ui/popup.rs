/// Popup UI for Tab Organizer extension

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::*;

use crate::dispatch::{Request, Response, Session};
use crate::domain::group_tabs_by_domain;
use crate::error::BridgeError;
use crate::feedback::helpful_percent;
use crate::grouping::{Buckets, GroupAuthor, GroupPlan, GroupingPolicy, Selection, OTHER_CATEGORY};
use crate::history::{restore_plan, Snapshot};
use crate::operations::{find_tabs_by_term, tabs_in_domain, unique_domains};
use crate::storage::{GroupingAction, StorageData, STORAGE_KEYS};
use crate::tab_data::{GroupColor, TabGroupInfo, TabInfo};
use crate::tfidf::ScoredTab;
use crate::ui::components::{GroupRow, Suggestion, SuggestionRow};
use crate::{from_js, to_js};

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getCurrentWindowTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getCurrentWindowGroups() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn groupTabs(tab_ids: JsValue, title: &str, color: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn ungroupTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(items: JsValue) -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Done(String),
    Error(String),
}

#[derive(Clone, PartialEq)]
enum ActiveTab {
    Suggest,
    Manual,
    Groups,
}

#[derive(Clone, PartialEq)]
struct GroupView {
    group: TabGroupInfo,
    tab_ids: Vec<i32>,
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let active_tab = use_state(|| ActiveTab::Suggest);
    let buckets = use_state(Buckets::<ScoredTab>::new);
    let suggestions = use_state(Vec::<Suggestion>::new);
    let groups = use_state(Vec::<GroupView>::new);
    let domains = use_state(Vec::<String>::new);
    let search_term = use_state(String::new);
    let feedback_enabled = use_state(|| false);
    let prefer_ml = use_state(|| true);
    let helpful = use_state(|| None::<u8>);

    // Load settings, groups and domains on mount
    {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();
        let feedback_enabled = feedback_enabled.clone();
        let prefer_ml = prefer_ml.clone();
        let helpful = helpful.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match load_storage().await {
                    Ok(storage) => {
                        feedback_enabled.set(storage.settings.user_feedback_enabled);
                        prefer_ml.set(storage.settings.prefer_ml_categorizer);
                        helpful.set(helpful_percent(&storage.ml_feedback));
                    }
                    Err(e) => log::warn!("Using default settings: {}", e),
                }
                if let Err(e) = refresh_window(groups, domains).await {
                    state.set(AppState::Error(e.to_string()));
                }
            });
            || ()
        });
    }

    // Ask the TF-IDF classifier for suggestions
    let on_suggest = {
        let state = state.clone();
        let buckets = buckets.clone();
        let suggestions = suggestions.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let buckets = buckets.clone();
            let suggestions = suggestions.clone();

            state.set(AppState::Loading("Analyzing tabs...".to_string()));

            spawn_local(async move {
                let result: Result<Buckets<ScoredTab>, BridgeError> = async {
                    let storage = load_storage().await?;
                    let tabs = current_tabs().await?;
                    let mut session = Session::new(storage);
                    Ok(session.tfidf_mut().categorize_tabs(&tabs))
                }
                .await;

                match result {
                    Ok(predicted) if predicted.is_empty() => {
                        suggestions.set(Vec::new());
                        buckets.set(predicted);
                        state.set(AppState::Done("No groups worth suggesting".to_string()));
                    }
                    Ok(predicted) => {
                        suggestions.set(to_suggestions(&predicted));
                        buckets.set(predicted);
                        state.set(AppState::Idle);
                    }
                    Err(e) => state.set(AppState::Error(format!("Failed to analyze: {}", e))),
                }
            });
        })
    };

    let on_toggle = {
        let suggestions = suggestions.clone();
        move |index: usize| {
            let suggestions = suggestions.clone();
            Callback::from(move |_| {
                let mut updated = (*suggestions).clone();
                if let Some(suggestion) = updated.get_mut(index) {
                    suggestion.selected = !suggestion.selected;
                }
                suggestions.set(updated);
            })
        }
    };

    let on_rename = {
        let suggestions = suggestions.clone();
        move |index: usize| {
            let suggestions = suggestions.clone();
            Callback::from(move |label: String| {
                let mut updated = (*suggestions).clone();
                if let Some(suggestion) = updated.get_mut(index) {
                    suggestion.label = label;
                }
                suggestions.set(updated);
            })
        }
    };

    // Create browser groups for the selected suggestions
    let on_apply = {
        let state = state.clone();
        let buckets = buckets.clone();
        let suggestions = suggestions.clone();
        let groups = groups.clone();
        let domains = domains.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let predicted = (*buckets).clone();
            let selections: Vec<Selection> = suggestions
                .iter()
                .filter(|s| s.selected)
                .map(|s| Selection::new(&s.category, &s.label))
                .collect();
            let suggestions = suggestions.clone();
            let groups = groups.clone();
            let domains = domains.clone();

            state.set(AppState::Loading("Creating groups...".to_string()));

            spawn_local(async move {
                let result = apply_grouping(
                    |policy| policy.plan_application(&predicted, &selections, GroupAuthor::MachineLearning),
                    GroupingAction::Ai,
                )
                .await;
                finish(result, &state, "group");
                suggestions.set(Vec::new());
                if let Err(e) = refresh_window(groups, domains).await {
                    log::warn!("Failed to refresh groups: {}", e);
                }
            });
        })
    };

    // Manual grouping by keyword rules and user categories
    let on_group_categories = {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let groups = groups.clone();
            let domains = domains.clone();

            state.set(AppState::Loading("Grouping by category...".to_string()));

            spawn_local(async move {
                let result: Result<usize, BridgeError> = async {
                    let storage = load_storage().await?;
                    let tabs = current_tabs().await?;
                    let session = Session::new(storage);
                    let grouped = session.keyword().group_tabs_by_category(&tabs);
                    apply_manual(grouped, GroupingAction::ManualCategory).await
                }
                .await;
                finish(result, &state, "category group");
                if let Err(e) = refresh_window(groups, domains).await {
                    log::warn!("Failed to refresh groups: {}", e);
                }
            });
        })
    };

    // Manual grouping by the categories selected in the options page
    let on_group_selected = {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let groups = groups.clone();
            let domains = domains.clone();

            state.set(AppState::Loading("Grouping by selected categories...".to_string()));

            spawn_local(async move {
                let result: Result<usize, BridgeError> = async {
                    let storage = load_storage().await?;
                    let tabs = current_tabs().await?;
                    let selected = storage.selected_categories.clone();
                    let session = Session::new(storage);
                    let grouped = session.keyword().group_tabs_by_custom_categories(&tabs, &selected);
                    apply_manual(grouped, GroupingAction::ManualCategory).await
                }
                .await;
                finish(result, &state, "category group");
                if let Err(e) = refresh_window(groups, domains).await {
                    log::warn!("Failed to refresh groups: {}", e);
                }
            });
        })
    };

    let on_group_domains = {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let groups = groups.clone();
            let domains = domains.clone();

            state.set(AppState::Loading("Grouping by domain...".to_string()));

            spawn_local(async move {
                let result: Result<usize, BridgeError> = async {
                    let tabs = current_tabs().await?;
                    apply_manual(group_tabs_by_domain(&tabs), GroupingAction::ManualDomain).await
                }
                .await;
                finish(result, &state, "domain group");
                if let Err(e) = refresh_window(groups, domains).await {
                    log::warn!("Failed to refresh groups: {}", e);
                }
            });
        })
    };

    let on_group_domain = {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();
        move |domain: String| {
            let state = state.clone();
            let groups = groups.clone();
            let domains = domains.clone();
            Callback::from(move |_| {
                let state = state.clone();
                let groups = groups.clone();
                let domains = domains.clone();
                let domain = domain.clone();

                spawn_local(async move {
                    let result: Result<usize, BridgeError> = async {
                        let tabs = current_tabs().await?;
                        let mut bucket = Buckets::new();
                        for tab in tabs_in_domain(&tabs, &domain) {
                            bucket.push(&domain, tab);
                        }
                        apply_manual(bucket, GroupingAction::ManualDomain).await
                    }
                    .await;
                    finish(result, &state, "domain group");
                    if let Err(e) = refresh_window(groups, domains).await {
                        log::warn!("Failed to refresh groups: {}", e);
                    }
                });
            })
        }
    };

    let on_search_input = {
        let search_term = search_term.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search_term.set(input.value());
        })
    };

    let on_group_search = {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();
        let search_term = search_term.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let groups = groups.clone();
            let domains = domains.clone();
            let term = search_term.trim().to_string();
            if term.is_empty() {
                return;
            }

            spawn_local(async move {
                let result: Result<usize, BridgeError> = async {
                    let tabs = current_tabs().await?;
                    let mut bucket = Buckets::new();
                    for tab in find_tabs_by_term(&tabs, &term) {
                        bucket.push(&term, tab);
                    }
                    apply_manual(bucket, GroupingAction::ManualKeyword).await
                }
                .await;
                finish(result, &state, "keyword group");
                if let Err(e) = refresh_window(groups, domains).await {
                    log::warn!("Failed to refresh groups: {}", e);
                }
            });
        })
    };

    let on_ungroup_all = {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let groups = groups.clone();
            let domains = domains.clone();

            state.set(AppState::Loading("Ungrouping tabs...".to_string()));

            spawn_local(async move {
                match ungroup_all().await {
                    Ok(count) => state.set(AppState::Done(format!("Ungrouped {} tabs", count))),
                    Err(e) => state.set(AppState::Error(format!("Ungroup failed: {}", e))),
                }
                if let Err(e) = refresh_window(groups, domains).await {
                    log::warn!("Failed to refresh groups: {}", e);
                }
            });
        })
    };

    let on_undo = {
        let state = state.clone();
        let groups = groups.clone();
        let domains = domains.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let groups = groups.clone();
            let domains = domains.clone();

            state.set(AppState::Loading("Restoring groups...".to_string()));

            spawn_local(async move {
                match undo_last_action().await {
                    Ok(true) => state.set(AppState::Done("Restored previous groups".to_string())),
                    Ok(false) => state.set(AppState::Done("Nothing to undo".to_string())),
                    Err(e) => state.set(AppState::Error(format!("Undo failed: {}", e))),
                }
                if let Err(e) = refresh_window(groups, domains).await {
                    log::warn!("Failed to refresh groups: {}", e);
                }
            });
        })
    };

    let on_feedback = {
        let state = state.clone();
        move |group: TabGroupInfo| {
            let state = state.clone();
            Callback::from(move |(is_helpful, suggested): (bool, String)| {
                let state = state.clone();
                let group = group.clone();
                spawn_local(async move {
                    match submit_feedback(group, is_helpful, suggested).await {
                        Ok(learned) if !learned.is_empty() => {
                            state.set(AppState::Done(format!("Learned: {}", learned.join(", "))))
                        }
                        Ok(_) => state.set(AppState::Done("Thanks for the feedback".to_string())),
                        Err(e) => state.set(AppState::Error(format!("Feedback failed: {}", e))),
                    }
                });
            })
        }
    };

    let is_busy = matches!(*state, AppState::Loading(_));
    let has_selection = suggestions.iter().any(|s| s.selected);

    let on_tab_click = {
        let active_tab = active_tab.clone();
        move |tab: ActiveTab| {
            let active_tab = active_tab.clone();
            Callback::from(move |_| {
                active_tab.set(tab.clone());
            })
        }
    };

    let tab_class = |tab: ActiveTab| {
        if *active_tab == tab { "pf-v5-c-tabs__item pf-m-current" } else { "pf-v5-c-tabs__item" }
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Organizer"}</h1>

            // Tab navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={tab_class(ActiveTab::Suggest)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::Suggest)}>
                            <span class="pf-v5-c-tabs__item-text">{"Suggest"}</span>
                        </button>
                    </li>
                    <li class={tab_class(ActiveTab::Manual)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::Manual)}>
                            <span class="pf-v5-c-tabs__item-text">{"Manual"}</span>
                        </button>
                    </li>
                    <li class={tab_class(ActiveTab::Groups)}>
                        <button class="pf-v5-c-tabs__link" onclick={on_tab_click(ActiveTab::Groups)}>
                            <span class="pf-v5-c-tabs__item-text">{"Groups"}</span>
                        </button>
                    </li>
                </ul>
            </div>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Done(msg) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                        </Alert>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="tab-pane-content">
                {match &*active_tab {
                    ActiveTab::Suggest => html! {
                        <div class="flex-column-gap">
                            <Button
                                onclick={on_suggest}
                                disabled={is_busy}
                                variant={if *prefer_ml { ButtonVariant::Primary } else { ButtonVariant::Secondary }}
                                block={true}
                            >
                                {"Suggest Groups"}
                            </Button>
                            {for suggestions.iter().enumerate().map(|(index, suggestion)| html! {
                                <SuggestionRow
                                    suggestion={suggestion.clone()}
                                    on_toggle={on_toggle(index)}
                                    on_rename={on_rename(index)}
                                    disabled={is_busy}
                                />
                            })}
                            if !suggestions.is_empty() {
                                <Button onclick={on_apply} disabled={is_busy || !has_selection} variant={ButtonVariant::Primary} block={true}>
                                    {"Apply Selected Groups"}
                                </Button>
                            }
                        </div>
                    },
                    ActiveTab::Manual => html! {
                        <div class="flex-column-gap">
                            <Button
                                onclick={on_group_categories}
                                disabled={is_busy}
                                variant={if *prefer_ml { ButtonVariant::Secondary } else { ButtonVariant::Primary }}
                                block={true}
                            >
                                {"Group by Category"}
                            </Button>
                            <Button onclick={on_group_selected} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                {"Group by Selected Categories"}
                            </Button>
                            <Button onclick={on_group_domains} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                {"Group by Domain"}
                            </Button>
                            <div class="search-row">
                                <input
                                    class="search-input"
                                    type="text"
                                    placeholder="Keyword"
                                    value={(*search_term).clone()}
                                    oninput={on_search_input}
                                />
                                <Button onclick={on_group_search} disabled={is_busy} variant={ButtonVariant::Secondary}>
                                    {"Group"}
                                </Button>
                            </div>
                            if !domains.is_empty() {
                                <div class="stats-box">
                                    {for domains.iter().map(|domain| html! {
                                        <div class="stat-item">
                                            <span class="stat-domain">{domain}</span>
                                            <button class="link-button" disabled={is_busy} onclick={on_group_domain(domain.clone())}>
                                                {"Group"}
                                            </button>
                                        </div>
                                    })}
                                </div>
                            }
                        </div>
                    },
                    ActiveTab::Groups => html! {
                        <div class="flex-column-gap">
                            if let Some(percent) = *helpful {
                                <p class="message-text">{format!("{}% of suggested groups rated helpful", percent)}</p>
                            }
                            {for groups.iter().map(|view| html! {
                                <GroupRow
                                    group={view.group.clone()}
                                    tab_count={view.tab_ids.len()}
                                    feedback_enabled={*feedback_enabled}
                                    on_feedback={on_feedback(view.group.clone())}
                                />
                            })}
                            <Button onclick={on_ungroup_all} disabled={is_busy || groups.is_empty()} variant={ButtonVariant::Secondary} block={true}>
                                {"Ungroup All"}
                            </Button>
                            <Button onclick={on_undo} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                {"Undo"}
                            </Button>
                        </div>
                    },
                }}
            </div>

            <p class="footer-popup">
                {"Tab Organizer v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

fn to_suggestions(predicted: &Buckets<ScoredTab>) -> Vec<Suggestion> {
    predicted
        .iter()
        .map(|(category, members)| {
            let confidence = members.iter().map(|m| m.confidence).sum::<f64>() / members.len() as f64;
            Suggestion {
                category: category.to_string(),
                label: category.to_string(),
                selected: category != OTHER_CATEGORY,
                confidence,
                titles: members.iter().map(|m| m.tab.title.clone()).collect(),
            }
        })
        .collect()
}

fn finish(result: Result<usize, BridgeError>, state: &UseStateHandle<AppState>, noun: &str) {
    match result {
        Ok(0) => state.set(AppState::Done("No groups created".to_string())),
        Ok(1) => state.set(AppState::Done(format!("Created 1 {}", noun))),
        Ok(count) => state.set(AppState::Done(format!("Created {} {}s", count, noun))),
        Err(e) => state.set(AppState::Error(e.to_string())),
    }
}

async fn current_tabs() -> Result<Vec<TabInfo>, BridgeError> {
    let tabs = getCurrentWindowTabs()
        .await
        .map_err(|e| BridgeError::browser("tabs.query", e))?;
    from_js("tabs", tabs)
}

async fn current_groups() -> Result<Vec<TabGroupInfo>, BridgeError> {
    let groups = getCurrentWindowGroups()
        .await
        .map_err(|e| BridgeError::browser("tabGroups.query", e))?;
    from_js("groups", groups)
}

/// Read every key we use; an install that never saved gets the default categories
async fn load_storage() -> Result<StorageData, BridgeError> {
    let keys = to_js("storage keys", &STORAGE_KEYS)?;
    let items = getStorage(keys)
        .await
        .map_err(|e| BridgeError::browser("storage.local.get", e))?;

    let initialized = js_sys::Reflect::has(&items, &JsValue::from_str("selectedCategories")).unwrap_or(false);
    if initialized {
        from_js("storage", items)
    } else {
        Ok(StorageData::with_defaults())
    }
}

async fn save_storage(storage: &StorageData) -> Result<(), BridgeError> {
    let items = to_js("storage", storage)?;
    setStorage(items)
        .await
        .map_err(|e| BridgeError::browser("storage.local.set", e))
}

async fn refresh_window(
    groups: UseStateHandle<Vec<GroupView>>,
    domains: UseStateHandle<Vec<String>>,
) -> Result<(), BridgeError> {
    let tabs = current_tabs().await?;
    let views = current_groups()
        .await?
        .into_iter()
        .map(|group| GroupView {
            tab_ids: tabs
                .iter()
                .filter(|tab| tab.group_id == Some(group.id))
                .map(|tab| tab.id)
                .collect(),
            group,
        })
        .collect();

    groups.set(views);
    domains.set(unique_domains(&tabs));
    Ok(())
}

async fn create_groups(plans: &[GroupPlan]) -> Result<(), BridgeError> {
    for plan in plans {
        let tab_ids = to_js("tab ids", &plan.tab_ids)?;
        groupTabs(tab_ids, &plan.title, GroupColor::random().as_str())
            .await
            .map_err(|e| BridgeError::browser("tabs.group", e))?;
        log::info!("Grouped {} tabs as {:?}", plan.tab_ids.len(), plan.title);
    }
    Ok(())
}

/// Snapshot the window, create the planned groups and record the action
async fn apply_grouping<F>(plan: F, action: GroupingAction) -> Result<usize, BridgeError>
where
    F: FnOnce(&GroupingPolicy) -> Vec<GroupPlan>,
{
    let mut storage = load_storage().await?;
    let tabs = current_tabs().await?;
    let groups = current_groups().await?;
    let now = js_sys::Date::now();

    let plans = plan(&storage.classifier_config.grouping_policy());
    if plans.is_empty() {
        return Ok(0);
    }

    storage.tab_group_history.record(Snapshot::capture(&tabs, &groups, now));
    create_groups(&plans).await?;
    storage.metrics.track(action, plans.len() as u32, now);
    save_storage(&storage).await?;

    Ok(plans.len())
}

/// Every bucket becomes a group titled by its key
async fn apply_manual(buckets: Buckets<TabInfo>, action: GroupingAction) -> Result<usize, BridgeError> {
    let selections: Vec<Selection> = buckets
        .categories()
        .map(|category| Selection::new(category, category))
        .collect();

    apply_grouping(
        |policy| policy.plan_application(&buckets, &selections, GroupAuthor::Keyword),
        action,
    )
    .await
}

async fn ungroup_all() -> Result<usize, BridgeError> {
    let mut storage = load_storage().await?;
    let tabs = current_tabs().await?;
    let groups = current_groups().await?;

    let grouped: Vec<i32> = tabs.iter().filter(|t| t.group_id.is_some()).map(|t| t.id).collect();
    if grouped.is_empty() {
        return Ok(0);
    }

    let now = js_sys::Date::now();
    storage.tab_group_history.record(Snapshot::capture(&tabs, &groups, now));
    ungroupTabs(to_js("tab ids", &grouped)?)
        .await
        .map_err(|e| BridgeError::browser("tabs.ungroup", e))?;
    storage.metrics.track(GroupingAction::UngroupAll, 1, now);
    save_storage(&storage).await?;

    Ok(grouped.len())
}

/// Put the window back the way the latest snapshot saw it; false when history is empty
async fn undo_last_action() -> Result<bool, BridgeError> {
    let mut storage = load_storage().await?;
    let Some(snapshot) = storage.tab_group_history.undo() else {
        return Ok(false);
    };

    let tabs = current_tabs().await?;
    let grouped: Vec<i32> = tabs.iter().filter(|t| t.group_id.is_some()).map(|t| t.id).collect();
    if !grouped.is_empty() {
        ungroupTabs(to_js("tab ids", &grouped)?)
            .await
            .map_err(|e| BridgeError::browser("tabs.ungroup", e))?;
    }

    for group in restore_plan(&snapshot, &tabs) {
        let tab_ids = to_js("tab ids", &group.tab_ids)?;
        groupTabs(tab_ids, &group.title, group.color.as_str())
            .await
            .map_err(|e| BridgeError::browser("tabs.group", e))?;
    }

    save_storage(&storage).await?;
    Ok(true)
}

async fn submit_feedback(group: TabGroupInfo, is_helpful: bool, suggested: String) -> Result<Vec<String>, BridgeError> {
    let storage = load_storage().await?;
    let tabs: Vec<TabInfo> = current_tabs()
        .await?
        .into_iter()
        .filter(|tab| tab.group_id == Some(group.id))
        .collect();

    let mut session = Session::new(storage);
    let response = session.handle(Request::SubmitFeedback {
        group,
        tabs,
        is_helpful,
        suggested_category: suggested,
        comments: String::new(),
        timestamp: js_sys::Date::now(),
    });
    save_storage(session.storage()).await?;

    match response {
        Response::FeedbackRecorded { learned_keywords } => Ok(learned_keywords),
        _ => Ok(Vec::new()),
    }
}
