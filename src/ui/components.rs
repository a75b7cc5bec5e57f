/// Reusable UI components

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::grouping::{is_ml_group_title, strip_ml_suffix};
use crate::tab_data::TabGroupInfo;

#[derive(Properties, PartialEq)]
pub struct ConfidenceBarProps {
    pub confidence: f64,
}

/// Confidence as a filled bar; scores above 1.0 show as full
#[function_component(ConfidenceBar)]
pub fn confidence_bar(props: &ConfidenceBarProps) -> Html {
    let percent = (props.confidence.clamp(0.0, 1.0) * 100.0).round() as u8;

    html! {
        <div class="confidence-container" title={format!("confidence {:.2}", props.confidence)}>
            <div style={format!("width: {}%; background-color: #5B4FE8; height: 100%; transition: width 0.3s ease;", percent)}>
            </div>
        </div>
    }
}

/// One suggested group as shown before it is applied
#[derive(Clone, PartialEq)]
pub struct Suggestion {
    pub category: String,
    pub label: String,
    pub selected: bool,
    pub confidence: f64,
    pub titles: Vec<String>,
}

#[derive(Properties, PartialEq)]
pub struct SuggestionRowProps {
    pub suggestion: Suggestion,
    pub on_toggle: Callback<()>,
    pub on_rename: Callback<String>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(SuggestionRow)]
pub fn suggestion_row(props: &SuggestionRowProps) -> Html {
    let suggestion = &props.suggestion;

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: Event| on_toggle.emit(()))
    };

    let on_rename = {
        let on_rename = props.on_rename.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_rename.emit(input.value());
        })
    };

    html! {
        <div class="suggestion-row">
            <div class="suggestion-header">
                <input
                    type="checkbox"
                    checked={suggestion.selected}
                    disabled={props.disabled}
                    onchange={on_toggle}
                />
                <input
                    class="suggestion-label"
                    type="text"
                    value={suggestion.label.clone()}
                    disabled={props.disabled || !suggestion.selected}
                    oninput={on_rename}
                />
                <span class="suggestion-count">{suggestion.titles.len()}</span>
            </div>
            <ConfidenceBar confidence={suggestion.confidence} />
            <ul class="suggestion-tabs">
                {for suggestion.titles.iter().map(|title| html! {
                    <li class="suggestion-tab">{title}</li>
                })}
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupRowProps {
    pub group: TabGroupInfo,
    pub tab_count: usize,
    #[prop_or(false)]
    pub feedback_enabled: bool,
    /// Helpful flag and, when unhelpful, the category the user would have chosen
    pub on_feedback: Callback<(bool, String)>,
}

/// An existing browser group; groups created from suggestions can be rated
#[function_component(GroupRow)]
pub fn group_row(props: &GroupRowProps) -> Html {
    let better_category = use_state(String::new);
    let is_ml = is_ml_group_title(&props.group.title);

    let on_input = {
        let better_category = better_category.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            better_category.set(input.value());
        })
    };

    let on_helpful = {
        let on_feedback = props.on_feedback.clone();
        Callback::from(move |_: MouseEvent| on_feedback.emit((true, String::new())))
    };

    let on_unhelpful = {
        let on_feedback = props.on_feedback.clone();
        let better_category = better_category.clone();
        Callback::from(move |_: MouseEvent| on_feedback.emit((false, (*better_category).clone())))
    };

    html! {
        <div class="group-row">
            <span class={format!("group-dot group-{}", props.group.color.as_str())}></span>
            <span class="group-title">{strip_ml_suffix(&props.group.title)}</span>
            if is_ml {
                <span class="group-badge">{"ML"}</span>
            }
            <span class="group-count">{props.tab_count}</span>
            if is_ml && props.feedback_enabled {
                <div class="group-feedback">
                    <button class="feedback-button" onclick={on_helpful}>{"👍"}</button>
                    <input
                        class="feedback-input"
                        type="text"
                        placeholder="Better category"
                        value={(*better_category).clone()}
                        oninput={on_input}
                    />
                    <button class="feedback-button" onclick={on_unhelpful}>{"👎"}</button>
                </div>
            }
        </div>
    }
}
