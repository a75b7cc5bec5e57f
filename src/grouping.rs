/// Grouping policy: turning per-tab categories into groups worth creating
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::tab_data::TabInfo;

/// Bucket that collects tabs whose own category was too small
pub const OTHER_CATEGORY: &str = "Other";

/// Title suffix marking a group as suggested by the TF-IDF classifier.
/// Persisted in group titles, so it must never change.
pub const ML_SUFFIX: &str = " (ML)";

pub fn ml_group_title(label: &str) -> String {
    format!("{}{}", label, ML_SUFFIX)
}

pub fn is_ml_group_title(title: &str) -> bool {
    title.ends_with(ML_SUFFIX)
}

/// Remove exactly one trailing `" (ML)"`; titles without it come back unchanged.
pub fn strip_ml_suffix(title: &str) -> &str {
    title.strip_suffix(ML_SUFFIX).unwrap_or(title)
}

/// Anything that can be placed into a browser tab group
pub trait GroupMember {
    fn tab_id(&self) -> i32;
}

impl GroupMember for TabInfo {
    fn tab_id(&self) -> i32 {
        self.id
    }
}

/// Category buckets kept in insertion order
///
/// Serializes as a plain map so the popup sees `{category: [members]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Buckets<T> {
    pub fn new() -> Self {
        Buckets {
            entries: Vec::new(),
        }
    }

    /// Append to the named bucket, creating it at the end if needed.
    pub fn push(&mut self, category: &str, item: T) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, items)) => items.push(item),
            None => self.entries.push((category.to_string(), vec![item])),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[T]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
    }

    pub fn get_mut(&mut self, category: &str) -> Option<&mut Vec<T>> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items)
    }

    pub fn remove(&mut self, category: &str) -> Option<Vec<T>> {
        let position = self.entries.iter().position(|(name, _)| name == category)?;
        Some(self.entries.remove(position).1)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.entries
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Drop every bucket holding fewer than `min` members.
    pub fn retain_min(&mut self, min: usize) {
        self.entries.retain(|(_, items)| items.len() >= min);
    }
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for Buckets<T> {
    type Item = (String, Vec<T>);
    type IntoIter = std::vec::IntoIter<(String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize> Serialize for Buckets<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, items) in &self.entries {
            map.serialize_entry(category, items)?;
        }
        map.end()
    }
}

/// Who proposed a group; decides how its title is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAuthor {
    Keyword,
    MachineLearning,
}

impl GroupAuthor {
    pub fn title(&self, label: &str) -> String {
        match self {
            GroupAuthor::Keyword => label.to_string(),
            GroupAuthor::MachineLearning => ml_group_title(label),
        }
    }
}

/// A category the user kept in the suggestion dialog, with its (possibly renamed) label
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: String,
    pub label: String,
}

impl Selection {
    pub fn new(category: &str, label: &str) -> Selection {
        Selection {
            category: category.to_string(),
            label: label.to_string(),
        }
    }
}

/// One group ready to hand to the browser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPlan {
    pub category: String,
    pub title: String,
    pub tab_ids: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupingPolicy {
    pub min_group_size: usize,
}

impl GroupingPolicy {
    pub fn new(min_group_size: usize) -> GroupingPolicy {
        GroupingPolicy { min_group_size }
    }

    pub fn meets_minimum(&self, members: usize) -> bool {
        members >= self.min_group_size
    }

    /// Move undersized buckets into "Other", then drop "Other" if it is still too small.
    ///
    /// Buckets are visited in insertion order, so the members of "Other" keep the
    /// order their original categories were first seen in.
    pub fn apply<T>(&self, mut buckets: Buckets<T>) -> Buckets<T> {
        let undersized: Vec<String> = buckets
            .iter()
            .filter(|(name, items)| *name != OTHER_CATEGORY && !self.meets_minimum(items.len()))
            .map(|(name, _)| name.to_string())
            .collect();

        for category in undersized {
            if let Some(items) = buckets.remove(&category) {
                for item in items {
                    buckets.push(OTHER_CATEGORY, item);
                }
            }
        }

        if buckets
            .get(OTHER_CATEGORY)
            .is_some_and(|other| !self.meets_minimum(other.len()))
        {
            buckets.remove(OTHER_CATEGORY);
        }

        buckets
    }

    /// Order selected buckets largest-first and let each tab join only the first group that claims it.
    ///
    /// Selections with an empty label, unknown category or too few members are skipped,
    /// as are groups left with fewer than `min_group_size` unclaimed tabs.
    pub fn plan_application<T: GroupMember>(
        &self,
        buckets: &Buckets<T>,
        selections: &[Selection],
        author: GroupAuthor,
    ) -> Vec<GroupPlan> {
        let mut candidates: Vec<(&Selection, &[T])> = selections
            .iter()
            .filter(|selection| !selection.label.trim().is_empty())
            .filter_map(|selection| {
                buckets
                    .get(&selection.category)
                    .map(|members| (selection, members))
            })
            .filter(|(_, members)| self.meets_minimum(members.len()))
            .collect();

        // Stable: equal sizes keep selection order
        candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let mut claimed = std::collections::HashSet::new();
        let mut plans = Vec::new();

        for (selection, members) in candidates {
            let tab_ids: Vec<i32> = members
                .iter()
                .map(|member| member.tab_id())
                .filter(|id| !claimed.contains(id))
                .collect();

            if !self.meets_minimum(tab_ids.len()) {
                continue;
            }

            claimed.extend(tab_ids.iter().copied());
            plans.push(GroupPlan {
                category: selection.category.clone(),
                title: author.title(selection.label.trim()),
                tab_ids,
            });
        }

        plans
    }
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        GroupingPolicy::new(2)
    }
}
