use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shared::domain::{ResultGroup, SearchResult};

/// Tags the user filters by. An item survives only if it carries all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedTags(BTreeSet<String>);

impl SelectedTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    /// Flips membership of `tag`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.0.remove(tag) {
            false
        } else {
            self.0.insert(tag.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Selected tags the current universe no longer offers.
    pub fn stale_against<'a>(&'a self, universe: &'a [String]) -> Vec<&'a str> {
        self.iter()
            .filter(|tag| universe.binary_search_by(|t| t.as_str().cmp(tag)).is_err())
            .collect()
    }

    pub fn matches(&self, result: &SearchResult) -> bool {
        self.iter().all(|tag| result.has_tag(tag))
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Sorted union of every tag carried by any grouped item.
pub fn tag_universe(groups: &[ResultGroup]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|group| group.items.iter())
        .flat_map(|item| item.tag_slice().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Narrows each group to the items carrying every selected tag and drops
/// groups left empty. Order is preserved.
pub fn filter_groups(groups: &[ResultGroup], selected: &SelectedTags) -> Vec<ResultGroup> {
    if selected.is_empty() {
        return groups.to_vec();
    }

    groups
        .iter()
        .filter_map(|group| {
            let items: Vec<SearchResult> = group
                .items
                .iter()
                .filter(|item| selected.matches(item))
                .cloned()
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(ResultGroup {
                    title: group.title.clone(),
                    items,
                })
            }
        })
        .collect()
}
