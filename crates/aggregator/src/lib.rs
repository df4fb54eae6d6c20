//! Grouping, deduplication and tag filtering over one batch of search records.

use serde::{Deserialize, Serialize};
use shared::domain::{ResultGroup, SearchResult};
use tracing::debug;

mod group;
mod tags;

pub use group::group_results;
pub use tags::{filter_groups, tag_universe, SelectedTags};

/// Grouped records of one successful fetch together with their tag universe.
///
/// The universe is computed once from the unfiltered groups, so narrowing
/// the view with [`ResultSet::filtered`] never narrows the tag menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    groups: Vec<ResultGroup>,
    tags: Vec<String>,
}

impl ResultSet {
    pub fn from_results(results: &[SearchResult]) -> Self {
        let groups = group_results(results);
        let tags = tag_universe(&groups);
        debug!(
            records = results.len(),
            groups = groups.len(),
            tags = tags.len(),
            "aggregated search results"
        );
        Self { groups, tags }
    }

    pub fn groups(&self) -> &[ResultGroup] {
        &self.groups
    }

    pub fn tag_universe(&self) -> &[String] {
        &self.tags
    }

    pub fn filtered(&self, selected: &SelectedTags) -> Vec<ResultGroup> {
        filter_groups(&self.groups, selected)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
