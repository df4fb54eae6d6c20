use std::collections::{HashMap, HashSet};

use shared::domain::{ResultGroup, SearchResult};

/// Identity of a record inside its title group. A missing field only
/// matches another missing field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey<'a> {
    plot: Option<&'a str>,
    source: Option<&'a str>,
}

impl<'a> DedupKey<'a> {
    fn of(result: &'a SearchResult) -> Self {
        Self {
            plot: result.plot.as_deref(),
            source: result.source.as_deref(),
        }
    }
}

/// Groups records by title in first-seen order, keeping the first record
/// for each distinct `(plot, source)` within a group.
pub fn group_results(results: &[SearchResult]) -> Vec<ResultGroup> {
    let mut groups: Vec<ResultGroup> = Vec::new();
    let mut index_by_title: HashMap<&str, usize> = HashMap::new();
    let mut seen: Vec<HashSet<DedupKey<'_>>> = Vec::new();

    for result in results {
        let slot = match index_by_title.get(result.title.as_str()) {
            Some(&slot) => slot,
            None => {
                groups.push(ResultGroup {
                    title: result.title.clone(),
                    items: Vec::new(),
                });
                seen.push(HashSet::new());
                let slot = groups.len() - 1;
                index_by_title.insert(result.title.as_str(), slot);
                slot
            }
        };

        if seen[slot].insert(DedupKey::of(result)) {
            groups[slot].items.push(result.clone());
        }
    }

    groups
}
