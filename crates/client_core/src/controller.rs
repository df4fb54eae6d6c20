//! Query state of the search screens and the rules for when a fetch is issued.
//!
//! The controller never performs I/O. Operations that need a fetch return a
//! [`FetchRequest`]; the caller runs it and hands the outcome back through
//! [`QueryController::complete`], where outcomes of superseded requests are
//! dropped by generation.

use aggregator::{ResultSet, SelectedTags};
use shared::{
    domain::{ResultGroup, SearchMode, SearchResult},
    error::SearchError,
};
use tracing::{debug, info};

use crate::address::SearchAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: String,
    pub mode: SearchMode,
}

impl FetchRequest {
    pub fn address(&self) -> SearchAddress {
        SearchAddress::new(self.query.clone(), self.mode.is_llm_enhanced())
    }
}

/// What the results area shows. Exactly one state is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Idle,
    Loading,
    Failed { message: String },
    NoResults,
    /// Results exist but the tag selection excludes all of them.
    NoMatches,
    Results { groups: Vec<ResultGroup> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Loading,
    Failed(SearchError),
    Loaded(ResultSet),
}

#[derive(Debug, Clone)]
pub struct QueryController {
    draft: String,
    llm_enhanced: bool,
    address: Option<SearchAddress>,
    selected: SelectedTags,
    generation: u64,
    pending: Option<u64>,
    phase: Phase,
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryController {
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            llm_enhanced: false,
            address: None,
            selected: SelectedTags::new(),
            generation: 0,
            pending: None,
            phase: Phase::Idle,
        }
    }

    pub fn from_address(address: SearchAddress) -> (Self, Option<FetchRequest>) {
        let mut controller = Self::new();
        let request = controller.navigate(address);
        (controller, request)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn llm_enhanced(&self) -> bool {
        self.llm_enhanced
    }

    pub fn mode(&self) -> SearchMode {
        SearchMode::from_llm_flag(self.llm_enhanced)
    }

    pub fn selected_tags(&self) -> &SelectedTags {
        &self.selected
    }

    /// Address of the last issued search, if any.
    pub fn address(&self) -> Option<&SearchAddress> {
        self.address.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn result_set(&self) -> Option<&ResultSet> {
        match &self.phase {
            Phase::Loaded(set) => Some(set),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&SearchError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Commits the draft as the current query.
    ///
    /// A blank draft clears the results and issues nothing.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        let query = self.draft.trim().to_string();
        if query.is_empty() {
            self.clear_results();
            return None;
        }
        Some(self.issue(query))
    }

    /// Switches the search mode without issuing anything, as on the home
    /// screen where no search exists yet.
    pub fn set_mode(&mut self, llm_enhanced: bool) {
        self.llm_enhanced = llm_enhanced;
    }

    /// Switches the search mode and re-runs the current draft right away.
    pub fn set_llm_enhanced(&mut self, llm_enhanced: bool) -> Option<FetchRequest> {
        if self.llm_enhanced == llm_enhanced {
            return None;
        }
        self.llm_enhanced = llm_enhanced;
        self.submit()
    }

    /// Applies an address coming from outside the query box. Tag selection
    /// never survives navigation.
    pub fn navigate(&mut self, address: SearchAddress) -> Option<FetchRequest> {
        self.draft = address.query;
        self.llm_enhanced = address.llm_enhanced;
        self.selected.clear();
        self.submit()
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.selected.toggle(tag)
    }

    pub fn select_tag(&mut self, tag: &str) -> bool {
        self.selected.insert(tag)
    }

    pub fn clear_tags(&mut self) {
        self.selected.clear();
    }

    /// Applies the outcome of a fetch if it belongs to the latest request.
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<Vec<SearchResult>, SearchError>,
    ) -> Completion {
        if self.pending != Some(generation) {
            debug!(
                generation,
                current = self.generation,
                "dropping outcome of superseded search"
            );
            return Completion::Stale;
        }
        self.pending = None;

        self.phase = match outcome {
            Ok(results) => {
                let set = ResultSet::from_results(&results);
                info!(
                    generation,
                    groups = set.group_count(),
                    items = set.item_count(),
                    "search completed"
                );
                Phase::Loaded(set)
            }
            Err(err) => {
                info!(generation, error = %err, "search failed");
                Phase::Failed(err)
            }
        };
        Completion::Applied
    }

    pub fn display(&self) -> DisplayState {
        match &self.phase {
            Phase::Idle => DisplayState::Idle,
            Phase::Loading => DisplayState::Loading,
            Phase::Failed(err) => DisplayState::Failed {
                message: err.to_string(),
            },
            Phase::Loaded(set) if set.is_empty() => DisplayState::NoResults,
            Phase::Loaded(set) => {
                let groups = set.filtered(&self.selected);
                if groups.is_empty() {
                    DisplayState::NoMatches
                } else {
                    DisplayState::Results { groups }
                }
            }
        }
    }

    /// Tag menu for the current results; unaffected by the tag selection.
    pub fn tag_universe(&self) -> &[String] {
        match &self.phase {
            Phase::Loaded(set) => set.tag_universe(),
            _ => &[],
        }
    }

    pub fn stale_selected_tags(&self) -> Vec<&str> {
        self.selected.stale_against(self.tag_universe())
    }

    fn issue(&mut self, query: String) -> FetchRequest {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.selected.clear();
        self.phase = Phase::Loading;

        let request = FetchRequest {
            generation: self.generation,
            query,
            mode: self.mode(),
        };
        self.address = Some(request.address());
        info!(
            generation = request.generation,
            mode = request.mode.label(),
            "issuing search"
        );
        debug!(query = %request.query, "search query");
        request
    }

    fn clear_results(&mut self) {
        self.pending = None;
        self.address = None;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
