use std::fmt::Write as _;

use aggregator::SelectedTags;
use client_core::{DisplayState, SearchAddress};
use serde::Serialize;
use shared::{
    domain::{ResultGroup, SearchResult},
    error::ApiError,
};

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub address: &'a SearchAddress,
    pub tags: &'a [String],
    pub selected_tags: &'a SelectedTags,
    pub groups: Vec<ResultGroup>,
}

#[derive(Debug, Serialize)]
pub struct JsonFailure {
    pub error: ApiError,
}

pub fn render_text(
    display: &DisplayState,
    tags: &[String],
    selected: &SelectedTags,
    address: Option<&SearchAddress>,
) -> String {
    let mut out = String::new();
    match display {
        DisplayState::Idle | DisplayState::Loading => {}
        DisplayState::Failed { message } => {
            let _ = writeln!(out, "Error: {message}");
        }
        DisplayState::NoResults => out.push_str("No results found.\n"),
        DisplayState::NoMatches => {
            let wanted: Vec<&str> = selected.iter().collect();
            let _ = writeln!(
                out,
                "No results match the selected tags: {}",
                wanted.join(", ")
            );
        }
        DisplayState::Results { groups } => {
            for group in groups {
                render_group(&mut out, group);
            }
        }
    }

    if !tags.is_empty() {
        let menu: Vec<String> = tags
            .iter()
            .map(|tag| {
                if selected.contains(tag) {
                    format!("[{tag}]")
                } else {
                    tag.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Tags: {}", menu.join("  "));
    }
    if let Some(address) = address {
        let _ = writeln!(out, "Share: {}", address.results_path());
    }
    out
}

fn render_group(out: &mut String, group: &ResultGroup) {
    let _ = writeln!(out, "{}", group.title);
    for item in &group.items {
        render_item(out, item);
    }
    out.push('\n');
}

fn render_item(out: &mut String, item: &SearchResult) {
    if let Some(score) = item.score {
        let _ = writeln!(out, "  Score: {score}");
    }
    if let Some(plot) = item.plot.as_deref().filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "  Plot: {plot}");
    }
    if let Some(snippet) = item.snippet.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "  {snippet}");
    }
    if !item.tag_slice().is_empty() {
        let pills: Vec<String> = item.tag_slice().iter().map(|t| format!("({t})")).collect();
        let _ = writeln!(out, "  {}", pills.join(" "));
    }
    if let Some(source) = item.source.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "  Source: {source}");
    }
    let _ = writeln!(out, "  --");
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
