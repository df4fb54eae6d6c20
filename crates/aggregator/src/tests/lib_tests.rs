use super::*;

fn record(title: &str, plot: Option<&str>, source: Option<&str>, tags: &[&str]) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        snippet: None,
        score: None,
        plot: plot.map(str::to_string),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        source: source.map(str::to_string),
    }
}

fn scenario_records() -> Vec<SearchResult> {
    vec![
        record("A", Some("p1"), Some("s1"), &["x"]),
        record("A", Some("p1"), Some("s1"), &["x"]),
        record("A", Some("p2"), Some("s1"), &["y"]),
    ]
}

fn plots(group: &ResultGroup) -> Vec<&str> {
    group
        .items
        .iter()
        .map(|item| item.plot.as_deref().unwrap_or("-"))
        .collect()
}

#[test]
fn dedupes_same_plot_and_source_within_title() {
    let set = ResultSet::from_results(&scenario_records());
    assert_eq!(set.group_count(), 1);
    assert_eq!(set.groups()[0].title, "A");
    assert_eq!(plots(&set.groups()[0]), vec!["p1", "p2"]);
    assert_eq!(set.tag_universe(), ["x".to_string(), "y".to_string()]);
}

#[test]
fn selecting_tag_keeps_only_matching_items() {
    let set = ResultSet::from_results(&scenario_records());
    let selected: SelectedTags = ["x"].into_iter().collect();
    let filtered = set.filtered(&selected);
    assert_eq!(filtered.len(), 1);
    assert_eq!(plots(&filtered[0]), vec!["p1"]);
}

#[test]
fn groups_follow_first_seen_title_order() {
    let records = vec![
        record("Zodiac", Some("a"), None, &[]),
        record("Alien", Some("b"), None, &[]),
        record("Zodiac", Some("c"), None, &[]),
        record("Memento", Some("d"), None, &[]),
    ];
    let groups = group_results(&records);
    let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Zodiac", "Alien", "Memento"]);
    assert_eq!(plots(&groups[0]), vec!["a", "c"]);
}

#[test]
fn same_plot_and_source_under_different_titles_is_kept() {
    let records = vec![
        record("A", Some("p"), Some("s"), &[]),
        record("B", Some("p"), Some("s"), &[]),
    ];
    let set = ResultSet::from_results(&records);
    assert_eq!(set.group_count(), 2);
    assert_eq!(set.item_count(), 2);
}

#[test]
fn dedup_keeps_first_record_even_if_later_differs_elsewhere() {
    let mut later = record("A", Some("p"), Some("s"), &["late"]);
    later.snippet = Some("different snippet".into());
    let records = vec![record("A", Some("p"), Some("s"), &["early"]), later];
    let set = ResultSet::from_results(&records);
    assert_eq!(set.item_count(), 1);
    assert_eq!(set.groups()[0].items[0].tag_slice(), ["early".to_string()]);
    assert_eq!(set.tag_universe(), ["early".to_string()]);
}

#[test]
fn missing_plot_and_source_dedupe_against_each_other_only() {
    let records = vec![
        record("A", None, None, &[]),
        record("A", None, None, &[]),
        record("A", Some(""), Some(""), &[]),
        record("A", None, Some("s"), &[]),
    ];
    let groups = group_results(&records);
    assert_eq!(groups[0].items.len(), 3);
}

#[test]
fn separator_text_does_not_collide_keys() {
    let records = vec![
        record("A", Some("a|||b"), Some("c"), &[]),
        record("A", Some("a"), Some("b|||c"), &[]),
    ];
    assert_eq!(group_results(&records)[0].items.len(), 2);
}

#[test]
fn item_without_tags_is_dropped_by_any_filter() {
    let mut untagged = SearchResult::titled("A");
    untagged.plot = Some("bare".into());
    let records = vec![untagged, record("A", Some("tagged"), None, &["x"])];
    let set = ResultSet::from_results(&records);

    assert_eq!(set.filtered(&SelectedTags::new()), set.groups().to_vec());

    let selected: SelectedTags = ["x"].into_iter().collect();
    let filtered = set.filtered(&selected);
    assert_eq!(plots(&filtered[0]), vec!["tagged"]);
}

#[test]
fn filter_requires_every_selected_tag() {
    let records = vec![
        record("A", Some("both"), None, &["x", "y", "z"]),
        record("A", Some("only-x"), None, &["x"]),
        record("B", Some("only-y"), None, &["y"]),
    ];
    let set = ResultSet::from_results(&records);
    let selected: SelectedTags = ["x", "y"].into_iter().collect();
    let filtered = set.filtered(&selected);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "A");
    assert_eq!(plots(&filtered[0]), vec!["both"]);
}

#[test]
fn stale_selected_tag_filters_everything_out() {
    let set = ResultSet::from_results(&scenario_records());
    let selected: SelectedTags = ["gone"].into_iter().collect();
    assert!(set.filtered(&selected).is_empty());
    assert_eq!(selected.stale_against(set.tag_universe()), vec!["gone"]);
}

#[test]
fn filtering_leaves_tag_universe_untouched() {
    let set = ResultSet::from_results(&scenario_records());
    let before = set.tag_universe().to_vec();
    let selected: SelectedTags = ["y"].into_iter().collect();
    let _ = set.filtered(&selected);
    assert_eq!(set.tag_universe(), before.as_slice());
}

#[test]
fn toggle_flips_membership() {
    let mut selected = SelectedTags::new();
    assert!(selected.toggle("x"));
    assert!(selected.contains("x"));
    assert!(!selected.toggle("x"));
    assert!(selected.is_empty());
}

#[test]
fn selected_tags_serialize_as_sorted_array() {
    let selected: SelectedTags = ["b", "a"].into_iter().collect();
    let json = serde_json::to_string(&selected).expect("serialize");
    assert_eq!(json, r#"["a","b"]"#);
}

#[test]
fn empty_input_yields_empty_set() {
    let set = ResultSet::from_results(&[]);
    assert!(set.is_empty());
    assert!(set.tag_universe().is_empty());
    assert_eq!(set.item_count(), 0);
}
