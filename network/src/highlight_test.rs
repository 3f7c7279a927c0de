use super::*;
use proptest::prelude::*;

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|id| (*id).to_owned()).collect()
}

fn colors(raw: &[&str]) -> Vec<String> {
    ids(raw)
}

#[test]
fn selectors_round_trip_through_text() {
    for raw in ["node", "edge", "#smoking", ".highlighted"] {
        let selector: Selector = raw.parse().expect("valid selector");
        assert_eq!(selector.to_string(), raw);
    }
    assert!(matches!(
        "#".parse::<Selector>(),
        Err(HighlightError::InvalidSelector(_))
    ));
    assert!("smoking".parse::<Selector>().is_err());
}

#[test]
fn new_sheet_has_base_rules_only() {
    let sheet = Stylesheet::new();
    let selectors: Vec<String> = sheet.rules().iter().map(|rule| rule.selector.to_string()).collect();
    assert_eq!(selectors, vec!["node", "edge"]);
    assert_eq!(sheet.node_color("anything"), DEFAULT_NODE_COLOR);
}

#[test]
fn mismatched_lengths_are_rejected_without_changes() {
    let mut sheet = Stylesheet::new();
    let err = sheet
        .color_nodes(&[ids(&["A"])], &colors(&["red", "blue"]), true)
        .expect_err("lengths differ");
    assert_eq!(err, HighlightError::LengthMismatch { groups: 1, colors: 2 });
    assert_eq!(sheet, Stylesheet::new());
}

#[test]
fn reset_then_paint_matches_worked_example() {
    let mut sheet = Stylesheet::new();
    sheet.upsert("A", "green");
    sheet.upsert("C", "purple");

    sheet
        .color_nodes(&[ids(&["A"]), ids(&["B"])], &colors(&["red", "blue"]), true)
        .expect("lengths match");

    assert_eq!(sheet.node_color("A"), "red");
    assert_eq!(sheet.node_color("B"), "blue");
    assert_eq!(sheet.node_color("C"), DEFAULT_NODE_COLOR);
    assert_eq!(sheet.node_color("D"), DEFAULT_NODE_COLOR);
}

#[test]
fn without_reset_unmentioned_nodes_keep_color() {
    let mut sheet = Stylesheet::new();
    sheet.upsert("A", "green");
    sheet
        .color_nodes(&[ids(&["B"])], &colors(&["blue"]), false)
        .expect("lengths match");
    assert_eq!(sheet.node_color("A"), "green");
    assert_eq!(sheet.node_color("B"), "blue");
}

#[test]
fn upsert_replaces_in_place() {
    let mut sheet = Stylesheet::new();
    sheet.upsert("A", "green");
    sheet.upsert("A", "red");
    let count = sheet
        .rules()
        .iter()
        .filter(|rule| rule.selector == Selector::NodeId("A".into()))
        .count();
    assert_eq!(count, 1);
    assert_eq!(sheet.node_color("A"), "red");
}

#[test]
fn overlapping_groups_take_last_color_for_new_and_existing_rules() {
    let mut sheet = Stylesheet::new();
    sheet.upsert("existing", "green");
    let plan = HighlightPlan::new(vec![
        HighlightGroup::new("first", "red", ids(&["existing", "fresh"])),
        HighlightGroup::new("second", "blue", ids(&["existing", "fresh"])),
    ]);
    sheet.apply(&plan, false);
    assert_eq!(sheet.node_color("existing"), "blue");
    assert_eq!(sheet.node_color("fresh"), "blue");
}

#[test]
fn plan_key_lists_groups_in_order() {
    let plan = HighlightPlan::new(vec![
        HighlightGroup::new("Target variable", "red", ids(&["A"])),
        HighlightGroup::new("Markov blanket", "blue", ids(&["B", "C"])),
    ]);
    assert_eq!(
        plan.key(),
        vec![
            KeyEntry { color: "red".into(), label: "Target variable".into() },
            KeyEntry { color: "blue".into(), label: "Markov blanket".into() },
        ]
    );
}

#[test]
fn rules_serialize_with_css_property_name() {
    let rule = StyleRule::new(Selector::NodeId("A".into()), "red");
    assert_eq!(
        serde_json::to_value(&rule).expect("encode"),
        serde_json::json!({"selector": "#A", "background-color": "red"})
    );
}

proptest! {
    #[test]
    fn reset_with_no_groups_is_idempotent(painted in proptest::collection::vec(("[a-f]", "[a-z]{3,6}"), 0..8)) {
        let mut sheet = Stylesheet::new();
        for (id, color) in &painted {
            sheet.upsert(id, color);
        }
        sheet.color_nodes(&[], &[], true).expect("empty");
        let once = sheet.clone();
        sheet.color_nodes(&[], &[], true).expect("empty");
        prop_assert_eq!(&sheet, &once);
        for rule in sheet.rules() {
            prop_assert_eq!(rule.background_color.as_str(), DEFAULT_NODE_COLOR);
        }
    }

    #[test]
    fn last_group_containing_node_wins(
        groups in proptest::collection::vec(proptest::collection::vec("[a-e]", 0..4), 1..5),
    ) {
        let palette: Vec<String> = (0..groups.len()).map(|i| format!("c{i}")).collect();
        let mut sheet = Stylesheet::new();
        sheet.color_nodes(&groups, &palette, true).expect("lengths match");
        for id in ["a", "b", "c", "d", "e"] {
            let expected = groups
                .iter()
                .rposition(|group| group.iter().any(|member| member == id))
                .map_or(DEFAULT_NODE_COLOR.to_owned(), |i| palette[i].clone());
            prop_assert_eq!(sheet.node_color(id), expected.as_str());
        }
    }
}
