use super::*;
use crate::api::IndependenceTest;
use crate::highlight::{KeyEntry, Stylesheet};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn pairs() -> Vec<NodeValuePair> {
    vec![
        NodeValuePair { node: "smoke".into(), values: vec!["yes".into(), "no".into()] },
        NodeValuePair { node: "lung".into(), values: vec!["yes".into(), "no".into()] },
        NodeValuePair { node: "xray".into(), values: vec!["pos".into(), "neg".into()] },
    ]
}

#[test]
fn treatment_query_round_trips_through_tilde_form() {
    let choice = TreatmentChoice::parse("smoke~yes");
    assert_eq!(choice, TreatmentChoice::new("smoke", Some("yes".into())));
    assert_eq!(choice.query(), "smoke~yes");
    assert_eq!(choice.to_string(), "smoke = yes");
    assert_eq!(TreatmentChoice::parse("smoke").to_string(), "smoke");
}

#[test]
fn choosing_one_side_hides_that_variable_on_the_other() {
    let pairs = pairs();
    let selection = EffectSelection {
        treatment: Some(TreatmentChoice::parse("smoke~yes")),
        outcome: Some("lung".into()),
    };
    assert_eq!(selection.outcome_options(&pairs), vec!["lung", "xray"]);
    let treatments: Vec<&str> = selection
        .treatment_options(&pairs)
        .into_iter()
        .map(|pair| pair.node.as_str())
        .collect();
    assert_eq!(treatments, vec!["smoke", "xray"]);
}

#[test]
fn request_needs_both_sides() {
    let mut selection = EffectSelection::default();
    assert!(selection.request().is_none());
    selection.treatment = Some(TreatmentChoice::parse("smoke~no"));
    assert!(selection.request().is_none());
    selection.outcome = Some("lung".into());
    assert_eq!(selection.request(), Some(("smoke~no".into(), "lung".into())));
}

#[test]
fn effect_plan_paints_treatment_and_outcome() {
    let selection = EffectSelection {
        treatment: Some(TreatmentChoice::parse("smoke~yes")),
        outcome: Some("lung".into()),
    };
    let plan = selection.plan().expect("treatment chosen");
    let mut sheet = Stylesheet::new();
    sheet.apply(&plan, true);
    assert_eq!(sheet.node_color("smoke"), TREATMENT_COLOR);
    assert_eq!(sheet.node_color("lung"), OUTCOME_COLOR);
    assert_eq!(
        plan.key(),
        vec![
            KeyEntry { color: "blue".into(), label: "Treatment (doing)".into() },
            KeyEntry { color: "orange".into(), label: "Effect variable".into() },
        ]
    );
    assert!(EffectSelection::default().plan().is_none());
}

#[test]
fn effect_color_follows_green_scale() {
    assert_eq!(effect_color(0.0), "rgb(191,223,191)");
    assert_eq!(effect_color(0.25), "rgb(191,223,191)");
    assert_eq!(effect_color(1.0), "rgb(0,128,0)");
    assert_eq!(effect_color(0.5), "rgb(127,191,127)");
}

#[test]
fn effect_rows_come_from_outcome_entry() {
    let mut metrics = BTreeMap::new();
    metrics.insert("no".to_owned(), 0.7);
    metrics.insert("yes".to_owned(), 0.3);
    let mut causal_estimate = BTreeMap::new();
    causal_estimate.insert("lung".to_owned(), metrics);
    let estimate = EffectEstimate { causal_estimate, explanation: None, formula: None };

    let rows = effect_rows(&estimate, "lung");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].metric, "no");
    assert_eq!(rows[0].color, effect_color(0.7));
    assert!(effect_rows(&estimate, "xray").is_empty());
}

#[test]
fn markov_plan_marks_target_red_and_blanket_blue() {
    let plan = markov_blanket_plan("lung", &["smoke".to_owned(), "either".to_owned()]);
    let mut sheet = Stylesheet::new();
    sheet.apply(&plan, true);
    assert_eq!(sheet.node_color("lung"), "red");
    assert_eq!(sheet.node_color("either"), "blue");
    assert_eq!(plan.key()[0].label, "Target variable");
    assert_eq!(plan.key()[1].label, "Markov blanket");
}

#[test]
fn independence_rows_round_and_log() {
    let tests = IndependenceTests {
        independence_test_dict: vec![IndependenceTest {
            independence_assumption: vec!["asia".into(), "smoke".into()],
            conditioning_set: vec!["lung".into()],
            value: 0.456_78,
        }],
    };
    let rows = independence_rows(&tests);
    assert_eq!(rows[0].id, 0);
    assert!((rows[0].p_value - 0.46).abs() < 1e-12);

    let body = serde_json::to_value(rows[0].log_body()).expect("encode");
    assert_eq!(body["target"]["conditionalVariables"], serde_json::json!(["lung"]));

    let mut sheet = Stylesheet::new();
    sheet.apply(&rows[0].plan(), true);
    assert_eq!(sheet.node_color("asia"), INDEPENDENT_COLOR);
    assert_eq!(sheet.node_color("lung"), CONDITIONAL_COLOR);
}

#[test]
fn chat_history_file_name_is_zero_padded() {
    let at = LocalTimestamp { day: 3, month: 7, year: 2024, hour: 9, minute: 5, second: 1 };
    assert_eq!(chat_history_file_name(at), "chat_history_03-07-2024-09.05.01.txt");
}

proptest! {
    #[test]
    fn rounded_p_values_have_two_decimals(value in 0.0f64..1.0) {
        let rounded = round_p_value(value);
        prop_assert!((rounded - value).abs() <= 0.005 + 1e-9);
        prop_assert!(((rounded * 100.0).round() - rounded * 100.0).abs() < 1e-6);
    }
}
