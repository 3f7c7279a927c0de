use super::*;
use std::collections::BTreeMap;

fn estimate() -> EffectEstimate {
    let mut metrics = BTreeMap::new();
    metrics.insert("ATE".to_owned(), 0.5);
    let mut causal_estimate = BTreeMap::new();
    causal_estimate.insert("Y".to_owned(), metrics);
    EffectEstimate {
        causal_estimate,
        explanation: Some("X raises Y".to_owned()),
        formula: None,
    }
}

#[test]
fn result_keeps_rows_and_explanation() {
    let result = EffectResult::from_estimate(&estimate(), "Y");
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].metric, "ATE");
    assert_eq!(result.explanation.as_deref(), Some("X raises Y"));
}

#[test]
fn result_for_unknown_outcome_has_no_rows() {
    let result = EffectResult::from_estimate(&estimate(), "Z");
    assert!(result.rows.is_empty());
}

#[test]
fn empty_option_clears_choice() {
    assert_eq!(parse_choice(""), None);
    assert_eq!(parse_choice("X~1").as_deref(), Some("X~1"));
}

#[test]
fn metric_color_tints_the_value_text() {
    let result = EffectResult::from_estimate(&estimate(), "Y");
    let style = value_style(&result.rows[0].color);
    assert!(style.starts_with("color: "));
    assert!(!style.contains("background"));
}
