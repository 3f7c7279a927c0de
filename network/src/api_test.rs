use super::*;

#[test]
fn endpoint_tolerates_trailing_slash() {
    assert_eq!(endpoint("http://localhost:8000/", NETWORK_PATH), "http://localhost:8000/network");
    assert_eq!(endpoint("http://localhost:8000", CHAT_HISTORY_PATH), "http://localhost:8000/chat_history");
}

#[test]
fn query_values_are_percent_encoded() {
    assert_eq!(
        estimate_effect_path("smoke~yes", "lung"),
        "/network/estimate_effect?treatment=smoke%7Eyes&outcome=lung"
    );
    assert_eq!(
        markov_blanket_path("tb or cancer"),
        "/network/markov_blanket?target=tb+or+cancer"
    );
}

#[test]
fn node_value_pairs_normalize_numbers_to_strings() {
    let pairs: Vec<NodeValuePair> = serde_json::from_value(serde_json::json!([
        {"smoking": ["yes", "no"]},
        {"age": [1, 2.5]}
    ]))
    .expect("pairs decode");
    assert_eq!(
        pairs,
        vec![
            NodeValuePair { node: "smoking".into(), values: vec!["yes".into(), "no".into()] },
            NodeValuePair { node: "age".into(), values: vec!["1".into(), "2.5".into()] },
        ]
    );
    assert_eq!(
        serde_json::to_value(&pairs[0]).expect("encode"),
        serde_json::json!({"smoking": ["yes", "no"]})
    );
}

#[test]
fn node_value_pair_requires_exactly_one_key() {
    assert!(serde_json::from_value::<NodeValuePair>(serde_json::json!({})).is_err());
    assert!(serde_json::from_value::<NodeValuePair>(serde_json::json!({"a": [], "b": []})).is_err());
    assert!(serde_json::from_value::<NodeValuePair>(serde_json::json!({"a": [null]})).is_err());
}

#[test]
fn effect_estimate_decodes_backend_shape() {
    let estimate: EffectEstimate = serde_json::from_value(serde_json::json!({
        "causal_estimate": {"lung": {"yes": 0.4, "no": 0.6}},
        "explanation": "Smoking raises the probability of lung cancer.",
        "formula": "P(lung | do(smoke))",
        "html": "<div/>"
    }))
    .expect("estimate decodes");
    assert_eq!(estimate.causal_estimate["lung"]["no"], 0.6);
    assert_eq!(estimate.formula.as_deref(), Some("P(lung | do(smoke))"));
}

#[test]
fn markov_blanket_members_default_to_empty() {
    let blanket: MarkovBlanket =
        serde_json::from_value(serde_json::json!({"markovBlanket": {"lung": ["smoke", "either"]}}))
            .expect("blanket decodes");
    assert_eq!(blanket.members("lung"), ["smoke".to_owned(), "either".to_owned()]);
    assert!(blanket.members("asia").is_empty());
}

#[test]
fn independence_log_uses_camel_case_keys() {
    let body = IndependenceLog {
        target: LoggedIndependenceTest {
            independence_assumption: vec!["asia".into(), "smoke".into()],
            conditional_variables: vec![],
            p_value: 0.42,
        },
    };
    assert_eq!(
        serde_json::to_value(&body).expect("encode"),
        serde_json::json!({"target": {
            "independenceAssumption": ["asia", "smoke"],
            "conditionalVariables": [],
            "pValue": 0.42
        }})
    );
}

#[test]
fn track_actions_body_shape() {
    assert_eq!(
        serde_json::to_value(TrackActions { is_tracking: false }).expect("encode"),
        serde_json::json!({"is_tracking": false})
    );
}
