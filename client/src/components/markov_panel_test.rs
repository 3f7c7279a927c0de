use super::*;

fn pair(node: &str, values: &[&str]) -> NodeValuePair {
    NodeValuePair {
        node: node.to_owned(),
        values: values.iter().map(|v| (*v).to_owned()).collect(),
    }
}

#[test]
fn targets_follow_reported_node_values() {
    let values = vec![pair("Smoker", &["yes", "no"]), pair("Cancer", &["true", "false"])];
    assert_eq!(target_options(&values), vec!["Smoker".to_owned(), "Cancer".to_owned()]);
}

#[test]
fn no_values_means_no_targets() {
    assert!(target_options(&[]).is_empty());
}
