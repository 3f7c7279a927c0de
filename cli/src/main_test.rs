use super::*;
use network::socket::{Handshake, ResponseMessage};
use std::collections::BTreeMap;

#[test]
fn parse_edge_accepts_arrow_form() {
    let edge = parse_edge("smoking -> cancer").expect("edge");
    assert_eq!(edge.id(), "smoking->cancer");
    assert_eq!(edge.endpoints(), Some(("smoking", "cancer")));
}

#[test]
fn parse_edge_rejects_missing_endpoint() {
    assert!(matches!(parse_edge("smoking->"), Err(CliError::InvalidEdge(_))));
    assert!(matches!(parse_edge("smoking"), Err(CliError::InvalidEdge(_))));
}

#[test]
fn change_set_lists_additions_before_deletions() {
    let changes = change_set(&["A->B".to_owned()], &["B->C".to_owned()]).expect("changes");
    assert_eq!(changes.changes.len(), 2);
    assert!(changes.changes[0].is_addition());
    assert!(!changes.changes[1].is_addition());
    assert_eq!(changes.changes[1].element().id(), "B->C");
}

#[test]
fn chat_waits_for_connect_before_sending() {
    let mut outgoing = Some("42[\"user_message\"]".to_owned());
    let handshake = Handshake {
        sid: "s".to_owned(),
        upgrades: Vec::new(),
        ping_interval: 25_000,
        ping_timeout: 20_000,
        max_payload: None,
    };

    let first = next_chat_action(ChannelEvent::Open(handshake), &mut outgoing).expect("open");
    assert_eq!(first, ChatAction::Send("40".to_owned()));
    assert!(outgoing.is_some());

    let second = next_chat_action(ChannelEvent::Connected, &mut outgoing).expect("connected");
    assert_eq!(second, ChatAction::Send("42[\"user_message\"]".to_owned()));
    assert!(outgoing.is_none());

    let again = next_chat_action(ChannelEvent::Connected, &mut outgoing).expect("connected");
    assert_eq!(again, ChatAction::Wait);
}

#[test]
fn chat_answers_ping_and_finishes_on_response() {
    let mut outgoing = None;
    assert_eq!(
        next_chat_action(ChannelEvent::Ping(String::new()), &mut outgoing).expect("ping"),
        ChatAction::Send("3".to_owned())
    );
    let reply = ChannelEvent::Response(ResponseMessage { data: "hi".to_owned() });
    assert_eq!(
        next_chat_action(reply, &mut outgoing).expect("reply"),
        ChatAction::Done("hi".to_owned())
    );
}

#[test]
fn chat_connect_error_is_fatal() {
    let mut outgoing = None;
    let result = next_chat_action(ChannelEvent::ConnectError("nope".to_owned()), &mut outgoing);
    assert!(matches!(result, Err(CliError::ConnectRefused(message)) if message == "nope"));
}

#[test]
fn format_effect_includes_explanation() {
    let mut metrics = BTreeMap::new();
    metrics.insert("ATE".to_owned(), 0.25);
    let mut causal_estimate = BTreeMap::new();
    causal_estimate.insert("Y".to_owned(), metrics);
    let estimate = EffectEstimate {
        causal_estimate,
        explanation: Some("because".to_owned()),
        formula: None,
    };
    assert_eq!(format_effect(&estimate, "Y"), "ATE\t0.25\nExplanation: because");
}

#[test]
fn format_independence_row_is_tab_separated() {
    let row = IndependenceRow {
        id: 3,
        independence_assumption: vec!["A".to_owned(), "B".to_owned()],
        conditional_variables: vec!["C".to_owned()],
        p_value: 0.5,
    };
    assert_eq!(format_independence_row(&row), "3\tA _||_ B\tC\t0.50");
}

#[test]
fn cli_parses_repeatable_edges() {
    let cli = Cli::try_parse_from(["causal-cli", "network", "apply", "--add", "A->B", "--add", "B->C"])
        .expect("parse");
    let Command::Network(NetworkCommand {
        command: NetworkSubcommand::Apply { additions, deletions },
    }) = cli.command
    else {
        panic!("expected network apply");
    };
    assert_eq!(additions, vec!["A->B", "B->C"]);
    assert!(deletions.is_empty());
}
