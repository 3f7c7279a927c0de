use super::*;
use proptest::prelude::*;

#[test]
fn fresh_ticket_is_current() {
    let mut gate = RequestGate::new();
    let ticket = gate.issue();
    assert!(gate.is_current(ticket));
}

#[test]
fn newer_ticket_supersedes_older() {
    let mut gate = RequestGate::new();
    let first = gate.issue();
    let second = gate.issue();
    assert!(!gate.is_current(first));
    assert!(gate.is_current(second));
}

#[test]
fn invalidate_drops_outstanding_ticket() {
    let mut gate = RequestGate::new();
    let ticket = gate.issue();
    gate.invalidate();
    assert!(!gate.is_current(ticket));
}

proptest! {
    #[test]
    fn only_last_of_many_is_accepted(count in 1usize..32) {
        let mut gate = RequestGate::new();
        let tickets: Vec<Ticket> = (0..count).map(|_| gate.issue()).collect();
        let accepted: Vec<bool> = tickets.iter().map(|t| gate.is_current(*t)).collect();
        prop_assert_eq!(accepted.iter().filter(|ok| **ok).count(), 1);
        prop_assert!(accepted[count - 1]);
    }
}
