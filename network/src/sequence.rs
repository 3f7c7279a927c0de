//! Latest-request-wins gating for async responses.
//!
//! A panel issues a [`Ticket`] before each request and checks it when the
//! response arrives. Only the most recently issued ticket is current, so a
//! slow response to a superseded request is dropped instead of overwriting
//! newer state.

#[cfg(test)]
#[path = "sequence_test.rs"]
mod sequence_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestGate {
    issued: u64,
}

impl RequestGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Supersede all outstanding tickets without issuing a new one.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}
