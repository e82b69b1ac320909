//! Latest-request-wins ordering for views refreshed by rapid input.
//!
//! Each refresh takes a ticket before its request goes out. When the response
//! comes back, it is applied only if no newer ticket was issued meanwhile.
//! Requests are not cancelled; their results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Proof that a refresh was started; compare against the sequencer later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes all earlier ones.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest one issued.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
