//! Latest-request-wins bookkeeping shared by the search and tracking panels.
//!
//! Every new request bumps a sequence number and cancels the task that was
//! serving the previous one. A response is only applied if its sequence is
//! still the newest when it arrives, so a slow early reply can never
//! overwrite a later one.

use std::sync::{Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

/// Handle for one issued request.
#[derive(Debug, Clone)]
pub(crate) struct Ticket {
    pub(crate) seq: u64,
    pub(crate) token: CancellationToken,
}

#[derive(Debug, Default)]
struct Slot {
    seq: u64,
    token: Option<CancellationToken>,
}

#[derive(Debug, Default)]
pub(crate) struct LatestRequest {
    slot: Mutex<Slot>,
}

impl LatestRequest {
    /// Supersede whatever is pending and issue a new ticket.
    pub(crate) fn begin(&self) -> Ticket {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = slot.token.take() {
            old.cancel();
        }
        slot.seq += 1;
        let token = CancellationToken::new();
        slot.token = Some(token.clone());
        Ticket {
            seq: slot.seq,
            token,
        }
    }

    /// Cancel whatever is pending without issuing a new request.
    pub(crate) fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = slot.token.take() {
            old.cancel();
        }
        slot.seq += 1;
    }

    /// Run `apply` only if `seq` is still the newest request.
    ///
    /// The check and the update happen under the same lock as `begin`, so a
    /// new request cannot slip in between them.
    pub(crate) fn apply_if_current(&self, seq: u64, apply: impl FnOnce()) -> bool {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.seq != seq {
            return false;
        }
        apply();
        true
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> u64 {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_cancels_previous() {
        let latest = LatestRequest::default();
        let first = latest.begin();
        let second = latest.begin();

        assert!(first.token.is_cancelled());
        assert!(!second.token.is_cancelled());
        assert!(second.seq > first.seq);
    }

    #[test]
    fn test_stale_ticket_is_not_applied() {
        let latest = LatestRequest::default();
        let first = latest.begin();
        let second = latest.begin();

        let mut applied = Vec::new();
        assert!(!latest.apply_if_current(first.seq, || applied.push(first.seq)));
        assert!(latest.apply_if_current(second.seq, || applied.push(second.seq)));
        assert_eq!(applied, vec![second.seq]);
    }

    #[test]
    fn test_invalidate_supersedes_without_new_ticket() {
        let latest = LatestRequest::default();
        let ticket = latest.begin();
        latest.invalidate();

        assert!(ticket.token.is_cancelled());
        assert!(!latest.apply_if_current(ticket.seq, || {}));
        assert_eq!(latest.current(), ticket.seq + 1);
    }
}
