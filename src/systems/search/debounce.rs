use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    deadline: Instant,
}

/// Cancellable debounce timer.
///
/// The timer is a deadline checked by the owner's event loop, so cancelling
/// it or dropping the owner leaves nothing behind that could fire later.
#[derive(Debug, Default)]
pub struct Debounce {
    pending: Option<Pending>,
}

impl Debounce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for `query`, replacing whatever was pending.
    pub fn schedule(&mut self, query: impl Into<String>, now: Instant, delay: Duration) {
        self.pending = Some(Pending {
            query: query.into(),
            deadline: now + delay,
        });
    }

    /// Drop the pending query. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Take the pending query once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {
                self.pending.take().map(|pending| pending.query)
            }
            _ => None,
        }
    }
}
