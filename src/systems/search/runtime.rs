use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::debug;

use super::commands::{LookupReply, LookupRequest};
use super::source::SharedSource;
use super::worker;

/// Tracks which lookup a widget is waiting for.
///
/// Every issued lookup gets the next id. Only the reply whose id matches the
/// current generation is applied; superseding the generation drops whatever
/// is still in flight without aborting it.
pub(crate) struct LookupRuntime {
    source: SharedSource,
    tx: Sender<LookupReply>,
    rx: Receiver<LookupReply>,
    next_id: u64,
    current_id: Option<u64>,
    in_flight: bool,
    issued: usize,
}

impl LookupRuntime {
    pub(crate) fn new(source: SharedSource) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            next_id: 0,
            current_id: None,
            in_flight: false,
            issued: 0,
        }
    }

    pub(crate) fn issue(&mut self, request: LookupRequest) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        let id = self.next_id;
        self.current_id = Some(id);
        self.in_flight = true;
        self.issued += 1;
        debug!(id, request = ?request, "issuing lookup");
        worker::spawn(id, request, self.source.clone(), self.tx.clone());
        id
    }

    /// Forget the current generation so any reply still in flight is ignored.
    pub(crate) fn supersede(&mut self) {
        if self.in_flight {
            debug!(id = ?self.current_id, "superseding in-flight lookup");
        }
        self.current_id = None;
        self.in_flight = false;
    }

    pub(crate) fn matches_latest(&self, id: u64) -> bool {
        Some(id) == self.current_id
    }

    pub(crate) fn record_completion(&mut self) {
        self.in_flight = false;
    }

    pub(crate) fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn issued(&self) -> usize {
        self.issued
    }

    pub(crate) fn try_recv(&mut self) -> Result<LookupReply, TryRecvError> {
        self.rx.try_recv()
    }
}
