use std::sync::mpsc::Sender;
use std::thread;

use tracing::{trace, warn};

use super::commands::{LookupPayload, LookupReply, LookupRequest};
use super::source::{SharedSource, SuggestionSource};
use crate::client::SearchError;

/// Run `request` against `source` on a background thread.
///
/// Each lookup gets its own thread so a slow response never holds up a newer
/// one. The reply is sent even if the receiver has gone away; the send error
/// is ignored because nobody is left to read it.
pub(crate) fn spawn(
    id: u64,
    request: LookupRequest,
    source: SharedSource,
    replies: Sender<LookupReply>,
) {
    let fallback = replies.clone();
    let fallback_request = request.clone();
    let spawned = thread::Builder::new()
        .name(format!("adwiz-lookup-{id}"))
        .spawn(move || {
            let payload = run(&request, source.as_ref());
            trace!(id, "lookup finished");
            let _ = replies.send(LookupReply { id, payload });
        });

    if let Err(err) = spawned {
        warn!(id, error = %err, "failed to spawn lookup thread");
        let error = SearchError::Transport(format!("could not start lookup: {err}"));
        let payload = match fallback_request {
            LookupRequest::Suggest(_) => LookupPayload::Suggestions(Err(error)),
            LookupRequest::Details(option) => LookupPayload::Details {
                option,
                result: Err(error),
            },
        };
        let _ = fallback.send(LookupReply { id, payload });
    }
}

fn run(request: &LookupRequest, source: &dyn SuggestionSource) -> LookupPayload {
    match request {
        LookupRequest::Suggest(query) => LookupPayload::Suggestions(source.suggest(query)),
        LookupRequest::Details(option) => LookupPayload::Details {
            option: option.clone(),
            result: source.details(option),
        },
    }
}
