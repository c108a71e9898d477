use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use super::SearchError;

/// Request timeout applied when the configuration does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn build_client(timeout: Duration) -> Result<Client, SearchError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("adwiz/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| SearchError::Transport(transport_message(err)))
}

/// Send `request` and parse the body as JSON regardless of the status code.
///
/// Error bodies are returned too so that callers can pull the upstream
/// message out of them. A body that is not JSON becomes [`Value::Null`].
pub(crate) fn send_json(request: RequestBuilder) -> Result<(StatusCode, Value), SearchError> {
    let response = request
        .send()
        .map_err(|err| SearchError::Transport(transport_message(err)))?;
    let status = response.status();
    let text = response
        .text()
        .map_err(|err| SearchError::Transport(transport_message(err)))?;
    let body = serde_json::from_str(&text).unwrap_or(Value::Null);
    Ok((status, body))
}

/// Best-effort human readable message from an upstream error payload.
pub(crate) fn upstream_message(body: &Value) -> Option<String> {
    let error = body.get("error");
    let candidates = [
        error.and_then(|error| error.get("error_user_msg")),
        error.and_then(|error| error.get("message")),
        error,
        body.get("error_message"),
        body.get("message"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|value| value.as_str().filter(|message| !message.trim().is_empty()))
        .map(str::to_string)
}

pub(crate) fn status_error(status: StatusCode, body: &Value) -> SearchError {
    let message = upstream_message(body)
        .unwrap_or_else(|| format!("upstream returned HTTP {}", status.as_u16()));
    SearchError::upstream(Some(status.as_u16()), message)
}

/// Transport error text with the request URL stripped, since query strings
/// carry credentials.
pub(crate) fn transport_message(err: reqwest::Error) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }
    err.without_url().to_string()
}
