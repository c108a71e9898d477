use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use super::http::{build_client, send_json, status_error};
use super::{SearchError, SearchResponse};
use crate::options::SelectOption;

/// Targeting search endpoint used when the configuration does not override it.
pub const DEFAULT_ENTITY_ENDPOINT: &str = "https://graph.facebook.com/v19.0/search";

/// Lookup categories accepted by the entity search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    WorkPosition,
    Interest,
    Employer,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::WorkPosition, Self::Interest, Self::Employer];

    /// Value sent as the `type` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkPosition => "adworkposition",
            Self::Interest => "adinterest",
            Self::Employer => "adworkemployer",
        }
    }

    /// Human readable name used in prompts.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::WorkPosition => "Job title",
            Self::Interest => "Interest",
            Self::Employer => "Employer",
        }
    }

    /// Parse a category name, rejecting anything outside the supported set.
    pub fn parse(value: &str) -> Result<Self, SearchError> {
        match value.trim() {
            "adworkposition" | "work_position" => Ok(Self::WorkPosition),
            "adinterest" | "interest" => Ok(Self::Interest),
            "adworkemployer" | "employer" => Ok(Self::Employer),
            other => Err(SearchError::InvalidKind(other.to_string())),
        }
    }
}

impl FromStr for EntityKind {
    type Err = SearchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct EntityPage {
    #[serde(default)]
    data: Vec<SelectOption>,
    #[serde(default)]
    paging: Option<Value>,
}

/// Thin wrapper around the targeting entity search endpoint.
#[derive(Debug, Clone)]
pub struct EntitySearchClient {
    http: Client,
    endpoint: Url,
}

impl EntitySearchClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SearchError> {
        let http = build_client(timeout)?;
        Ok(Self { http, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Search `kind` entities matching `query`.
    ///
    /// Missing input and unknown kinds fail without touching the network.
    /// The upstream `data` list and `paging` cursor are passed through as-is.
    pub fn search(&self, credential: &str, kind: &str, query: &str) -> SearchResponse {
        let credential = credential.trim();
        if credential.is_empty() {
            return SearchError::MissingCredential.into();
        }
        let query = query.trim();
        if query.is_empty() {
            return SearchError::MissingQuery.into();
        }
        let kind = match EntityKind::parse(kind) {
            Ok(kind) => kind,
            Err(err) => return err.into(),
        };

        match self.fetch(credential, kind, query) {
            Ok(page) => {
                debug!(kind = %kind, query, results = page.data.len(), "entity search completed");
                SearchResponse::ok(page.data, page.paging)
            }
            Err(err) => {
                error!(kind = %kind, query, error = %err, "entity search failed");
                err.into()
            }
        }
    }

    fn fetch(
        &self,
        credential: &str,
        kind: EntityKind,
        query: &str,
    ) -> Result<EntityPage, SearchError> {
        let request = self.http.get(self.endpoint.clone()).query(&[
            ("type", kind.as_str()),
            ("q", query),
            ("access_token", credential),
        ]);
        let (status, body) = send_json(request)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        if body.is_null() {
            return Err(SearchError::Decode("entity search returned no JSON body".to_string()));
        }
        serde_json::from_value(body).map_err(|err| SearchError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    fn client_for(server: &Server) -> EntitySearchClient {
        let endpoint = Url::parse(&format!("{}/search", server.url())).expect("url");
        EntitySearchClient::new(endpoint, Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn kinds_parse_wire_names_and_aliases() {
        assert_eq!(EntityKind::parse("adinterest"), Ok(EntityKind::Interest));
        assert_eq!(EntityKind::parse("work_position"), Ok(EntityKind::WorkPosition));
        assert_eq!("adworkemployer".parse::<EntityKind>(), Ok(EntityKind::Employer));
        assert_eq!(
            EntityKind::parse("adgeolocation"),
            Err(SearchError::InvalidKind("adgeolocation".to_string()))
        );
    }

    #[test]
    fn unknown_kind_is_rejected_without_a_request() {
        let mut server = Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();

        let response = client_for(&server).search("token", "bogus_type", "coffee");

        assert!(!response.success);
        assert!(response.data.is_empty());
        let message = response.error.expect("error message");
        assert!(message.starts_with("Invalid type"), "{message}");
        mock.assert();
    }

    #[test]
    fn missing_credential_or_query_fails_fast() {
        let mut server = Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();
        let client = client_for(&server);

        let no_token = client.search("  ", "adinterest", "coffee");
        assert_eq!(no_token.error.as_deref(), Some("Access token is required"));

        let no_query = client.search("token", "adinterest", "");
        assert_eq!(no_query.error.as_deref(), Some("Search query is required"));
        mock.assert();
    }

    #[test]
    fn results_and_paging_pass_through_unchanged() {
        let mut server = Server::new();
        let body = json!({
            "data": [
                {
                    "id": "6003139266461",
                    "name": "Coffee",
                    "audience_size": 412_000_000,
                    "path": ["Interests", "Coffee"],
                },
                { "id": "6003020834693", "name": "Coffeehouses", "audience_size": 98_000_000 },
            ],
            "paging": { "cursors": { "before": "MAZDZD", "after": "MQZDZD" } },
        });
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "adinterest".into()),
                Matcher::UrlEncoded("q".into(), "coffee".into()),
                Matcher::UrlEncoded("access_token".into(), "token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let response = client_for(&server).search("token", "adinterest", "coffee");

        mock.assert();
        assert!(response.success);
        assert_eq!(response.error, None);
        assert_eq!(serde_json::to_value(&response.data).expect("serialize"), body["data"]);
        assert_eq!(response.paging, Some(body["paging"].clone()));
    }

    #[test]
    fn upstream_error_message_is_extracted() {
        let mut server = Server::new();
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(
                json!({
                    "error": {
                        "message": "Invalid OAuth access token.",
                        "type": "OAuthException",
                        "code": 190,
                    }
                })
                .to_string(),
            )
            .create();

        let response = client_for(&server).search("expired", "adworkposition", "barista");

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Invalid OAuth access token."));
    }

    #[test]
    fn transport_failures_are_reported_not_raised() {
        let endpoint = Url::parse("http://127.0.0.1:9/search").expect("url");
        let client = EntitySearchClient::new(endpoint, Duration::from_secs(2)).expect("client");

        let response = client.search("token", "adworkemployer", "acme");

        assert!(!response.success);
        let message = response.error.expect("error message");
        assert!(!message.contains("token"), "credential leaked: {message}");
    }
}
