use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use super::SearchError;
use super::http::{build_client, send_json, status_error};
use crate::options::{OptionRecord, SelectOption};

/// Places web service root used when the configuration does not override it.
pub const DEFAULT_PLACES_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/";

const DETAIL_FIELDS: &str = "place_id,name,formatted_address,geometry";

#[derive(Debug, Deserialize)]
struct AutocompleteBody {
    #[serde(default)]
    predictions: Vec<Prediction>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    place_id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    #[serde(default)]
    main_text: String,
    #[serde(default)]
    secondary_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsBody {
    #[serde(default)]
    result: Option<PlaceResult>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl Prediction {
    fn into_option(self) -> SelectOption {
        let (main_text, secondary_text) = match self.structured_formatting {
            Some(formatting) => (formatting.main_text, formatting.secondary_text),
            None => (self.description.clone(), None),
        };
        OptionRecord::new()
            .with_id(self.place_id)
            .with_label(self.description)
            .with_field("mainText", main_text)
            .with_field("secondaryText", secondary_text.map_or(Value::Null, Value::String))
            .into()
    }
}

/// Client for the places autocomplete and details endpoints.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl PlacesClient {
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(SearchError::MissingCredential);
        }
        let http = build_client(timeout)?;
        Ok(Self {
            http,
            endpoint: with_trailing_slash(endpoint),
            api_key,
        })
    }

    /// Ranked predictions for `query` as `{id, label, mainText, secondaryText}` records.
    pub fn autocomplete(&self, query: &str) -> Result<Vec<SelectOption>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::MissingQuery);
        }

        let url = self.url("autocomplete/json")?;
        let request = self
            .http
            .get(url)
            .query(&[("input", query), ("key", self.api_key.as_str())]);
        let body: AutocompleteBody = self.fetch(request)?;
        check_status(&body.status, body.error_message.as_deref(), &["OK", "ZERO_RESULTS"])?;

        debug!(query, results = body.predictions.len(), "place autocomplete completed");
        Ok(body
            .predictions
            .into_iter()
            .map(Prediction::into_option)
            .collect())
    }

    /// Full record for a place, including its coordinates.
    pub fn details(&self, place_id: &str) -> Result<SelectOption, SearchError> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(SearchError::MissingQuery);
        }

        let url = self.url("details/json")?;
        let request = self.http.get(url).query(&[
            ("place_id", place_id),
            ("fields", DETAIL_FIELDS),
            ("key", self.api_key.as_str()),
        ]);
        let body: DetailsBody = self.fetch(request)?;
        check_status(&body.status, body.error_message.as_deref(), &["OK"])?;

        let result = body
            .result
            .ok_or_else(|| SearchError::Decode("place details missing result".to_string()))?;
        let location = result
            .geometry
            .map(|geometry| geometry.location)
            .ok_or_else(|| SearchError::Decode("place details missing coordinates".to_string()))?;

        let id = result.place_id.unwrap_or_else(|| place_id.to_string());
        let label = result
            .formatted_address
            .clone()
            .or_else(|| result.name.clone())
            .unwrap_or_else(|| id.clone());
        let mut record = OptionRecord::new()
            .with_id(id)
            .with_label(label)
            .with_field("latitude", location.lat)
            .with_field("longitude", location.lng);
        if let Some(name) = result.name {
            record = record.with_field("name", name);
        }
        if let Some(address) = result.formatted_address {
            record = record.with_field("formattedAddress", address);
        }
        Ok(record.into())
    }

    fn url(&self, path: &str) -> Result<Url, SearchError> {
        self.endpoint
            .join(path)
            .map_err(|err| SearchError::Transport(format!("invalid places endpoint: {err}")))
    }

    fn fetch<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, SearchError> {
        let (status, body) = send_json(request).inspect_err(|err| {
            error!(error = %err, "places request failed");
        })?;
        if !status.is_success() {
            let err = status_error(status, &body);
            error!(error = %err, "places request rejected");
            return Err(err);
        }
        serde_json::from_value(body).map_err(|err| SearchError::Decode(err.to_string()))
    }
}

fn check_status(status: &str, message: Option<&str>, accepted: &[&str]) -> Result<(), SearchError> {
    if accepted.contains(&status) {
        return Ok(());
    }
    let message = message
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("places service returned {status}"));
    Err(SearchError::upstream(None, message))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;
    use crate::client::DEFAULT_TIMEOUT;

    fn client_for(server: &Server) -> PlacesClient {
        let endpoint = Url::parse(&format!("{}/maps/api/place", server.url())).expect("url");
        PlacesClient::new(endpoint, "places-key", Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let endpoint = Url::parse(DEFAULT_PLACES_ENDPOINT).expect("url");
        let err = PlacesClient::new(endpoint, " ", DEFAULT_TIMEOUT).unwrap_err();
        assert_eq!(err, SearchError::MissingCredential);
    }

    #[test]
    fn predictions_are_normalized() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/maps/api/place/autocomplete/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("input".into(), "lisb".into()),
                Matcher::UrlEncoded("key".into(), "places-key".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "status": "OK",
                    "predictions": [{
                        "place_id": "ChIJO_PkYRozGQ0R0DaQ5L3rAAQ",
                        "description": "Lisbon, Portugal",
                        "structured_formatting": {
                            "main_text": "Lisbon",
                            "secondary_text": "Portugal",
                        }
                    }]
                })
                .to_string(),
            )
            .create();

        let results = client_for(&server).autocomplete("lisb").expect("predictions");

        mock.assert();
        assert_eq!(results.len(), 1);
        let place = &results[0];
        assert_eq!(place.id(), Some(&json!("ChIJO_PkYRozGQ0R0DaQ5L3rAAQ")));
        assert_eq!(place.display_label(), "Lisbon, Portugal");
        assert_eq!(place.field_str("mainText"), Some("Lisbon"));
        assert_eq!(place.field_str("secondaryText"), Some("Portugal"));
    }

    #[test]
    fn zero_results_is_an_empty_list() {
        let mut server = Server::new();
        server
            .mock("GET", "/maps/api/place/autocomplete/json")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"ZERO_RESULTS","predictions":[]}"#)
            .create();

        let results = client_for(&server).autocomplete("zzzz").expect("empty list");
        assert!(results.is_empty());
    }

    #[test]
    fn denied_requests_surface_the_service_message() {
        let mut server = Server::new();
        server
            .mock("GET", "/maps/api/place/autocomplete/json")
            .match_query(Matcher::Any)
            .with_body(
                json!({
                    "status": "REQUEST_DENIED",
                    "error_message": "The provided API key is invalid.",
                    "predictions": [],
                })
                .to_string(),
            )
            .create();

        let err = client_for(&server).autocomplete("lisb").unwrap_err();
        assert_eq!(err.to_string(), "The provided API key is invalid.");
    }

    #[test]
    fn details_include_coordinates() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/maps/api/place/details/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("place_id".into(), "abc".into()),
                Matcher::UrlEncoded("fields".into(), DETAIL_FIELDS.into()),
            ]))
            .with_body(
                json!({
                    "status": "OK",
                    "result": {
                        "place_id": "abc",
                        "name": "Lisbon",
                        "formatted_address": "Lisbon, Portugal",
                        "geometry": { "location": { "lat": 38.7223, "lng": -9.1393 } }
                    }
                })
                .to_string(),
            )
            .create();

        let place = client_for(&server).details("abc").expect("details");

        mock.assert();
        assert_eq!(place.display_label(), "Lisbon, Portugal");
        assert_eq!(place.field("latitude"), Some(&json!(38.7223)));
        assert_eq!(place.field("longitude"), Some(&json!(-9.1393)));
        assert_eq!(place.field_str("name"), Some("Lisbon"));
    }

    #[test]
    fn details_without_geometry_are_rejected() {
        let mut server = Server::new();
        server
            .mock("GET", "/maps/api/place/details/json")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"OK","result":{"place_id":"abc","name":"Nowhere"}}"#)
            .create();

        let err = client_for(&server).details("abc").unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn endpoint_gets_a_trailing_slash() {
        let url = with_trailing_slash(Url::parse("https://example.com/api/place").expect("url"));
        assert_eq!(url.join("details/json").expect("join").path(), "/api/place/details/json");
    }
}
