//! HTTP wrappers around the third-party search services.
//!
//! [`EntitySearchClient`] never returns an error: every outcome is folded into
//! a [`SearchResponse`]. [`PlacesClient`] returns `Result`s and is adapted to
//! the search widgets through [`PlaceSource`].

mod entity;
mod error;
mod http;
mod places;
mod response;
mod sources;

pub use entity::{DEFAULT_ENTITY_ENDPOINT, EntityKind, EntitySearchClient};
pub use error::SearchError;
pub use http::DEFAULT_TIMEOUT;
pub use places::{DEFAULT_PLACES_ENDPOINT, PlacesClient};
pub use response::SearchResponse;
pub use sources::{EntitySource, PlaceSource};
