//! Remote API clients for the movie search and favourites backends.
//!
//! Both external collaborators are reached through Zellij's non-blocking
//! `web_request` host call, so the clients in this module never perform
//! I/O themselves. They are pure: request builders produce an
//! [`ApiRequest`] value the plugin shim hands to the host, and response
//! parsers turn the `(status, body)` pair that comes back as a
//! `WebRequestResult` event into typed results.
//!
//! Keeping the clients pure makes every wire-level decision (URL shapes,
//! headers, error classification) unit-testable without a network.
//!
//! # Modules
//!
//! - [`request`]: request envelope, HTTP verb, and response correlation tags
//! - [`omdb`]: paginated movie search against the OMDb API
//! - [`favourites`]: CRUD against the favourites backend

pub mod favourites;
pub mod omdb;
pub mod request;

pub use request::{ApiRequest, DeleteOrigin, RequestTag, Verb};

/// Endpoint configuration shared by both remote clients.
///
/// Extracted from the plugin [`Config`](crate::Config) at initialization
/// and carried in `AppState` so the event handler can build requests
/// without reaching back into Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// OMDb API key, sent as the `apikey` query parameter.
    pub api_key: String,

    /// Base URL of the OMDb search endpoint.
    pub search_url: String,

    /// Base URL of the favourites collection (no trailing slash).
    pub favourites_url: String,

    /// Query used for the initial fetch and as the fallback for an
    /// empty submitted query.
    pub default_query: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_url: "https://www.omdbapi.com/".to_string(),
            favourites_url: "http://localhost:3000/api/favourite".to_string(),
            default_query: "avengers".to_string(),
        }
    }
}
