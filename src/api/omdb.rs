//! Paginated movie search against the OMDb API.
//!
//! OMDb's search endpoint takes an API key, a text query, and a 1-based
//! page number, and answers with at most [`PAGE_SIZE`] matches plus a
//! total-result count. It never uses HTTP status codes for logical
//! failures: a query with no matches comes back `200 OK` with
//! `Response: "False"` and an `Error` message, so the parser has to look
//! inside the body to classify the outcome.

use crate::api::{ApiConfig, ApiRequest, RequestTag, Verb};
use crate::domain::error::{Result, ZinemaError};
use crate::domain::Movie;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Fixed number of results per OMDb search page.
pub const PAGE_SIZE: u32 = 10;

/// One page of search results.
///
/// Replaced wholesale on every search or page change; pages are never
/// merged with previously fetched ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    /// Matches for this page, at most [`PAGE_SIZE`] entries.
    pub movies: Vec<Movie>,

    /// Total matches across all pages, as reported by OMDb.
    pub total_results: u32,
}

/// OMDb search response envelope.
///
/// `Search` and `totalResults` are absent on failure payloads, so both
/// are optional at the serde level and defaulted during parsing.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    search: Vec<Movie>,

    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,

    #[serde(rename = "Response")]
    response: String,

    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Builds a search request for one page of results.
///
/// The query is percent-encoded into the `s` parameter; the page is
/// 1-based, matching OMDb's contract. The generation counter travels in
/// the request context so stale responses can be recognised and dropped.
///
/// # Parameters
///
/// * `config` - endpoint configuration (URL, API key)
/// * `query` - non-empty search text
/// * `page` - 1-based page number
/// * `generation` - search generation at the time of issue
#[must_use]
pub fn search_request(config: &ApiConfig, query: &str, page: u32, generation: u64) -> ApiRequest {
    let url = format!(
        "{}?apikey={}&s={}&page={}",
        config.search_url,
        urlencoding::encode(&config.api_key),
        urlencoding::encode(query),
        page
    );

    tracing::debug!(query = %query, page = page, generation = generation, "building search request");

    ApiRequest {
        url,
        verb: Verb::Get,
        headers: BTreeMap::new(),
        body: Vec::new(),
        tag: RequestTag::Search { generation },
    }
}

/// Parses an OMDb search response.
///
/// # Failure classification
///
/// - non-2xx or status 0 → [`ZinemaError::Http`] (transport failure)
/// - undecodable body → [`ZinemaError::Decode`]
/// - `Response: "False"` → [`ZinemaError::Api`] with the upstream
///   `Error` message, or a generic message when none was supplied
///
/// A missing or unparseable `totalResults` on a success payload is
/// treated as zero rather than an error, mirroring lenient clients of
/// this API.
///
/// # Errors
///
/// See the classification above; the caller treats any error as
/// "zero results, message surfaced".
pub fn parse_search_response(status: u16, body: &[u8]) -> Result<SearchPage> {
    if !(200..300).contains(&status) {
        return Err(ZinemaError::Http {
            status,
            context: "movie search".to_string(),
        });
    }

    let envelope: SearchEnvelope = serde_json::from_slice(body)?;

    if envelope.response == "False" {
        let message = envelope
            .error
            .unwrap_or_else(|| "Failed to fetch movies".to_string());
        return Err(ZinemaError::Api(message));
    }

    let total_results = envelope
        .total_results
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(0);

    tracing::debug!(
        movie_count = envelope.search.len(),
        total_results = total_results,
        "search response parsed"
    );

    Ok(SearchPage {
        movies: envelope.search,
        total_results,
    })
}

/// Derives the page count from a total-result count.
///
/// `ceil(total_results / PAGE_SIZE)`; zero results means zero pages.
#[must_use]
pub const fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success_body(count: usize, total: u32) -> Vec<u8> {
        let movies: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "Title": format!("Movie {i}"),
                    "Year": "2012",
                    "imdbID": format!("tt{i:07}"),
                    "Type": "movie",
                    "Poster": "N/A",
                })
            })
            .collect();

        serde_json::to_vec(&serde_json::json!({
            "Search": movies,
            "totalResults": total.to_string(),
            "Response": "True",
        }))
        .unwrap()
    }

    #[test]
    fn search_request_encodes_query_and_page() {
        let config = ApiConfig {
            api_key: "k123".to_string(),
            ..ApiConfig::default()
        };
        let request = search_request(&config, "star wars", 3, 7);

        assert_eq!(
            request.url,
            "https://www.omdbapi.com/?apikey=k123&s=star%20wars&page=3"
        );
        assert_eq!(request.verb, Verb::Get);
        assert_eq!(request.tag, RequestTag::Search { generation: 7 });
        assert!(request.body.is_empty());
    }

    #[test]
    fn full_page_parses_with_total() {
        let page = parse_search_response(200, &success_body(10, 30)).unwrap();
        assert_eq!(page.movies.len(), 10);
        assert_eq!(page.total_results, 30);
        assert_eq!(total_pages(page.total_results), 3);
    }

    #[test]
    fn logical_failure_carries_upstream_message() {
        let body = br#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = parse_search_response(200, body).unwrap_err();
        assert_eq!(err.to_string(), "Movie not found!");
    }

    #[test]
    fn logical_failure_without_message_gets_fallback() {
        let body = br#"{"Response":"False"}"#;
        let err = parse_search_response(200, body).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch movies");
    }

    #[test]
    fn transport_failure_is_status_error() {
        let err = parse_search_response(503, b"").unwrap_err();
        assert!(matches!(err, ZinemaError::Http { status: 503, .. }));
    }

    #[test]
    fn unparseable_total_results_defaults_to_zero() {
        let body = serde_json::to_vec(&serde_json::json!({
            "Search": [],
            "totalResults": "many",
            "Response": "True",
        }))
        .unwrap();

        let page = parse_search_response(200, &body).unwrap();
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(30), 3);
    }
}
