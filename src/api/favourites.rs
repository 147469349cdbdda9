//! CRUD client for the favourites backend.
//!
//! The backend exposes a single collection resource:
//!
//! - `GET    {favourites_url}` returns the full collection as a JSON array
//! - `POST   {favourites_url}` persists one movie (JSON body)
//! - `DELETE {favourites_url}/{imdbID}` removes one movie
//!
//! Unlike OMDb, the backend signals failure through HTTP status codes
//! only; there is no logical-failure envelope to inspect. Create and
//! delete responses carry no body the plugin needs, so their success is
//! judged by [`ensure_success`] alone.

use crate::api::request::DeleteOrigin;
use crate::api::{ApiConfig, ApiRequest, RequestTag, Verb};
use crate::domain::error::{Result, ZinemaError};
use crate::domain::Movie;

/// Builds a request fetching the full favourites collection.
#[must_use]
pub fn list_request(config: &ApiConfig) -> ApiRequest {
    ApiRequest {
        url: config.favourites_url.clone(),
        verb: Verb::Get,
        headers: ApiRequest::json_headers(),
        body: Vec::new(),
        tag: RequestTag::ListFavourites,
    }
}

/// Builds a request persisting one movie into the collection.
///
/// The movie is serialized with its wire field names, so the backend
/// stores exactly the shape OMDb produced.
///
/// # Errors
///
/// Returns [`ZinemaError::Decode`] if the movie fails to serialize,
/// which cannot happen for a well-formed [`Movie`] but is propagated
/// rather than swallowed.
pub fn create_request(config: &ApiConfig, movie: &Movie) -> Result<ApiRequest> {
    let body = serde_json::to_vec(movie)?;

    tracing::debug!(imdb_id = %movie.imdb_id, "building favourite create request");

    Ok(ApiRequest {
        url: config.favourites_url.clone(),
        verb: Verb::Post,
        headers: ApiRequest::json_headers(),
        body,
        tag: RequestTag::CreateFavourite {
            imdb_id: movie.imdb_id.clone(),
        },
    })
}

/// Builds a request removing one movie from the collection.
///
/// The identifier is appended as a path segment. OMDb identifiers are
/// URL-safe (`tt` plus digits) but are encoded anyway so a malformed id
/// cannot break the path.
#[must_use]
pub fn delete_request(config: &ApiConfig, imdb_id: &str, origin: DeleteOrigin) -> ApiRequest {
    let url = format!(
        "{}/{}",
        config.favourites_url,
        urlencoding::encode(imdb_id)
    );

    tracing::debug!(imdb_id = %imdb_id, "building favourite delete request");

    ApiRequest {
        url,
        verb: Verb::Delete,
        headers: ApiRequest::json_headers(),
        body: Vec::new(),
        tag: RequestTag::DeleteFavourite {
            imdb_id: imdb_id.to_string(),
            origin,
        },
    }
}

/// Parses the favourites collection response.
///
/// # Errors
///
/// Returns [`ZinemaError::Http`] for a non-2xx status and
/// [`ZinemaError::Decode`] when the body is not a JSON movie array.
pub fn parse_list_response(status: u16, body: &[u8]) -> Result<Vec<Movie>> {
    ensure_success(status, "favourites fetch")?;
    let movies: Vec<Movie> = serde_json::from_slice(body)?;

    tracing::debug!(count = movies.len(), "favourites collection parsed");

    Ok(movies)
}

/// Classifies a bodyless mutation response by status alone.
///
/// Status 0 means the host could not complete the request at all
/// (unreachable backend, DNS failure) and is reported like any other
/// non-2xx status.
///
/// # Errors
///
/// Returns [`ZinemaError::Http`] carrying `context` for any status
/// outside the 2xx range.
pub fn ensure_success(status: u16, context: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ZinemaError::Http {
            status,
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Movie {
        Movie {
            title: "The Avengers".to_string(),
            year: "2012".to_string(),
            imdb_id: "tt0848228".to_string(),
            media_type: "movie".to_string(),
            poster: "N/A".to_string(),
        }
    }

    #[test]
    fn list_request_targets_collection_root() {
        let request = list_request(&ApiConfig::default());
        assert_eq!(request.url, "http://localhost:3000/api/favourite");
        assert_eq!(request.verb, Verb::Get);
        assert_eq!(request.tag, RequestTag::ListFavourites);
    }

    #[test]
    fn create_request_carries_wire_shaped_body() {
        let request = create_request(&ApiConfig::default(), &sample()).unwrap();
        assert_eq!(request.verb, Verb::Post);
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["imdbID"], "tt0848228");
        assert_eq!(body["Title"], "The Avengers");
    }

    #[test]
    fn delete_request_appends_id_as_path_segment() {
        let request = delete_request(
            &ApiConfig::default(),
            "tt0848228",
            DeleteOrigin::Favourites,
        );
        assert_eq!(request.url, "http://localhost:3000/api/favourite/tt0848228");
        assert_eq!(request.verb, Verb::Delete);
        assert_eq!(
            request.tag,
            RequestTag::DeleteFavourite {
                imdb_id: "tt0848228".to_string(),
                origin: DeleteOrigin::Favourites,
            }
        );
    }

    #[test]
    fn list_response_parses_movie_array() {
        let body = serde_json::to_vec(&vec![sample()]).unwrap();
        let movies = parse_list_response(200, &body).unwrap();
        assert_eq!(movies, vec![sample()]);
    }

    #[test]
    fn empty_collection_is_not_an_error() {
        let movies = parse_list_response(200, b"[]").unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn non_success_status_is_rejected() {
        let err = parse_list_response(500, b"[]").unwrap_err();
        assert!(matches!(err, ZinemaError::Http { status: 500, .. }));

        assert!(ensure_success(204, "delete").is_ok());
        assert!(ensure_success(0, "delete").is_err());
        assert!(ensure_success(404, "delete").is_err());
    }
}
