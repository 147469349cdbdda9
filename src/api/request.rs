//! Request envelope and response correlation tags.
//!
//! Zellij's `web_request` call is fire-and-forget: the response arrives
//! later as a `WebRequestResult` event carrying whatever context map was
//! attached to the request. This module defines the [`ApiRequest`]
//! envelope the clients build, and the [`RequestTag`] that round-trips
//! through that context map so the event handler can tell which logical
//! operation a response belongs to.
//!
//! Search tags additionally carry a generation counter. The handler bumps
//! the generation on every new fetch and drops responses whose generation
//! is no longer current, so a slow response from an abandoned search can
//! never overwrite the results of a newer one.

use std::collections::BTreeMap;

/// Context map key identifying the request kind.
const CTX_KIND: &str = "zinema_kind";
/// Context map key carrying the search generation counter.
const CTX_GENERATION: &str = "zinema_generation";
/// Context map key carrying the affected movie identifier.
const CTX_IMDB_ID: &str = "zinema_imdb_id";
/// Context map key identifying which view issued a delete.
const CTX_ORIGIN: &str = "zinema_origin";

/// HTTP verb for an outgoing request.
///
/// A local mirror of the host's verb enum so the library core stays free
/// of `zellij-tile` types; the plugin shim maps it when dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

/// View that issued a favourite removal.
///
/// Delete responses set the error banner of the view that triggered them,
/// which may no longer be the visible view by the time the response
/// arrives, so the origin travels with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOrigin {
    /// Toggle-off from the search carousel.
    Search,
    /// Per-item removal from the favourites view.
    Favourites,
}

/// Identifies the logical operation behind an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTag {
    /// A paginated movie search.
    Search {
        /// Generation counter at the time the fetch was issued.
        generation: u64,
    },
    /// Full favourites collection fetch.
    ListFavourites,
    /// Persist one movie into the favourites collection.
    CreateFavourite {
        /// Identifier of the movie being persisted.
        imdb_id: String,
    },
    /// Remove one movie from the favourites collection.
    DeleteFavourite {
        /// Identifier of the movie being removed.
        imdb_id: String,
        /// View that triggered the removal.
        origin: DeleteOrigin,
    },
}

impl RequestTag {
    /// Encodes the tag into a `web_request` context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match self {
            Self::Search { generation } => {
                context.insert(CTX_KIND.to_string(), "search".to_string());
                context.insert(CTX_GENERATION.to_string(), generation.to_string());
            }
            Self::ListFavourites => {
                context.insert(CTX_KIND.to_string(), "list_favourites".to_string());
            }
            Self::CreateFavourite { imdb_id } => {
                context.insert(CTX_KIND.to_string(), "create_favourite".to_string());
                context.insert(CTX_IMDB_ID.to_string(), imdb_id.clone());
            }
            Self::DeleteFavourite { imdb_id, origin } => {
                context.insert(CTX_KIND.to_string(), "delete_favourite".to_string());
                context.insert(CTX_IMDB_ID.to_string(), imdb_id.clone());
                let origin = match origin {
                    DeleteOrigin::Search => "search",
                    DeleteOrigin::Favourites => "favourites",
                };
                context.insert(CTX_ORIGIN.to_string(), origin.to_string());
            }
        }
        context
    }

    /// Decodes a tag from a `WebRequestResult` context map.
    ///
    /// Returns `None` for context maps this plugin did not produce
    /// (missing or unrecognised kind, missing required fields), which the
    /// shim treats as "not ours, ignore".
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        match context.get(CTX_KIND)?.as_str() {
            "search" => {
                let generation = context.get(CTX_GENERATION)?.parse().ok()?;
                Some(Self::Search { generation })
            }
            "list_favourites" => Some(Self::ListFavourites),
            "create_favourite" => Some(Self::CreateFavourite {
                imdb_id: context.get(CTX_IMDB_ID)?.clone(),
            }),
            "delete_favourite" => {
                let origin = match context.get(CTX_ORIGIN)?.as_str() {
                    "search" => DeleteOrigin::Search,
                    "favourites" => DeleteOrigin::Favourites,
                    _ => return None,
                };
                Some(Self::DeleteFavourite {
                    imdb_id: context.get(CTX_IMDB_ID)?.clone(),
                    origin,
                })
            }
            _ => None,
        }
    }
}

/// A fully assembled request ready for the plugin shim to dispatch.
///
/// Produced by the client builders in [`omdb`](crate::api::omdb) and
/// [`favourites`](crate::api::favourites); the shim translates it into a
/// single `web_request` host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Fully encoded request URL.
    pub url: String,

    /// HTTP verb.
    pub verb: Verb,

    /// Request headers.
    pub headers: BTreeMap<String, String>,

    /// Request body, empty for GET and DELETE.
    pub body: Vec<u8>,

    /// Correlation tag, encoded into the request context map.
    pub tag: RequestTag,
}

impl ApiRequest {
    /// Standard headers for favourites backend calls.
    ///
    /// Every request to the favourites API carries a JSON content type,
    /// including GET and DELETE, matching the backend's contract.
    #[must_use]
    pub fn json_headers() -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_tag_round_trips_with_generation() {
        let tag = RequestTag::Search { generation: 42 };
        let decoded = RequestTag::from_context(&tag.to_context());
        assert_eq!(decoded, Some(tag));
    }

    #[test]
    fn delete_tag_round_trips_with_origin() {
        let tag = RequestTag::DeleteFavourite {
            imdb_id: "tt0848228".to_string(),
            origin: DeleteOrigin::Favourites,
        };
        let decoded = RequestTag::from_context(&tag.to_context());
        assert_eq!(decoded, Some(tag));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("payload".to_string(), "something-else".to_string());
        assert_eq!(RequestTag::from_context(&context), None);

        context.insert(super::CTX_KIND.to_string(), "unknown_kind".to_string());
        assert_eq!(RequestTag::from_context(&context), None);
    }
}
