//! Movie domain model.
//!
//! This module defines the core `Movie` type as it appears on the wire for
//! both external collaborators: the OMDb search API and the favourites
//! backend share the same JSON object shape. Movies are immutable once
//! received; the plugin never edits a movie, only stores or displays it.

use serde::{Deserialize, Serialize};

/// Sentinel value OMDb uses when no poster image exists for a movie.
pub const POSTER_UNAVAILABLE: &str = "N/A";

/// A single movie as returned by the OMDb search API.
///
/// The field names on the wire are OMDb's PascalCase originals
/// (`Title`, `Year`, `imdbID`, `Type`, `Poster`); serde renames map them
/// to snake_case here. The favourites backend stores and returns the same
/// shape, so one type serves both APIs.
///
/// # Fields
///
/// - `imdb_id`: unique identifier, the key for favourites membership
/// - `title`: display title
/// - `year`: release year as a string (OMDb uses ranges like "2019–2021"
///   for series, so this is not numeric)
/// - `media_type`: "movie", "series", or "episode"
/// - `poster`: poster image URL, or [`POSTER_UNAVAILABLE`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Year")]
    pub year: String,

    #[serde(rename = "imdbID")]
    pub imdb_id: String,

    #[serde(rename = "Type")]
    pub media_type: String,

    #[serde(rename = "Poster")]
    pub poster: String,
}

impl Movie {
    /// Returns the poster URL if one exists.
    ///
    /// OMDb signals a missing poster with the literal string `"N/A"`
    /// rather than omitting the field; this helper hides that sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use zinema::domain::Movie;
    ///
    /// let movie = Movie {
    ///     title: "Primer".to_string(),
    ///     year: "2004".to_string(),
    ///     imdb_id: "tt0390384".to_string(),
    ///     media_type: "movie".to_string(),
    ///     poster: "N/A".to_string(),
    /// };
    /// assert!(movie.poster_url().is_none());
    /// ```
    #[must_use]
    pub fn poster_url(&self) -> Option<&str> {
        if self.poster == POSTER_UNAVAILABLE || self.poster.is_empty() {
            None
        } else {
            Some(&self.poster)
        }
    }
}
