//! Shared favourites store with optimistic mutations.
//!
//! Both views read and write the same store, so favourite status is
//! always consistent between the search carousel and the favourites
//! table. Mutations are optimistic: the local collection changes
//! immediately when the user toggles, a pending entry records how to
//! undo the change, and the eventual backend response either confirms
//! (drop the pending entry) or fails (revert it).
//!
//! While an operation for a movie is pending, further toggles of that
//! movie are ignored. This single-flight rule prevents the local state
//! and the backend from disagreeing about the order of mutations.

use crate::domain::Movie;
use std::collections::BTreeMap;

/// The remote mutation a toggle decided to issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleRequest {
    /// Persist this movie to the backend.
    Create(Movie),
    /// Remove this identifier from the backend.
    Delete(String),
}

/// Undo record for an optimistic mutation awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingOp {
    /// The movie was appended locally; revert removes it again.
    Add,
    /// The movie was removed locally; revert reinserts it where it was.
    Remove { movie: Movie, index: usize },
}

/// Insertion-ordered favourites collection plus in-flight mutations.
#[derive(Debug, Clone, Default)]
pub struct FavouritesStore {
    movies: Vec<Movie>,
    pending: BTreeMap<String, PendingOp>,
}

impl FavouritesStore {
    /// Replaces the collection with a fresh backend snapshot.
    ///
    /// Used for the initial fetch. Any pending entries are dropped since
    /// the snapshot supersedes whatever they were tracking.
    pub fn seed(&mut self, movies: Vec<Movie>) {
        tracing::debug!(count = movies.len(), "seeding favourites from backend");
        self.movies = movies;
        self.pending.clear();
    }

    /// Current collection, in insertion order.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Whether this movie is currently in the local collection.
    ///
    /// Reflects optimistic state: a movie whose removal is still in
    /// flight reads as not favourite.
    #[must_use]
    pub fn is_favourite(&self, imdb_id: &str) -> bool {
        self.movies.iter().any(|movie| movie.imdb_id == imdb_id)
    }

    /// Whether a mutation for this movie is awaiting its response.
    #[must_use]
    pub fn has_pending(&self, imdb_id: &str) -> bool {
        self.pending.contains_key(imdb_id)
    }

    /// Toggles a movie's favourite status optimistically.
    ///
    /// Returns the backend mutation to issue, or `None` when an earlier
    /// mutation for the same movie is still in flight (the toggle is
    /// ignored, not queued).
    pub fn toggle(&mut self, movie: &Movie) -> Option<ToggleRequest> {
        if self.has_pending(&movie.imdb_id) {
            tracing::debug!(imdb_id = %movie.imdb_id, "toggle ignored, mutation in flight");
            return None;
        }

        if let Some(index) = self.position(&movie.imdb_id) {
            let removed = self.movies.remove(index);
            let imdb_id = removed.imdb_id.clone();
            self.pending.insert(
                imdb_id.clone(),
                PendingOp::Remove {
                    movie: removed,
                    index,
                },
            );
            tracing::debug!(imdb_id = %imdb_id, "optimistic favourite removal");
            Some(ToggleRequest::Delete(imdb_id))
        } else {
            self.movies.push(movie.clone());
            self.pending.insert(movie.imdb_id.clone(), PendingOp::Add);
            tracing::debug!(imdb_id = %movie.imdb_id, "optimistic favourite addition");
            Some(ToggleRequest::Create(movie.clone()))
        }
    }

    /// Removes a movie by identifier optimistically.
    ///
    /// Used by the favourites view, where only the identifier is at hand.
    /// Returns `true` when a delete should be issued; `false` when the
    /// movie is not present or a mutation for it is still in flight.
    pub fn remove(&mut self, imdb_id: &str) -> bool {
        if self.has_pending(imdb_id) {
            tracing::debug!(imdb_id = %imdb_id, "removal ignored, mutation in flight");
            return false;
        }

        let Some(index) = self.position(imdb_id) else {
            return false;
        };

        let removed = self.movies.remove(index);
        self.pending.insert(
            imdb_id.to_string(),
            PendingOp::Remove {
                movie: removed,
                index,
            },
        );
        tracing::debug!(imdb_id = %imdb_id, "optimistic favourite removal");
        true
    }

    /// Confirms a mutation: the backend agreed, so the optimistic state
    /// is now the truth and the undo record is dropped.
    pub fn confirm(&mut self, imdb_id: &str) {
        if self.pending.remove(imdb_id).is_some() {
            tracing::debug!(imdb_id = %imdb_id, "favourite mutation confirmed");
        }
    }

    /// Reverts a failed mutation using its undo record.
    ///
    /// A failed addition is removed again; a failed removal is
    /// reinserted at its original position (clamped if the collection
    /// shrank in the meantime).
    pub fn fail(&mut self, imdb_id: &str) {
        match self.pending.remove(imdb_id) {
            Some(PendingOp::Add) => {
                if let Some(index) = self.position(imdb_id) {
                    self.movies.remove(index);
                }
                tracing::debug!(imdb_id = %imdb_id, "favourite addition reverted");
            }
            Some(PendingOp::Remove { movie, index }) => {
                let index = index.min(self.movies.len());
                self.movies.insert(index, movie);
                tracing::debug!(imdb_id = %imdb_id, "favourite removal reverted");
            }
            None => {}
        }
    }

    fn position(&self, imdb_id: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.imdb_id == imdb_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            title: title.to_string(),
            year: "2012".to_string(),
            imdb_id: id.to_string(),
            media_type: "movie".to_string(),
            poster: "N/A".to_string(),
        }
    }

    #[test]
    fn toggle_on_adds_optimistically_and_requests_create() {
        let mut store = FavouritesStore::default();
        let m = movie("tt1", "One");

        let request = store.toggle(&m);
        assert_eq!(request, Some(ToggleRequest::Create(m.clone())));
        assert!(store.is_favourite("tt1"));
        assert!(store.has_pending("tt1"));
    }

    #[test]
    fn toggle_off_removes_optimistically_and_requests_delete() {
        let mut store = FavouritesStore::default();
        store.seed(vec![movie("tt1", "One")]);

        let request = store.toggle(&movie("tt1", "One"));
        assert_eq!(request, Some(ToggleRequest::Delete("tt1".to_string())));
        assert!(!store.is_favourite("tt1"));
    }

    #[test]
    fn in_flight_movie_ignores_further_toggles() {
        let mut store = FavouritesStore::default();
        let m = movie("tt1", "One");

        assert!(store.toggle(&m).is_some());
        assert_eq!(store.toggle(&m), None);
        assert!(!store.remove("tt1"));

        // Other movies are unaffected by tt1's in-flight mutation.
        assert!(store.toggle(&movie("tt2", "Two")).is_some());
    }

    #[test]
    fn confirm_settles_the_optimistic_state() {
        let mut store = FavouritesStore::default();
        let m = movie("tt1", "One");

        store.toggle(&m);
        store.confirm("tt1");

        assert!(store.is_favourite("tt1"));
        assert!(!store.has_pending("tt1"));
        assert_eq!(store.toggle(&m), Some(ToggleRequest::Delete("tt1".to_string())));
    }

    #[test]
    fn failed_addition_is_reverted() {
        let mut store = FavouritesStore::default();
        store.toggle(&movie("tt1", "One"));
        store.fail("tt1");

        assert!(!store.is_favourite("tt1"));
        assert!(!store.has_pending("tt1"));
    }

    #[test]
    fn failed_removal_reinserts_at_original_position() {
        let mut store = FavouritesStore::default();
        store.seed(vec![
            movie("tt1", "One"),
            movie("tt2", "Two"),
            movie("tt3", "Three"),
        ]);

        store.remove("tt2");
        assert_eq!(store.len(), 2);

        store.fail("tt2");
        let order: Vec<&str> = store.movies().iter().map(|m| m.imdb_id.as_str()).collect();
        assert_eq!(order, vec!["tt1", "tt2", "tt3"]);
    }

    #[test]
    fn seed_drops_stale_pending_entries() {
        let mut store = FavouritesStore::default();
        store.toggle(&movie("tt1", "One"));

        store.seed(vec![movie("tt2", "Two")]);
        assert!(!store.has_pending("tt1"));
        assert!(store.is_favourite("tt2"));
        assert!(!store.is_favourite("tt1"));
    }
}
