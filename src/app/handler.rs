//! Event handling and state transition logic.
//!
//! The handler is the plugin's control flow coordinator: events arrive
//! from the shim (key presses already mapped to intents, plus completed
//! web requests), [`handle_event`] pattern-matches them, mutates
//! [`AppState`], and returns the actions the shim should execute. The
//! returned `bool` says whether the UI needs a repaint.
//!
//! # Event Categories
//!
//! - **Navigation**: `SelectLeft/Right`, `ScrollLeft/Right`, `SelectUp/Down`
//! - **Paging**: `NextPage`, `PrevPage`
//! - **Query editing**: `EditQuery`, `Char`, `Backspace`, `SubmitQuery`, `Escape`
//! - **Favourites**: `ToggleFavourite`, `RemoveFavourite`
//! - **View switching**: `ShowSearch`, `ShowFavourites`
//! - **System**: `Started`, `CloseFocus`, `HttpResponse`

use super::favourites::ToggleRequest;
use super::modes::{InputMode, ViewMode};
use super::{Action, AppState};
use crate::api::request::DeleteOrigin;
use crate::api::{favourites, omdb, RequestTag};
use crate::domain::error::Result;

/// Events triggered by user input or completed host calls.
///
/// Key-to-event mapping lives in the plugin shim; by the time an event
/// reaches the handler it is already an intent, so the handler never
/// inspects raw keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the carousel cursor one card left.
    SelectLeft,
    /// Moves the carousel cursor one card right.
    SelectRight,
    /// Shifts the carousel one card left without moving the cursor.
    ScrollLeft,
    /// Shifts the carousel one card right without moving the cursor.
    ScrollRight,
    /// Moves the favourites cursor up.
    SelectUp,
    /// Moves the favourites cursor down.
    SelectDown,
    /// Fetches the next result page, if one exists.
    NextPage,
    /// Fetches the previous result page, if one exists.
    PrevPage,
    /// Enters query editing mode, prefilled with the committed query.
    EditQuery,
    /// Appends a character to the query being edited.
    Char(char),
    /// Removes the last character from the query being edited.
    Backspace,
    /// Commits the edited query and fetches its first page.
    SubmitQuery,
    /// Cancels query editing, or clears the visible error banner.
    Escape,
    /// Toggles the selected search result's favourite status.
    ToggleFavourite,
    /// Removes the selected favourite (favourites view).
    RemoveFavourite,
    /// Switches to the search view.
    ShowSearch,
    /// Switches to the favourites view.
    ShowFavourites,
    /// Hides the plugin pane.
    CloseFocus,
    /// Permissions granted; issues the initial search and favourites fetch.
    Started,
    /// A `web_request` completed.
    HttpResponse {
        /// Correlation tag decoded from the response context.
        tag: RequestTag,
        /// HTTP status, 0 when the host could not complete the request.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`: whether the UI changed, and the side
/// effects the shim must perform in order.
///
/// # Errors
///
/// Returns an error only when a request body fails to serialize; wire
/// failures are folded into state as banners, never propagated.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SelectLeft => {
            if state.view_mode != ViewMode::Search {
                return Ok((false, vec![]));
            }
            state.select_left();
            Ok((true, vec![]))
        }
        Event::SelectRight => {
            if state.view_mode != ViewMode::Search {
                return Ok((false, vec![]));
            }
            state.select_right();
            Ok((true, vec![]))
        }
        Event::ScrollLeft => {
            state.scroll_left();
            Ok((true, vec![]))
        }
        Event::ScrollRight => {
            state.scroll_right();
            Ok((true, vec![]))
        }
        Event::SelectUp => {
            if state.view_mode != ViewMode::Favourites {
                return Ok((false, vec![]));
            }
            state.move_favourite_up();
            Ok((true, vec![]))
        }
        Event::SelectDown => {
            if state.view_mode != ViewMode::Favourites {
                return Ok((false, vec![]));
            }
            state.move_favourite_down();
            Ok((true, vec![]))
        }
        Event::NextPage => {
            if state.loading || state.page >= state.total_pages() {
                return Ok((false, vec![]));
            }
            state.page += 1;
            Ok((true, vec![issue_search(state)]))
        }
        Event::PrevPage => {
            if state.loading || state.page <= 1 {
                return Ok((false, vec![]));
            }
            state.page -= 1;
            Ok((true, vec![issue_search(state)]))
        }
        Event::EditQuery => {
            if state.view_mode != ViewMode::Search {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::EditQuery;
            state.query_input = state.query.clone();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::EditQuery {
                return Ok((false, vec![]));
            }
            state.query_input.push(*c);
            tracing::trace!(query = %state.query_input, "query input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::EditQuery {
                return Ok((false, vec![]));
            }
            state.query_input.pop();
            Ok((true, vec![]))
        }
        Event::SubmitQuery => {
            if state.input_mode != InputMode::EditQuery {
                return Ok((false, vec![]));
            }
            let submitted = state.query_input.trim();
            state.query = if submitted.is_empty() {
                state.api.default_query.clone()
            } else {
                submitted.to_string()
            };
            state.input_mode = InputMode::Browse;
            state.query_input = String::new();
            state.page = 1;

            tracing::debug!(query = %state.query, "query committed");

            Ok((true, vec![issue_search(state)]))
        }
        Event::Escape => {
            if state.input_mode == InputMode::EditQuery {
                state.input_mode = InputMode::Browse;
                state.query_input = String::new();
                return Ok((true, vec![]));
            }
            // In browse mode Escape dismisses the visible banner.
            let banner = match state.view_mode {
                ViewMode::Search => &mut state.search_error,
                ViewMode::Favourites => &mut state.favourites_error,
            };
            Ok((banner.take().is_some(), vec![]))
        }
        Event::ToggleFavourite => {
            if state.view_mode != ViewMode::Search {
                return Ok((false, vec![]));
            }
            let Some(movie) = state.selected_movie().cloned() else {
                return Ok((false, vec![]));
            };

            match state.favourites.toggle(&movie) {
                Some(ToggleRequest::Create(movie)) => {
                    let request = favourites::create_request(&state.api, &movie)?;
                    Ok((true, vec![Action::Http(request)]))
                }
                Some(ToggleRequest::Delete(imdb_id)) => {
                    let request =
                        favourites::delete_request(&state.api, &imdb_id, DeleteOrigin::Search);
                    state.clamp_favourite_selection();
                    Ok((true, vec![Action::Http(request)]))
                }
                None => Ok((false, vec![])),
            }
        }
        Event::RemoveFavourite => {
            if state.view_mode != ViewMode::Favourites {
                return Ok((false, vec![]));
            }
            let Some(imdb_id) = state.selected_favourite().map(|m| m.imdb_id.clone()) else {
                return Ok((false, vec![]));
            };

            if !state.favourites.remove(&imdb_id) {
                return Ok((false, vec![]));
            }
            state.clamp_favourite_selection();

            let request = favourites::delete_request(&state.api, &imdb_id, DeleteOrigin::Favourites);
            Ok((true, vec![Action::Http(request)]))
        }
        Event::ShowSearch => {
            state.view_mode = ViewMode::Search;
            Ok((true, vec![]))
        }
        Event::ShowFavourites => {
            state.view_mode = ViewMode::Favourites;
            state.clamp_favourite_selection();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Started => {
            tracing::debug!("permissions granted, issuing initial fetches");
            let search = issue_search(state);
            let list = Action::Http(favourites::list_request(&state.api));
            Ok((true, vec![search, list]))
        }
        Event::HttpResponse { tag, status, body } => {
            handle_response(state, tag, *status, body)
        }
    }
}

/// Bumps the search generation and builds the fetch for the current cursor.
fn issue_search(state: &mut AppState) -> Action {
    state.search_generation += 1;
    state.loading = true;
    Action::Http(omdb::search_request(
        &state.api,
        &state.query,
        state.page,
        state.search_generation,
    ))
}

/// Folds a completed web request back into state.
fn handle_response(
    state: &mut AppState,
    tag: &RequestTag,
    status: u16,
    body: &[u8],
) -> Result<(bool, Vec<Action>)> {
    match tag {
        RequestTag::Search { generation } => {
            if *generation != state.search_generation {
                tracing::debug!(
                    response_generation = generation,
                    current_generation = state.search_generation,
                    "dropping stale search response"
                );
                return Ok((false, vec![]));
            }

            match omdb::parse_search_response(status, body) {
                Ok(page) => {
                    tracing::debug!(
                        movie_count = page.movies.len(),
                        total_results = page.total_results,
                        "search page applied"
                    );
                    state.apply_search_page(page);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "search fetch failed");
                    state.fail_search(err.to_string());
                }
            }
            Ok((true, vec![]))
        }
        RequestTag::ListFavourites => match favourites::parse_list_response(status, body) {
            Ok(movies) => {
                state.favourites.seed(movies);
                state.clamp_favourite_selection();
                Ok((true, vec![]))
            }
            Err(err) => {
                tracing::warn!(error = %err, "favourites fetch failed");
                state.favourites_error = Some(err.to_string());
                Ok((true, vec![]))
            }
        },
        RequestTag::CreateFavourite { imdb_id } => {
            match favourites::ensure_success(status, "favourite create") {
                Ok(()) => {
                    state.favourites.confirm(imdb_id);
                    Ok((true, vec![]))
                }
                Err(err) => {
                    tracing::warn!(imdb_id = %imdb_id, error = %err, "favourite create failed");
                    state.favourites.fail(imdb_id);
                    state.search_error = Some(err.to_string());
                    Ok((true, vec![]))
                }
            }
        }
        RequestTag::DeleteFavourite { imdb_id, origin } => {
            match favourites::ensure_success(status, "favourite delete") {
                Ok(()) => {
                    state.favourites.confirm(imdb_id);
                    state.clamp_favourite_selection();
                    Ok((true, vec![]))
                }
                Err(err) => {
                    tracing::warn!(imdb_id = %imdb_id, error = %err, "favourite delete failed");
                    state.favourites.fail(imdb_id);
                    state.clamp_favourite_selection();
                    match origin {
                        DeleteOrigin::Search => state.search_error = Some(err.to_string()),
                        DeleteOrigin::Favourites => {
                            state.favourites_error = Some(err.to_string());
                        }
                    }
                    Ok((true, vec![]))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiConfig, ApiRequest, Verb};
    use crate::domain::Movie;
    use crate::ui::theme::Theme;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            title: title.to_string(),
            year: "2012".to_string(),
            imdb_id: id.to_string(),
            media_type: "movie".to_string(),
            poster: "N/A".to_string(),
        }
    }

    fn search_body(count: usize, total: u32) -> Vec<u8> {
        let movies: Vec<Movie> = (0..count)
            .map(|i| movie(&format!("tt{i:07}"), &format!("Movie {i}")))
            .collect();
        serde_json::to_vec(&serde_json::json!({
            "Search": movies,
            "totalResults": total.to_string(),
            "Response": "True",
        }))
        .unwrap()
    }

    fn started_state() -> AppState {
        let mut state = AppState::new(ApiConfig::default(), Theme::default());
        state.cols = 80;
        state.rows = 24;
        handle_event(&mut state, &Event::Started).unwrap();
        state
    }

    fn http_requests(actions: &[Action]) -> Vec<&ApiRequest> {
        actions
            .iter()
            .map(|action| match action {
                Action::Http(request) => request,
                Action::CloseFocus => panic!("unexpected action"),
            })
            .collect()
    }

    fn deliver_search(state: &mut AppState, status: u16, body: &[u8]) {
        let generation = state.search_generation;
        handle_event(
            state,
            &Event::HttpResponse {
                tag: RequestTag::Search { generation },
                status,
                body: body.to_vec(),
            },
        )
        .unwrap();
    }

    #[test]
    fn startup_fetches_default_query_and_favourites() {
        let mut state = AppState::new(ApiConfig::default(), Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::Started).unwrap();

        let requests = http_requests(&actions);
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.contains("s=avengers"));
        assert!(requests[0].url.contains("page=1"));
        assert_eq!(requests[1].verb, Verb::Get);
        assert_eq!(requests[1].tag, RequestTag::ListFavourites);
        assert!(state.loading);
    }

    #[test]
    fn pagination_walks_a_three_page_result_set() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(10, 30));
        assert_eq!(state.total_pages(), 3);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(state.page, 2);
        assert!(http_requests(&actions)[0].url.contains("page=2"));
        deliver_search(&mut state, 200, &search_body(10, 30));

        handle_event(&mut state, &Event::NextPage).unwrap();
        deliver_search(&mut state, 200, &search_body(10, 30));
        assert_eq!(state.page, 3);

        // Clamped at the last page.
        let (rendered, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!rendered);
        assert!(actions.is_empty());
        assert_eq!(state.page, 3);
    }

    #[test]
    fn prev_page_clamps_at_the_first_page() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(10, 30));

        let (rendered, actions) = handle_event(&mut state, &Event::PrevPage).unwrap();
        assert!(!rendered);
        assert!(actions.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn stale_search_response_is_dropped() {
        let mut state = started_state();
        let stale_generation = state.search_generation;

        // A new query goes out before the first response lands.
        handle_event(&mut state, &Event::EditQuery).unwrap();
        for c in "batman".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::SubmitQuery).unwrap();

        handle_event(
            &mut state,
            &Event::HttpResponse {
                tag: RequestTag::Search {
                    generation: stale_generation,
                },
                status: 200,
                body: search_body(10, 30),
            },
        )
        .unwrap();

        // The stale page must not land; the newer fetch is still pending.
        assert!(state.movies.is_empty());
        assert!(state.loading);

        deliver_search(&mut state, 200, &search_body(4, 4));
        assert_eq!(state.movies.len(), 4);
        assert!(!state.loading);
    }

    #[test]
    fn empty_submitted_query_falls_back_to_default() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(10, 30));

        handle_event(&mut state, &Event::EditQuery).unwrap();
        state.query_input = "   ".to_string();
        let (_, actions) = handle_event(&mut state, &Event::SubmitQuery).unwrap();

        assert_eq!(state.query, "avengers");
        assert!(http_requests(&actions)[0].url.contains("s=avengers"));
    }

    #[test]
    fn failed_search_shows_banner_and_clears_results() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(10, 30));
        assert_eq!(state.movies.len(), 10);

        handle_event(&mut state, &Event::EditQuery).unwrap();
        state.query_input = "qqqqqqqq".to_string();
        handle_event(&mut state, &Event::SubmitQuery).unwrap();
        deliver_search(
            &mut state,
            200,
            br#"{"Response":"False","Error":"Movie not found!"}"#,
        );

        assert!(state.movies.is_empty());
        assert_eq!(state.search_error.as_deref(), Some("Movie not found!"));

        // Escape dismisses the banner in browse mode.
        let (rendered, _) = handle_event(&mut state, &Event::Escape).unwrap();
        assert!(rendered);
        assert!(state.search_error.is_none());
    }

    #[test]
    fn toggle_issues_create_then_delete() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(3, 3));

        let (_, actions) = handle_event(&mut state, &Event::ToggleFavourite).unwrap();
        let request = http_requests(&actions)[0];
        assert_eq!(request.verb, Verb::Post);
        assert!(state.favourites.is_favourite("tt0000000"));

        // Confirm, then toggle off.
        handle_event(
            &mut state,
            &Event::HttpResponse {
                tag: RequestTag::CreateFavourite {
                    imdb_id: "tt0000000".to_string(),
                },
                status: 201,
                body: vec![],
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ToggleFavourite).unwrap();
        let request = http_requests(&actions)[0];
        assert_eq!(request.verb, Verb::Delete);
        assert!(request.url.ends_with("/tt0000000"));
        assert!(!state.favourites.is_favourite("tt0000000"));
    }

    #[test]
    fn toggle_is_single_flight_per_movie() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(3, 3));

        handle_event(&mut state, &Event::ToggleFavourite).unwrap();
        let (rendered, actions) = handle_event(&mut state, &Event::ToggleFavourite).unwrap();
        assert!(!rendered);
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_create_reverts_and_sets_search_banner() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(3, 3));

        handle_event(&mut state, &Event::ToggleFavourite).unwrap();
        handle_event(
            &mut state,
            &Event::HttpResponse {
                tag: RequestTag::CreateFavourite {
                    imdb_id: "tt0000000".to_string(),
                },
                status: 500,
                body: vec![],
            },
        )
        .unwrap();

        assert!(!state.favourites.is_favourite("tt0000000"));
        assert!(state.search_error.is_some());
    }

    #[test]
    fn removal_from_favourites_view_is_optimistic_with_revert() {
        let mut state = started_state();
        state
            .favourites
            .seed(vec![movie("tt1", "One"), movie("tt2", "Two")]);
        handle_event(&mut state, &Event::ShowFavourites).unwrap();
        handle_event(&mut state, &Event::SelectDown).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::RemoveFavourite).unwrap();
        assert!(http_requests(&actions)[0].url.ends_with("/tt2"));
        assert_eq!(state.favourites.len(), 1);
        assert_eq!(state.favourites_selected, 0);

        handle_event(
            &mut state,
            &Event::HttpResponse {
                tag: RequestTag::DeleteFavourite {
                    imdb_id: "tt2".to_string(),
                    origin: DeleteOrigin::Favourites,
                },
                status: 500,
                body: vec![],
            },
        )
        .unwrap();

        assert_eq!(state.favourites.len(), 2);
        assert!(state.favourites_error.is_some());
        assert!(state.search_error.is_none());
    }

    #[test]
    fn delete_failure_banner_follows_the_issuing_view() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(3, 3));
        state.favourites.seed(vec![movie("tt0000000", "Movie 0")]);

        // Toggle off from the search view, then switch views before the
        // failure lands: the banner still belongs to the search view.
        handle_event(&mut state, &Event::ToggleFavourite).unwrap();
        handle_event(&mut state, &Event::ShowFavourites).unwrap();
        handle_event(
            &mut state,
            &Event::HttpResponse {
                tag: RequestTag::DeleteFavourite {
                    imdb_id: "tt0000000".to_string(),
                    origin: DeleteOrigin::Search,
                },
                status: 502,
                body: vec![],
            },
        )
        .unwrap();

        assert!(state.search_error.is_some());
        assert!(state.favourites_error.is_none());
        assert!(state.favourites.is_favourite("tt0000000"));
    }

    #[test]
    fn favourites_list_failure_sets_favourites_banner() {
        let mut state = started_state();
        handle_event(
            &mut state,
            &Event::HttpResponse {
                tag: RequestTag::ListFavourites,
                status: 0,
                body: vec![],
            },
        )
        .unwrap();

        assert!(state.favourites.is_empty());
        assert!(state.favourites_error.is_some());
    }

    #[test]
    fn query_editing_round_trip() {
        let mut state = started_state();
        deliver_search(&mut state, 200, &search_body(10, 30));

        handle_event(&mut state, &Event::EditQuery).unwrap();
        assert_eq!(state.input_mode, InputMode::EditQuery);
        assert_eq!(state.query_input, "avengers");

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Char('!')).unwrap();
        assert_eq!(state.query_input, "avenger!");

        // Escape cancels without touching the committed query.
        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Browse);
        assert_eq!(state.query, "avengers");
    }

    #[test]
    fn close_focus_returns_the_action_without_render() {
        let mut state = started_state();
        let (rendered, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!rendered);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
