//! Application state container and view model computation.
//!
//! [`AppState`] is the single source of truth for everything transient:
//! the current search cursor (query and page), the fetched result page,
//! carousel selection and scroll position, the shared favourites store,
//! and the per-view error banners. The event handler mutates it; the
//! renderer only ever sees the [`UIViewModel`] computed from it.
//!
//! # State Components
//!
//! - **Search cursor**: committed query plus 1-based page number
//! - **Result page**: at most one page of movies, replaced wholesale
//! - **Carousel**: selected card index and first-visible card offset
//! - **Favourites**: the shared optimistic [`FavouritesStore`]
//! - **Banners**: one error slot per view, cleared independently
//! - **Viewport**: terminal dimensions, refreshed before each render

use super::favourites::FavouritesStore;
use super::modes::{InputMode, ViewMode};
use crate::api::omdb::{self, SearchPage};
use crate::api::ApiConfig;
use crate::domain::Movie;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyViewModel, CardViewModel, FavouriteRowViewModel, UIViewModel,
};

/// Number of terminal columns one carousel card occupies, borders included.
pub const CARD_WIDTH: usize = 22;

/// Columns of gap between adjacent cards.
pub const CARD_GAP: usize = 2;

/// Horizontal pitch from one card's left edge to the next.
pub const CARD_PITCH: usize = CARD_WIDTH + CARD_GAP;

/// Central application state container.
///
/// Mutated exclusively by [`handle_event`](super::handler::handle_event);
/// the plugin shim only updates the viewport dimensions before rendering.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Which view is visible.
    pub view_mode: ViewMode,

    /// How keyboard input is interpreted.
    pub input_mode: InputMode,

    /// Endpoint configuration for building requests.
    pub api: ApiConfig,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Text being edited in the query bar. Only meaningful while
    /// `input_mode` is [`InputMode::EditQuery`].
    pub query_input: String,

    /// The committed search query the current results belong to.
    pub query: String,

    /// 1-based page number within the committed query's results.
    pub page: u32,

    /// The current result page, replaced wholesale on every fetch.
    pub movies: Vec<Movie>,

    /// Total matches across all pages, as reported by the search API.
    pub total_results: u32,

    /// Whether a search fetch is in flight.
    pub loading: bool,

    /// Error banner for the search view.
    pub search_error: Option<String>,

    /// Selected card index within `movies`.
    pub selected_card: usize,

    /// Index of the first visible carousel card.
    ///
    /// Scrolling is card-granular: the strip shifts one whole card per
    /// step and the offset is clamped so the last card stays flush with
    /// the right edge instead of scrolling past it.
    pub scroll_offset: usize,

    /// Generation counter for search fetches.
    ///
    /// Bumped on every new fetch; responses carrying an older generation
    /// are dropped so a slow response can never overwrite newer results.
    pub search_generation: u64,

    /// The shared favourites collection.
    pub favourites: FavouritesStore,

    /// Selected row index within the favourites table.
    pub favourites_selected: usize,

    /// Error banner for the favourites view.
    pub favourites_error: Option<String>,

    /// Terminal height, refreshed by the shim before each render.
    pub rows: usize,

    /// Terminal width, refreshed by the shim before each render.
    pub cols: usize,
}

impl AppState {
    /// Creates the initial state.
    ///
    /// The committed query starts as the configured default; the first
    /// fetch is issued when the [`Started`](super::handler::Event::Started)
    /// event arrives after permissions are granted.
    #[must_use]
    pub fn new(api: ApiConfig, theme: Theme) -> Self {
        let query = api.default_query.clone();
        Self {
            view_mode: ViewMode::Search,
            input_mode: InputMode::Browse,
            api,
            theme,
            query_input: String::new(),
            query,
            page: 1,
            movies: Vec::new(),
            total_results: 0,
            loading: false,
            search_error: None,
            selected_card: 0,
            scroll_offset: 0,
            search_generation: 0,
            favourites: FavouritesStore::default(),
            favourites_selected: 0,
            favourites_error: None,
            rows: 0,
            cols: 0,
        }
    }

    /// Page count for the committed query.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        omdb::total_pages(self.total_results)
    }

    /// The movie under the carousel cursor, if any.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.movies.get(self.selected_card)
    }

    /// The movie under the favourites table cursor, if any.
    #[must_use]
    pub fn selected_favourite(&self) -> Option<&Movie> {
        self.favourites.movies().get(self.favourites_selected)
    }

    /// Installs a freshly fetched result page.
    ///
    /// Selection and scroll reset to the left edge; the error banner is
    /// cleared since the results it described are gone.
    pub fn apply_search_page(&mut self, page: SearchPage) {
        self.movies = page.movies;
        self.total_results = page.total_results;
        self.loading = false;
        self.search_error = None;
        self.selected_card = 0;
        self.scroll_offset = 0;
    }

    /// Records a failed search fetch.
    ///
    /// Results are cleared rather than left stale, matching the banner
    /// that now describes why there is nothing to show.
    pub fn fail_search(&mut self, message: String) {
        self.movies.clear();
        self.total_results = 0;
        self.loading = false;
        self.search_error = Some(message);
        self.selected_card = 0;
        self.scroll_offset = 0;
    }

    /// Moves the carousel cursor one card left, clamped at the first card.
    pub fn select_left(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
        self.ensure_selected_visible();
    }

    /// Moves the carousel cursor one card right, clamped at the last card.
    pub fn select_right(&mut self) {
        if self.movies.is_empty() {
            return;
        }
        self.selected_card = (self.selected_card + 1).min(self.movies.len() - 1);
        self.ensure_selected_visible();
    }

    /// Shifts the carousel one card left without moving the cursor.
    pub fn scroll_left(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Shifts the carousel one card right without moving the cursor.
    pub fn scroll_right(&mut self) {
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll());
    }

    /// Moves the favourites cursor down, wrapping to the top.
    pub fn move_favourite_down(&mut self) {
        if self.favourites.is_empty() {
            return;
        }
        self.favourites_selected = (self.favourites_selected + 1) % self.favourites.len();
    }

    /// Moves the favourites cursor up, wrapping to the bottom.
    pub fn move_favourite_up(&mut self) {
        if self.favourites.is_empty() {
            return;
        }
        if self.favourites_selected == 0 {
            self.favourites_selected = self.favourites.len() - 1;
        } else {
            self.favourites_selected -= 1;
        }
    }

    /// Clamps the favourites cursor after the collection shrank.
    pub fn clamp_favourite_selection(&mut self) {
        if self.favourites.is_empty() {
            self.favourites_selected = 0;
        } else {
            self.favourites_selected = self.favourites_selected.min(self.favourites.len() - 1);
        }
    }

    /// Number of cards that fit fully in the current viewport.
    #[must_use]
    pub fn visible_cards(&self) -> usize {
        ((self.cols + CARD_GAP) / CARD_PITCH).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.movies.len().saturating_sub(self.visible_cards())
    }

    /// Adjusts the scroll offset so the selected card is fully visible.
    fn ensure_selected_visible(&mut self) {
        let visible = self.visible_cards();
        if self.selected_card < self.scroll_offset {
            self.scroll_offset = self.selected_card;
        } else if self.selected_card >= self.scroll_offset + visible {
            self.scroll_offset = self.selected_card + 1 - visible;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Computes the renderable view model for the current state.
    ///
    /// All formatting decisions live here so the renderer stays a dumb
    /// painter: banner prefixes, the page summary line, card clipping,
    /// and per-item selection state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        match self.view_mode {
            ViewMode::Search => self.compute_search_viewmodel(),
            ViewMode::Favourites => self.compute_favourites_viewmodel(),
        }
    }

    fn compute_search_viewmodel(&self) -> UIViewModel {
        let title = format!(" Movies: {} ", self.query);

        let status = if self.loading {
            Some("Loading...".to_string())
        } else if self.total_results > 0 {
            Some(format!(
                "Showing page {} of {} ({} total results)",
                self.page,
                self.total_pages(),
                self.total_results
            ))
        } else {
            None
        };

        let body = if self.loading {
            BodyViewModel::Loading
        } else if self.movies.is_empty() {
            BodyViewModel::EmptySearch {
                message: "No movies to show".to_string(),
            }
        } else {
            let visible_end = (self.scroll_offset + self.visible_cards()).min(self.movies.len());
            let cards = self.movies[self.scroll_offset..visible_end]
                .iter()
                .enumerate()
                .map(|(relative_idx, movie)| {
                    let absolute_idx = self.scroll_offset + relative_idx;
                    CardViewModel {
                        title: movie.title.clone(),
                        year: movie.year.clone(),
                        media_type: movie.media_type.clone(),
                        has_poster: movie.poster_url().is_some(),
                        favourite: self.favourites.is_favourite(&movie.imdb_id),
                        pending: self.favourites.has_pending(&movie.imdb_id),
                        selected: absolute_idx == self.selected_card,
                    }
                })
                .collect();
            BodyViewModel::Carousel { cards }
        };

        let query_bar = matches!(self.input_mode, InputMode::EditQuery)
            .then(|| self.query_input.clone());

        UIViewModel {
            title,
            status,
            banner: self.search_error.as_ref().map(|m| format!("Error: {m}")),
            query_bar,
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_favourites_viewmodel(&self) -> UIViewModel {
        let title = format!(" Favourites ({}) ", self.favourites.len());

        let body = if self.favourites.is_empty() {
            BodyViewModel::EmptyFavourites {
                message: "No favourites yet. Toggle one from the search view.".to_string(),
            }
        } else {
            let rows = self
                .favourites
                .movies()
                .iter()
                .enumerate()
                .map(|(idx, movie)| FavouriteRowViewModel {
                    title: movie.title.clone(),
                    year: movie.year.clone(),
                    media_type: movie.media_type.clone(),
                    pending: self.favourites.has_pending(&movie.imdb_id),
                    selected: idx == self.favourites_selected,
                })
                .collect();
            BodyViewModel::FavouritesTable { rows }
        };

        UIViewModel {
            title,
            status: None,
            banner: self
                .favourites_error
                .as_ref()
                .map(|m| format!("Error: {m}")),
            query_bar: None,
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_footer(&self) -> String {
        match (self.input_mode, self.view_mode) {
            (InputMode::EditQuery, _) => {
                "Enter: search  ESC: cancel  Type to edit query".to_string()
            }
            (InputMode::Browse, ViewMode::Search) => {
                "h/l: select  </>: scroll  p/n: page  Enter: favourite  /: query  Tab: favourites  q: quit"
                    .to_string()
            }
            (InputMode::Browse, ViewMode::Favourites) => {
                "j/k: navigate  x: remove  Tab: search  q: quit".to_string()
            }
        }
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

    fn state_with_movies(count: usize, cols: usize) -> AppState {
        let mut state = AppState::new(ApiConfig::default(), Theme::default());
        state.cols = cols;
        state.rows = 24;
        state.apply_search_page(SearchPage {
            movies: (0..count)
                .map(|i| movie(&format!("tt{i:07}"), &format!("Movie {i}")))
                .collect(),
            total_results: count as u32,
        });
        state
    }

    #[test]
    fn selection_clamps_at_both_edges() {
        let mut state = state_with_movies(3, 80);

        state.select_left();
        assert_eq!(state.selected_card, 0);

        state.select_right();
        state.select_right();
        state.select_right();
        assert_eq!(state.selected_card, 2);
    }

    #[test]
    fn scroll_clamps_so_last_card_stays_flush() {
        // 80 cols fit 3 cards of pitch 24; 10 cards leave 7 scroll steps.
        let mut state = state_with_movies(10, 80);
        assert_eq!(state.visible_cards(), 3);

        for _ in 0..20 {
            state.scroll_right();
        }
        assert_eq!(state.scroll_offset, 7);

        for _ in 0..20 {
            state.scroll_left();
        }
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn moving_selection_right_pulls_the_strip_along() {
        let mut state = state_with_movies(10, 80);

        for _ in 0..4 {
            state.select_right();
        }
        assert_eq!(state.selected_card, 4);
        // Cards 2..=4 visible: the cursor stays flush with the right edge.
        assert_eq!(state.scroll_offset, 2);

        for _ in 0..4 {
            state.select_left();
        }
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn new_page_resets_selection_and_scroll() {
        let mut state = state_with_movies(10, 80);
        state.select_right();
        state.scroll_right();

        state.apply_search_page(SearchPage {
            movies: vec![movie("tt9", "Nine")],
            total_results: 1,
        });
        assert_eq!(state.selected_card, 0);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn failed_search_clears_results_and_sets_banner() {
        let mut state = state_with_movies(10, 80);
        state.fail_search("Movie not found!".to_string());

        assert!(state.movies.is_empty());
        assert_eq!(state.total_results, 0);

        let vm = state.compute_viewmodel();
        assert_eq!(vm.banner.as_deref(), Some("Error: Movie not found!"));
        assert!(matches!(vm.body, BodyViewModel::EmptySearch { .. }));
    }

    #[test]
    fn page_summary_reports_position_and_total() {
        let mut state = state_with_movies(10, 80);
        state.total_results = 30;
        state.page = 2;

        let vm = state.compute_viewmodel();
        assert_eq!(
            vm.status.as_deref(),
            Some("Showing page 2 of 3 (30 total results)")
        );
    }

    #[test]
    fn carousel_viewmodel_clips_to_visible_window() {
        let mut state = state_with_movies(10, 80);
        state.scroll_offset = 7;
        state.selected_card = 9;

        let vm = state.compute_viewmodel();
        let BodyViewModel::Carousel { cards } = vm.body else {
            panic!("expected carousel body");
        };
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].title, "Movie 9");
        assert!(cards[2].selected);
    }

    #[test]
    fn favourites_cursor_wraps_and_clamps() {
        let mut state = state_with_movies(0, 80);
        state
            .favourites
            .seed(vec![movie("tt1", "One"), movie("tt2", "Two")]);

        state.move_favourite_up();
        assert_eq!(state.favourites_selected, 1);
        state.move_favourite_down();
        assert_eq!(state.favourites_selected, 0);

        state.favourites_selected = 1;
        state.favourites.remove("tt2");
        state.clamp_favourite_selection();
        assert_eq!(state.favourites_selected, 0);
    }
}
