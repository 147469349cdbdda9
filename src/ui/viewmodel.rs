//! Renderable view model types.
//!
//! The view model is a plain-data snapshot computed from `AppState` by
//! [`compute_viewmodel`](crate::app::AppState::compute_viewmodel). All
//! formatting decisions (banner prefixes, page summary wording, window
//! clipping) happen during computation, so the component renderers only
//! place text and colors.

/// Everything the renderer needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header title, including surrounding spaces.
    pub title: String,

    /// Status line under the body (page summary or loading hint).
    pub status: Option<String>,

    /// Error banner for the visible view, already prefixed.
    pub banner: Option<String>,

    /// Query text being edited, present only in query editing mode.
    pub query_bar: Option<String>,

    /// The view-specific body.
    pub body: BodyViewModel,

    /// Keybinding hints for the footer.
    pub footer: String,
}

/// Body content, one variant per visual layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyViewModel {
    /// A search fetch is in flight.
    Loading,
    /// Search produced nothing to show (fresh failure or empty page).
    EmptySearch { message: String },
    /// The visible window of carousel cards.
    Carousel { cards: Vec<CardViewModel> },
    /// The favourites collection is empty.
    EmptyFavourites { message: String },
    /// All favourites as table rows.
    FavouritesTable { rows: Vec<FavouriteRowViewModel> },
}

/// One carousel card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardViewModel {
    pub title: String,
    pub year: String,
    pub media_type: String,
    /// Whether a real poster URL exists (the card marks its absence).
    pub has_poster: bool,
    /// Favourite status in the shared store, optimistic state included.
    pub favourite: bool,
    /// Whether a mutation for this movie is awaiting its response.
    pub pending: bool,
    pub selected: bool,
}

/// One favourites table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteRowViewModel {
    pub title: String,
    pub year: String,
    pub media_type: String,
    /// Whether a removal for this movie is awaiting its response.
    pub pending: bool,
    pub selected: bool,
}
