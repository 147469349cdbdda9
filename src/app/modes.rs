//! View and input mode definitions.

/// Which of the two views is currently visible.
///
/// Both views share the same [`FavouritesStore`](super::FavouritesStore),
/// so a toggle in one view is immediately reflected in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Paginated search results in a horizontal carousel.
    #[default]
    Search,
    /// The favourites collection as a vertical table.
    Favourites,
}

/// How keyboard input is currently interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys navigate, page, toggle, and switch views.
    #[default]
    Browse,
    /// Keys edit the query text; Enter submits, Esc cancels.
    EditQuery,
}
