//! Composable UI component renderers.
//!
//! Each component paints one part of the frame with `print!` and ANSI
//! positioning; the layout function below strings them together.
//!
//! # Components
//!
//! - [`header`]: title bar
//! - [`footer`]: keybinding hints
//! - [`banner`]: per-view error banner
//! - [`query`]: query bar while editing
//! - [`carousel`]: horizontal card strip for search results
//! - [`favourites`]: favourites table
//! - [`empty`]: centered empty/loading states

mod banner;
mod carousel;
mod empty;
mod favourites;
mod footer;
mod header;
mod query;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyViewModel, UIViewModel};

use banner::render_banner;
use carousel::render_carousel;
use empty::render_centered_message;
use favourites::render_favourites_table;
use footer::render_footer;
use header::render_header;
use query::render_query_bar;

/// Renders a horizontal border line at the specified row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a dimmed status line (page summary, loading hint).
fn render_status(row: usize, status: &str, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" {status}");
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(status.chars().count() + 1))
    );
    print!("{}", Theme::reset());
}

/// Renders one full frame from a view model.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Banner, if an error is showing]
/// [Query bar, if editing]
/// [blank line]
/// [Body: carousel / table / centered message]
/// [Status line, if any]
/// [Blank padding to fill screen]
/// [Border]
/// [Footer]
/// ```
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Row 1 stays blank.

    current_row = render_header(current_row, &vm.title, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(banner) = &vm.banner {
        current_row = render_banner(current_row, banner, theme, cols);
    }
    if let Some(query) = &vm.query_bar {
        current_row = render_query_bar(current_row, query, theme, cols);
    }

    current_row += 1;

    let body_end = match &vm.body {
        BodyViewModel::Loading => {
            render_centered_message(current_row, "Loading...", &theme.colors.text_dim, cols)
        }
        BodyViewModel::EmptySearch { message } | BodyViewModel::EmptyFavourites { message } => {
            render_centered_message(current_row, message, &theme.colors.empty_state_fg, cols)
        }
        BodyViewModel::Carousel { cards } => render_carousel(current_row, cards, theme),
        BodyViewModel::FavouritesTable { rows: table_rows } => {
            render_favourites_table(current_row, table_rows, theme, cols)
        }
    };

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    if let Some(status) = &vm.status {
        if let Some(status_row) = row_above_border(body_end, border_row) {
            render_status(status_row, status, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Row for the status line, or `None` when the pane is too short and the
/// line would paint over the bottom border or footer.
const fn row_above_border(body_end: usize, border_row: usize) -> Option<usize> {
    let row = body_end + 1;
    if row < border_row {
        Some(row)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_is_suppressed_on_short_panes() {
        // A 24-row pane leaves plenty of room below a body ending at 13.
        assert_eq!(row_above_border(13, 22), Some(14));

        // On short panes the body reaches or passes the bottom border;
        // the status line must not overwrite it or the footer.
        assert_eq!(row_above_border(13, 14), None);
        assert_eq!(row_above_border(13, 10), None);
        assert_eq!(row_above_border(13, 0), None);
    }
}
