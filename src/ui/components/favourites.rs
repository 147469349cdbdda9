//! Favourites table component renderer.
//!
//! Renders the favourites collection as a three-column table with TITLE,
//! YEAR, and TYPE columns, selection highlighting, and dimmed rows for
//! movies whose removal is still in flight.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FavouriteRowViewModel;

const TITLE_WIDTH: usize = 40;
const YEAR_WIDTH: usize = 10;

/// Renders the column headers and all rows starting at the given row.
///
/// Returns the row below the table.
pub fn render_favourites_table(
    row: usize,
    items: &[FavouriteRowViewModel],
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        " {} {} {}",
        fit("TITLE", TITLE_WIDTH),
        fit("YEAR", YEAR_WIDTH),
        "TYPE"
    );
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for item in items {
        current_row = render_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one favourite as a full-width table row.
fn render_row(row: usize, item: &FavouriteRowViewModel, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    if item.pending {
        print!("{}", Theme::dim());
    }

    let line = format!(
        " {} {} {}",
        fit(&item.title, TITLE_WIDTH),
        fit(&item.year, YEAR_WIDTH),
        item.media_type
    );
    print!("{line}");
    print!("{}", " ".repeat(cols.saturating_sub(line.chars().count())));

    print!("{}", Theme::reset());
    row + 1
}
