//! Query bar component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders the query editing bar with a block cursor.
pub fn render_query_bar(row: usize, query: &str, theme: &Theme, cols: usize) -> usize {
    const LABEL: &str = " Search: ";

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.query_bar_border));
    print!("{LABEL}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{query}");
    print!("{}", Theme::bold());
    print!("▌");
    print!("{}", Theme::reset());

    let used = LABEL.chars().count() + query.chars().count() + 1;
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
