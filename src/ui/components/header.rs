//! Header component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders the title bar centered at the specified row.
///
/// Pads the line to the full terminal width so an optional header
/// background covers the whole row.
pub fn render_header(row: usize, title: &str, theme: &Theme, cols: usize) -> usize {
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}
