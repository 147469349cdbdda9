//! Error banner component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders the error banner for the visible view.
///
/// The message arrives already prefixed ("Error: ..."); this component
/// only paints it bold in the error color across the full width.
pub fn render_banner(row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!(" {message}");
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(message.chars().count() + 1))
    );
    print!("{}", Theme::reset());
    row + 1
}
