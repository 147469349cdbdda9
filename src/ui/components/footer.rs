//! Footer component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders the keybinding hints on the footer row.
pub fn render_footer(row: usize, keybindings: &str, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" {keybindings}");
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(keybindings.chars().count() + 1))
    );
    print!("{}", Theme::reset());
}
