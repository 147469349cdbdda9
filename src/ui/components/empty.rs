//! Centered message renderer for empty and loading states.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Renders a single centered message line two rows into the body area.
///
/// Returns the row after the message so the caller can continue the
/// layout below it.
pub fn render_centered_message(row: usize, message: &str, color: &str, cols: usize) -> usize {
    let msg_len = message.chars().count();
    let padding = cols.saturating_sub(msg_len) / 2;
    let msg_row = row + 2;

    position_cursor(msg_row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + msg_len)));
    print!("{}", Theme::reset());

    msg_row + 1
}
