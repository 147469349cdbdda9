//! Shared rendering utilities.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Positions the cursor at a specific row and column.
///
/// Uses the ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are
/// 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Fits text into a fixed display width.
///
/// Truncates with a trailing ellipsis when the text is too long, pads
/// with spaces when it is too short. Width is measured in terminal
/// display columns, so double-width CJK titles occupy two columns each
/// and never overflow the fixed card layout.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        let mut fitted = text.to_string();
        fitted.push_str(&" ".repeat(width - text_width));
        return fitted;
    }

    let ellipsis = if width > 3 { "..." } else { "" };
    let budget = width - ellipsis.len();

    let mut fitted = String::new();
    let mut used = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > budget {
            break;
        }
        fitted.push(c);
        used += char_width;
    }

    // A wide character that did not fit can leave a one-column gap
    // before the ellipsis; pad it so the result is exactly `width`.
    fitted.push_str(ellipsis);
    fitted.push_str(&" ".repeat(width - used - ellipsis.len()));
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_padded() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("", 3), "   ");
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        assert_eq!(fit("abcdefgh", 6), "abc...");
        assert_eq!(fit("abcdefgh", 8), "abcdefgh");
    }

    #[test]
    fn width_is_measured_in_display_columns() {
        // Three CJK characters occupy six columns, not three.
        assert_eq!(fit("日本語", 6), "日本語");
        assert_eq!(fit("日本語", 8), "日本語  ");
        // Truncation budgets columns: nine columns leave six for text,
        // exactly three wide chars before the ellipsis.
        assert_eq!(fit("日本語の映画", 9), "日本語...");
        // A wide char that half-fits is dropped and the gap padded.
        assert_eq!(fit("日本語の映画", 8), "日本... ");
    }

    #[test]
    fn every_fit_result_is_exactly_the_requested_width() {
        for text in ["", "short", "a much longer ascii title", "日本語の映画タイトル"] {
            for width in [2, 5, 10, 18] {
                assert_eq!(fit(text, width).width(), width, "text={text} width={width}");
            }
        }
    }
}
