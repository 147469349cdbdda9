//! Carousel component renderer.
//!
//! Renders the visible window of search results as a horizontal strip of
//! fixed-width cards. The window was already clipped during view model
//! computation, so this component positions cards left to right starting
//! at column 1 and never needs to clip text mid-card.

use crate::app::state::{CARD_PITCH, CARD_WIDTH};
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardViewModel;

/// Rows one card occupies, borders included.
const CARD_HEIGHT: usize = 6;

/// Text columns inside a card ("│ " and " │" excluded).
const CONTENT_WIDTH: usize = CARD_WIDTH - 4;

/// Renders all visible cards starting at the specified row.
///
/// Returns the row below the strip.
pub fn render_carousel(row: usize, cards: &[CardViewModel], theme: &Theme) -> usize {
    for (idx, card) in cards.iter().enumerate() {
        let col = 1 + idx * CARD_PITCH;
        render_card(row, col, card, theme);
    }
    row + CARD_HEIGHT
}

/// Renders a single card at the given row and column.
///
/// Layout:
/// ```text
/// ╭────────────────────╮
/// │ Title............. │
/// │ 2012               │
/// │ movie              │
/// │ ♥ [no poster]      │
/// ╰────────────────────╯
/// ```
///
/// The selected card draws its border in the selection color; a card
/// with an in-flight mutation renders its heart line dimmed.
fn render_card(row: usize, col: usize, card: &CardViewModel, theme: &Theme) {
    let border_color = if card.selected {
        &theme.colors.selection_bg
    } else {
        &theme.colors.border
    };
    let border = Theme::fg(border_color);
    let inner = "─".repeat(CARD_WIDTH - 2);

    position_cursor(row, col);
    print!("{border}╭{inner}╮{}", Theme::reset());

    position_cursor(row + 1, col);
    print!("{border}│ {}", Theme::reset());
    if card.selected {
        print!("{}", Theme::bold());
    }
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&card.title, CONTENT_WIDTH));
    print!("{}", Theme::reset());
    print!("{border} │{}", Theme::reset());

    position_cursor(row + 2, col);
    print!("{border}│ {}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&card.year, CONTENT_WIDTH));
    print!("{}", Theme::reset());
    print!("{border} │{}", Theme::reset());

    position_cursor(row + 3, col);
    print!("{border}│ {}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&card.media_type, CONTENT_WIDTH));
    print!("{}", Theme::reset());
    print!("{border} │{}", Theme::reset());

    position_cursor(row + 4, col);
    print!("{border}│ {}", Theme::reset());
    render_heart_line(card, theme);
    print!("{border} │{}", Theme::reset());

    position_cursor(row + 5, col);
    print!("{border}╰{inner}╯{}", Theme::reset());
}

/// Renders the favourite heart plus the missing-poster marker.
fn render_heart_line(card: &CardViewModel, theme: &Theme) {
    if card.pending {
        print!("{}", Theme::dim());
    }
    print!("{}", Theme::fg(&theme.colors.favourite_fg));
    print!("{}", if card.favourite { "♥" } else { "♡" });
    print!("{}", Theme::reset());
    if card.pending {
        print!("{}", Theme::dim());
    }

    print!("{}", Theme::fg(&theme.colors.text_dim));
    let marker = if card.has_poster { "" } else { " [no poster]" };
    print!("{}", fit(marker, CONTENT_WIDTH - 1));
    print!("{}", Theme::reset());
}
