//! TUI color theme
//!
//! The whole screen takes the status color; text stays dark on top of it.

use greenmeter_common::{Rgb, StatusColor};
use ratatui::style::{Color, Modifier, Style};

pub const PLACEHOLDER_BG: Color = Color::Black;
pub const PLACEHOLDER_FG: Color = Color::White;
pub const NUMBER_FG: Color = Color::Black;
pub const TIME_FG: Color = Color::Rgb(40, 40, 40);
/// Time line on the dimmed night backgrounds, where dark grey disappears
pub const TIME_FG_NIGHT: Color = Color::Rgb(200, 200, 200);

/// Background color for a status
#[must_use]
pub const fn status_color(status: StatusColor) -> Color {
    let Rgb(r, g, b) = status.rgb();
    Color::Rgb(r, g, b)
}

/// Base style for every cell of a themed frame
#[must_use]
pub const fn screen_style(status: StatusColor) -> Style {
    Style::new().bg(status_color(status))
}

#[must_use]
pub const fn number_style(status: StatusColor) -> Style {
    screen_style(status).fg(NUMBER_FG).add_modifier(Modifier::BOLD)
}

#[must_use]
pub const fn time_style(status: StatusColor) -> Style {
    let fg = if status.is_night_variant() { TIME_FG_NIGHT } else { TIME_FG };
    screen_style(status).fg(fg)
}
