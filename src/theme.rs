use ratatui::style::{Color, Modifier, Style};

const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

/// Styles applied to the parts of a date picker.  Day cell styles are layered
/// on top of `day` in the order outside → today → unselectable → selected →
/// cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Theme {
    pub field: Style,
    pub field_focused: Style,
    pub field_disabled: Style,
    /// Character under the text cursor
    pub text_cursor: Style,
    pub popover: Style,
    pub title: Style,
    pub nav_button: Style,
    pub weekday: Style,
    pub day: Style,
    /// Days of the neighbouring months
    pub outside_day: Style,
    pub unselectable_day: Style,
    pub today: Style,
    pub selected_day: Style,
    /// Day under the keyboard cursor while the calendar has focus
    pub day_cursor: Style,
}

impl Theme {
    pub const DEFAULT: Theme = Theme {
        field: BASE_STYLE,
        field_focused: BASE_STYLE.fg(Color::LightCyan),
        field_disabled: BASE_STYLE.fg(Color::DarkGray),
        text_cursor: BASE_STYLE.add_modifier(Modifier::REVERSED),
        popover: BASE_STYLE,
        title: BASE_STYLE.add_modifier(Modifier::BOLD),
        nav_button: BASE_STYLE.fg(Color::LightCyan),
        weekday: BASE_STYLE.add_modifier(Modifier::BOLD),
        day: BASE_STYLE,
        outside_day: Style::new().fg(Color::Gray),
        unselectable_day: Style::new()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        today: Style::new().fg(Color::LightYellow),
        selected_day: Style::new()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
        day_cursor: Style::new().add_modifier(Modifier::REVERSED),
    };
}

impl Default for Theme {
    fn default() -> Theme {
        Theme::DEFAULT
    }
}
