use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key bindings, grouped by where the focus is
static BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Text field",
        &[
            ("Enter", "Apply typed date"),
            ("Tab", "Leave the field"),
            ("Down", "Open the calendar"),
            ("Esc", "Close calendar/quit"),
        ],
    ),
    (
        "Calendar",
        &[
            ("Arrows", "Move the cursor"),
            ("PgUp/PgDn", "Change month"),
            ("S-PgUp/PgDn", "Change year"),
            ("Enter/Space", "Pick the day"),
            ("Tab", "Back to the field"),
        ],
    ),
];

/// Width of the key column
const KEY_WIDTH: usize = 12;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let heading = Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let mut lines = Vec::new();
        for &(section, keys) in BINDINGS {
            lines.push(Line::styled(section, heading));
            for &(key, action) in keys {
                lines.push(Line::from_iter([
                    Span::styled(
                        format!("{key:KEY_WIDTH$}"),
                        Style::new().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(action),
                ]));
            }
        }
        lines.push(Line::raw("F1 toggles this help; Ctrl-C quits"));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Keys ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(popup, buf);
    }
}
