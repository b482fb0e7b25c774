use super::grid::{DayCell, MonthGrid};
use super::util::WeekdayExt;
use crate::config::PickerConfig;
use crate::theme::Theme;
use ratatui::{prelude::*, widgets::*};
use time::{
    Date,
    Weekday::{self, Sunday},
};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the panel in columns
pub const PANEL_WIDTH: u16 = DAY_WIDTH * 7;

const TITLE_LINE: u16 = 0;

const HEADER_LINE: u16 = 1;

const FIRST_WEEK_LINE: u16 = 2;

/// A month spans at most six Sunday-to-Saturday weeks
const MAX_WEEKS: u16 = 6;

/// Height of the panel in lines, enough for any month
pub const PANEL_HEIGHT: u16 = FIRST_WEEK_LINE + MAX_WEEKS;

/// Weekday names are cut to this many characters
const WEEKDAY_NAME_LEN: usize = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Button {
    col: u16,
    width: u16,
    label: &'static str,
    hit: PanelHit,
}

static BUTTONS: [Button; 4] = [
    Button {
        col: 0,
        width: 2,
        label: "<<",
        hit: PanelHit::PreviousYear,
    },
    Button {
        col: 3,
        width: 1,
        label: "<",
        hit: PanelHit::PreviousMonth,
    },
    Button {
        col: PANEL_WIDTH - 4,
        width: 1,
        label: ">",
        hit: PanelHit::NextMonth,
    },
    Button {
        col: PANEL_WIDTH - 2,
        width: 2,
        label: ">>",
        hit: PanelHit::NextYear,
    },
];

/// What lies under a position on the panel
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PanelHit {
    Day(DayCell),
    PreviousYear,
    PreviousMonth,
    NextMonth,
    NextYear,
}

/// Renders one [`MonthGrid`]: a title line with the month, year, and
/// navigation buttons, a line of weekday names, and one line per week.
#[derive(Clone, Copy, Debug)]
pub struct CalendarPanel<'a> {
    grid: &'a MonthGrid,
    config: &'a PickerConfig,
    theme: &'a Theme,
    cursor: Option<Date>,
}

impl<'a> CalendarPanel<'a> {
    pub fn new(grid: &'a MonthGrid, config: &'a PickerConfig) -> CalendarPanel<'a> {
        CalendarPanel {
            grid,
            config,
            theme: &Theme::DEFAULT,
            cursor: None,
        }
    }

    pub fn theme(mut self, theme: &'a Theme) -> CalendarPanel<'a> {
        self.theme = theme;
        self
    }

    /// Highlight the given day as the keyboard cursor
    pub fn cursor(mut self, cursor: Option<Date>) -> CalendarPanel<'a> {
        self.cursor = cursor;
        self
    }

    /// Map a screen position to the part of the panel rendered at it, given
    /// the same `area` that the panel was rendered into
    pub fn hit(&self, area: Rect, position: Position) -> Option<PanelHit> {
        if !area.contains(position) {
            return None;
        }
        let x = position.x - area.x;
        let y = position.y - area.y;
        match y {
            TITLE_LINE => BUTTONS
                .iter()
                .find(|b| (b.col..b.col + b.width).contains(&x))
                .map(|b| b.hit),
            HEADER_LINE => None,
            _ => {
                let week = self
                    .grid
                    .weeks()
                    .get(usize::from(y - FIRST_WEEK_LINE))?;
                let index = u8::try_from(x / DAY_WIDTH).ok().filter(|&i| i < 7)?;
                week.get(Sunday.nth_next(index)).map(PanelHit::Day)
            }
        }
    }

    fn day_style(&self, cell: &DayCell) -> Style {
        let mut style = self.theme.day;
        if !cell.in_month {
            style = style.patch(self.theme.outside_day);
        }
        if cell.today {
            style = style.patch(self.theme.today);
        }
        if !cell.selectable {
            style = style.patch(self.theme.unselectable_day);
        }
        if cell.selected {
            style = style.patch(self.theme.selected_day);
        }
        if self.cursor == Some(cell.date) {
            style = style.patch(self.theme.day_cursor);
        }
        style
    }
}

impl Widget for CalendarPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(area, buf);
        let month = self.grid.month();
        let title = format!("{} {}", self.config.month_name(month.month()), month.year());
        let title_width = u16::try_from(Span::raw(title.as_str()).width()).unwrap_or(u16::MAX);
        canvas.mvprint(
            TITLE_LINE,
            PANEL_WIDTH.saturating_sub(title_width) / 2,
            &title,
            self.theme.title,
        );
        for b in &BUTTONS {
            canvas.mvprint(TITLE_LINE, b.col, b.label, self.theme.nav_button);
        }
        for wd in weekdays() {
            let name = self
                .config
                .day_name(wd)
                .chars()
                .take(WEEKDAY_NAME_LEN)
                .collect::<String>();
            canvas.mvprint(
                HEADER_LINE,
                DAY_WIDTH * wd.index0(),
                format!("{name:>WEEKDAY_NAME_LEN$}"),
                self.theme.weekday,
            );
        }
        for (i, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            for (wd, cell) in week.enumerate() {
                let span = cell.show(self.day_style(&cell));
                canvas.mvprint(
                    FIRST_WEEK_LINE + i,
                    DAY_WIDTH * wd.index0(),
                    span.content,
                    span.style,
                );
            }
        }
    }
}

fn weekdays() -> impl Iterator<Item = Weekday> {
    (0..7).map(|i| Sunday.nth_next(i))
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Paragraph truncates text that would run past the panel's
            // area; the Rect given to it must lie within the buffer.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{AnyDate, DateRange, DisplayedMonth};
    use time::macros::date;

    fn row(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn january_2024() -> MonthGrid {
        MonthGrid::new(
            DisplayedMonth::containing(date!(2024 - 01 - 01)),
            date!(2024 - 01 - 15),
            None,
            &AnyDate,
        )
    }

    #[test]
    fn test_render() {
        let grid = january_2024();
        let config = PickerConfig::default();
        let area = Rect::new(0, 0, PANEL_WIDTH, PANEL_HEIGHT);
        let mut buf = Buffer::empty(area);
        CalendarPanel::new(&grid, &config).render(area, &mut buf);
        let rows = (0..PANEL_HEIGHT).map(|y| row(&buf, y)).collect::<Vec<_>>();
        assert_eq!(
            rows,
            [
                "<< <      Jan 2024      > >>",
                "Sun Mon Tue Wed Thu Fri Sat ",
                " 31   1   2   3   4   5   6 ",
                "  7   8   9  10  11  12  13 ",
                " 14 [15] 16  17  18  19  20 ",
                " 21  22  23  24  25  26  27 ",
                " 28  29  30  31   1   2   3 ",
                "                            ",
            ]
        );
    }

    #[test]
    fn test_render_styles() {
        let grid = MonthGrid::new(
            DisplayedMonth::containing(date!(2024 - 01 - 01)),
            date!(2024 - 01 - 15),
            Some(date!(2024 - 01 - 10)),
            &DateRange::new(None, Some(date!(2024 - 01 - 20))),
        );
        let config = PickerConfig::default();
        let theme = Theme::DEFAULT;
        let area = Rect::new(0, 0, PANEL_WIDTH, PANEL_HEIGHT);
        let mut buf = Buffer::empty(area);
        CalendarPanel::new(&grid, &config)
            .theme(&theme)
            .cursor(Some(date!(2024 - 01 - 16)))
            .render(area, &mut buf);
        // Jan 15 (Monday of the third week)
        assert_eq!(buf[(5, 4)].fg, theme.selected_day.fg.unwrap());
        // Jan 10 (Wednesday of the second week)
        assert_eq!(buf[(13, 3)].fg, theme.today.fg.unwrap());
        // Jan 21 (Sunday of the fourth week)
        assert_eq!(buf[(1, 5)].fg, theme.unselectable_day.fg.unwrap());
        // Dec 31 (Sunday of the first week)
        assert_eq!(buf[(1, 2)].fg, theme.outside_day.fg.unwrap());
        // Jan 16 (Tuesday of the third week)
        assert!(buf[(9, 4)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(5, 4)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_custom_names() {
        let grid = january_2024();
        let config = PickerConfig::default()
            .with_month_names([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ])
            .with_day_names(["Su", "Mo", "Tu", "We", "Th", "Fr", "Sunday"]);
        let area = Rect::new(0, 0, PANEL_WIDTH, PANEL_HEIGHT);
        let mut buf = Buffer::empty(area);
        CalendarPanel::new(&grid, &config).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "<< <    January 2024    > >>");
        assert_eq!(row(&buf, 1), " Su  Mo  Tu  We  Th  Fr Sun ");
    }

    #[test]
    fn test_clipped_to_area() {
        let grid = january_2024();
        let config = PickerConfig::default();
        let area = Rect::new(2, 1, 10, 3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 5));
        CalendarPanel::new(&grid, &config).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "              ");
        assert_eq!(row(&buf, 1), "  << <       ");
        assert_eq!(row(&buf, 2), "  Sun Mon Tu  ");
        assert_eq!(row(&buf, 3), "   31   1     ");
        assert_eq!(row(&buf, 4), "              ");
    }

    #[test]
    fn test_hit() {
        let grid = january_2024();
        let config = PickerConfig::default();
        let panel = CalendarPanel::new(&grid, &config);
        let area = Rect::new(10, 5, PANEL_WIDTH, PANEL_HEIGHT);
        let at = |x: u16, y: u16| panel.hit(area, Position::new(area.x + x, area.y + y));
        assert_eq!(at(0, 0), Some(PanelHit::PreviousYear));
        assert_eq!(at(1, 0), Some(PanelHit::PreviousYear));
        assert_eq!(at(2, 0), None);
        assert_eq!(at(3, 0), Some(PanelHit::PreviousMonth));
        assert_eq!(at(12, 0), None);
        assert_eq!(at(24, 0), Some(PanelHit::NextMonth));
        assert_eq!(at(27, 0), Some(PanelHit::NextYear));
        assert_eq!(at(5, 1), None);
        assert_eq!(
            at(5, 4),
            grid.cell(date!(2024 - 01 - 15)).map(PanelHit::Day)
        );
        assert_eq!(
            at(27, 2),
            grid.cell(date!(2024 - 01 - 06)).map(PanelHit::Day)
        );
        assert_eq!(at(0, 7), None);
        assert_eq!(panel.hit(area, Position::new(0, 0)), None);
    }
}
