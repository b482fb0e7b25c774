use super::month::DisplayedMonth;
use super::util::{iter_days_after, iter_days_before, WeekdayExt, DAYS_IN_WEEK};
use super::Selectable;
use ratatui::{style::Style, text::Span};
use time::{
    Date,
    Weekday::{self, *},
};

/// Render data for one day of the calendar grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DayCell {
    pub date: Date,
    /// Whether the day belongs to the displayed month rather than to one of
    /// its neighbours
    pub in_month: bool,
    pub selectable: bool,
    pub selected: bool,
    pub today: bool,
}

impl DayCell {
    pub(super) fn show(&self, style: Style) -> Span<'static> {
        let day = self.date.day();
        let s = if self.selected {
            format!("[{day:2}]")
        } else {
            format!(" {day:2} ")
        };
        Span::styled(s, style)
    }
}

/// One Sunday-to-Saturday row of the grid.  A day is missing only at the
/// limits of the representable dates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
// Invariant: At least one element of the array is Some
pub struct Week([Option<DayCell>; DAYS_IN_WEEK]);

impl Week {
    fn new(cell: DayCell) -> Week {
        let mut this = Week([None; DAYS_IN_WEEK]);
        this.set(cell);
        this
    }

    fn set(&mut self, cell: DayCell) {
        let i = usize::from(cell.date.weekday().index0());
        if let Some(slot) = self.0.get_mut(i) {
            *slot = Some(cell);
        }
    }

    pub fn get(&self, wd: Weekday) -> Option<DayCell> {
        self.0.get(usize::from(wd.index0())).copied().flatten()
    }

    /// Iterate over the days of the week in order, paired with their weekdays
    pub fn enumerate(&self) -> impl Iterator<Item = (Weekday, DayCell)> + '_ {
        std::iter::successors(Some(Sunday), |wd| match wd.next() {
            Sunday => None,
            wd2 => Some(wd2),
        })
        .filter_map(|wd| self.get(wd).map(|cell| (wd, cell)))
    }
}

/// The weeks of a displayed month, including the days of the previous and
/// next months that share a week with it
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    month: DisplayedMonth,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn new<S: Selectable + ?Sized>(
        month: DisplayedMonth,
        selected: Date,
        today: Option<Date>,
        selectable: &S,
    ) -> MonthGrid {
        let factory = CellFactory {
            month,
            selected,
            today,
            selectable,
        };
        let mut weeks = Vec::with_capacity(6);
        let mut start = Some(month.first_day());
        while let Some(date) = start.filter(|&d| month.contains(d)) {
            let week = factory.make_week(date);
            weeks.push(week);
            start = week.get(Saturday).and_then(|cell| cell.date.next_day());
        }
        MonthGrid { month, weeks }
    }

    pub fn month(&self) -> DisplayedMonth {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn cell(&self, date: Date) -> Option<DayCell> {
        self.weeks
            .iter()
            .find_map(|w| w.get(date.weekday()).filter(|cell| cell.date == date))
    }
}

struct CellFactory<'a, S: ?Sized> {
    month: DisplayedMonth,
    selected: Date,
    today: Option<Date>,
    selectable: &'a S,
}

impl<S: Selectable + ?Sized> CellFactory<'_, S> {
    fn make_cell(&self, date: Date) -> DayCell {
        DayCell {
            date,
            in_month: self.month.contains(date),
            selectable: self.selectable.is_selectable(date),
            selected: date == self.selected,
            today: Some(date) == self.today,
        }
    }

    // Returns the Week containing the given date, which can be at any day of
    // the week
    fn make_week(&self, date: Date) -> Week {
        let i = usize::from(date.weekday().index0());
        let mut week = Week::new(self.make_cell(date));
        for d in iter_days_before(date).take(i) {
            week.set(self.make_cell(d));
        }
        for d in iter_days_after(date).take(DAYS_IN_WEEK - i - 1) {
            week.set(self.make_cell(d));
        }
        week
    }
}
