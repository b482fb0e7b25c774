mod grid;
mod month;
mod panel;
mod util;
pub use self::grid::{DayCell, MonthGrid, Week};
pub use self::month::{DisplayedMonth, OutOfTimeError};
pub use self::panel::{CalendarPanel, PanelHit, PANEL_HEIGHT, PANEL_WIDTH};
use time::Date;

/// Decides which days of the calendar may be chosen
pub trait Selectable {
    fn is_selectable(&self, date: Date) -> bool;
}

/// Every date is selectable
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct AnyDate;

impl Selectable for AnyDate {
    fn is_selectable(&self, _date: Date) -> bool {
        true
    }
}

/// Dates between `min` and `max`, inclusive, are selectable.  A missing bound
/// is unlimited.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRange {
    pub min: Option<Date>,
    pub max: Option<Date>,
}

impl DateRange {
    pub fn new(min: Option<Date>, max: Option<Date>) -> DateRange {
        DateRange { min, max }
    }
}

impl Selectable for DateRange {
    fn is_selectable(&self, date: Date) -> bool {
        !matches!(self.min, Some(min) if date < min) && !matches!(self.max, Some(max) if date > max)
    }
}

impl<F: Fn(Date) -> bool> Selectable for F {
    fn is_selectable(&self, date: Date) -> bool {
        self(date)
    }
}
