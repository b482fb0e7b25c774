use super::util::iter_days_after;
use thiserror::Error;
use time::{
    Date,
    Month::{self, December, January},
};

/// A calendar month, as shown by the calendar panel
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
// Invariant: the wrapped date is the first day of its month
pub struct DisplayedMonth(Date);

impl DisplayedMonth {
    pub fn containing(date: Date) -> DisplayedMonth {
        // Day 1 exists in every month
        DisplayedMonth(date.replace_day(1).unwrap_or(date))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        self.0.month()
    }

    pub fn first_day(self) -> Date {
        self.0
    }

    pub fn last_day(self) -> Date {
        iter_days_after(self.0)
            .take_while(|d| d.month() == self.0.month())
            .last()
            .unwrap_or(self.0)
    }

    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The date in this month with the given day number, or the last day of
    /// the month if it is shorter than that
    pub fn day_or_last(self, day: u8) -> Date {
        self.0.replace_day(day).unwrap_or_else(|_| self.last_day())
    }

    pub fn next(self) -> Result<DisplayedMonth, OutOfTimeError> {
        let year = self.year() + i32::from(self.month() == December);
        first_of(year, self.month().next())
    }

    pub fn previous(self) -> Result<DisplayedMonth, OutOfTimeError> {
        let year = self.year() - i32::from(self.month() == January);
        first_of(year, self.month().previous())
    }

    pub fn next_year(self) -> Result<DisplayedMonth, OutOfTimeError> {
        first_of(self.year() + 1, self.month())
    }

    pub fn previous_year(self) -> Result<DisplayedMonth, OutOfTimeError> {
        first_of(self.year() - 1, self.month())
    }
}

fn first_of(year: i32, month: Month) -> Result<DisplayedMonth, OutOfTimeError> {
    Date::from_calendar_date(year, month, 1)
        .map(DisplayedMonth)
        .map_err(|_| OutOfTimeError)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_containing() {
        let m = DisplayedMonth::containing(date!(2024 - 02 - 17));
        assert_eq!(m.first_day(), date!(2024 - 02 - 01));
        assert_eq!(m.last_day(), date!(2024 - 02 - 29));
        assert!(m.contains(date!(2024 - 02 - 29)));
        assert!(!m.contains(date!(2023 - 02 - 01)));
    }

    #[test]
    fn test_next_and_previous() {
        let m = DisplayedMonth::containing(date!(2023 - 12 - 25));
        assert_eq!(m.next().unwrap().first_day(), date!(2024 - 01 - 01));
        assert_eq!(m.previous().unwrap().first_day(), date!(2023 - 11 - 01));
        let m = DisplayedMonth::containing(date!(2024 - 01 - 01));
        assert_eq!(m.previous().unwrap().first_day(), date!(2023 - 12 - 01));
        assert_eq!(m.next_year().unwrap().first_day(), date!(2025 - 01 - 01));
        assert_eq!(m.previous_year().unwrap().first_day(), date!(2023 - 01 - 01));
    }

    #[test]
    fn test_day_or_last() {
        let m = DisplayedMonth::containing(date!(2023 - 02 - 10));
        assert_eq!(m.day_or_last(14), date!(2023 - 02 - 14));
        assert_eq!(m.day_or_last(31), date!(2023 - 02 - 28));
    }

    #[test]
    fn test_end_of_time() {
        let m = DisplayedMonth::containing(date!(9999 - 12 - 31));
        assert_eq!(m.next(), Err(OutOfTimeError));
        assert_eq!(m.next_year(), Err(OutOfTimeError));
        assert_eq!(m.last_day(), date!(9999 - 12 - 31));
        let m = DisplayedMonth::containing(date!(-9999 - 01 - 01));
        assert_eq!(m.previous(), Err(OutOfTimeError));
        assert_eq!(m.previous_year(), Err(OutOfTimeError));
    }
}
