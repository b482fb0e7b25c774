use std::iter::successors;
use time::{Date, Weekday};

pub(super) const DAYS_IN_WEEK: usize = 7;

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

pub(super) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(super) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_index0() {
        assert_eq!(Weekday::Sunday.index0(), 0);
        assert_eq!(Weekday::Saturday.index0(), 6);
    }

    #[test]
    fn test_iter_days() {
        let mut after = iter_days_after(date!(2024 - 02 - 28));
        assert_eq!(after.next(), Some(date!(2024 - 02 - 29)));
        assert_eq!(after.next(), Some(date!(2024 - 03 - 01)));
        let mut before = iter_days_before(date!(2024 - 03 - 01));
        assert_eq!(before.next(), Some(date!(2024 - 02 - 29)));
        assert_eq!(iter_days_after(date!(9999 - 12 - 31)).next(), None);
    }
}
