use crate::format::DateFormat;
use time::{Month, Weekday};

pub static MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Weekday names, starting from Sunday
pub static WEEKDAY_NAMES_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Immutable settings for a date picker: the format of the text field and the
/// names shown in the calendar panel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PickerConfig {
    date_format: DateFormat,
    month_names: [String; 12],
    day_names: [String; 7],
}

impl PickerConfig {
    pub fn new(date_format: DateFormat) -> PickerConfig {
        PickerConfig {
            date_format,
            month_names: MONTH_NAMES_SHORT.map(String::from),
            day_names: WEEKDAY_NAMES_SHORT.map(String::from),
        }
    }

    /// Replace the month names, January first
    pub fn with_month_names<S: Into<String>>(mut self, names: [S; 12]) -> PickerConfig {
        self.month_names = names.map(Into::into);
        self
    }

    /// Replace the weekday names, Sunday first
    pub fn with_day_names<S: Into<String>>(mut self, names: [S; 7]) -> PickerConfig {
        self.day_names = names.map(Into::into);
        self
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn month_name(&self, month: Month) -> &str {
        let i = usize::from(u8::from(month)) - 1;
        self.month_names.get(i).map_or("", String::as_str)
    }

    pub fn day_name(&self, weekday: Weekday) -> &str {
        let i = usize::from(weekday.number_days_from_sunday());
        self.day_names.get(i).map_or("", String::as_str)
    }
}

impl Default for PickerConfig {
    fn default() -> PickerConfig {
        PickerConfig::new(DateFormat::default())
    }
}
