use std::fmt;
use thiserror::Error;
use time::{
    error::InvalidFormatDescription,
    format_description::{self, BorrowedFormatItem, OwnedFormatItem},
    macros::{date, format_description},
    Date,
};

/// The format description used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "[year]-[month]-[day]";

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Date used to check that a format description can represent every part of a
/// calendar date.  The month and day are chosen to be distinguishable from
/// each other.
const PROBE_DATE: Date = date!(2024 - 12 - 31);

/// Conversion between [`Date`] values and the text typed into a picker,
/// driven by a [`time` format description][fd].
///
/// [fd]: https://time-rs.github.io/book/api/format-description.html
#[derive(Clone, Eq, PartialEq)]
pub struct DateFormat {
    pattern: String,
    items: OwnedFormatItem,
}

impl DateFormat {
    /// Parse a format description such as `"[month]/[day]/[year]"`.
    ///
    /// # Errors
    ///
    /// Fails if the description is malformed, or if text formatted with it
    /// cannot be parsed back into the same date (e.g. it omits the year or
    /// uses time-of-day components).
    pub fn new(pattern: &str) -> Result<DateFormat, FormatError> {
        let items = format_description::parse_owned::<2>(pattern).map_err(|source| {
            FormatError::Invalid {
                pattern: pattern.to_owned(),
                source,
            }
        })?;
        let fmt = DateFormat {
            pattern: pattern.to_owned(),
            items,
        };
        let round_trip = PROBE_DATE
            .format(&fmt.items)
            .ok()
            .and_then(|s| fmt.parse(&s));
        if round_trip == Some(PROBE_DATE) {
            Ok(fmt)
        } else {
            Err(FormatError::Incomplete {
                pattern: pattern.to_owned(),
            })
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: Date) -> String {
        match date.format(&self.items) {
            Ok(s) => s,
            Err(e) => {
                // Only reachable for components that `new()` rejects
                log::warn!("failed to format {date} with {:?}: {e}", self.pattern);
                String::new()
            }
        }
    }

    /// Parse typed text, ignoring surrounding whitespace.  Returns `None` for
    /// anything that is not a valid date in this format.
    pub fn parse(&self, s: &str) -> Option<Date> {
        Date::parse(s.trim(), &self.items).ok()
    }
}

impl Default for DateFormat {
    fn default() -> DateFormat {
        DateFormat {
            pattern: String::from(DEFAULT_DATE_FORMAT),
            items: OwnedFormatItem::from(YMD_FMT),
        }
    }
}

impl fmt::Debug for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DateFormat").field(&self.pattern).finish()
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid date format description {pattern:?}")]
    Invalid {
        pattern: String,
        source: InvalidFormatDescription,
    },
    #[error("date format {pattern:?} cannot represent a complete calendar date")]
    Incomplete { pattern: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let fmt = DateFormat::default();
        for d in [
            date!(2024 - 01 - 15),
            date!(2024 - 02 - 29),
            date!(1999 - 12 - 31),
            date!(0001 - 01 - 01),
        ] {
            let s = fmt.format(d);
            assert_eq!(fmt.parse(&s), Some(d), "round trip of {s}");
        }
        assert_eq!(fmt.format(date!(2024 - 01 - 15)), "2024-01-15");
    }

    #[test]
    fn test_default_matches_parsed_pattern() {
        let parsed = DateFormat::new(DEFAULT_DATE_FORMAT).unwrap();
        let d = date!(2023 - 07 - 04);
        assert_eq!(parsed.format(d), DateFormat::default().format(d));
        assert_eq!(parsed.pattern(), DateFormat::default().pattern());
    }

    #[test]
    fn test_custom_pattern() {
        let fmt = DateFormat::new("[month]/[day]/[year]").unwrap();
        assert_eq!(fmt.format(date!(2023 - 11 - 05)), "11/05/2023");
        assert_eq!(fmt.parse("11/05/2023"), Some(date!(2023 - 11 - 05)));
        assert_eq!(fmt.parse("2023-11-05"), None);
    }

    #[test]
    fn test_month_names_pattern() {
        let fmt = DateFormat::new("[day] [month repr:short] [year]").unwrap();
        assert_eq!(fmt.format(date!(2024 - 03 - 09)), "09 Mar 2024");
        assert_eq!(fmt.parse("09 Mar 2024"), Some(date!(2024 - 03 - 09)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let fmt = DateFormat::default();
        assert_eq!(fmt.parse("  2024-02-20 "), Some(date!(2024 - 02 - 20)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let fmt = DateFormat::default();
        assert_eq!(fmt.parse(""), None);
        assert_eq!(fmt.parse("tomorrow"), None);
        assert_eq!(fmt.parse("2024-02-30"), None);
        assert_eq!(fmt.parse("2024-13-01"), None);
        assert_eq!(fmt.parse("2024-02-20x"), None);
    }

    #[test]
    fn test_invalid_description() {
        let r = DateFormat::new("[year]-[mnth]");
        assert!(matches!(r, Err(FormatError::Invalid { .. })), "{r:?}");
    }

    #[test]
    fn test_incomplete_description() {
        let r = DateFormat::new("[month]-[day]");
        assert!(matches!(r, Err(FormatError::Incomplete { .. })), "{r:?}");
        let r = DateFormat::new("[year]-[month]-[day] [hour]");
        assert!(matches!(r, Err(FormatError::Incomplete { .. })), "{r:?}");
    }
}
