//! A single-date picker widget for [ratatui]: a one-line text field paired
//! with a popover calendar panel.
//!
//! The picker is a *controlled* widget.  The application owns the selected
//! [`time::Date`] and passes it into every render and every event-handling
//! call; the picker answers with a [`PickerOutput`], and a
//! [`PickerOutput::DateChanged`] is a request that the application applies to
//! its own copy before the next render.  The picker itself only keeps the
//! transient state of the UI: the typed text, whether the popover is open,
//! which part has keyboard focus, and which month the calendar shows.
//!
//! ```no_run
//! use datepick::{AnyDate, DatePicker, DatePickerState, PickerConfig, PickerOutput};
//! use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
//! use time::macros::date;
//!
//! let mut date = date!(2024 - 01 - 15);
//! let mut state = DatePickerState::new(date, PickerConfig::default(), AnyDate);
//! let area = Rect::new(0, 0, 40, 14);
//! let mut buf = Buffer::empty(area);
//! DatePicker::new(date).render(area, &mut buf, &mut state);
//!
//! let event = crossterm::event::read().unwrap();
//! if let PickerOutput::DateChanged(new_date) = state.handle_event(&event, date) {
//!     date = new_date;
//! }
//! ```
mod calendar;
mod config;
mod format;
mod input;
mod picker;
mod theme;
pub use crate::calendar::{
    AnyDate, CalendarPanel, DateRange, DayCell, DisplayedMonth, MonthGrid, OutOfTimeError,
    PanelHit, Selectable, Week, PANEL_HEIGHT, PANEL_WIDTH,
};
pub use crate::config::{PickerConfig, MONTH_NAMES_SHORT, WEEKDAY_NAMES_SHORT};
pub use crate::format::{DateFormat, FormatError, DEFAULT_DATE_FORMAT};
pub use crate::input::TextInput;
pub use crate::picker::{DatePicker, DatePickerState, Focus, PickerOutput};
pub use crate::theme::Theme;
