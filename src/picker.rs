use crate::calendar::{
    AnyDate, CalendarPanel, DayCell, DisplayedMonth, MonthGrid, OutOfTimeError, PanelHit,
    Selectable, PANEL_HEIGHT, PANEL_WIDTH,
};
use crate::config::PickerConfig;
use crate::input::TextInput;
use crate::theme::Theme;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, trace};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};
use std::marker::PhantomData;
use time::{Date, Duration};

/// Height of the bordered text field
const FIELD_HEIGHT: u16 = 3;

const POPOVER_WIDTH: u16 = PANEL_WIDTH + 2;

const POPOVER_HEIGHT: u16 = PANEL_HEIGHT + 2;

/// The result of handing an input to a [`DatePickerState`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickerOutput {
    /// The input did not apply to the picker in its current state
    Ignored,
    /// The input was consumed without requesting a new date
    Handled,
    /// The user chose a new date.  The owner of the date should store it and
    /// pass it to the picker from now on.
    DateChanged(Date),
}

impl PickerOutput {
    pub fn changed(self) -> Option<Date> {
        match self {
            PickerOutput::DateChanged(date) => Some(date),
            PickerOutput::Ignored | PickerOutput::Handled => None,
        }
    }
}

/// Which part of the picker receives key events
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Focus {
    #[default]
    None,
    Field,
    /// Only while the popover is open
    Calendar,
}

/// Screen areas from the most recent render, used to map mouse clicks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PickerLayout {
    field: Rect,
    popover: Option<Rect>,
    panel: Option<Rect>,
}

/// The date picker widget.  It draws a bordered text field into the area it is
/// rendered into and, while its state is open, a calendar popover directly
/// below the field (or above it if there is no room below), on top of
/// whatever else has been drawn there.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DatePicker<S = AnyDate> {
    date: Date,
    _data: PhantomData<S>,
}

impl<S> DatePicker<S> {
    /// `date` is the currently selected date, owned by the caller
    pub fn new(date: Date) -> DatePicker<S> {
        DatePicker {
            date,
            _data: PhantomData,
        }
    }
}

impl<S: Selectable> StatefulWidget for DatePicker<S> {
    type State = DatePickerState<S>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.sync(self.date);
        let field = Rect {
            height: area.height.min(FIELD_HEIGHT),
            ..area
        };
        state.render_field(field, buf);
        let (popover, panel) = if state.open {
            let popover = popover_area(field, *buf.area());
            Clear.render(popover, buf);
            let block = Block::bordered()
                .style(state.theme.popover)
                .border_style(state.theme.field_focused);
            let panel = block.inner(popover);
            block.render(popover, buf);
            let grid = state.grid(self.date);
            let cursor = (state.focus == Focus::Calendar).then_some(state.cursor);
            CalendarPanel::new(&grid, &state.config)
                .theme(&state.theme)
                .cursor(cursor)
                .render(panel, buf);
            (Some(popover), Some(panel))
        } else {
            (None, None)
        };
        state.layout = Some(PickerLayout {
            field,
            popover,
            panel,
        });
    }
}

/// Place the popover below the field's left edge, flipping it above the field
/// when it does not fit below, and clamp it to the buffer
fn popover_area(field: Rect, bounds: Rect) -> Rect {
    let mut y = field.bottom();
    if y.saturating_add(POPOVER_HEIGHT) > bounds.bottom()
        && field.y.saturating_sub(bounds.y) >= POPOVER_HEIGHT
    {
        y = field.y - POPOVER_HEIGHT;
    }
    let x = field
        .x
        .min(bounds.right().saturating_sub(POPOVER_WIDTH))
        .max(bounds.x);
    Rect::new(x, y, POPOVER_WIDTH, POPOVER_HEIGHT).intersection(bounds)
}

/// State of a [`DatePicker`]: the typed text, the popover, focus, and the
/// calendar's displayed month and keyboard cursor.
///
/// The selected date is not part of the state.  Every method that reacts to
/// the user takes the current date as an argument and reports a new choice as
/// [`PickerOutput::DateChanged`] without storing it; the caller applies it.
///
/// Whenever the popover closes, the text field is reset to the formatted date
/// that is in effect afterwards, so abandoned or invalid edits never outlive
/// the popover.
#[derive(Clone, Debug)]
pub struct DatePickerState<S = AnyDate> {
    config: PickerConfig,
    selectable: S,
    theme: Theme,
    id: Option<String>,
    name: Option<String>,
    disabled: bool,
    today: Option<Date>,
    /// The most recent date passed in by the caller (or requested by us)
    last_seen: Date,
    input: TextInput,
    open: bool,
    focus: Focus,
    displayed: DisplayedMonth,
    cursor: Date,
    layout: Option<PickerLayout>,
}

impl<S: Selectable> DatePickerState<S> {
    pub fn new(date: Date, config: PickerConfig, selectable: S) -> DatePickerState<S> {
        let input = TextInput::new(config.date_format().format(date));
        DatePickerState {
            config,
            selectable,
            theme: Theme::DEFAULT,
            id: None,
            name: None,
            disabled: false,
            today: None,
            last_seen: date,
            input,
            open: false,
            focus: Focus::None,
            displayed: DisplayedMonth::containing(date),
            cursor: date,
            layout: None,
        }
    }

    /// Identifier used in log messages
    pub fn id<T: Into<String>>(mut self, id: T) -> DatePickerState<S> {
        self.id = Some(id.into());
        self
    }

    /// Label shown in the field's border
    pub fn name<T: Into<String>>(mut self, name: T) -> DatePickerState<S> {
        self.name = Some(name.into());
        self
    }

    pub fn theme(mut self, theme: Theme) -> DatePickerState<S> {
        self.theme = theme;
        self
    }

    /// Date highlighted as "today" in the calendar
    pub fn today(mut self, today: Date) -> DatePickerState<S> {
        self.today = Some(today);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> DatePickerState<S> {
        self.set_disabled(disabled);
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn displayed_month(&self) -> DisplayedMonth {
        self.displayed
    }

    /// A disabled picker closes its popover, drops focus, and ignores all
    /// input until re-enabled.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            if self.open {
                self.close_popover(self.last_seen);
            }
            self.focus = Focus::None;
        }
    }

    /// Give keyboard focus to the text field.  Returns `false` if the picker
    /// is disabled.
    pub fn focus_field(&mut self) -> bool {
        if self.disabled {
            false
        } else {
            self.focus = Focus::Field;
            true
        }
    }

    /// Take note of the caller's current date.  If it changed since it was
    /// last seen, the text field is reset to it, discarding any edit.
    pub fn sync(&mut self, date: Date) {
        if date != self.last_seen {
            debug!(
                "{}: selected date changed externally to {date}",
                self.label()
            );
            self.last_seen = date;
            self.input.set(self.format(date));
            if !self.open {
                self.displayed = DisplayedMonth::containing(date);
                self.cursor = date;
            }
        }
    }

    /// Choose a day from the calendar.  Unselectable days are ignored and
    /// leave the popover open.
    pub fn select_day(&mut self, cell: DayCell, date: Date) -> PickerOutput {
        self.sync(date);
        if self.disabled {
            return PickerOutput::Ignored;
        }
        if !cell.selectable {
            trace!("{}: ignoring unselectable day {}", self.label(), cell.date);
            return PickerOutput::Ignored;
        }
        debug!("{}: selected {} from the calendar", self.label(), cell.date);
        self.request(cell.date)
    }

    /// Validate the typed text.  A valid, selectable date that differs from
    /// `date` is requested and closes the popover; anything else is discarded
    /// and the text is reset to `date`.
    ///
    /// Typed dates go through the same [`Selectable`] check as calendar
    /// clicks, so a day that is greyed out in the calendar cannot be typed in
    /// either.
    pub fn commit(&mut self, date: Date) -> PickerOutput {
        self.sync(date);
        if self.disabled {
            return PickerOutput::Ignored;
        }
        match self.config.date_format().parse(self.input.value()) {
            Some(parsed) if parsed != date && self.selectable.is_selectable(parsed) => {
                debug!("{}: committed typed date {parsed}", self.label());
                self.request(parsed)
            }
            parsed => {
                trace!(
                    "{}: discarding typed text {:?} (parsed: {parsed:?}, current: {date})",
                    self.label(),
                    self.input.value(),
                );
                self.input.set(self.format(date));
                PickerOutput::Handled
            }
        }
    }

    /// What clicking the text field does: open the popover, or commit and
    /// close it
    pub fn toggle(&mut self, date: Date) -> PickerOutput {
        self.sync(date);
        if self.disabled {
            return PickerOutput::Ignored;
        }
        if self.open {
            let output = self.commit(date);
            if self.open {
                self.close_popover(date);
            }
            output
        } else {
            self.open_popover(date);
            PickerOutput::Handled
        }
    }

    /// Dismiss the popover without requesting a change
    pub fn close(&mut self, date: Date) -> PickerOutput {
        self.sync(date);
        if self.disabled || !self.open {
            return PickerOutput::Ignored;
        }
        self.close_popover(date);
        if self.focus == Focus::Calendar {
            self.focus = Focus::Field;
        }
        PickerOutput::Handled
    }

    /// The text field loses focus: commit the typed text and close the
    /// popover
    pub fn blur(&mut self, date: Date) -> PickerOutput {
        self.sync(date);
        if self.disabled || self.focus == Focus::None {
            return PickerOutput::Ignored;
        }
        let output = self.commit(date);
        if self.open {
            self.close_popover(output.changed().unwrap_or(date));
        }
        self.focus = Focus::None;
        output
    }

    pub fn handle_event(&mut self, event: &Event, date: Date) -> PickerOutput {
        self.sync(date);
        if self.disabled {
            return PickerOutput::Ignored;
        }
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key, date),
            Event::Mouse(mouse) => self.handle_mouse(*mouse, date),
            _ => PickerOutput::Ignored,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, date: Date) -> PickerOutput {
        match self.focus {
            Focus::None => PickerOutput::Ignored,
            Focus::Field => self.handle_field_key(key, date),
            Focus::Calendar => self.handle_calendar_key(key, date),
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent, date: Date) -> PickerOutput {
        let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
        let edited = match key.code {
            KeyCode::Enter => return self.commit(date),
            KeyCode::Tab | KeyCode::BackTab if self.open => {
                self.focus = Focus::Calendar;
                true
            }
            KeyCode::Tab | KeyCode::BackTab => return self.blur(date),
            KeyCode::Down => {
                if !self.open {
                    self.open_popover(date);
                }
                self.focus = Focus::Calendar;
                true
            }
            KeyCode::Esc => return self.close(date),
            KeyCode::Char(ch) if plain => {
                self.input.insert(ch);
                true
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.left(),
            KeyCode::Right => self.input.right(),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(),
            _ => false,
        };
        if edited {
            PickerOutput::Handled
        } else {
            PickerOutput::Ignored
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent, date: Date) -> PickerOutput {
        let by_year = key.modifiers.contains(KeyModifiers::SHIFT);
        let moved = match key.code {
            KeyCode::Left => self.move_cursor(Duration::days(-1)),
            KeyCode::Right => self.move_cursor(Duration::days(1)),
            KeyCode::Up => self.move_cursor(Duration::weeks(-1)),
            KeyCode::Down => self.move_cursor(Duration::weeks(1)),
            KeyCode::PageUp if by_year => self.navigate(PanelHit::PreviousYear),
            KeyCode::PageUp => self.navigate(PanelHit::PreviousMonth),
            KeyCode::PageDown if by_year => self.navigate(PanelHit::NextYear),
            KeyCode::PageDown => self.navigate(PanelHit::NextMonth),
            KeyCode::Enter | KeyCode::Char(' ') => {
                return match self.grid(date).cell(self.cursor) {
                    Some(cell) => self.select_day(cell, date),
                    None => PickerOutput::Ignored,
                };
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = Focus::Field;
                return PickerOutput::Handled;
            }
            KeyCode::Esc => return self.close(date),
            _ => return PickerOutput::Ignored,
        };
        self.report_move(moved)
    }

    // Moving past the limits of time is a no-op
    fn report_move(&self, moved: Result<(), OutOfTimeError>) -> PickerOutput {
        match moved {
            Ok(()) => PickerOutput::Handled,
            Err(e) => {
                trace!("{}: {e}", self.label());
                PickerOutput::Ignored
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, date: Date) -> PickerOutput {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return PickerOutput::Ignored;
        };
        let Some(layout) = self.layout else {
            return PickerOutput::Ignored;
        };
        let pos = Position::new(mouse.column, mouse.row);
        if layout.field.contains(pos) {
            self.focus = Focus::Field;
            return self.toggle(date);
        }
        if self.open {
            if layout.popover.is_some_and(|r| r.contains(pos)) {
                let grid = self.grid(date);
                let hit = layout
                    .panel
                    .and_then(|panel| CalendarPanel::new(&grid, &self.config).hit(panel, pos));
                self.focus = Focus::Calendar;
                return match hit {
                    Some(PanelHit::Day(cell)) => self.select_day(cell, date),
                    Some(nav) => {
                        let moved = self.navigate(nav);
                        self.report_move(moved)
                    }
                    None => PickerOutput::Handled,
                };
            }
            debug!("{}: click outside popover", self.label());
            self.close_popover(date);
            self.focus = Focus::None;
            PickerOutput::Handled
        } else if self.focus == Focus::None {
            PickerOutput::Ignored
        } else {
            self.blur(date)
        }
    }

    fn open_popover(&mut self, date: Date) {
        debug!("{}: opening calendar", self.label());
        self.open = true;
        self.displayed = DisplayedMonth::containing(date);
        self.cursor = date;
    }

    /// Every transition from open to closed ends here.  `date` is the date in
    /// effect after the transition.
    fn close_popover(&mut self, date: Date) {
        if self.open {
            debug!("{}: closing calendar", self.label());
            self.open = false;
        }
        if self.focus == Focus::Calendar {
            self.focus = Focus::Field;
        }
        self.input.set(self.format(date));
    }

    fn request(&mut self, date: Date) -> PickerOutput {
        self.last_seen = date;
        self.displayed = DisplayedMonth::containing(date);
        self.cursor = date;
        self.close_popover(date);
        PickerOutput::DateChanged(date)
    }

    fn move_cursor(&mut self, delta: Duration) -> Result<(), OutOfTimeError> {
        let cursor = self.cursor.checked_add(delta).ok_or(OutOfTimeError)?;
        self.cursor = cursor;
        self.displayed = DisplayedMonth::containing(cursor);
        Ok(())
    }

    fn navigate(&mut self, nav: PanelHit) -> Result<(), OutOfTimeError> {
        let displayed = match nav {
            PanelHit::PreviousYear => self.displayed.previous_year()?,
            PanelHit::PreviousMonth => self.displayed.previous()?,
            PanelHit::NextMonth => self.displayed.next()?,
            PanelHit::NextYear => self.displayed.next_year()?,
            PanelHit::Day(_) => return Ok(()),
        };
        self.displayed = displayed;
        self.cursor = displayed.day_or_last(self.cursor.day());
        Ok(())
    }

    fn grid(&self, date: Date) -> MonthGrid {
        MonthGrid::new(self.displayed, date, self.today, &self.selectable)
    }

    fn format(&self, date: Date) -> String {
        self.config.date_format().format(date)
    }

    fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("datepicker")
    }

    fn render_field(&self, area: Rect, buf: &mut Buffer) {
        let (style, border_style) = if self.disabled {
            (self.theme.field_disabled, self.theme.field_disabled)
        } else if self.focus == Focus::None {
            (self.theme.field, self.theme.field)
        } else {
            (self.theme.field, self.theme.field_focused)
        };
        let mut block = Block::bordered().style(style).border_style(border_style);
        if let Some(name) = &self.name {
            block = block.title(format!(" {name} "));
        }
        let (line, scroll) = if self.focus == Focus::Field {
            let (before, under, after) = self.input.split_at_cursor();
            let line = Line::from_iter([
                Span::raw(before),
                Span::styled(
                    under.map_or_else(|| String::from(" "), String::from),
                    self.theme.text_cursor,
                ),
                Span::raw(after),
            ]);
            (line, cursor_scroll(self.input.cursor(), block.inner(area).width))
        } else {
            (Line::raw(self.input.value()), 0)
        };
        Paragraph::new(line)
            .block(block)
            .scroll((0, scroll))
            .render(area, buf);
    }
}

/// Horizontal scroll that keeps the text cursor (a char index) inside a field
/// `width` cells wide
fn cursor_scroll(cursor: usize, width: u16) -> u16 {
    u16::try_from(cursor)
        .unwrap_or(u16::MAX)
        .saturating_add(1)
        .saturating_sub(width)
}
