use crate::help::Help;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use datepick::{DatePicker, DatePickerState, Focus, PickerOutput, Selectable, Theme};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

/// Maximum width of the picker's text field
const PICKER_WIDTH: u16 = 30;

/// Hosts one date picker.  The app owns the selected date; the picker only
/// asks for it to be changed.
#[derive(Clone, Debug)]
pub(crate) struct App<S> {
    date: Date,
    picker: DatePickerState<S>,
    state: AppState,
}

impl<S: Selectable> App<S> {
    pub(crate) fn new(date: Date, mut picker: DatePickerState<S>) -> App<S> {
        picker.focus_field();
        App {
            date,
            picker,
            state: AppState::Picking,
        }
    }

    /// Run until the user quits, then return the selected date
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Date> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.date)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let event = read()?;
        if !self.handle_event(&event) {
            self.beep()?;
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed a key that does nothing
    fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = *event
        {
            if kind != KeyEventKind::Press {
                return true;
            }
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
                return true;
            }
            if self.state == AppState::Helping || code == KeyCode::F(1) {
                self.toggle_help();
                return true;
            }
        }
        if self.state == AppState::Helping {
            return true;
        }
        match self.picker.handle_event(event, self.date) {
            PickerOutput::DateChanged(date) => {
                self.date = date;
                true
            }
            PickerOutput::Handled => true,
            PickerOutput::Ignored => match event {
                Event::Key(KeyEvent {
                    code: KeyCode::Esc, ..
                }) if !self.picker.is_open() => {
                    self.state = AppState::Quitting;
                    true
                }
                Event::Key(KeyEvent {
                    code: KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter,
                    ..
                }) if self.picker.focus() == Focus::None => self.picker.focus_field(),
                Event::Key(_) => false,
                _ => true,
            },
        }
    }

    fn toggle_help(&mut self) {
        self.state = if self.state == AppState::Helping {
            AppState::Picking
        } else {
            AppState::Helping
        };
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<S: Selectable> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = Theme::DEFAULT;
        buf.set_style(area, theme.field);
        let [title_area, picker_area, _, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area.inner(Margin::new(2, 1)));
        Line::styled("Pick a date", theme.title).render(title_area, buf);
        let status = format!(
            "Selected: {}   F1: help",
            self.picker.config().date_format().format(self.date)
        );
        Line::styled(status, Style::new().add_modifier(Modifier::DIM)).render(status_area, buf);
        let picker_area = Rect {
            width: picker_area.width.min(PICKER_WIDTH),
            ..picker_area
        };
        DatePicker::<S>::new(self.date).render(picker_area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help(theme.popover).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
