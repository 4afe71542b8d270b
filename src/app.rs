use crate::calendar::CalendarDay;
use crate::config::PickerConfig;
use crate::dialog::{DatePicker, DatePickerDialog, DialogOutput};
use crate::help::Help;
use crate::theme::{BASE_STYLE, BUTTON_STYLE, STATUS_STYLE};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::warn;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};
use std::time::Instant;
use time::Date;

const PICK_BUTTON: &str = "[ Pick date ]";

/// The host screen: shows the last picked date and opens the date picker
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    config: PickerConfig,
    today: Date,
    start_date: Option<Date>,
    picked: Option<Date>,
    dialog: Option<DatePickerDialog>,
    state: AppState,
    button_area: Rect,
}

impl App {
    pub(crate) fn new(config: PickerConfig, today: Date) -> App {
        App {
            config,
            today,
            start_date: None,
            picked: None,
            dialog: None,
            state: AppState::Main,
            button_area: Rect::default(),
        }
    }

    /// Sets the date the picker opens at before anything has been picked
    pub(crate) fn start_date(mut self, date: Date) -> App {
        self.start_date = Some(date);
        self
    }

    /// Runs the event loop until the user quits, returning the last picked
    /// date
    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<Option<Date>> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.picked)
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    // Waits for an event, or until the picker next needs to animate or
    // settle, whichever comes first
    fn handle_input(&mut self) -> io::Result<()> {
        let now = Instant::now();
        let ready = match self.next_deadline(now) {
            Some(deadline) => event::poll(deadline.saturating_duration_since(now))?,
            None => true,
        };
        if ready {
            let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
            let ev = event::read()?;
            if let Some(KeyEvent {
                code, modifiers, ..
            }) = ev.as_key_press_event()
            {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers)
                    || !self.handle_key(code, Instant::now())
                {
                    self.beep()?;
                }
            } else if let Event::Mouse(mouse) = ev {
                if !self.handle_mouse(mouse, Instant::now()) {
                    self.beep()?;
                }
            }
            // else: Redraw on resize, and we might as well redraw on other
            // stuff too
        }
        self.tick(Instant::now());
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode, now: Instant) -> bool {
        match self.state {
            AppState::Main => {
                if key == KeyCode::Char('?') {
                    self.state = AppState::Helping;
                    return true;
                }
                if let Some(dialog) = self.dialog.as_mut() {
                    let output = dialog.handle_key(key, now);
                    return self.on_dialog_output(output);
                }
                match key {
                    KeyCode::Enter | KeyCode::Char('p') => {
                        self.open_dialog(now);
                        true
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        self.state = AppState::Quitting;
                        true
                    }
                    _ => false,
                }
            }
            AppState::Helping => {
                self.state = AppState::Main;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the user clicked on nothing
    fn handle_mouse(&mut self, event: MouseEvent, now: Instant) -> bool {
        let clicked = event.kind == MouseEventKind::Down(MouseButton::Left);
        match self.state {
            AppState::Main => {
                if let Some(dialog) = self.dialog.as_mut() {
                    let output = dialog.handle_mouse(event, now);
                    self.on_dialog_output(output)
                } else if clicked {
                    let hit = self
                        .button_area
                        .contains(Position::new(event.column, event.row));
                    if hit {
                        self.open_dialog(now);
                    }
                    hit
                } else {
                    true
                }
            }
            AppState::Helping => {
                if clicked {
                    self.state = AppState::Main;
                }
                true
            }
            AppState::Quitting => false,
        }
    }

    fn on_dialog_output(&mut self, output: DialogOutput) -> bool {
        match output {
            DialogOutput::Ok => true,
            DialogOutput::Invalid => false,
            DialogOutput::DateSet(date_set) => {
                match date_set.to_date() {
                    Some(date) => self.picked = Some(date),
                    None => warn!("Picker reported an invalid date: {date_set:?}"),
                }
                self.dialog = None;
                true
            }
            DialogOutput::Dismissed => {
                self.dialog = None;
                true
            }
        }
    }

    fn open_dialog(&mut self, now: Instant) {
        let seed = self.picked.or(self.start_date).unwrap_or(self.today);
        // Open over every year so that the seed is only clamped once, by the
        // configured range
        let mut dialog = DatePickerDialog::new(
            self.config.unrestricted(),
            CalendarDay::from_date(seed),
            self.today,
            now,
        );
        if let Err(e) =
            dialog.set_year_range(self.config.min_year(), self.config.max_year(), now)
        {
            warn!("Could not apply the year range: {e}");
        }
        self.dialog = Some(dialog);
    }

    fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.dialog.as_ref()?.next_deadline(now)
    }

    fn tick(&mut self, now: Instant) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.tick(now);
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn label(&self) -> String {
        match self.picked {
            Some(date) => format!("Selected date: {date}"),
            None => String::from("Selected date: none"),
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [content_area] = Layout::vertical([5]).flex(Flex::Center).areas(area);
        let [label_area, _, button_row, _, hint_area] =
            Layout::vertical([1; 5]).areas(content_area);
        Line::styled(self.label(), BASE_STYLE)
            .centered()
            .render(label_area, buf);
        let width = u16::try_from(PICK_BUTTON.len()).unwrap_or(u16::MAX);
        let [button_area] = Layout::horizontal([width])
            .flex(Flex::Center)
            .areas(button_row);
        Line::styled(PICK_BUTTON, BUTTON_STYLE).render(button_area, buf);
        self.button_area = button_area;
        Line::styled("Press ? for help", STATUS_STYLE)
            .centered()
            .render(hint_area, buf);
        if let Some(dialog) = self.dialog.as_mut() {
            DatePicker.render(area, buf, dialog);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Main,
    Helping,
    Quitting,
}
