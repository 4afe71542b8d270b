use crate::calendar::CalendarDay;
use crate::config::{ConfigError, PickerConfig};
use crate::daylist::{DayPicker, DayPickerView};
use crate::theme::{
    dialog::{HEADER_DATE_STYLE, HEADER_STYLE, HEADER_YEAR_STYLE},
    BASE_STYLE, BUTTON_STYLE, STATUS_STYLE,
};
use crate::yearpick::{YearPick, YearPickInput, YearPickOutput, YearPickState};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use log::info;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, HorizontalAlignment, Layout, Position, Rect},
    text::Line,
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use std::time::Instant;
use time::{Date, Month};

/// Width of the dialog, borders included.  This leaves room for seven
/// five-column day cells plus a column of padding on each side.
const DIALOG_WIDTH: u16 = 39;

const DIALOG_HEIGHT: u16 = 30;

const HEADER_HEIGHT: u16 = 3;

const DONE_BUTTON: &str = "[ Done ]";

/// Lines moved per mouse wheel notch
const WHEEL_LINES: i64 = 3;

/// The value reported to the host when the user confirms a date.  `month0`
/// counts from zero (January = 0).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DateSet {
    pub(crate) year: i32,
    pub(crate) month0: u8,
    pub(crate) day: u8,
}

impl DateSet {
    pub(crate) fn to_date(self) -> Option<Date> {
        let month = Month::try_from(self.month0.checked_add(1)?).ok()?;
        Date::from_calendar_date(self.year, month, self.day).ok()
    }
}

impl From<CalendarDay> for DateSet {
    fn from(day: CalendarDay) -> DateSet {
        DateSet {
            year: day.year,
            month0: day.month0(),
            day: day.day,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DialogOutput {
    Ok,
    Invalid,
    DateSet(DateSet),
    Dismissed,
}

impl From<bool> for DialogOutput {
    fn from(ok: bool) -> DialogOutput {
        if ok {
            DialogOutput::Ok
        } else {
            DialogOutput::Invalid
        }
    }
}

/// The date picker controller: owns the selected day and the configuration,
/// and routes input to the day list or the year picker
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DatePickerDialog {
    config: PickerConfig,
    selected: CalendarDay,
    day_picker: DayPickerView,
    year_picker: Option<YearPickState>,
    announcement: Option<String>,
    date_set_sent: bool,
    // Hit-testing areas from the last render
    month_day_area: Rect,
    year_area: Rect,
    list_area: Rect,
    done_area: Rect,
}

impl DatePickerDialog {
    pub(crate) fn new(
        config: PickerConfig,
        selected: CalendarDay,
        today: Date,
        now: Instant,
    ) -> DatePickerDialog {
        let selected = config.clamp_day(selected);
        info!("Opening date picker at {selected}");
        DatePickerDialog {
            config,
            selected,
            day_picker: DayPickerView::new(config, selected, today, now),
            year_picker: None,
            announcement: None,
            date_set_sent: false,
            month_day_area: Rect::default(),
            year_area: Rect::default(),
            list_area: Rect::default(),
            done_area: Rect::default(),
        }
    }

    pub(crate) fn announcement(&self) -> Option<&str> {
        self.announcement.as_deref()
    }

    pub(crate) fn set_first_day_of_week(
        &mut self,
        day: u8,
        now: Instant,
    ) -> Result<(), ConfigError> {
        self.config.set_first_day_of_week(day)?;
        self.refresh(now);
        Ok(())
    }

    pub(crate) fn set_year_range(
        &mut self,
        start: i32,
        end: i32,
        now: Instant,
    ) -> Result<(), ConfigError> {
        self.config.set_year_range(start, end)?;
        self.selected = self.config.clamp_day(self.selected);
        if self.year_picker.is_some() {
            self.open_year_picker();
        }
        self.refresh(now);
        Ok(())
    }

    fn refresh(&mut self, now: Instant) {
        self.day_picker.on_change(self.config);
        self.day_picker.on_date_changed(self.selected, now);
    }

    /// Moves the selection to the same month and day in `year`, falling back
    /// to the end of the month if that day does not exist there
    pub(crate) fn on_year_selected(&mut self, year: i32, now: Instant) {
        self.selected = self.config.clamp_day(self.selected.with_year(year));
        self.year_picker = None;
        self.day_picker.on_date_changed(self.selected, now);
        self.announce(self.selected.to_string());
    }

    pub(crate) fn on_day_of_month_selected(&mut self, day: CalendarDay, now: Instant) {
        self.selected = self.config.clamp_day(day);
        self.day_picker.on_date_changed(self.selected, now);
        self.announce(self.selected.to_string());
    }

    /// Returns to the day list, scrolled to the selected day
    pub(crate) fn set_current_view(&mut self, now: Instant) {
        self.year_picker = None;
        self.day_picker.on_date_changed(self.selected, now);
        self.announce(String::from("Select day"));
    }

    fn open_year_picker(&mut self) {
        self.year_picker = Some(YearPickState::new(
            self.config.min_year(),
            self.config.max_year(),
            self.selected.year,
        ));
        self.announce(String::from("Select year"));
    }

    fn announce(&mut self, text: String) {
        info!("Announcing {text:?}");
        self.announcement = Some(text);
    }

    /// Reports the selection.  This only ever produces a value once per
    /// dialog.
    pub(crate) fn try_notify_date_set(&mut self) -> Option<DateSet> {
        if std::mem::replace(&mut self.date_set_sent, true) {
            return None;
        }
        info!("Date picked: {}", self.selected);
        Some(DateSet::from(self.selected))
    }

    fn done(&mut self) -> DialogOutput {
        match self.try_notify_date_set() {
            Some(date_set) => DialogOutput::DateSet(date_set),
            None => DialogOutput::Invalid,
        }
    }

    fn weekday_label(&self) -> String {
        self.selected.weekday().to_string().to_uppercase()
    }

    fn month_day_label(&self) -> String {
        let month = self.selected.month.to_string();
        let short = month.get(..3).unwrap_or(&month).to_uppercase();
        format!("{short} {:02}", self.selected.day)
    }

    fn year_label(&self) -> String {
        self.selected.year.to_string()
    }

    fn next_week_start(&self) -> u8 {
        self.config.week_start().number_from_sunday() % 7 + 1
    }

    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        self.day_picker.tick(now)
    }

    pub(crate) fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.day_picker.next_deadline(now)
    }

    fn focus_moved(&mut self, moved: bool) -> DialogOutput {
        if moved {
            if let Some(description) = self.day_picker.focus_description() {
                self.announce(description);
            }
        }
        moved.into()
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode, now: Instant) -> DialogOutput {
        if self.year_picker.is_some() {
            let input = match key {
                KeyCode::Char('k') | KeyCode::Up => YearPickInput::Previous,
                KeyCode::Char('j') | KeyCode::Down => YearPickInput::Next,
                KeyCode::PageUp => YearPickInput::PageUp,
                KeyCode::PageDown => YearPickInput::PageDown,
                KeyCode::Enter | KeyCode::Char(' ') => YearPickInput::Enter,
                KeyCode::Char('y' | 'q') | KeyCode::Esc => {
                    self.set_current_view(now);
                    return DialogOutput::Ok;
                }
                _ => return DialogOutput::Invalid,
            };
            return self.handle_year_pick(input, now);
        }
        match key {
            KeyCode::Left => {
                let moved = self.day_picker.move_focus(-1, now);
                self.focus_moved(moved)
            }
            KeyCode::Right => {
                let moved = self.day_picker.move_focus(1, now);
                self.focus_moved(moved)
            }
            KeyCode::Up => {
                let moved = self.day_picker.move_focus(-7, now);
                self.focus_moved(moved)
            }
            KeyCode::Down => {
                let moved = self.day_picker.move_focus(7, now);
                self.focus_moved(moved)
            }
            KeyCode::Char('k') => {
                self.day_picker.scroll_by_lines(-1, now);
                DialogOutput::Ok
            }
            KeyCode::Char('j') => {
                self.day_picker.scroll_by_lines(1, now);
                DialogOutput::Ok
            }
            KeyCode::PageUp => {
                self.day_picker.fling(false, now);
                DialogOutput::Ok
            }
            KeyCode::PageDown => {
                self.day_picker.fling(true, now);
                DialogOutput::Ok
            }
            KeyCode::Char('[' | ']') => {
                let forwards = key == KeyCode::Char(']');
                match self.day_picker.perform_accessibility_scroll(forwards, now) {
                    Some(announcement) => {
                        self.announce(announcement);
                        DialogOutput::Ok
                    }
                    None => DialogOutput::Invalid,
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.day_picker.activate_focus() {
                Some(day) => {
                    self.on_day_of_month_selected(day, now);
                    DialogOutput::Ok
                }
                None => DialogOutput::Invalid,
            },
            KeyCode::Char('m') => {
                self.set_current_view(now);
                DialogOutput::Ok
            }
            KeyCode::Char('y') => {
                self.open_year_picker();
                DialogOutput::Ok
            }
            KeyCode::Char('w') => self
                .set_first_day_of_week(self.next_week_start(), now)
                .is_ok()
                .into(),
            KeyCode::Char('d') => self.done(),
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("Date picker dismissed");
                DialogOutput::Dismissed
            }
            _ => DialogOutput::Invalid,
        }
    }

    fn handle_year_pick(&mut self, input: YearPickInput, now: Instant) -> DialogOutput {
        let Some(picker) = self.year_picker.as_mut() else {
            return DialogOutput::Invalid;
        };
        match picker.handle_input(input) {
            YearPickOutput::Ok => DialogOutput::Ok,
            YearPickOutput::Invalid => DialogOutput::Invalid,
            YearPickOutput::Pick(year) => {
                self.on_year_selected(year, now);
                DialogOutput::Ok
            }
        }
    }

    pub(crate) fn handle_mouse(&mut self, event: MouseEvent, now: Instant) -> DialogOutput {
        let pos = Position::new(event.column, event.row);
        if self.year_picker.is_some() {
            let input = match event.kind {
                MouseEventKind::ScrollUp => YearPickInput::ScrollUp,
                MouseEventKind::ScrollDown => YearPickInput::ScrollDown,
                MouseEventKind::Down(MouseButton::Left) => YearPickInput::Click {
                    column: event.column,
                    row: event.row,
                },
                _ => return DialogOutput::Ok,
            };
            return self.handle_year_pick(input, now);
        }
        match event.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                if self.list_area.contains(pos) =>
            {
                let lines = if event.kind == MouseEventKind::ScrollUp {
                    -WHEEL_LINES
                } else {
                    WHEEL_LINES
                };
                self.day_picker.scroll_by_lines(lines, now);
                DialogOutput::Ok
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.done_area.contains(pos) {
                    self.done()
                } else if self.year_area.contains(pos) {
                    self.open_year_picker();
                    DialogOutput::Ok
                } else if self.month_day_area.contains(pos) {
                    self.set_current_view(now);
                    DialogOutput::Ok
                } else if let Some(day) = self.day_picker.on_click(event.column, event.row) {
                    self.on_day_of_month_selected(day, now);
                    DialogOutput::Ok
                } else {
                    DialogOutput::Invalid
                }
            }
            _ => DialogOutput::Ok,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DatePicker;

impl StatefulWidget for DatePicker {
    type State = DatePickerDialog;

    /*
     * ┌─────────────────────────────────────┐
     * │               SUNDAY                │
     * │               OCT 18                │
     * │                2026                 │
     * │            October 2026             │
     * │  SUN  MON  TUE  WED  THU  FRI  SAT  │
     * │                      1    2    3    │
     * │ …                                   │
     * │ (announcement)                      │
     * │                            [ Done ] │
     * └─────────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([DIALOG_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([DIALOG_HEIGHT.min(area.height)])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        let block = Block::bordered().style(BASE_STYLE);
        let inner = block.inner(outer_area);
        block.render(outer_area, buf);
        let [header_area, list_area, status_area, button_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        buf.set_style(header_area, HEADER_STYLE);
        let [weekday_area, month_day_area, year_area] =
            Layout::vertical([1; 3]).areas(header_area);
        Line::styled(state.weekday_label(), HEADER_STYLE)
            .centered()
            .render(weekday_area, buf);
        Line::styled(state.month_day_label(), HEADER_DATE_STYLE)
            .centered()
            .render(month_day_area, buf);
        Line::styled(state.year_label(), HEADER_YEAR_STYLE)
            .centered()
            .render(year_area, buf);
        state.month_day_area = month_day_area;
        state.year_area = year_area;

        state.list_area = list_area;
        DayPicker.render(list_area, buf, &mut state.day_picker);
        if let Some(picker) = state.year_picker.as_mut() {
            YearPick.render(list_area, buf, picker);
        }

        if let Some(announcement) = state.announcement() {
            Line::styled(announcement, STATUS_STYLE).render(status_area, buf);
        }

        let width = u16::try_from(DONE_BUTTON.len()).unwrap_or(u16::MAX);
        let [_, done_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Length(1),
        ])
        .areas(button_area);
        Line::styled(DONE_BUTTON, BUTTON_STYLE)
            .alignment(HorizontalAlignment::Right)
            .render(done_area, buf);
        state.done_area = done_area;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use time::macros::date;
    use time::Weekday;

    const TODAY: Date = date!(2026 - 10 - 18);

    fn dialog(now: Instant) -> DatePickerDialog {
        DatePickerDialog::new(
            PickerConfig::default(),
            CalendarDay::from_date(TODAY),
            TODAY,
            now,
        )
    }

    fn render(dialog: &mut DatePickerDialog) -> Buffer {
        let area = Rect::new(0, 0, 39, 30);
        let mut buffer = Buffer::empty(area);
        DatePicker.render(area, &mut buffer, dialog);
        buffer
    }

    fn inner_line(buf: &Buffer, y: u16) -> String {
        (1..38)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim()
            .to_owned()
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_new_clamps_selection() {
        let mut config = PickerConfig::default();
        config.set_year_range(2000, 2010).unwrap();
        let now = Instant::now();
        let dialog = DatePickerDialog::new(config, CalendarDay::from_date(TODAY), TODAY, now);
        assert_eq!(dialog.selected, CalendarDay::new(2010, Month::December, 31));
    }

    #[test]
    fn test_header_labels() {
        let dialog = dialog(Instant::now());
        assert_eq!(dialog.weekday_label(), "SUNDAY");
        assert_eq!(dialog.month_day_label(), "OCT 18");
        assert_eq!(dialog.year_label(), "2026");
    }

    #[test]
    fn test_render() {
        let mut dialog = dialog(Instant::now());
        let buffer = render(&mut dialog);
        assert_eq!(buffer[(0, 0)].symbol(), "┌");
        assert_eq!(buffer[(38, 29)].symbol(), "┘");
        assert_eq!(inner_line(&buffer, 1), "SUNDAY");
        assert_eq!(inner_line(&buffer, 2), "OCT 18");
        assert_eq!(inner_line(&buffer, 3), "2026");
        assert_eq!(inner_line(&buffer, 4), "October 2026");
        assert_eq!(inner_line(&buffer, 5), "SUN  MON  TUE  WED  THU  FRI  SAT");
        assert_eq!(inner_line(&buffer, 6), "1    2    3");
        assert_eq!(inner_line(&buffer, 27), "");
        assert_eq!(inner_line(&buffer, 28), "[ Done ]");
        assert_eq!(buffer[(29, 28)].symbol(), "[");
        assert_eq!(buffer[(5, 2)].bg, HEADER_STYLE.bg.unwrap_or_default());
    }

    #[test]
    fn test_on_year_selected_clamps_day() {
        let now = Instant::now();
        let mut dialog = DatePickerDialog::new(
            PickerConfig::default(),
            CalendarDay::new(2024, Month::February, 29),
            TODAY,
            now,
        );
        dialog.on_year_selected(2025, now);
        assert_eq!(dialog.selected, CalendarDay::new(2025, Month::February, 28));
        assert_eq!(dialog.announcement(), Some("28 February 2025"));
        assert_eq!(dialog.month_day_label(), "FEB 28");
    }

    #[test]
    fn test_on_day_of_month_selected() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        dialog.on_day_of_month_selected(CalendarDay::new(2026, Month::November, 3), now);
        assert_eq!(dialog.selected, CalendarDay::new(2026, Month::November, 3));
        assert_eq!(dialog.announcement(), Some("03 November 2026"));
        assert_eq!(dialog.weekday_label(), "TUESDAY");
    }

    #[test]
    fn test_done_reports_once() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        assert_eq!(
            dialog.handle_key(KeyCode::Char('d'), now),
            DialogOutput::DateSet(DateSet {
                year: 2026,
                month0: 9,
                day: 18
            })
        );
        assert_eq!(dialog.handle_key(KeyCode::Char('d'), now), DialogOutput::Invalid);
        assert_eq!(dialog.try_notify_date_set(), None);
    }

    #[test]
    fn test_dismiss() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        assert_eq!(dialog.handle_key(KeyCode::Esc, now), DialogOutput::Dismissed);
    }

    #[test]
    fn test_date_set_to_date() {
        let date_set = DateSet::from(CalendarDay::new(2024, Month::January, 31));
        assert_eq!(date_set.month0, 0);
        assert_eq!(date_set.to_date(), Some(date!(2024 - 01 - 31)));
        let bad = DateSet {
            year: 2024,
            month0: 12,
            day: 1,
        };
        assert_eq!(bad.to_date(), None);
    }

    #[test]
    fn test_year_picker_keys() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        render(&mut dialog);
        assert_eq!(dialog.handle_key(KeyCode::Char('y'), now), DialogOutput::Ok);
        assert_eq!(dialog.announcement(), Some("Select year"));
        assert_eq!(dialog.handle_key(KeyCode::Char('x'), now), DialogOutput::Invalid);
        assert_eq!(dialog.handle_key(KeyCode::Down, now), DialogOutput::Ok);
        assert_eq!(dialog.handle_key(KeyCode::Enter, now), DialogOutput::Ok);
        assert_eq!(dialog.selected, CalendarDay::new(2027, Month::October, 18));
        assert_eq!(dialog.announcement(), Some("18 October 2027"));
        assert!(dialog.year_picker.is_none());
    }

    #[test]
    fn test_year_picker_escape() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        dialog.handle_key(KeyCode::Char('y'), now);
        assert_eq!(dialog.handle_key(KeyCode::Esc, now), DialogOutput::Ok);
        assert!(dialog.year_picker.is_none());
        assert_eq!(dialog.announcement(), Some("Select day"));
        assert_eq!(dialog.selected, CalendarDay::from_date(TODAY));
    }

    #[test]
    fn test_focus_keys() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        render(&mut dialog);
        assert_eq!(dialog.handle_key(KeyCode::Enter, now), DialogOutput::Invalid);
        assert_eq!(dialog.handle_key(KeyCode::Right, now), DialogOutput::Ok);
        assert_eq!(dialog.announcement(), Some("18 October 2026 selected"));
        assert_eq!(dialog.handle_key(KeyCode::Right, now), DialogOutput::Ok);
        assert_eq!(dialog.announcement(), Some("19 October 2026"));
        assert_eq!(dialog.handle_key(KeyCode::Enter, now), DialogOutput::Ok);
        assert_eq!(dialog.selected, CalendarDay::new(2026, Month::October, 19));
        assert_eq!(dialog.announcement(), Some("19 October 2026"));
    }

    #[test]
    fn test_accessibility_scroll_keys() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        render(&mut dialog);
        assert_eq!(dialog.handle_key(KeyCode::Char(']'), now), DialogOutput::Ok);
        assert_eq!(dialog.announcement(), Some("November 2026"));
        assert_eq!(dialog.selected, CalendarDay::from_date(TODAY));
    }

    #[test]
    fn test_week_start() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        assert_eq!(
            dialog.set_first_day_of_week(0, now),
            Err(ConfigError::WeekStartOutOfRange(0))
        );
        assert_eq!(dialog.set_first_day_of_week(2, now), Ok(()));
        assert_eq!(dialog.config.week_start(), Weekday::Monday);
        let buffer = render(&mut dialog);
        assert_eq!(inner_line(&buffer, 5), "MON  TUE  WED  THU  FRI  SAT  SUN");
        assert_eq!(dialog.handle_key(KeyCode::Char('w'), now), DialogOutput::Ok);
        assert_eq!(dialog.config.week_start(), Weekday::Tuesday);
        assert_eq!(dialog.set_first_day_of_week(7, now), Ok(()));
        dialog.handle_key(KeyCode::Char('w'), now);
        assert_eq!(dialog.config.week_start(), Weekday::Sunday);
    }

    #[test]
    fn test_set_year_range() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        assert_eq!(
            dialog.set_year_range(2030, 2020, now),
            Err(ConfigError::InvertedYearRange {
                start: 2030,
                end: 2020
            })
        );
        assert_eq!(dialog.selected, CalendarDay::from_date(TODAY));
        assert_eq!(dialog.set_year_range(2030, 2040, now), Ok(()));
        assert_eq!(dialog.selected, CalendarDay::new(2030, Month::January, 1));
    }

    #[test]
    fn test_mouse() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        render(&mut dialog);
        // October 2026 starts on a Thursday, two lines below the top of the
        // day list
        assert_eq!(dialog.handle_mouse(click(23, 6), now), DialogOutput::Ok);
        assert_eq!(dialog.selected, CalendarDay::new(2026, Month::October, 1));
        assert_eq!(dialog.announcement(), Some("01 October 2026"));
        assert_eq!(dialog.handle_mouse(click(3, 8), now), DialogOutput::Ok);
        assert_eq!(dialog.selected, CalendarDay::new(2026, Month::October, 4));
        assert_eq!(dialog.handle_mouse(click(3, 6), now), DialogOutput::Invalid);
        assert_eq!(dialog.handle_mouse(click(20, 2), now), DialogOutput::Ok);
        assert_eq!(dialog.announcement(), Some("Select day"));
        assert_eq!(dialog.handle_mouse(click(20, 3), now), DialogOutput::Ok);
        assert!(dialog.year_picker.is_some());
        dialog.handle_key(KeyCode::Esc, now);
        assert_eq!(
            dialog.handle_mouse(click(33, 28), now),
            DialogOutput::DateSet(DateSet {
                year: 2026,
                month0: 9,
                day: 4
            })
        );
    }

    #[test]
    fn test_wheel() {
        let now = Instant::now();
        let mut dialog = dialog(now);
        render(&mut dialog);
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(dialog.handle_mouse(wheel, now), DialogOutput::Ok);
        let buffer = render(&mut dialog);
        // Three lines into October: the first week has scrolled away
        assert_eq!(inner_line(&buffer, 4), "");
        assert_eq!(inner_line(&buffer, 5), "4    5    6    7    8    9   10");
    }
}
