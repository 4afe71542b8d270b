use super::{CalendarDay, CellGeometry, MonthGrid, WeekdayExt, DAYS_IN_WEEK};
use crate::theme::{BASE_STYLE, SELECTED_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use time::{Date, Month, Weekday};

/// One month of the day list: a title, a row of weekday labels, and the
/// month's days in a 7-column grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    grid: MonthGrid,
    geometry: CellGeometry,
    selected_day: Option<u8>,
    today: Option<u8>,
    focused_day: Option<u8>,
}

impl MonthView {
    pub(crate) fn new(
        year: i32,
        month: Month,
        week_start: Weekday,
        geometry: CellGeometry,
        today: Date,
    ) -> MonthView {
        let today = (today.year() == year && today.month() == month).then_some(today.day());
        MonthView {
            grid: MonthGrid::new(year, month, week_start),
            geometry,
            selected_day: None,
            today,
            focused_day: None,
        }
    }

    pub(crate) fn selected_day(mut self, day: Option<u8>) -> MonthView {
        self.selected_day = day;
        self
    }

    fn calendar_day(&self, day: u8) -> CalendarDay {
        CalendarDay::new(self.grid.year(), self.grid.month(), day)
    }

    /// The day under the given point, relative to the top-left corner of the
    /// month view
    pub(crate) fn day_at(&self, x: u16, y: u16) -> Option<CalendarDay> {
        self.geometry
            .day_at(&self.grid, x, y)
            .map(|day| self.calendar_day(day))
    }

    pub(crate) fn describe_day(&self, day: u8) -> String {
        let date = self.calendar_day(day);
        if self.selected_day == Some(day) {
            format!("{date} selected")
        } else {
            date.to_string()
        }
    }

    pub(crate) fn node(&self, day: u8) -> Option<DayNode> {
        let bounds = self.geometry.day_bounds(&self.grid, day)?;
        Some(DayNode {
            day,
            bounds,
            description: self.describe_day(day),
            selected: self.selected_day == Some(day),
        })
    }

    /// Focuses `day` if it lies in this view's month.  Returns `false` if it
    /// does not.
    pub(crate) fn restore_accessibility_focus(&mut self, day: CalendarDay) -> bool {
        if !day.same_month(self.grid.year(), self.grid.month()) || day.day > self.grid.num_days()
        {
            return false;
        }
        self.focused_day = Some(day.day);
        true
    }

    /// Draws the month into `area`, with the top of the month `top` lines
    /// below the top of `area` (negative if the month is scrolled partly out
    /// of view).  Nothing is drawn outside of `area`.
    pub(crate) fn render_at(&self, area: Rect, top: i64, buf: &mut Buffer) {
        let mut canvas = ClippedCanvas { area, top, buf };
        self.draw_title(&mut canvas);
        self.draw_day_labels(&mut canvas);
        self.draw_days(&mut canvas);
    }

    fn draw_title(&self, canvas: &mut ClippedCanvas<'_>) {
        let title = format!("{} {}", self.grid.month(), self.grid.year());
        let width = self.geometry.width();
        let len = u16::try_from(title.len()).unwrap_or(u16::MAX);
        canvas.mvprint(0, width.saturating_sub(len) / 2, &title, TITLE_STYLE);
    }

    fn draw_day_labels(&self, canvas: &mut ClippedCanvas<'_>) {
        let cell_width = self.geometry.cell_width();
        let y = self.geometry.header_height().saturating_sub(1);
        for column in 0..DAYS_IN_WEEK {
            let label = self.grid.weekday_at_column(column).short_label();
            let len = label.len().min(usize::from(cell_width));
            let label = label.get(..len).unwrap_or_default();
            let x = self.geometry.column_x(column);
            let pad = cell_width.saturating_sub(u16::try_from(len).unwrap_or(u16::MAX)) / 2;
            canvas.mvprint(y, x.saturating_add(pad), label, WEEKDAY_STYLE);
        }
    }

    fn draw_days(&self, canvas: &mut ClippedCanvas<'_>) {
        for day in self.grid.days() {
            let Some(bounds) = self.geometry.day_bounds(&self.grid, day) else {
                continue;
            };
            let style = if self.selected_day == Some(day) {
                canvas.fill(bounds.y, bounds.x, bounds.width, SELECTED_STYLE);
                SELECTED_STYLE
            } else if self.today == Some(day) {
                TODAY_STYLE
            } else {
                BASE_STYLE
            };
            let text = if self.focused_day == Some(day) && bounds.width >= 4 {
                format!("[{day:2}]")
            } else {
                format!("{day:2}")
            };
            let len = u16::try_from(text.len()).unwrap_or(u16::MAX);
            let x = bounds.x + bounds.width.saturating_sub(len) / 2;
            canvas.mvprint(bounds.y, x, &text, style);
        }
    }
}

/// What an assistive surface needs to know about one day of a month view
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayNode {
    pub(crate) day: u8,
    pub(crate) bounds: Rect,
    pub(crate) description: String,
    pub(crate) selected: bool,
}

#[derive(Debug, Eq, PartialEq)]
struct ClippedCanvas<'a> {
    area: Rect,
    top: i64,
    buf: &'a mut Buffer,
}

impl ClippedCanvas<'_> {
    // Converts a line of the month view to an absolute buffer row, if that
    // line is visible
    fn row(&self, y: u16) -> Option<u16> {
        let row = self.top.checked_add(i64::from(y))?;
        u16::try_from(row)
            .ok()
            .filter(|&r| r < self.area.height)
            .map(|r| r + self.area.y)
    }

    fn mvprint(&mut self, y: u16, x: u16, s: &str, style: Style) {
        let Some(row) = self.row(y) else {
            return;
        };
        if x < self.area.width {
            let _ = self.buf.set_stringn(
                x + self.area.x,
                row,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    fn fill(&mut self, y: u16, x: u16, width: u16, style: Style) {
        let Some(row) = self.row(y) else {
            return;
        };
        if x < self.area.width {
            let width = width.min(self.area.width - x);
            self.buf
                .set_style(Rect::new(x + self.area.x, row, width, 1), style);
        }
    }
}
