use crate::theme::{
    yearpick::{HIGHLIGHT_STYLE, SELECTED_YEAR_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Position, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 16;
const OUTER_HEIGHT: u16 = 15;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct YearPick;

impl StatefulWidget for YearPick {
    type State = YearPickState;

    /*
     * ................
     * .┌─── Year ───┐.
     * .│    2024    │.
     * .│    2025    │.
     * .│    2026    │.
     * .│    2027    │.
     * .└────────────┘.
     * ................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT.min(area.height)])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Year ")
            .title_alignment(HorizontalAlignment::Center)
            .render(block_area, buf);
        let list_area = block_area.inner(Margin::new(1, 1));
        state.set_list_area(list_area);
        state.to_text().render(list_area, buf);
    }
}

/// The list of selectable years, with the currently selected year and a
/// highlighted year that moves with the arrow keys
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct YearPickState {
    min_year: i32,
    max_year: i32,
    selected_year: i32,
    highlighted: i32,
    // First year shown; `None` until the list has been laid out
    top: Option<i32>,
    list_area: Rect,
}

impl YearPickState {
    pub(crate) fn new(min_year: i32, max_year: i32, selected_year: i32) -> YearPickState {
        let selected_year = selected_year.clamp(min_year, max_year);
        YearPickState {
            min_year,
            max_year,
            selected_year,
            highlighted: selected_year,
            top: None,
            list_area: Rect::default(),
        }
    }

    fn rows(&self) -> i32 {
        i32::from(self.list_area.height.max(1))
    }

    // Keeps the highlighted year on screen, initially centring it
    fn set_list_area(&mut self, list_area: Rect) {
        self.list_area = list_area;
        let rows = self.rows();
        let mut top = self.top.unwrap_or(self.highlighted - rows / 2);
        if self.highlighted < top {
            top = self.highlighted;
        } else if self.highlighted >= top + rows {
            top = self.highlighted - rows + 1;
        }
        let last_top = (self.max_year - rows + 1).max(self.min_year);
        self.top = Some(top.clamp(self.min_year, last_top));
    }

    fn to_text(self) -> Text<'static> {
        let top = self.top.unwrap_or(self.min_year);
        let bottom = (top + self.rows() - 1).min(self.max_year);
        Text::from_iter((top..=bottom).map(|year| {
            let style = if year == self.highlighted {
                HIGHLIGHT_STYLE
            } else if year == self.selected_year {
                SELECTED_YEAR_STYLE
            } else {
                BASE_STYLE
            };
            Line::styled(year.to_string(), style)
        }))
        .centered()
    }

    fn move_by(&mut self, delta: i32) -> YearPickOutput {
        let target = self
            .highlighted
            .saturating_add(delta)
            .clamp(self.min_year, self.max_year);
        if target == self.highlighted {
            YearPickOutput::Invalid
        } else {
            self.highlighted = target;
            YearPickOutput::Ok
        }
    }

    fn year_at(&self, column: u16, row: u16) -> Option<i32> {
        if !self.list_area.contains(Position::new(column, row)) {
            return None;
        }
        let year = self.top?.checked_add(i32::from(row - self.list_area.y))?;
        (year <= self.max_year).then_some(year)
    }

    pub(crate) fn handle_input(&mut self, input: YearPickInput) -> YearPickOutput {
        match input {
            YearPickInput::Previous => self.move_by(-1),
            YearPickInput::Next => self.move_by(1),
            YearPickInput::PageUp => self.move_by(-self.rows()),
            YearPickInput::PageDown => self.move_by(self.rows()),
            YearPickInput::ScrollUp | YearPickInput::ScrollDown => {
                let delta = if input == YearPickInput::ScrollUp { -1 } else { 1 };
                let Some(top) = self.top else {
                    return YearPickOutput::Invalid;
                };
                let last_top = (self.max_year - self.rows() + 1).max(self.min_year);
                let new_top = (top + delta).clamp(self.min_year, last_top);
                if new_top == top {
                    return YearPickOutput::Invalid;
                }
                self.top = Some(new_top);
                // Drag the highlight along so the next render doesn't undo
                // the scroll
                self.highlighted = self
                    .highlighted
                    .clamp(new_top, new_top + self.rows() - 1)
                    .min(self.max_year);
                YearPickOutput::Ok
            }
            YearPickInput::Enter => YearPickOutput::Pick(self.highlighted),
            YearPickInput::Click { column, row } => match self.year_at(column, row) {
                Some(year) => {
                    self.highlighted = year;
                    YearPickOutput::Pick(year)
                }
                None => YearPickOutput::Invalid,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum YearPickInput {
    Previous,
    Next,
    PageUp,
    PageDown,
    ScrollUp,
    ScrollDown,
    Enter,
    Click { column: u16, row: u16 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum YearPickOutput {
    Ok,
    Invalid,
    Pick(i32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn render(state: &mut YearPickState) -> Buffer {
        let area = Rect::new(0, 0, 20, 9);
        let mut buffer = Buffer::empty(area);
        YearPick.render(area, &mut buffer, state);
        buffer
    }

    #[test]
    fn test_render_centres_selected_year() {
        let mut state = YearPickState::new(1900, 2100, 2026);
        let buffer = render(&mut state);
        let expected = Buffer::with_lines([
            "  ................  ",
            "  .┌─── Year ───┐.  ",
            "  .│    2024    │.  ",
            "  .│    2025    │.  ",
            "  .│    2026    │.  ",
            "  .│    2027    │.  ",
            "  .│    2028    │.  ",
            "  .└────────────┘.  ",
            "  ................  ",
        ]);
        for y in 0..9 {
            for x in 0..20 {
                let symbol = expected[(x, y)].symbol();
                if symbol != "." {
                    assert_eq!(buffer[(x, y)].symbol(), symbol, "({x}, {y})");
                }
            }
        }
        assert!(buffer[(9, 4)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(9, 3)].modifier.contains(Modifier::REVERSED));
        assert_eq!(buffer[(9, 3)].fg, BASE_STYLE.fg.unwrap_or_default());
        assert_eq!(buffer[(9, 3)].bg, BASE_STYLE.bg.unwrap_or_default());
    }

    #[test]
    fn test_render_at_range_start() {
        let mut state = YearPickState::new(2025, 2100, 2025);
        render(&mut state);
        assert_eq!(state.top, Some(2025));
        assert_eq!(state.year_at(9, 2), Some(2025));
        assert_eq!(state.year_at(9, 6), Some(2029));
        assert_eq!(state.year_at(9, 7), None);
        assert_eq!(state.year_at(1, 2), None);
    }

    #[test]
    fn test_short_range() {
        let mut state = YearPickState::new(2025, 2026, 2026);
        render(&mut state);
        assert_eq!(state.top, Some(2025));
        assert_eq!(state.year_at(9, 3), Some(2026));
        assert_eq!(state.year_at(9, 4), None);
    }

    #[test]
    fn test_move_highlight() {
        let mut state = YearPickState::new(1900, 2100, 2026);
        render(&mut state);
        assert_eq!(state.handle_input(YearPickInput::Next), YearPickOutput::Ok);
        assert_eq!(state.highlighted, 2027);
        assert_eq!(state.handle_input(YearPickInput::PageDown), YearPickOutput::Ok);
        assert_eq!(state.highlighted, 2032);
        let buffer = render(&mut state);
        assert_eq!(state.top, Some(2028));
        assert_eq!(buffer[(9, 6)].symbol(), "0");
        assert!(buffer[(9, 6)].modifier.contains(Modifier::REVERSED));
        assert_eq!(state.handle_input(YearPickInput::Enter), YearPickOutput::Pick(2032));
    }

    #[test]
    fn test_move_highlight_stops_at_ends() {
        let mut state = YearPickState::new(2000, 2010, 2001);
        render(&mut state);
        assert_eq!(state.handle_input(YearPickInput::Previous), YearPickOutput::Ok);
        assert_eq!(state.handle_input(YearPickInput::Previous), YearPickOutput::Invalid);
        assert_eq!(state.handle_input(YearPickInput::PageUp), YearPickOutput::Invalid);
        assert_eq!(state.highlighted, 2000);
        assert_eq!(state.handle_input(YearPickInput::PageDown), YearPickOutput::Ok);
        assert_eq!(state.handle_input(YearPickInput::PageDown), YearPickOutput::Ok);
        assert_eq!(state.highlighted, 2010);
        assert_eq!(state.handle_input(YearPickInput::Next), YearPickOutput::Invalid);
    }

    #[test]
    fn test_wheel_scroll() {
        let mut state = YearPickState::new(1900, 2100, 2026);
        render(&mut state);
        assert_eq!(state.top, Some(2024));
        for _ in 0..3 {
            assert_eq!(state.handle_input(YearPickInput::ScrollDown), YearPickOutput::Ok);
        }
        assert_eq!(state.top, Some(2027));
        assert_eq!(state.highlighted, 2027);
        render(&mut state);
        assert_eq!(state.top, Some(2027));
    }

    #[test]
    fn test_click() {
        let mut state = YearPickState::new(1900, 2100, 2026);
        render(&mut state);
        assert_eq!(
            state.handle_input(YearPickInput::Click { column: 8, row: 5 }),
            YearPickOutput::Pick(2027)
        );
        assert_eq!(
            state.handle_input(YearPickInput::Click { column: 3, row: 5 }),
            YearPickOutput::Invalid
        );
    }
}
