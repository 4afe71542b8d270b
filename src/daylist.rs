mod scroll;
use self::scroll::{PendingStateChange, ScrollState, SmoothScroll};
use crate::calendar::{CalendarDay, CellGeometry, MonthAdapter, MonthView};
use crate::config::PickerConfig;
use log::{debug, warn};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::StatefulWidget,
};
use std::ops::RangeInclusive;
use std::time::Instant;
use time::{Date, Duration, Month};

/// A month whose top is more than this many lines above the top of the list
/// counts as scrolled off
const LIST_TOP_OFFSET: i64 = 0;

/// Columns left blank on either side of each month grid
const LIST_PADDING: u16 = 1;

/// A vertically scrolling list of every month in the configured year range.
///
/// The scroll offset is measured in lines from the top of the first month.
/// Scroll-state changes are applied after a short delay, and once a fling
/// comes to rest the list snaps to the nearest month boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayPickerView {
    adapter: MonthAdapter,
    today: Date,
    scroll_top: u32,
    viewport: Rect,
    previous_scroll_state: ScrollState,
    current_scroll_state: ScrollState,
    pending_state: Option<PendingStateChange>,
    animation: Option<SmoothScroll>,
    focus: Option<CalendarDay>,
    performing_scroll: bool,
}

impl DayPickerView {
    pub(crate) fn new(
        config: PickerConfig,
        selected_day: CalendarDay,
        today: Date,
        now: Instant,
    ) -> DayPickerView {
        let mut view = DayPickerView {
            adapter: MonthAdapter::new(config, selected_day),
            today,
            scroll_top: 0,
            viewport: Rect::default(),
            previous_scroll_state: ScrollState::Idle,
            current_scroll_state: ScrollState::Idle,
            pending_state: None,
            animation: None,
            focus: None,
            performing_scroll: false,
        };
        view.on_date_changed(selected_day, now);
        view
    }

    /// Rebuilds the list after the configuration changed
    pub(crate) fn on_change(&mut self, config: PickerConfig) {
        if *self.adapter.config() == config {
            return;
        }
        self.adapter.set_config(config);
        self.focus = self
            .focus
            .filter(|day| self.adapter.position_of(day.year, day.month).is_some());
        self.set_scroll_top(self.scroll_top);
    }

    /// Scrolls (without animation) to the month of the newly selected day
    pub(crate) fn on_date_changed(&mut self, selected_day: CalendarDay, now: Instant) {
        self.go_to(selected_day, false, true, true, now);
    }

    /// Brings the month containing `day` to the top of the list.
    ///
    /// Nothing is scrolled if that month is already the first one fully in
    /// view, unless `force_scroll` is set.  Returns `true` if an animated
    /// scroll was started.
    pub(crate) fn go_to(
        &mut self,
        day: CalendarDay,
        animate: bool,
        set_selected: bool,
        force_scroll: bool,
        now: Instant,
    ) -> bool {
        if set_selected {
            self.adapter.set_selected_day(day);
        }
        let Some(position) = self.adapter.position_of(day.year, day.month) else {
            warn!("Cannot go to {day}: outside of the selectable years");
            return false;
        };
        let mut selected_position = self.first_visible_position();
        if self.relative_top(selected_position).unwrap_or_default() < 0 {
            selected_position += 1;
            if selected_position >= self.adapter.count() {
                selected_position = 0;
            }
        }
        debug!("GoTo position {position}");
        if position != selected_position || force_scroll {
            self.previous_scroll_state = ScrollState::Fling;
            if animate {
                return self.smooth_scroll_to_position(position, now);
            }
            self.post_set_selection(position, now);
        }
        false
    }

    /// Jumps so that the month at `position` starts at the top of the list
    pub(crate) fn post_set_selection(&mut self, position: usize, now: Instant) {
        self.animation = None;
        if let Some(top) = self.adapter.item_top(position) {
            self.set_scroll_top(top);
        }
        self.on_scroll_state_changed(ScrollState::Idle, now);
    }

    fn max_scroll(&self) -> u32 {
        self.adapter
            .total_height()
            .saturating_sub(self.viewport.height.into())
    }

    fn set_scroll_top(&mut self, top: u32) {
        let top = top.min(self.max_scroll());
        if top != self.scroll_top {
            self.scroll_top = top;
            self.on_scroll();
        }
        if self.animation.is_none() {
            self.layout_children();
        }
    }

    // Called whenever the scroll offset moves
    fn on_scroll(&mut self) {
        self.previous_scroll_state = self.current_scroll_state;
    }

    fn on_scroll_state_changed(&mut self, state: ScrollState, now: Instant) {
        self.pending_state = Some(PendingStateChange::new(state, now));
    }

    fn apply_scroll_state(&mut self, new_state: ScrollState, now: Instant) {
        self.current_scroll_state = new_state;
        debug!(
            "new scroll state: {new_state:?} old state: {:?}",
            self.previous_scroll_state
        );
        let settling = new_state == ScrollState::Idle
            && self.previous_scroll_state != ScrollState::Idle
            && self.previous_scroll_state != ScrollState::TouchScroll;
        self.previous_scroll_state = new_state;
        if !settling {
            return;
        }
        let first = self.first_visible_position();
        let last = self.last_visible_position();
        let scroll = first != 0 && last != self.adapter.count().saturating_sub(1);
        let (Some(top), Some(bottom)) = (self.relative_top(first), self.relative_bottom(first))
        else {
            return;
        };
        let midpoint = i64::from(self.viewport.height / 2);
        if scroll && top < LIST_TOP_OFFSET {
            if bottom > midpoint {
                self.smooth_scroll_by(top, now);
            } else {
                self.smooth_scroll_by(bottom, now);
            }
        }
    }

    fn smooth_scroll_to_position(&mut self, position: usize, now: Instant) -> bool {
        self.adapter
            .item_top(position)
            .is_some_and(|top| self.start_animation(top, now))
    }

    fn smooth_scroll_by(&mut self, delta: i64, now: Instant) {
        let target = i64::from(self.scroll_top).saturating_add(delta);
        let target = u32::try_from(target.max(0)).unwrap_or(u32::MAX);
        self.start_animation(target, now);
    }

    // Returns `false` if the list is already at `target` (after clamping)
    fn start_animation(&mut self, target: u32, now: Instant) -> bool {
        let target = target.min(self.max_scroll());
        if target == self.scroll_top {
            self.animation = None;
            return false;
        }
        self.animation = Some(SmoothScroll::new(self.scroll_top, target, now));
        self.on_scroll_state_changed(ScrollState::Fling, now);
        true
    }

    /// Moves the list directly by `lines` (negative to move up), as with a
    /// mouse wheel
    pub(crate) fn scroll_by_lines(&mut self, lines: i64, now: Instant) {
        self.animation = None;
        self.apply_scroll_state(ScrollState::TouchScroll, now);
        let target = i64::from(self.scroll_top).saturating_add(lines).max(0);
        self.set_scroll_top(u32::try_from(target).unwrap_or(u32::MAX));
        self.on_scroll_state_changed(ScrollState::Idle, now);
    }

    /// Animates the list by one viewport height, after which it settles on a
    /// month boundary
    pub(crate) fn fling(&mut self, forwards: bool, now: Instant) {
        let page = i64::from(self.viewport.height.max(1));
        self.smooth_scroll_by(if forwards { page } else { -page }, now);
    }

    /// Advances animations and runs a due scroll-state change.  Returns
    /// `true` if anything changed.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(anim) = self.animation {
            let offset = anim.offset_at(now);
            if anim.is_finished(now) {
                self.animation = None;
                self.on_scroll_state_changed(ScrollState::Idle, now);
            }
            self.set_scroll_top(offset);
            changed = true;
        }
        if let Some(pending) = self.pending_state.filter(|p| p.is_due(now)) {
            self.pending_state = None;
            self.apply_scroll_state(pending.state, now);
            changed = true;
        }
        changed
    }

    /// When [`DayPickerView::tick`] next needs to be called
    pub(crate) fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let frame = self.animation.map(|anim| anim.next_frame(now));
        let pending = self.pending_state.map(|p| p.due);
        match (frame, pending) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn relative_top(&self, position: usize) -> Option<i64> {
        let top = self.adapter.item_top(position)?;
        Some(i64::from(top) - i64::from(self.scroll_top))
    }

    fn relative_bottom(&self, position: usize) -> Option<i64> {
        let bottom = self.adapter.item_bottom(position)?;
        Some(i64::from(bottom) - i64::from(self.scroll_top))
    }

    pub(crate) fn first_visible_position(&self) -> usize {
        self.adapter.position_at_offset(self.scroll_top)
    }

    pub(crate) fn last_visible_position(&self) -> usize {
        let bottom_line = self
            .scroll_top
            .saturating_add(u32::from(self.viewport.height.saturating_sub(1)));
        self.adapter.position_at_offset(bottom_line)
    }

    fn visible_positions(&self) -> RangeInclusive<usize> {
        self.first_visible_position()..=self.last_visible_position()
    }

    /// The position of the month taking up the most lines of the list
    pub(crate) fn most_visible_position(&self) -> usize {
        let height = i64::from(self.viewport.height);
        let mut most_visible = self.first_visible_position();
        let mut max_displayed = 0;
        for position in self.visible_positions() {
            let (Some(top), Some(bottom)) =
                (self.relative_top(position), self.relative_bottom(position))
            else {
                break;
            };
            let displayed = bottom.min(height) - top.max(0);
            if displayed > max_displayed {
                most_visible = position;
                max_displayed = displayed;
            }
        }
        most_visible
    }

    /// Moves to the first day of the next month (forwards) or the previous
    /// month (backwards), returning an announcement of the month scrolled to.
    /// Returns `None` if the list cannot move that way.
    ///
    /// When scrolling backwards from a month that is partly scrolled off the
    /// top, the list returns to the start of that month instead.
    pub(crate) fn perform_accessibility_scroll(
        &mut self,
        forwards: bool,
        now: Instant,
    ) -> Option<String> {
        let first = self.first_visible_position();
        let (year, month) = self.adapter.month_at(first)?;
        let mut day = CalendarDay::new(year, month, 1);
        if forwards {
            day = if month == Month::December {
                CalendarDay::new(year + 1, Month::January, 1)
            } else {
                CalendarDay::new(year, month.next(), 1)
            };
        } else if self.relative_top(first)? >= LIST_TOP_OFFSET {
            day = if month == Month::January {
                CalendarDay::new(year - 1, Month::December, 1)
            } else {
                CalendarDay::new(year, month.previous(), 1)
            };
        }
        self.adapter.position_of(day.year, day.month)?;
        if !self.go_to(day, true, false, true, now) {
            return None;
        }
        self.performing_scroll = true;
        Some(format!("{} {}", day.month, day.year))
    }

    // Keeps the focused day only while its month is on screen, except right
    // after an accessibility scroll, which always drops it
    fn layout_children(&mut self) {
        let focused = self.focus.take();
        if self.performing_scroll {
            self.performing_scroll = false;
        } else if let Some(day) = focused {
            if self.restore_accessibility_focus(day) {
                self.focus = Some(day);
            }
        }
    }

    fn restore_accessibility_focus(&self, day: CalendarDay) -> bool {
        self.visible_positions().any(|position| {
            self.adapter
                .month_view(position, self.today)
                .is_some_and(|mut view| view.restore_accessibility_focus(day))
        })
    }

    /// Moves the keyboard focus by `days` days, first focusing a day in view
    /// if nothing has focus yet.  The list scrolls to keep the focused day in
    /// view.  Returns `false` if the focus would leave the selectable years.
    pub(crate) fn move_focus(&mut self, days: i64, now: Instant) -> bool {
        let target = match self.focus {
            Some(day) => {
                let Some(date) = day
                    .to_date()
                    .and_then(|d| d.checked_add(Duration::days(days)))
                else {
                    return false;
                };
                CalendarDay::from_date(date)
            }
            None => self.default_focus(),
        };
        let Some(position) = self.adapter.position_of(target.year, target.month) else {
            return false;
        };
        self.focus = Some(target);
        if !self.is_day_in_view(position, target.day) {
            self.go_to(target, true, false, true, now);
        }
        true
    }

    fn default_focus(&self) -> CalendarDay {
        let selected = self.adapter.selected_day();
        let visible = self
            .adapter
            .position_of(selected.year, selected.month)
            .is_some_and(|position| self.is_day_in_view(position, selected.day));
        if visible {
            return selected;
        }
        match self.adapter.month_at(self.most_visible_position()) {
            Some((year, month)) => CalendarDay::new(year, month, 1),
            None => selected,
        }
    }

    fn is_day_in_view(&self, position: usize, day: u8) -> bool {
        let Some(bounds) = self
            .adapter
            .month_view(position, self.today)
            .and_then(|view| view.node(day))
            .map(|node| node.bounds)
        else {
            return false;
        };
        let Some(top) = self.relative_top(position) else {
            return false;
        };
        let cell_top = top + i64::from(bounds.y);
        cell_top >= 0 && cell_top + i64::from(bounds.height) <= i64::from(self.viewport.height)
    }

    /// Description of the focused day for announcing
    pub(crate) fn focus_description(&self) -> Option<String> {
        let day = self.focus?;
        let position = self.adapter.position_of(day.year, day.month)?;
        let node = self.adapter.month_view(position, self.today)?.node(day.day)?;
        Some(node.description)
    }

    /// Taps the focused day, if any
    pub(crate) fn activate_focus(&mut self) -> Option<CalendarDay> {
        let day = self.focus?;
        Some(self.adapter.on_day_tapped(day))
    }

    /// The day drawn at the given terminal coordinates, if any
    pub(crate) fn day_at(&self, column: u16, row: u16) -> Option<CalendarDay> {
        if !self.viewport.contains(Position::new(column, row)) {
            return None;
        }
        let offset = self
            .scroll_top
            .saturating_add(u32::from(row - self.viewport.y));
        let position = self.adapter.position_at_offset(offset);
        let local_y = u16::try_from(offset.checked_sub(self.adapter.item_top(position)?)?).ok()?;
        self.adapter
            .month_view(position, self.today)?
            .day_at(column - self.viewport.x, local_y)
    }

    /// Handles a click at the given terminal coordinates, returning the
    /// tapped day
    pub(crate) fn on_click(&mut self, column: u16, row: u16) -> Option<CalendarDay> {
        let day = self.day_at(column, row)?;
        self.focus = Some(day);
        Some(self.adapter.on_day_tapped(day))
    }

    fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        let geometry = CellGeometry::new(area.width)
            .with_padding(LIST_PADDING)
            .with_row_height(self.adapter.geometry().row_height());
        self.adapter.set_geometry(geometry);
        if self.animation.is_none() {
            self.set_scroll_top(self.scroll_top);
        }
    }

    fn visible_month_views(&self) -> impl Iterator<Item = (i64, MonthView)> + '_ {
        self.visible_positions().filter_map(|position| {
            let top = self.relative_top(position)?;
            let mut view = self.adapter.month_view(position, self.today)?;
            if let Some(day) = self.focus {
                view.restore_accessibility_focus(day);
            }
            Some((top, view))
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DayPicker;

impl StatefulWidget for DayPicker {
    type State = DayPickerView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.set_viewport(area);
        for (top, view) in state.visible_month_views() {
            view.render_at(area, top, buf);
        }
    }
}
