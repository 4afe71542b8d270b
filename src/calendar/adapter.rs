use super::{CalendarDay, CellGeometry, MonthGrid, MonthView, MONTHS_IN_YEAR};
use crate::config::PickerConfig;
use time::{Date, Month};

/// Binds day list positions to months.
///
/// Position 0 is January of the configured minimum year, and there are twelve
/// positions per year through December of the maximum year.  Because months
/// differ in how many week rows they need, the adapter also tracks where each
/// month starts within the list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthAdapter {
    config: PickerConfig,
    selected_day: CalendarDay,
    geometry: CellGeometry,
    // tops[i] is the line at which position i starts; the final element is
    // the height of the whole list
    tops: Vec<u32>,
}

impl MonthAdapter {
    pub(crate) fn new(config: PickerConfig, selected_day: CalendarDay) -> MonthAdapter {
        let mut adapter = MonthAdapter {
            config,
            selected_day,
            geometry: CellGeometry::new(0),
            tops: Vec::new(),
        };
        adapter.layout();
        adapter
    }

    pub(crate) fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Replaces the configuration and recomputes the month layout
    pub(crate) fn set_config(&mut self, config: PickerConfig) {
        self.config = config;
        self.layout();
    }

    pub(crate) fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: CellGeometry) {
        if self.geometry != geometry {
            let relayout = self.geometry.row_height() != geometry.row_height()
                || self.geometry.header_height() != geometry.header_height();
            self.geometry = geometry;
            if relayout {
                self.layout();
            }
        }
    }

    fn layout(&mut self) {
        let count = self.count();
        self.tops.clear();
        self.tops.reserve(count + 1);
        let mut top = 0u32;
        self.tops.push(top);
        for position in 0..count {
            if let Some((year, month)) = self.month_at(position) {
                let grid = MonthGrid::new(year, month, self.config.week_start());
                top = top.saturating_add(self.geometry.height_for(&grid).into());
            }
            self.tops.push(top);
        }
    }

    pub(crate) fn count(&self) -> usize {
        let years = self.config.max_year() - self.config.min_year() + 1;
        usize::try_from(years).unwrap_or_default() * usize::from(MONTHS_IN_YEAR)
    }

    pub(crate) fn month_at(&self, position: usize) -> Option<(i32, Month)> {
        if position >= self.count() {
            return None;
        }
        let per_year = usize::from(MONTHS_IN_YEAR);
        let year = i32::try_from(position / per_year)
            .ok()?
            .checked_add(self.config.min_year())?;
        let month = u8::try_from(position % per_year + 1).ok()?;
        Some((year, Month::try_from(month).ok()?))
    }

    pub(crate) fn position_of(&self, year: i32, month: Month) -> Option<usize> {
        if !self.config.contains_year(year) {
            return None;
        }
        let years = usize::try_from(year - self.config.min_year()).ok()?;
        Some(years * usize::from(MONTHS_IN_YEAR) + usize::from(u8::from(month) - 1))
    }

    pub(crate) fn item_top(&self, position: usize) -> Option<u32> {
        self.tops.get(..self.tops.len().saturating_sub(1))?.get(position).copied()
    }

    pub(crate) fn item_bottom(&self, position: usize) -> Option<u32> {
        self.item_top(position)?;
        self.tops.get(position + 1).copied()
    }

    pub(crate) fn total_height(&self) -> u32 {
        self.tops.last().copied().unwrap_or_default()
    }

    /// The position of the month containing the given line of the list.
    /// Lines past the end of the list belong to the last month.
    pub(crate) fn position_at_offset(&self, offset: u32) -> usize {
        // Index of the first top greater than `offset`, minus one
        let after = self.tops.partition_point(|&top| top <= offset);
        after.saturating_sub(1).min(self.count().saturating_sub(1))
    }

    pub(crate) fn selected_day(&self) -> CalendarDay {
        self.selected_day
    }

    pub(crate) fn set_selected_day(&mut self, day: CalendarDay) {
        self.selected_day = day;
    }

    /// Builds the view for the month at `position`, with the selected day
    /// marked if it falls in that month
    pub(crate) fn month_view(&self, position: usize, today: Date) -> Option<MonthView> {
        let (year, month) = self.month_at(position)?;
        let selected = self
            .selected_day
            .same_month(year, month)
            .then_some(self.selected_day.day);
        Some(
            MonthView::new(year, month, self.config.week_start(), self.geometry, today)
                .selected_day(selected),
        )
    }

    /// Records a tapped day as the new selection and hands it back for
    /// reporting to the dialog
    pub(crate) fn on_day_tapped(&mut self, day: CalendarDay) -> CalendarDay {
        self.set_selected_day(day);
        day
    }
}
