use super::{days_in_month, first_weekday, WeekdayExt, DAYS_IN_WEEK};
use ratatui::layout::Rect;
use std::ops::RangeInclusive;
use time::{Month, Weekday};

/// Placement of one month's days in a 7-column grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    year: i32,
    month: Month,
    week_start: Weekday,
    offset: u8,
    num_days: u8,
}

impl MonthGrid {
    pub(crate) fn new(year: i32, month: Month, week_start: Weekday) -> MonthGrid {
        let first = first_weekday(year, month);
        let offset = (first.index0() + DAYS_IN_WEEK - week_start.index0()) % DAYS_IN_WEEK;
        MonthGrid {
            year,
            month,
            week_start,
            offset,
            num_days: days_in_month(year, month),
        }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    /// Number of blank cells before day 1
    pub(crate) fn day_offset(&self) -> u8 {
        self.offset
    }

    pub(crate) fn num_days(&self) -> u8 {
        self.num_days
    }

    pub(crate) fn days(&self) -> RangeInclusive<u8> {
        1..=self.num_days
    }

    /// Minimum number of week rows that hold the offset cells plus every day
    /// of the month
    pub(crate) fn num_rows(&self) -> u8 {
        let cells = self.day_offset() + self.num_days;
        cells / DAYS_IN_WEEK + u8::from(cells % DAYS_IN_WEEK > 0)
    }

    pub(crate) fn weekday_at_column(&self, column: u8) -> Weekday {
        self.week_start.nth_next(column % DAYS_IN_WEEK)
    }

    /// Returns the `(row, column)` of the given day, or `None` if the month
    /// has no such day
    pub(crate) fn cell_of(&self, day: u8) -> Option<(u8, u8)> {
        if !self.days().contains(&day) {
            return None;
        }
        let index = day - 1 + self.day_offset();
        Some((index / DAYS_IN_WEEK, index % DAYS_IN_WEEK))
    }

    pub(crate) fn day_at_cell(&self, row: u16, column: u16) -> Option<u8> {
        if column >= u16::from(DAYS_IN_WEEK) {
            return None;
        }
        let index = u32::from(row) * u32::from(DAYS_IN_WEEK) + u32::from(column);
        let day = index.checked_sub(u32::from(self.day_offset()))? + 1;
        u8::try_from(day).ok().filter(|d| *d <= self.num_days)
    }
}

/// Measurements of a month view in terminal cells.
///
/// A month view is laid out as a header of `header_height` lines (title and
/// weekday labels) followed by one row of `row_height` lines per week.  Each
/// of the seven columns is `cell_width()` columns wide, starting `padding`
/// columns in from the left edge; any leftover columns on the right are not
/// part of the grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CellGeometry {
    width: u16,
    padding: u16,
    header_height: u16,
    row_height: u16,
}

impl CellGeometry {
    pub(crate) const DEFAULT_HEADER_HEIGHT: u16 = 2;

    pub(crate) const DEFAULT_ROW_HEIGHT: u16 = 2;

    pub(crate) const MIN_ROW_HEIGHT: u16 = 1;

    pub(crate) fn new(width: u16) -> CellGeometry {
        CellGeometry {
            width,
            padding: 0,
            header_height: CellGeometry::DEFAULT_HEADER_HEIGHT,
            row_height: CellGeometry::DEFAULT_ROW_HEIGHT,
        }
    }

    pub(crate) fn with_padding(mut self, padding: u16) -> CellGeometry {
        self.padding = padding;
        self
    }

    pub(crate) fn with_row_height(mut self, row_height: u16) -> CellGeometry {
        self.row_height = row_height.max(CellGeometry::MIN_ROW_HEIGHT);
        self
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn header_height(&self) -> u16 {
        self.header_height
    }

    pub(crate) fn row_height(&self) -> u16 {
        self.row_height
    }

    pub(crate) fn cell_width(&self) -> u16 {
        self.width.saturating_sub(self.padding.saturating_mul(2)) / u16::from(DAYS_IN_WEEK)
    }

    /// Total height of a month view showing `grid`
    pub(crate) fn height_for(&self, grid: &MonthGrid) -> u16 {
        self.header_height
            .saturating_add(self.row_height.saturating_mul(grid.num_rows().into()))
    }

    /// Left edge of the given column, relative to the month view
    pub(crate) fn column_x(&self, column: u8) -> u16 {
        self.padding
            .saturating_add(self.cell_width().saturating_mul(column.into()))
    }

    /// Bounds of the cell for `day`, relative to the month view
    pub(crate) fn day_bounds(&self, grid: &MonthGrid, day: u8) -> Option<Rect> {
        let (row, column) = grid.cell_of(day)?;
        let y = self
            .header_height
            .saturating_add(self.row_height.saturating_mul(row.into()));
        Some(Rect::new(
            self.column_x(column),
            y,
            self.cell_width(),
            self.row_height,
        ))
    }

    /// Maps a point relative to the month view to the day whose cell contains
    /// it.  Points in the header, in the padding, to the right of the last
    /// column, or on a blank cell map to `None`.
    pub(crate) fn day_at(&self, grid: &MonthGrid, x: u16, y: u16) -> Option<u8> {
        let cell_width = self.cell_width();
        if cell_width == 0 {
            return None;
        }
        let column = x.checked_sub(self.padding)? / cell_width;
        let row = y.checked_sub(self.header_height)? / self.row_height.max(1);
        grid.day_at_cell(row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MONTHS_IN_YEAR;

    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    fn all_grids() -> impl Iterator<Item = MonthGrid> {
        (1899..=2101).flat_map(|year| {
            (1..=MONTHS_IN_YEAR).flat_map(move |m| {
                let month = Month::try_from(m).unwrap();
                ALL_WEEKDAYS.map(move |wd| MonthGrid::new(year, month, wd))
            })
        })
    }

    #[test]
    fn test_day_offset() {
        // 2026-10-01 is a Thursday
        let grid = MonthGrid::new(2026, Month::October, Weekday::Sunday);
        assert_eq!(grid.day_offset(), 4);
        let grid = MonthGrid::new(2026, Month::October, Weekday::Monday);
        assert_eq!(grid.day_offset(), 3);
        let grid = MonthGrid::new(2026, Month::October, Weekday::Thursday);
        assert_eq!(grid.day_offset(), 0);
        let grid = MonthGrid::new(2026, Month::October, Weekday::Friday);
        assert_eq!(grid.day_offset(), 6);
    }

    #[test]
    fn test_num_rows() {
        // Starts on a Sunday with 28 days
        let grid = MonthGrid::new(2026, Month::February, Weekday::Sunday);
        assert_eq!(grid.num_rows(), 4);
        let grid = MonthGrid::new(2026, Month::February, Weekday::Monday);
        assert_eq!(grid.num_rows(), 5);
        let grid = MonthGrid::new(2026, Month::October, Weekday::Sunday);
        assert_eq!(grid.num_rows(), 5);
        // Starts on a Saturday with 31 days
        let grid = MonthGrid::new(2026, Month::August, Weekday::Sunday);
        assert_eq!(grid.num_rows(), 6);
    }

    #[test]
    fn test_offset_and_rows_properties() {
        for grid in all_grids() {
            assert!(grid.day_offset() < 7, "{grid:?}");
            let cells = grid.day_offset() + grid.num_days();
            let rows = grid.num_rows();
            assert!(rows * 7 >= cells, "{grid:?}");
            assert!((rows - 1) * 7 < cells, "{grid:?}");
        }
    }

    #[test]
    fn test_weekday_at_column() {
        let grid = MonthGrid::new(2026, Month::October, Weekday::Monday);
        assert_eq!(grid.weekday_at_column(0), Weekday::Monday);
        assert_eq!(grid.weekday_at_column(6), Weekday::Sunday);
        assert_eq!(grid.weekday_at_column(grid.day_offset()), Weekday::Thursday);
    }

    #[test]
    fn test_cell_of() {
        let grid = MonthGrid::new(2026, Month::October, Weekday::Sunday);
        assert_eq!(grid.cell_of(1), Some((0, 4)));
        assert_eq!(grid.cell_of(3), Some((0, 6)));
        assert_eq!(grid.cell_of(4), Some((1, 0)));
        assert_eq!(grid.cell_of(31), Some((4, 6)));
        assert_eq!(grid.cell_of(0), None);
        assert_eq!(grid.cell_of(32), None);
    }

    #[test]
    fn test_day_at_cell() {
        let grid = MonthGrid::new(2026, Month::October, Weekday::Sunday);
        assert_eq!(grid.day_at_cell(0, 3), None);
        assert_eq!(grid.day_at_cell(0, 4), Some(1));
        assert_eq!(grid.day_at_cell(4, 6), Some(31));
        assert_eq!(grid.day_at_cell(5, 0), None);
        assert_eq!(grid.day_at_cell(1, 7), None);
    }

    #[test]
    fn test_day_bounds() {
        let geometry = CellGeometry::new(37).with_padding(1);
        assert_eq!(geometry.cell_width(), 5);
        let grid = MonthGrid::new(2026, Month::October, Weekday::Sunday);
        assert_eq!(geometry.day_bounds(&grid, 1), Some(Rect::new(21, 2, 5, 2)));
        assert_eq!(geometry.day_bounds(&grid, 4), Some(Rect::new(1, 4, 5, 2)));
        assert_eq!(geometry.day_bounds(&grid, 32), None);
        assert_eq!(geometry.height_for(&grid), 12);
    }

    #[test]
    fn test_day_at() {
        let geometry = CellGeometry::new(37).with_padding(1);
        let grid = MonthGrid::new(2026, Month::October, Weekday::Sunday);
        // Header
        assert_eq!(geometry.day_at(&grid, 22, 0), None);
        assert_eq!(geometry.day_at(&grid, 22, 1), None);
        // Left padding
        assert_eq!(geometry.day_at(&grid, 0, 4), None);
        // Blank leading cell
        assert_eq!(geometry.day_at(&grid, 1, 2), None);
        assert_eq!(geometry.day_at(&grid, 21, 2), Some(1));
        assert_eq!(geometry.day_at(&grid, 25, 3), Some(1));
        assert_eq!(geometry.day_at(&grid, 26, 3), Some(2));
        assert_eq!(geometry.day_at(&grid, 1, 4), Some(4));
        // Right padding
        assert_eq!(geometry.day_at(&grid, 36, 4), None);
        // Below the last row
        assert_eq!(geometry.day_at(&grid, 1, 12), None);
    }

    #[test]
    fn test_day_at_inverts_bounds() {
        for width in [7, 20, 35, 37, 50] {
            let geometry = CellGeometry::new(width)
                .with_padding(width % 3)
                .with_row_height(u16::from(width % 2) + 1);
            for grid in all_grids().step_by(5) {
                for day in grid.days() {
                    let Some(bounds) = geometry.day_bounds(&grid, day) else {
                        panic!("no bounds for day {day} of {grid:?}");
                    };
                    for y in bounds.top()..bounds.bottom() {
                        for x in bounds.left()..bounds.right() {
                            assert_eq!(geometry.day_at(&grid, x, y), Some(day));
                        }
                    }
                }
                let grid_right = geometry.column_x(7);
                let grid_bottom = geometry.height_for(&grid);
                for y in 0..grid_bottom + 2 {
                    assert_eq!(geometry.day_at(&grid, grid_right, y), None);
                }
                for x in 0..width {
                    assert_eq!(geometry.day_at(&grid, x, grid_bottom), None);
                }
            }
        }
    }

    #[test]
    fn test_zero_cell_width() {
        let geometry = CellGeometry::new(6);
        let grid = MonthGrid::new(2026, Month::October, Weekday::Sunday);
        assert_eq!(geometry.cell_width(), 0);
        assert_eq!(geometry.day_at(&grid, 0, 2), None);
    }

    #[test]
    fn test_min_row_height() {
        let geometry = CellGeometry::new(35).with_row_height(0);
        assert_eq!(geometry.row_height(), CellGeometry::MIN_ROW_HEIGHT);
    }
}
