use crate::calendar::CalendarDay;
use thiserror::Error;
use time::{Date, Month, Weekday};

pub(crate) const DEFAULT_START_YEAR: i32 = 1900;

pub(crate) const DEFAULT_END_YEAR: i32 = 2100;

/// Settings a host screen may change before (or while) showing the picker
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerConfig {
    week_start: Weekday,
    min_year: i32,
    max_year: i32,
}

impl PickerConfig {
    pub(crate) fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub(crate) fn min_year(&self) -> i32 {
        self.min_year
    }

    pub(crate) fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Sets the first day of the week, numbered from 1 (Sunday) through 7
    /// (Saturday)
    pub(crate) fn set_first_day_of_week(&mut self, day: u8) -> Result<(), ConfigError> {
        if !(1..=7).contains(&day) {
            return Err(ConfigError::WeekStartOutOfRange(day));
        }
        self.week_start = Weekday::Saturday.nth_next(day);
        Ok(())
    }

    pub(crate) fn set_year_range(&mut self, start: i32, end: i32) -> Result<(), ConfigError> {
        for year in [start, end] {
            if !(Date::MIN.year()..=Date::MAX.year()).contains(&year) {
                return Err(ConfigError::UnsupportedYear(year));
            }
        }
        if end <= start {
            return Err(ConfigError::InvertedYearRange { start, end });
        }
        self.min_year = start;
        self.max_year = end;
        Ok(())
    }

    /// The same settings with every supported year selectable
    pub(crate) fn unrestricted(mut self) -> PickerConfig {
        self.min_year = Date::MIN.year();
        self.max_year = Date::MAX.year();
        self
    }

    pub(crate) fn contains_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// Moves `day` into the selectable year range.  A day in a year before
    /// the range becomes 1 January of the first year, and one after it
    /// becomes 31 December of the last year.  Otherwise only the day of the
    /// month is clamped to the length of its month.
    pub(crate) fn clamp_day(&self, day: CalendarDay) -> CalendarDay {
        if day.year < self.min_year {
            CalendarDay::new(self.min_year, Month::January, 1)
        } else if day.year > self.max_year {
            CalendarDay::new(self.max_year, Month::December, 31)
        } else {
            day.clamped()
        }
    }
}

impl Default for PickerConfig {
    fn default() -> PickerConfig {
        PickerConfig {
            week_start: Weekday::Sunday,
            min_year: DEFAULT_START_YEAR,
            max_year: DEFAULT_END_YEAR,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("first day of week must be between 1 (Sunday) and 7 (Saturday), got {0}")]
    WeekStartOutOfRange(u8),
    #[error("year range end ({end}) must be larger than year range start ({start})")]
    InvertedYearRange { start: i32, end: i32 },
    #[error("year {0} is outside of the supported range")]
    UnsupportedYear(i32),
}
