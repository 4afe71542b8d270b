mod adapter;
mod grid;
mod view;
pub(crate) use self::adapter::MonthAdapter;
pub(crate) use self::grid::{CellGeometry, MonthGrid};
pub(crate) use self::view::MonthView;
use std::fmt;
use time::{Date, Month, Weekday};

pub(crate) const MONTHS_IN_YEAR: u8 = 12;

pub(crate) const DAYS_IN_WEEK: u8 = 7;

pub(crate) trait WeekdayExt {
    /// Number of days since the preceding Sunday, 0 through 6
    fn index0(&self) -> u8;

    /// Upper-case three-letter label used in the month grid header
    fn short_label(&self) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }

    fn short_label(&self) -> &'static str {
        match self {
            Weekday::Sunday => "SUN",
            Weekday::Monday => "MON",
            Weekday::Tuesday => "TUE",
            Weekday::Wednesday => "WED",
            Weekday::Thursday => "THU",
            Weekday::Friday => "FRI",
            Weekday::Saturday => "SAT",
        }
    }
}

/// Gregorian leap year test.
///
/// This is stricter than a bare `year % 4 == 0` check: centuries are only
/// leap years when divisible by 400, so 1900 and 2100 have a 28-day February,
/// matching the weekdays from [`first_weekday`].
pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Weekday of the first day of the given month in the proleptic Gregorian
/// calendar
pub(crate) fn first_weekday(year: i32, month: Month) -> Weekday {
    // Sakamoto's method, with day = 1
    const T: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let m = u8::from(month);
    let y = if m < 3 { year - 1 } else { year };
    let dow = (y + y.div_euclid(4) - y.div_euclid(100)
        + y.div_euclid(400)
        + T[usize::from(m - 1)]
        + 1)
    .rem_euclid(7);
    // rem_euclid(7) is always within 0..7
    Weekday::Sunday.nth_next(u8::try_from(dow).unwrap_or_default())
}

/// A day of the calendar as a (year, month, day-of-month) triple.
///
/// Values are copied freely between the dialog, the month adapter, and the
/// month views.  The triple is not validated on construction; use
/// [`CalendarDay::clamped`] to pull an out-of-range day back into its month.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CalendarDay {
    pub(crate) year: i32,
    pub(crate) month: Month,
    pub(crate) day: u8,
}

impl CalendarDay {
    pub(crate) fn new(year: i32, month: Month, day: u8) -> CalendarDay {
        CalendarDay { year, month, day }
    }

    pub(crate) fn from_date(date: Date) -> CalendarDay {
        CalendarDay::new(date.year(), date.month(), date.day())
    }

    pub(crate) fn to_date(self) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, self.day).ok()
    }

    /// Zero-based month number (January = 0)
    pub(crate) fn month0(&self) -> u8 {
        u8::from(self.month) - 1
    }

    pub(crate) fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub(crate) fn clamped(self) -> CalendarDay {
        CalendarDay {
            day: self.day.clamp(1, self.days_in_month()),
            ..self
        }
    }

    /// The same month and day in a different year, moving the day back to the
    /// end of the month if it does not exist there
    pub(crate) fn with_year(self, year: i32) -> CalendarDay {
        CalendarDay { year, ..self }.clamped()
    }

    pub(crate) fn same_month(&self, year: i32, month: Month) -> bool {
        self.year == year && self.month == month
    }

    pub(crate) fn weekday(&self) -> Weekday {
        first_weekday(self.year, self.month).nth_next((self.day.max(1) - 1) % DAYS_IN_WEEK)
    }
}

impl fmt::Display for CalendarDay {
    // Long form used for accessibility descriptions, e.g. "05 March 2024"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {} {}", self.day, self.month, self.year)
    }
}
