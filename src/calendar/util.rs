use thiserror::Error;
use time::{
    Date,
    Month::{self, *},
    Weekday,
};

/// Offsets used by Sakamoto's weekday formula, indexed by month number - 1
const MONTH_OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// Defined for every `i32` year.  Year 0 and negative years follow the
/// proleptic Gregorian leap rule, so year 0 is a leap year.
pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    month.length(year)
}

/// Returns the day of the week on which the given month starts.  Defined for
/// every `i32` year, including those `time::Date` cannot represent.
pub(crate) fn first_weekday_of_month(year: i32, month: Month) -> Weekday {
    let m = u8::from(month);
    let mut y = i64::from(year);
    if m < 3 {
        y -= 1;
    }
    let offset = MONTH_OFFSETS[usize::from(m - 1)];
    let n = (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + offset + 1)
        .rem_euclid(7);
    // rem_euclid(7) is always in 0..7
    let n = u8::try_from(n).unwrap_or_default();
    Weekday::Sunday.nth_next(n)
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct VisibleMonth {
    year: i32,
    month: Month,
}

impl VisibleMonth {
    pub(crate) fn new(year: i32, month: Month) -> Self {
        VisibleMonth { year, month }
    }

    pub(crate) fn containing(date: Date) -> Self {
        VisibleMonth::new(date.year(), date.month())
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    pub(crate) fn days(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub(crate) fn first_weekday(&self) -> Weekday {
        first_weekday_of_month(self.year, self.month)
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub(crate) fn previous(&self) -> Result<Self, OutOfTimeError> {
        let year = if self.month == January {
            self.year.checked_sub(1).ok_or(OutOfTimeError)?
        } else {
            self.year
        };
        Ok(VisibleMonth::new(year, self.month.previous()))
    }

    pub(crate) fn next(&self) -> Result<Self, OutOfTimeError> {
        let year = if self.month == December {
            self.year.checked_add(1).ok_or(OutOfTimeError)?
        } else {
            self.year
        };
        Ok(VisibleMonth::new(year, self.month.next()))
    }

    /// Returns the given day of this month as a `Date`, or `None` if the day
    /// does not exist in this month or the year is outside the range `Date`
    /// supports
    pub(crate) fn date(&self, day: u8) -> Option<Date> {
        if (1..=self.days()).contains(&day) {
            Date::from_calendar_date(self.year, self.month, day).ok()
        } else {
            None
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
