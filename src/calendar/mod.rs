mod grid;
mod state;
mod util;
mod widget;
pub(crate) use self::state::{CalendarState, Gesture, PickerOptions};
pub(crate) use self::util::VisibleMonth;
pub(crate) use self::widget::{CalendarView, PickerLayout};
use time::{error::IndeterminateOffset, Date, OffsetDateTime, UtcOffset};

/// Source of the current date, consulted by "Today"
pub(crate) trait Clock {
    fn today(&self) -> Date;
}

/// The local calendar date, using the UTC offset in effect when the clock was
/// created
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalClock(UtcOffset);

impl LocalClock {
    // `current_local_offset()` may refuse to work once other threads exist,
    // so the offset is looked up once at startup.
    pub(crate) fn new() -> Result<LocalClock, IndeterminateOffset> {
        UtcOffset::current_local_offset().map(LocalClock)
    }
}

impl Clock for LocalClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.0).date()
    }
}

#[cfg(test)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(pub(crate) Date);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
