use super::util::{VisibleMonth, WeekdayExt};
use time::Date;

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Maximum number of week rows any month can span
pub(crate) const MAX_WEEKS: u16 = 6;

/// One entry of the month grid.  Never stored; rebuilt from the visible month
/// and the selected date whenever it is needed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DayCell {
    /// Padding before the first of the month
    Empty,
    Day { day: u8, selected: bool },
}

impl DayCell {
    /// Four-column rendering of the cell, with the selected day in brackets
    pub(crate) fn show(&self) -> String {
        match self {
            DayCell::Empty => String::from("    "),
            DayCell::Day {
                day,
                selected: true,
            } => format!("[{day:2}]"),
            DayCell::Day {
                day,
                selected: false,
            } => format!(" {day:2} "),
        }
    }
}

/// Leading padding followed by one cell per day of `month`, laid out row-major
/// starting on Sunday
pub(crate) fn day_cells(month: VisibleMonth, selected: Date) -> Vec<DayCell> {
    let padding = usize::from(month.first_weekday().index0());
    let days = month.days();
    let selected_day = month.contains(selected).then_some(selected.day());
    let mut cells = Vec::with_capacity(padding + usize::from(days));
    cells.extend(std::iter::repeat_n(DayCell::Empty, padding));
    cells.extend((1..=days).map(|day| DayCell::Day {
        day,
        selected: selected_day == Some(day),
    }));
    cells
}
