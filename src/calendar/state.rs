use super::grid::{day_cells, DayCell};
use super::util::{OutOfTimeError, VisibleMonth};
use super::Clock;
use crate::listener::OutsideListener;
use crate::names::NameTable;
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;
use time::{Date, Month};
use tracing::{debug, warn};

pub(crate) type OnChange = Box<dyn FnMut(Date)>;

/// Construction-time settings for a date picker
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PickerOptions {
    /// Seeds the selected date and the visible month; the clock's current date
    /// is used if unset
    pub(crate) initial_date: Option<Date>,
    pub(crate) label: String,
    /// Only used to tell pickers apart in log output
    pub(crate) id: String,
    pub(crate) names: NameTable,
}

impl Default for PickerOptions {
    fn default() -> PickerOptions {
        PickerOptions {
            initial_date: None,
            label: String::from("Date"),
            id: String::from("datepicker"),
            names: NameTable::default(),
        }
    }
}

/// A user action on the date picker, as reported by the view
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Gesture {
    ClickDay(u8),
    ClickPrev,
    ClickNext,
    ClickToday,
    ClickCancel,
    /// A click on the date field or on its calendar button
    ClickToggle,
    OutsideInteraction,
}

pub(crate) struct CalendarState<C> {
    selected: Date,
    visible: VisibleMonth,
    open: bool,
    label: String,
    id: String,
    names: NameTable,
    clock: C,
    on_change: Option<OnChange>,
    // Invariant: `open` is false whenever this is `None`
    listener: Option<OutsideListener>,
}

impl<C: Clock> CalendarState<C> {
    pub(crate) fn new(options: PickerOptions, clock: C) -> Self {
        let selected = options.initial_date.unwrap_or_else(|| clock.today());
        CalendarState {
            selected,
            visible: VisibleMonth::containing(selected),
            open: false,
            label: options.label,
            id: options.id,
            names: options.names,
            clock,
            on_change: None,
            listener: None,
        }
    }

    pub(crate) fn on_change<F: FnMut(Date) + 'static>(mut self, func: F) -> Self {
        self.on_change = Some(Box::new(func));
        self
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn visible(&self) -> VisibleMonth {
        self.visible
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn names(&self) -> &NameTable {
        &self.names
    }

    pub(crate) fn day_cells(&self) -> Vec<DayCell> {
        day_cells(self.visible, self.selected)
    }

    /// Attach the widget to its host, registering a listener on `out` for
    /// interactions outside of it.  Any previously held listener is released
    /// first.  On error the widget is left unmounted and closed.
    pub(crate) fn mount(&mut self, out: Box<dyn Write>) -> io::Result<()> {
        debug!(id = %self.id, "mounting date picker");
        // Releasing after registering would switch mouse reporting back off
        if self.is_mounted() {
            self.unmount();
        }
        self.listener = Some(OutsideListener::register(out)?);
        Ok(())
    }

    /// Close the widget and release its listener
    pub(crate) fn unmount(&mut self) {
        debug!(id = %self.id, "unmounting date picker");
        self.open = false;
        self.listener = None;
    }

    /// Returns `false` if the widget is not mounted and thus cannot open
    pub(crate) fn open(&mut self) -> bool {
        if self.listener.is_none() {
            warn!(id = %self.id, "refusing to open an unmounted date picker");
            return false;
        }
        if !self.open {
            debug!(id = %self.id, "opening calendar");
            self.open = true;
        }
        true
    }

    pub(crate) fn close(&mut self) {
        if self.open {
            debug!(id = %self.id, "closing calendar");
            self.open = false;
        }
    }

    /// Returns whether the widget is open afterwards
    pub(crate) fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
            false
        } else {
            self.open()
        }
    }

    pub(crate) fn outside_interaction(&mut self) {
        if self.open {
            debug!(id = %self.id, "interaction outside of date picker");
            self.close();
        }
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.visible = self.visible.previous()?;
        debug!(
            id = %self.id,
            month = %self.visible.month(),
            year = self.visible.year(),
            "showing previous month"
        );
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.visible = self.visible.next()?;
        debug!(
            id = %self.id,
            month = %self.visible.month(),
            year = self.visible.year(),
            "showing next month"
        );
        Ok(())
    }

    /// Select the given day of the visible month.  On success the widget is
    /// closed and the change callback is invoked once with the new date.  On
    /// failure nothing changes.
    pub(crate) fn select_day(&mut self, day: u8) -> Result<Date, SelectError> {
        let days = self.visible.days();
        if !(1..=days).contains(&day) {
            warn!(id = %self.id, day, "rejected selection of nonexistent day");
            return Err(SelectError::DayOutOfRange {
                day,
                year: self.visible.year(),
                month: self.visible.month(),
            });
        }
        let date = self.visible.date(day).ok_or(OutOfTimeError)?;
        self.selected = date;
        self.close();
        debug!(id = %self.id, %date, "selected date");
        if let Some(func) = self.on_change.as_mut() {
            func(date);
        }
        Ok(date)
    }

    /// Show the current month and select the current day in one step
    pub(crate) fn go_to_today(&mut self) -> Result<Date, SelectError> {
        let today = self.clock.today();
        self.visible = VisibleMonth::containing(today);
        self.select_day(today.day())
    }

    /// Apply a gesture from the view.  Returns `false` if the gesture was
    /// rejected.
    pub(crate) fn dispatch(&mut self, gesture: Gesture) -> bool {
        match gesture {
            Gesture::ClickDay(day) => self.select_day(day).is_ok(),
            Gesture::ClickPrev => self.previous_month().is_ok(),
            Gesture::ClickNext => self.next_month().is_ok(),
            Gesture::ClickToday => self.go_to_today().is_ok(),
            Gesture::ClickCancel => {
                self.close();
                true
            }
            Gesture::ClickToggle => {
                self.toggle();
                self.is_mounted()
            }
            Gesture::OutsideInteraction => {
                self.outside_interaction();
                true
            }
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for CalendarState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarState")
            .field("selected", &self.selected)
            .field("visible", &self.visible)
            .field("open", &self.open)
            .field("label", &self.label)
            .field("id", &self.id)
            .field("names", &self.names)
            .field("clock", &self.clock)
            .field("on_change", &self.on_change.as_ref().map(|_| "<callback>"))
            .field("listener", &self.listener)
            .finish()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SelectError {
    #[error("{month} {year} has no day {day}")]
    DayOutOfRange { day: u8, year: i32, month: Month },
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::listener::testing::SharedOutput;
    use std::cell::RefCell;
    use std::rc::Rc;
    use time::macros::date;
    use time::Month::*;

    fn picker(initial: Date, today: Date) -> CalendarState<FixedClock> {
        CalendarState::new(
            PickerOptions {
                initial_date: Some(initial),
                ..PickerOptions::default()
            },
            FixedClock(today),
        )
    }

    /// A mounted picker with a recording change callback
    fn recording(
        initial: Date,
        today: Date,
    ) -> (CalendarState<FixedClock>, Rc<RefCell<Vec<Date>>>) {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let mut state = picker(initial, today).on_change(move |d| sink.borrow_mut().push(d));
        state.mount(Box::new(SharedOutput::default())).unwrap();
        (state, changes)
    }

    #[test]
    fn test_new() {
        let state = picker(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        assert_eq!(state.selected(), date!(2024 - 02 - 15));
        assert_eq!(state.visible(), VisibleMonth::new(2024, February));
        assert!(!state.is_open());
        assert!(!state.is_mounted());
        assert_eq!(state.label(), "Date");
        assert_eq!(state.names().format_date(state.selected()), "February 15, 2024");
    }

    #[test]
    fn test_default_initial_date_is_today() {
        let state = CalendarState::new(PickerOptions::default(), FixedClock(date!(2025 - 01 - 22)));
        assert_eq!(state.selected(), date!(2025 - 01 - 22));
        assert_eq!(state.visible(), VisibleMonth::new(2025, January));
    }

    #[test]
    fn test_select_day() {
        let (mut state, changes) = recording(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        assert!(state.open());
        assert_eq!(state.select_day(29), Ok(date!(2024 - 02 - 29)));
        assert_eq!(state.selected(), date!(2024 - 02 - 29));
        assert_eq!(state.visible(), VisibleMonth::new(2024, February));
        assert!(!state.is_open());
        assert_eq!(*changes.borrow(), [date!(2024 - 02 - 29)]);
    }

    #[test]
    fn test_select_day_out_of_range() {
        let (mut state, changes) = recording(date!(2023 - 02 - 15), date!(2025 - 01 - 22));
        assert!(state.open());
        for day in [0, 29, 32, u8::MAX] {
            assert_eq!(
                state.select_day(day),
                Err(SelectError::DayOutOfRange {
                    day,
                    year: 2023,
                    month: February
                })
            );
        }
        assert_eq!(state.selected(), date!(2023 - 02 - 15));
        assert_eq!(state.visible(), VisibleMonth::new(2023, February));
        assert!(state.is_open());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_select_day_beyond_representable_years() {
        let (mut state, changes) = recording(date!(9999 - 12 - 15), date!(2025 - 01 - 22));
        state.next_month().unwrap();
        assert_eq!(state.visible(), VisibleMonth::new(10000, January));
        assert_eq!(
            state.select_day(1),
            Err(SelectError::OutOfTime(OutOfTimeError))
        );
        assert_eq!(state.selected(), date!(9999 - 12 - 15));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_select_without_callback() {
        let mut state = picker(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        assert_eq!(state.select_day(1), Ok(date!(2024 - 02 - 01)));
        assert_eq!(state.selected(), date!(2024 - 02 - 01));
        assert!(!state.is_open());
    }

    #[test]
    fn test_navigation_keeps_selection() {
        let (mut state, changes) = recording(date!(2023 - 01 - 10), date!(2025 - 01 - 22));
        state.previous_month().unwrap();
        assert_eq!(state.visible(), VisibleMonth::new(2022, December));
        state.next_month().unwrap();
        state.next_month().unwrap();
        assert_eq!(state.visible(), VisibleMonth::new(2023, February));
        assert_eq!(state.selected(), date!(2023 - 01 - 10));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_select_after_navigation() {
        let (mut state, changes) = recording(date!(2023 - 12 - 10), date!(2025 - 01 - 22));
        state.open();
        state.next_month().unwrap();
        assert_eq!(state.select_day(31), Ok(date!(2024 - 01 - 31)));
        assert_eq!(*changes.borrow(), [date!(2024 - 01 - 31)]);
    }

    #[test]
    fn test_go_to_today_from_other_month() {
        let (mut state, changes) = recording(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        state.open();
        state.previous_month().unwrap();
        assert_eq!(state.go_to_today(), Ok(date!(2025 - 01 - 22)));
        assert_eq!(state.selected(), date!(2025 - 01 - 22));
        assert_eq!(state.visible(), VisibleMonth::new(2025, January));
        assert!(!state.is_open());
        assert_eq!(*changes.borrow(), [date!(2025 - 01 - 22)]);
    }

    #[test]
    fn test_go_to_today_day_missing_from_visible_month() {
        // The 31st does not exist in the month being viewed
        let (mut state, changes) = recording(date!(2024 - 02 - 15), date!(2024 - 03 - 31));
        assert_eq!(state.go_to_today(), Ok(date!(2024 - 03 - 31)));
        assert_eq!(*changes.borrow(), [date!(2024 - 03 - 31)]);
    }

    #[test]
    fn test_open_requires_mount() {
        let mut state = picker(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        assert!(!state.open());
        assert!(!state.is_open());
        assert!(!state.toggle());
        assert!(!state.is_open());
        state.mount(Box::new(SharedOutput::default())).unwrap();
        assert!(state.open());
        assert!(state.is_open());
    }

    #[test]
    fn test_toggle_and_close() {
        let (mut state, _) = recording(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        assert!(state.toggle());
        assert!(state.is_open());
        assert!(!state.toggle());
        assert!(!state.is_open());
        state.close();
        state.close();
        assert!(!state.is_open());
    }

    #[test]
    fn test_cancel_discards_navigation_only() {
        let (mut state, changes) = recording(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        state.open();
        state.next_month().unwrap();
        assert!(state.dispatch(Gesture::ClickCancel));
        assert!(!state.is_open());
        assert_eq!(state.selected(), date!(2024 - 02 - 15));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_outside_interaction() {
        let (mut state, changes) = recording(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        state.open();
        assert!(state.dispatch(Gesture::OutsideInteraction));
        assert!(!state.is_open());
        assert_eq!(state.selected(), date!(2024 - 02 - 15));
        assert!(changes.borrow().is_empty());
        // Harmless while closed
        state.outside_interaction();
        assert!(!state.is_open());
    }

    #[test]
    fn test_unmount_closes_and_releases_listener() {
        let out = SharedOutput::default();
        let mut state = picker(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        state.mount(Box::new(out.clone())).unwrap();
        state.open();
        assert!(!out.contents().contains("\x1b[?1000l"));
        state.unmount();
        assert!(!state.is_open());
        assert!(!state.is_mounted());
        assert!(out.contents().contains("\x1b[?1000l"));
        assert!(!state.open());
    }

    #[test]
    fn test_remount_keeps_capture_enabled() {
        let out = SharedOutput::default();
        let mut state = picker(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        state.mount(Box::new(out.clone())).unwrap();
        state.mount(Box::new(out.clone())).unwrap();
        let contents = out.contents();
        let enabled = contents.rfind("\x1b[?1000h").unwrap();
        let disabled = contents.rfind("\x1b[?1000l").unwrap();
        assert!(disabled < enabled, "{contents:?}");
        assert!(state.is_mounted());
        assert!(state.open());
    }

    #[test]
    fn test_drop_releases_listener() {
        let out = SharedOutput::default();
        let mut state = picker(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        state.mount(Box::new(out.clone())).unwrap();
        drop(state);
        assert!(out.contents().contains("\x1b[?1000l"));
    }

    #[test]
    fn test_dispatch() {
        let (mut state, changes) = recording(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        assert!(state.dispatch(Gesture::ClickToggle));
        assert!(state.is_open());
        assert!(state.dispatch(Gesture::ClickNext));
        assert_eq!(state.visible(), VisibleMonth::new(2024, March));
        assert!(state.dispatch(Gesture::ClickPrev));
        assert!(state.dispatch(Gesture::ClickPrev));
        assert_eq!(state.visible(), VisibleMonth::new(2024, January));
        assert!(!state.dispatch(Gesture::ClickDay(32)));
        assert!(state.is_open());
        assert!(state.dispatch(Gesture::ClickDay(31)));
        assert!(!state.is_open());
        assert!(state.dispatch(Gesture::ClickToggle));
        assert!(state.dispatch(Gesture::ClickToday));
        assert!(!state.is_open());
        assert_eq!(
            *changes.borrow(),
            [date!(2024 - 01 - 31), date!(2025 - 01 - 22)]
        );
    }

    #[test]
    fn test_toggle_gesture_unmounted() {
        let mut state = picker(date!(2024 - 02 - 15), date!(2025 - 01 - 22));
        assert!(!state.dispatch(Gesture::ClickToggle));
        assert!(!state.is_open());
    }
}
