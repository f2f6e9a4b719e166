use super::grid::{DayCell, DAYS_IN_WEEK, MAX_WEEKS};
use super::state::{CalendarState, Gesture};
use super::util::WeekdayExt;
use super::Clock;
use crate::theme::{picker::*, LABEL_STYLE};
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;
use time::Weekday;

/*
 * Layout, relative to the widget's top-left corner:
 *
 *    Date
 *    ┌────────────────────────────┐
 *    │February 15, 2024         ▾ │
 *    └────────────────────────────┘
 *    ┌────────────────────────────┐   <- overlay, only while open
 *    │ <     February 2024      > │
 *    │ Su  Mo  Tu  We  Th  Fr  Sa │
 *    │                  1   2   3 │
 *    │  4   5   6   7   8   9  10 │
 *    │ 11  12  13  14 [15] 16  17 │
 *    │ 18  19  20  21  22  23  24 │
 *    │ 25  26  27  28  29         │
 *    │                            │
 *    │ Today               Cancel │
 *    └────────────────────────────┘
 */

/// Number of columns per day of week
const CELL_WIDTH: u16 = 4;

/// Width of the field and the overlay, not counting their borders
const INNER_WIDTH: u16 = CELL_WIDTH * 7;

const WIDTH: u16 = INNER_WIDTH + 2;

/// Columns at the right end of the field taken up by the calendar button
const BUTTON_WIDTH: u16 = 3;

const LABEL_ROW: u16 = 0;
const FIELD_TOP: u16 = 1;
const FIELD_ROW: u16 = 2;
const FIELD_LINES: u16 = 3;
const OVERLAY_TOP: u16 = FIELD_TOP + FIELD_LINES;
const NAV_ROW: u16 = OVERLAY_TOP + 1;
const HEADER_ROW: u16 = NAV_ROW + 1;
const FIRST_WEEK_ROW: u16 = HEADER_ROW + 1;
const FOOTER_ROW: u16 = FIRST_WEEK_ROW + MAX_WEEKS;
const OVERLAY_LINES: u16 = FOOTER_ROW + 2 - OVERLAY_TOP;

const CLOSED_HEIGHT: u16 = OVERLAY_TOP;
const OPEN_HEIGHT: u16 = OVERLAY_TOP + OVERLAY_LINES;

const PREV_COL: u16 = 2;
const NEXT_COL: u16 = INNER_WIDTH - 1;
const TODAY_COL: u16 = 2;
const TODAY_TEXT: &str = "Today";
const CANCEL_TEXT: &str = "Cancel";
const CANCEL_COL: u16 = INNER_WIDTH - 6;

/// Renders a [`CalendarState`]: the caption, the field showing the selected
/// date, and, while open, the month overlay below it
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarView<C> {
    _data: PhantomData<C>,
}

impl<C> CalendarView<C> {
    pub(crate) fn new() -> CalendarView<C> {
        CalendarView { _data: PhantomData }
    }
}

impl<C: Clock> StatefulWidget for CalendarView<C> {
    type State = CalendarState<C>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let layout = PickerLayout::new(area, state.is_open());
        let mut canvas = BufferCanvas::new(layout.region, buf);
        canvas.draw_label(state.label());
        let names = state.names();
        canvas.draw_field(&names.format_date(state.selected()));
        if state.is_open() {
            canvas.draw_overlay();
            canvas.draw_nav(&names.month_title(state.visible()));
            canvas.draw_weekdays(|wd| names.weekday_abbrev(wd));
            for (i, week) in std::iter::zip(0u16.., state.day_cells().chunks(DAYS_IN_WEEK)) {
                for (j, cell) in std::iter::zip(0u16.., week) {
                    canvas.draw_day(i, j, *cell);
                }
            }
            canvas.draw_footer();
        }
    }
}

/// Screen geometry of a rendered date picker, used to map clicks back to
/// gestures
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerLayout {
    /// The widget's bounding region: caption, field, and overlay if open
    region: Rect,
}

impl PickerLayout {
    pub(crate) fn new(area: Rect, open: bool) -> PickerLayout {
        let height = if open { OPEN_HEIGHT } else { CLOSED_HEIGHT };
        let region = Rect {
            x: area.x,
            y: area.y,
            width: WIDTH.min(area.width),
            height: height.min(area.height),
        };
        PickerLayout { region }
    }

    pub(crate) fn width() -> u16 {
        WIDTH
    }

    pub(crate) fn open_height() -> u16 {
        OPEN_HEIGHT
    }

    /// Returns the gesture for a click at the given screen position.  Clicks
    /// outside the widget's region are outside interactions; clicks inside it
    /// that do not land on a control produce `None`.
    pub(crate) fn hit(&self, column: u16, row: u16, cells: &[DayCell]) -> Option<Gesture> {
        let r = self.region;
        if column < r.x || column >= r.right() || row < r.y || row >= r.bottom() {
            return Some(Gesture::OutsideInteraction);
        }
        let x = column - r.x;
        let y = row - r.y;
        if x == 0 || x > INNER_WIDTH {
            // Left or right border
            return None;
        }
        match y {
            FIELD_ROW => Some(Gesture::ClickToggle),
            NAV_ROW => match x {
                1..4 => Some(Gesture::ClickPrev),
                _ if x >= NEXT_COL - 1 => Some(Gesture::ClickNext),
                _ => None,
            },
            FIRST_WEEK_ROW..FOOTER_ROW => {
                let week = usize::from(y - FIRST_WEEK_ROW);
                let wd = usize::from((x - 1) / CELL_WIDTH);
                match cells.get(week * DAYS_IN_WEEK + wd) {
                    Some(&DayCell::Day { day, .. }) => Some(Gesture::ClickDay(day)),
                    _ => None,
                }
            }
            FOOTER_ROW => {
                if (TODAY_COL..TODAY_COL + 5).contains(&x) {
                    Some(Gesture::ClickToday)
                } else if (CANCEL_COL..CANCEL_COL + 6).contains(&x) {
                    Some(Gesture::ClickCancel)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_label(&mut self, label: &str) {
        self.mvprint(LABEL_ROW, 0, label, Some(LABEL_STYLE));
    }

    fn draw_field(&mut self, text: &str) {
        self.draw_box(FIELD_TOP, FIELD_LINES, FIELD_STYLE);
        self.mvprint(FIELD_ROW, 1, text, Some(FIELD_STYLE));
        self.mvprint(
            FIELD_ROW,
            1 + INNER_WIDTH - BUTTON_WIDTH,
            " ▾ ",
            Some(BUTTON_STYLE),
        );
    }

    fn draw_overlay(&mut self) {
        self.clear(OVERLAY_TOP, OVERLAY_LINES);
        self.draw_box(OVERLAY_TOP, OVERLAY_LINES, OVERLAY_STYLE);
    }

    fn draw_nav(&mut self, title: &str) {
        self.mvprint(NAV_ROW, PREV_COL, "<", Some(ARROW_STYLE));
        let width = u16::try_from(Line::raw(title).width()).unwrap_or(u16::MAX);
        let x = 1 + INNER_WIDTH.saturating_sub(width) / 2;
        self.mvprint(NAV_ROW, x, title, Some(TITLE_STYLE));
        self.mvprint(NAV_ROW, NEXT_COL, ">", Some(ARROW_STYLE));
    }

    fn draw_weekdays<F>(&mut self, abbrev: F)
    where
        F: Fn(Weekday) -> &'static str,
    {
        for wd in (0..7).map(|n| Weekday::Sunday.nth_next(n)) {
            self.mvprint(
                HEADER_ROW,
                1 + CELL_WIDTH * wd.index0() + 1,
                abbrev(wd),
                Some(WEEKDAY_STYLE),
            );
        }
    }

    fn draw_day(&mut self, week_no: u16, wd_index: u16, cell: DayCell) {
        let style = match cell {
            DayCell::Day { selected: true, .. } => SELECTED_STYLE,
            _ => DAY_STYLE,
        };
        self.mvprint(
            FIRST_WEEK_ROW + week_no,
            1 + CELL_WIDTH * wd_index,
            cell.show(),
            Some(style),
        );
    }

    fn draw_footer(&mut self) {
        self.mvprint(FOOTER_ROW, TODAY_COL, TODAY_TEXT, Some(TODAY_STYLE));
        self.mvprint(FOOTER_ROW, CANCEL_COL, CANCEL_TEXT, Some(CANCEL_STYLE));
    }

    fn draw_box(&mut self, y: u16, height: u16, style: Style) {
        if let Some(rect) = self.rows(y, height) {
            Block::bordered().style(style).render(rect, self.buf);
        }
    }

    fn clear(&mut self, y: u16, height: u16) {
        if let Some(rect) = self.rows(y, height) {
            Clear.render(rect, self.buf);
        }
    }

    // Returns the full-width band of `height` lines starting at line `y`,
    // clipped to the canvas
    fn rows(&self, y: u16, height: u16) -> Option<Rect> {
        (y < self.area.height).then(|| Rect {
            x: self.area.x,
            y: self.area.y + y,
            width: self.area.width,
            height: height.min(self.area.height - y),
        })
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // widget's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
