use crate::calendar::{CalendarState, CalendarView, Clock, Gesture, PickerLayout};
use crate::help::Help;
use crate::theme::{BASE_STYLE, HINT_STYLE};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

static HINT: &str = "ENTER open/close · ? help · q quit";

#[derive(Debug)]
pub(crate) struct App<C> {
    picker: CalendarState<C>,
    state: AppState,
    // Where the picker was last drawn, for mapping clicks
    picker_area: Rect,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(picker: CalendarState<C>) -> App<C> {
        App {
            picker,
            state: AppState::Picking,
            picker_area: Rect::default(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        self.picker.mount(Box::new(io::stdout()))?;
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        self.picker.unmount();
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => {
                if !self.handle_click(column, row) {
                    self.beep()?;
                }
            }
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        let open = self.picker.is_open();
        match self.state {
            AppState::Picking => match key {
                KeyCode::Enter | KeyCode::Char(' ') => self.picker.dispatch(Gesture::ClickToggle),
                KeyCode::Char('<' | ',') | KeyCode::Left if open => {
                    self.picker.dispatch(Gesture::ClickPrev)
                }
                KeyCode::Char('>' | '.') | KeyCode::Right if open => {
                    self.picker.dispatch(Gesture::ClickNext)
                }
                KeyCode::Char('t') if open => self.picker.dispatch(Gesture::ClickToday),
                KeyCode::Esc if open => self.picker.dispatch(Gesture::ClickCancel),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click was rejected by the picker
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        let layout = PickerLayout::new(self.picker_area, self.picker.is_open());
        let gesture = layout.hit(column, row, &self.picker.day_cells());
        match self.state {
            AppState::Picking => match gesture {
                Some(gesture) => self.picker.dispatch(gesture),
                None => true,
            },
            // Dismisses help; a click outside the picker still closes it
            AppState::Helping => {
                self.state = AppState::Picking;
                if gesture == Some(Gesture::OutsideInteraction) {
                    self.picker.dispatch(Gesture::OutsideInteraction);
                }
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [main, hint] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [column] = Layout::horizontal([PickerLayout::width()])
            .flex(Flex::Center)
            .areas(main);
        self.picker_area = Rect {
            y: column.y.saturating_add(1),
            height: column
                .height
                .saturating_sub(1)
                .min(PickerLayout::open_height()),
            ..column
        };
        Line::styled(HINT, HINT_STYLE).centered().render(hint, buf);
        CalendarView::new().render(self.picker_area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
