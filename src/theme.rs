use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) mod picker {
    use super::*;

    pub(crate) const FIELD_STYLE: Style = BASE_STYLE;

    pub(crate) const BUTTON_STYLE: Style = BASE_STYLE.fg(Color::Gray);

    pub(crate) const OVERLAY_STYLE: Style = BASE_STYLE;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const ARROW_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.fg(Color::Gray).add_modifier(Modifier::BOLD);

    pub(crate) const DAY_STYLE: Style = BASE_STYLE;

    pub(crate) const SELECTED_STYLE: Style = Style::new()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);

    pub(crate) const TODAY_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

    pub(crate) const CANCEL_STYLE: Style = BASE_STYLE.fg(Color::Gray);
}
