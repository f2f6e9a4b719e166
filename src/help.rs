use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static KEYS: &[(&str, &str)] = &[
    ("ENTER, SPACE", "Open or close the calendar"),
    ("<, LEFT", "Show previous month"),
    (">, RIGHT", "Show next month"),
    ("t", "Select today"),
    ("ESC", "Cancel, or quit if closed"),
    ("?", "Show this help"),
    ("q", "Quit"),
];

static FOOTER: &[&str] = &["Click a day to select it.", "Press the Any Key to dismiss."];

const KEY_COLUMN: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = KEYS
            .iter()
            .map(|(keys, action)| {
                Line::raw(format!("{keys:<width$}{action}", width = KEY_COLUMN))
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.extend(FOOTER.iter().map(|&s| Line::raw(s)));
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(help_area, buf);
    }
}
