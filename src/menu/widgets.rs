use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const GRID_WIDTH: u16 = 21;
    const SNAKE_WIDTH: u16 = 28;
    const SNAKE_BODY_LENGTH: u16 = 12;
    const SNAKE_FOOD_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::GRID_WIDTH + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const GRID: [&'static str; Self::TEXT_HEIGHT as usize] = [
         "  ____      _     _ ",
         " / ___|_ __(_) __| |",
         "| |  _| '__| |/ _` |",
         "| |_| | |  | | (_| |",
        r" \____|_|  |_|\__,_|",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [grid_area, snake_area] = Layout::horizontal([Self::GRID_WIDTH, Self::SNAKE_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::GRID)
            .style(consts::FOOD_STYLE)
            .render(grid_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_FOOD_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        fill(body_area, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE, buf);
        fill(head_area, consts::SNAKE_HEAD_RIGHT_SYMBOL, consts::SNAKE_STYLE, buf);
        fill(food_area, consts::FOOD_SYMBOL, consts::FOOD_STYLE, buf);
    }
}

fn fill(area: Rect, symbol: char, style: Style, buf: &mut Buffer) {
    for p in area.positions() {
        if let Some(cell) = buf.cell_mut(p) {
            cell.set_char(symbol);
            cell.set_style(style);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys_line("       ", ["←", "↓", "↑", "→"]),
            keys_line("   or: ", ["h", "j", "k", "l"]),
            keys_line("   or: ", ["a", "s", "w", "d"]),
            Line::from_iter([
                Span::raw("Pause/resume: "),
                Span::styled("p", consts::KEY_STYLE),
            ]),
            Line::from("Eat the food, but"),
            Line::from("don't bite yourself!"),
        ]);
        text.render(area, buf);
    }
}

fn keys_line(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
    let mut spans = vec![Span::raw(prefix)];
    for (i, k) in keys.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(k, consts::KEY_STYLE));
    }
    Line::from(spans)
}
