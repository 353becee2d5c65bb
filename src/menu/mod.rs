mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::GameScreen;
use crate::scores::HighScoresScreen;
use crate::util::{get_display_area, EnumExt};
use crossterm::event::Event;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
}

impl MainMenu {
    pub(crate) fn new() -> Self {
        MainMenu::default()
    }

    pub(crate) fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            (Selection::Play, Command::Enter) | (_, Command::P) => {
                return Some(Screen::Game(GameScreen::new()))
            }
            (Selection::TopScores, Command::Enter) | (_, Command::T) => {
                return Some(Screen::HighScores(HighScoresScreen))
            }
            (Selection::Quit, Command::Enter) | (_, Command::Q) => return Some(Screen::Quit),
            (sel, Command::Up) => self.selection = sel.prev().unwrap_or(sel),
            (sel, Command::Down) => self.selection = sel.next().unwrap_or(sel),
            (sel, Command::Prev) => self.selection = sel.prev().unwrap_or_else(Selection::max),
            (sel, Command::Next) => self.selection = sel.next().unwrap_or_else(Selection::min),
            _ => (),
        }
        None
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, scores_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);
        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);
        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);
        for (sel, area) in [
            (Selection::Play, play_area),
            (Selection::TopScores, scores_area),
            (Selection::Quit, quit_area),
        ] {
            let style = if self.selection == sel {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let (label, key) = sel.label();
            Line::from_iter([
                Span::styled(format!("[{label} ("), style),
                Span::styled(key, consts::KEY_STYLE.patch(style)),
                Span::styled(")]", style),
            ])
            .centered()
            .render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum Selection {
    #[default]
    Play,
    TopScores,
    Quit,
}

impl Selection {
    fn label(self) -> (&'static str, &'static str) {
        match self {
            Selection::Play => ("Play", "p"),
            Selection::TopScores => ("Top Scores", "t"),
            Selection::Quit => ("Quit", "q"),
        }
    }
}
