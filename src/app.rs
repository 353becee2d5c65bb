use crate::command::Command;
use crate::game::{GameScreen, GameView};
use crate::menu::MainMenu;
use crate::model::{Control, SnakeGame};
use crate::scores::{HighScoresScreen, ScoreTable};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{read, Event};
use rand::Rng;
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::collections::VecDeque;
use std::io;

/// The whole program: the game plus whichever screen the player is looking
/// at, along with any pending warnings
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    game: SnakeGame<R>,
    screen: Screen,
    warnings: VecDeque<Warning>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: SnakeGame<R>) -> App<R> {
        App {
            game,
            screen: Screen::Main(MainMenu::new()),
            warnings: VecDeque::new(),
        }
    }

    pub(crate) fn with_warnings<I: IntoIterator<Item = Warning>>(mut self, iter: I) -> Self {
        self.warnings.extend(iter);
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.process_input()?;
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = if !self.warnings.is_empty() {
            self.handle_event(read()?)
        } else if let Screen::Game(ref mut screen) = self.screen {
            screen.process_input(&mut self.game)?
        } else {
            self.handle_event(read()?)
        };
        if let Some(screen) = next {
            self.set_screen(screen);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Some(warning) = self.warnings.front() {
            let cmd = Command::from_key_event(event.as_key_press_event()?)?;
            match warning.handle_command(cmd)? {
                WarningOutcome::Dismissed => {
                    self.warnings.pop_front();
                    return None;
                }
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
        }
        match self.screen {
            Screen::Main(ref mut menu) => menu.handle_event(event),
            Screen::HighScores(screen) => screen.handle_event(event),
            // Game input is read by `GameScreen::process_input()`
            Screen::Game(_) | Screen::Quit => None,
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        if matches!(screen, Screen::Game(_)) {
            self.game.apply(Control::Restart);
        }
        self.screen = screen;
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

impl<R> Widget for &App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Main(ref menu) => menu.render(area, buf),
            Screen::Game(ref screen) => GameView {
                screen,
                snapshot: self.game.snapshot(),
            }
            .render(area, buf),
            Screen::HighScores(_) => ScoreTable(self.game.high_scores()).render(area, buf),
            Screen::Quit => (),
        }
        if let Some(warning) = self.warnings.front() {
            warning.render(area, buf);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(GameScreen),
    HighScores(HighScoresScreen),
    Quit,
}
