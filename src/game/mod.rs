mod name_entry;
mod paused;
use self::name_entry::{NameEntry, NameOutcome};
use self::paused::{PauseMenu, PauseOpt};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::model::{Control, Direction, GameState, Role, SnakeGame, Snapshot};
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::time::Instant;

/// The screen on which the game is played.  The game itself lives in the
/// [`App`][crate::app::App]; this holds the tick timer and pop-ups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameScreen {
    next_tick: Option<Instant>,
    pause_menu: PauseMenu,
    name_entry: Option<NameEntry>,
}

impl GameScreen {
    pub(crate) fn new() -> GameScreen {
        GameScreen {
            next_tick: None,
            pause_menu: PauseMenu::new(),
            name_entry: None,
        }
    }

    /// Wait for either the next input event or the next tick, whichever comes
    /// first, and handle it
    pub(crate) fn process_input<R: Rng>(
        &mut self,
        game: &mut SnakeGame<R>,
    ) -> std::io::Result<Option<Screen>> {
        if game.state() == GameState::Running {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + game.tick_period());
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick(game);
                Ok(None)
            } else {
                Ok(self.handle_event(game, read()?))
            }
        } else {
            Ok(self.handle_event(game, read()?))
        }
    }

    fn tick<R: Rng>(&mut self, game: &mut SnakeGame<R>) {
        self.next_tick = None;
        let was_running = game.state() == GameState::Running;
        game.update();
        if was_running && game.state() == GameState::GameOver && game.is_high_score() {
            self.name_entry = Some(NameEntry::new(game.score()));
        }
    }

    fn handle_event<R: Rng>(&mut self, game: &mut SnakeGame<R>, event: Event) -> Option<Screen> {
        if let Some(ref mut entry) = self.name_entry {
            match entry.handle_event(event)? {
                NameOutcome::Submit(name) => {
                    game.add_high_score(&name);
                    self.name_entry = None;
                }
                NameOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        match game.state() {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.toggle_pause(game);
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => game.apply(Control::Turn(Direction::Up)),
                        Command::Down => game.apply(Control::Turn(Direction::Down)),
                        Command::Left => game.apply(Control::Turn(Direction::Left)),
                        Command::Right => game.apply(Control::Turn(Direction::Right)),
                        Command::P | Command::Esc => self.toggle_pause(game),
                        Command::M => return Some(Screen::Main(MainMenu::new())),
                        _ => (),
                    }
                }
            }
            GameState::Paused => match self.pause_menu.handle_event(event)? {
                PauseOpt::Resume => self.toggle_pause(game),
                PauseOpt::Restart => self.restart(game),
                PauseOpt::MainMenu => return Some(Screen::Main(MainMenu::new())),
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::GameOver => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::R => self.restart(game),
                Command::M | Command::Esc => return Some(Screen::Main(MainMenu::new())),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }

    fn toggle_pause<R: Rng>(&mut self, game: &mut SnakeGame<R>) {
        game.apply(Control::TogglePause);
        self.pause_menu = PauseMenu::new();
        self.next_tick = None;
    }

    fn restart<R: Rng>(&mut self, game: &mut SnakeGame<R>) {
        game.apply(Control::Restart);
        *self = GameScreen::new();
    }
}

/// Widget for drawing a [`GameScreen`] along with the state of the game
#[derive(Clone, Copy, Debug)]
pub(crate) struct GameView<'a> {
    pub(crate) screen: &'a GameScreen,
    pub(crate) snapshot: Snapshot<'a>,
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let GameView { screen, snapshot } = self;
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(format!(" Score: {}", snapshot.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);
        Line::from(format!("Tick: {} ms ", snapshot.speed))
            .right_aligned()
            .render(score_area, buf);

        let board = snapshot.board;
        let block_size = Size {
            width: board
                .width
                .saturating_mul(board.cell_size)
                .saturating_add(2),
            height: board.height.saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            cell_size: board.cell_size,
            buf,
        };
        for elem in snapshot.elements() {
            match elem.role {
                Role::Body => {
                    canvas.draw_cell(elem.pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
                }
                Role::Food => canvas.draw_cell(elem.pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE),
                Role::Head if snapshot.game_over => {
                    canvas.draw_cell(elem.pos, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
                }
                Role::Head => {
                    canvas.draw_cell(elem.pos, head_symbol(snapshot.direction), consts::SNAKE_STYLE);
                }
            }
        }

        if snapshot.paused {
            let pause_area = center_rect(
                display,
                Size {
                    width: PauseMenu::WIDTH,
                    height: PauseMenu::HEIGHT,
                },
            );
            screen.pause_menu.render(pause_area, buf);
        }
        if snapshot.game_over {
            Span::from(" — GAME OVER —").render(msg1_area, buf);
            Line::from_iter([
                Span::raw(" Choose One: Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Main Menu ("),
                Span::styled("m", consts::KEY_STYLE),
                Span::raw(") — Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg2_area, buf);
            if let Some(ref entry) = screen.name_entry {
                let entry_area = center_rect(
                    display,
                    Size {
                        width: NameEntry::WIDTH,
                        height: NameEntry::HEIGHT,
                    },
                );
                entry.render(entry_area, buf);
            }
        }
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// The inside of the board's border, addressed in grid cells.  Each cell is
/// `cell_size` columns wide; its glyph goes in the leftmost column.
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    cell_size: u16,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(self.cell_size)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
