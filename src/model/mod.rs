//! The game proper, independent of how it is drawn or controlled
mod board;
mod direction;
mod entity;
mod highscores;
pub(crate) use self::board::Board;
pub(crate) use self::direction::Direction;
pub(crate) use self::entity::{Element, Role};
pub(crate) use self::highscores::HighScores;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;
use std::time::Duration;

/// State of a single game of Snake, plus the high score table that outlives
/// it.
///
/// All mutation goes through [`SnakeGame::update()`] (one tick of the clock)
/// and [`SnakeGame::apply()`] (player commands); the caller is expected to
/// invoke both from the same thread.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SnakeGame<R = rand::rngs::ThreadRng> {
    rng: R,
    board: Board,
    head: Position,
    /// The cells of the snake's body, nearest the head first
    body: Vec<Position>,
    food: Position,
    /// The direction the snake moved in on the most recent tick
    direction: Direction,
    /// The direction the snake will move in on the next tick
    next_direction: Direction,
    state: GameState,
    score: u32,
    /// Milliseconds between ticks
    speed: u32,
    high_scores: HighScores,
}

impl SnakeGame<rand::rngs::ThreadRng> {
    pub(crate) fn new(board: Board, high_scores: HighScores) -> Self {
        SnakeGame::new_with_rng(board, high_scores, rand::rng())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub(crate) fn new_with_rng(board: Board, high_scores: HighScores, rng: R) -> SnakeGame<R> {
        let head = board.center();
        let mut game = SnakeGame {
            rng,
            board,
            head,
            body: Vec::new(),
            food: head,
            direction: Direction::Up,
            next_direction: Direction::Up,
            state: GameState::Running,
            score: 0,
            speed: consts::INITIAL_SPEED,
            high_scores,
        };
        game.reset();
        game
    }

    /// Start a new game on the same board, keeping the high scores
    pub(crate) fn reset(&mut self) {
        let board = self.board;
        self.head = board.center();
        self.body = std::iter::successors(Some(self.head), |&p| {
            Some(board.step(p, Direction::Down))
        })
        .skip(1)
        .take(consts::INITIAL_BODY_LENGTH)
        .collect();
        self.direction = Direction::Up;
        self.next_direction = Direction::Up;
        self.state = GameState::Running;
        self.score = 0;
        self.speed = consts::INITIAL_SPEED;
        self.spawn_food();
    }

    /// Carry out a player command
    pub(crate) fn apply(&mut self, control: Control) {
        match control {
            Control::Turn(d) => self.change_direction(d),
            Control::TogglePause => self.toggle_pause(),
            Control::Restart => self.reset(),
        }
    }

    /// Advance the game by one tick.  Does nothing unless the game is
    /// running.
    pub(crate) fn update(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.direction = self.next_direction;
        let prev_head = self.head;
        self.head = self.board.step(prev_head, self.direction);
        // The body has not moved yet, so the head collides even with the cell
        // the tail is about to vacate.
        if self.body.contains(&self.head) {
            self.state = GameState::GameOver;
            log::info!("Game over with score {}", self.score);
            return;
        }
        if self.head == self.food {
            self.eat_food();
        }
        let mut carried = prev_head;
        for segment in &mut self.body {
            carried = std::mem::replace(segment, carried);
        }
    }

    fn eat_food(&mut self) {
        self.score += consts::FOOD_SCORE;
        // The new segment starts on top of the tail and is left behind there
        // once the rest of the body shifts.
        let tail = self.body.last().copied().unwrap_or(self.head);
        self.body.push(tail);
        self.speed = self
            .speed
            .saturating_sub(consts::SPEED_STEP)
            .max(consts::MIN_SPEED);
        self.spawn_food();
    }

    /// Place the food on a random cell not occupied by the snake.
    ///
    /// This loops forever if the snake covers the whole board; boards are
    /// required to be far larger than any snake a player can grow.
    fn spawn_food(&mut self) {
        self.food = loop {
            let pos = self.board.random_cell(&mut self.rng);
            if !self.occupies(pos) {
                break pos;
            }
        };
    }
}

impl<R> SnakeGame<R> {
    /// Request that the snake move in direction `d` starting with the next
    /// tick.  Requests to reverse direction are ignored, as are all requests
    /// once the game is over.
    pub(crate) fn change_direction(&mut self, d: Direction) {
        if self.state == GameState::GameOver || d.is_reverse_of(self.direction) {
            return;
        }
        self.next_direction = d;
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            GameState::GameOver => GameState::GameOver,
        };
    }

    /// Does the current score earn a place in the high score table?
    pub(crate) fn is_high_score(&self) -> bool {
        self.high_scores.qualifies(self.score)
    }

    /// Record the current score under `name` if it is a high score.  Returns
    /// `true` if the score was recorded.
    pub(crate) fn add_high_score(&mut self, name: &str) -> bool {
        if self.is_high_score() {
            self.high_scores.insert(name, self.score);
            true
        } else {
            false
        }
    }

    /// Is the snake's head or any part of its body on `pos`?
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.speed))
    }

    pub(crate) fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            head: self.head,
            body: &self.body,
            food: self.food,
            direction: self.direction,
            game_over: self.state == GameState::GameOver,
            paused: self.state == GameState::Paused,
            score: self.score,
            speed: self.speed,
            board: self.board,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    Paused,
    GameOver,
}

/// A command from the player
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Control {
    Turn(Direction),
    TogglePause,
    Restart,
}

/// A read-only view of everything needed to draw a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) head: Position,
    pub(crate) body: &'a [Position],
    pub(crate) food: Position,
    pub(crate) direction: Direction,
    pub(crate) game_over: bool,
    pub(crate) paused: bool,
    pub(crate) score: u32,
    pub(crate) speed: u32,
    pub(crate) board: Board,
}

impl Snapshot<'_> {
    /// Iterate over everything on the board.  The head comes last so that,
    /// when drawn in order, it is drawn over whatever it has collided with.
    pub(crate) fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.body
            .iter()
            .map(|&pos| Element::new(Role::Body, pos))
            .chain([
                Element::new(Role::Food, self.food),
                Element::new(Role::Head, self.head),
            ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> SnakeGame<ChaCha12Rng> {
        SnakeGame::new_with_rng(
            Board::new(30, 25, 1),
            HighScores::in_memory(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    /// Snake length, counting the head
    fn length<R>(game: &SnakeGame<R>) -> usize {
        game.body.len() + 1
    }

    #[test]
    fn start_of_game() {
        let game = new_game();
        assert_eq!(game.head, Position::new(15, 12));
        assert_eq!(
            game.body,
            [
                Position::new(15, 13),
                Position::new(15, 14),
                Position::new(15, 15)
            ]
        );
        assert_eq!(game.direction, Direction::Up);
        assert_eq!(game.next_direction, Direction::Up);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snapshot().speed, 150);
        assert_eq!(game.tick_period(), Duration::from_millis(150));
        assert!(!game.occupies(game.food));
        assert!(game.board.contains(game.food));
    }

    #[test]
    fn first_tick_moves_up() {
        let mut game = new_game();
        game.food = Position::new(0, 0);
        game.update();
        assert_eq!(game.head, Position::new(15, 11));
        assert_eq!(
            game.body,
            [
                Position::new(15, 12),
                Position::new(15, 13),
                Position::new(15, 14)
            ]
        );
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
    }

    #[rstest]
    #[case(Position::new(0, 7), Direction::Left, Position::new(29, 7))]
    #[case(Position::new(29, 7), Direction::Right, Position::new(0, 7))]
    #[case(Position::new(4, 0), Direction::Up, Position::new(4, 24))]
    #[case(Position::new(4, 24), Direction::Down, Position::new(4, 0))]
    fn wraparound(#[case] head: Position, #[case] dir: Direction, #[case] after: Position) {
        let mut game = new_game();
        game.head = head;
        game.body = vec![game.board.step(head, dir.reverse())];
        game.direction = dir;
        game.next_direction = dir;
        game.food = Position::new(10, 10);
        game.update();
        assert_eq!(game.head, after);
        assert_eq!(game.body, [head]);
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn reverse_turn_ignored() {
        let mut game = new_game();
        game.food = Position::new(0, 0);
        game.change_direction(Direction::Down);
        assert_eq!(game.next_direction, Direction::Up);
        game.update();
        assert_eq!(game.head, Position::new(15, 11));
    }

    #[test]
    fn turn_applies_on_next_tick() {
        let mut game = new_game();
        game.food = Position::new(0, 0);
        game.change_direction(Direction::Left);
        assert_eq!(game.direction, Direction::Up);
        game.update();
        assert_eq!(game.direction, Direction::Left);
        assert_eq!(game.head, Position::new(14, 12));
        assert_eq!(game.body[0], Position::new(15, 12));
    }

    #[test]
    fn reversal_checked_against_committed_direction() {
        let mut game = new_game();
        game.food = Position::new(0, 0);
        game.change_direction(Direction::Left);
        // Right is only the reverse of the pending direction, not of the
        // committed one.
        game.change_direction(Direction::Right);
        assert_eq!(game.next_direction, Direction::Right);
        game.update();
        assert_eq!(game.head, Position::new(16, 12));
        game.change_direction(Direction::Left);
        assert_eq!(game.next_direction, Direction::Right);
    }

    fn curled_game() -> SnakeGame<ChaCha12Rng> {
        let mut game = new_game();
        game.head = Position::new(5, 5);
        game.body = vec![
            Position::new(4, 5),
            Position::new(4, 6),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ];
        game.direction = Direction::Right;
        game.next_direction = Direction::Right;
        game.food = Position::new(20, 20);
        game
    }

    #[test]
    fn self_collision() {
        let mut game = curled_game();
        let body = game.body.clone();
        game.update();
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.head, Position::new(6, 5));
        assert_eq!(game.body, body);
    }

    #[test]
    fn game_over_is_final() {
        let mut game = curled_game();
        game.update();
        assert_eq!(game.state(), GameState::GameOver);
        let before = game.clone();
        game.update();
        game.change_direction(Direction::Up);
        game.toggle_pause();
        game.apply(Control::Turn(Direction::Down));
        game.apply(Control::TogglePause);
        assert_eq!(game, before);
    }

    #[test]
    fn restart_after_game_over() {
        let mut game = curled_game();
        game.update();
        game.apply(Control::Restart);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.head, Position::new(15, 12));
        assert_eq!(length(&game), 4);
    }

    #[test]
    fn eat_food() {
        let mut game = new_game();
        game.food = Position::new(15, 11);
        game.update();
        assert_eq!(game.score(), 10);
        assert_eq!(game.snapshot().speed, 145);
        assert_eq!(game.head, Position::new(15, 11));
        assert_eq!(
            game.body,
            [
                Position::new(15, 12),
                Position::new(15, 13),
                Position::new(15, 14),
                Position::new(15, 15),
            ]
        );
        assert_eq!(length(&game), 5);
        assert!(!game.occupies(game.food));
    }

    #[test]
    fn speed_bottoms_out() {
        let mut game = new_game();
        let mut expected_speed = 150;
        for i in 1..=20 {
            game.food = game.board.step(game.head, Direction::Up);
            game.update();
            assert_eq!(game.state(), GameState::Running);
            assert_eq!(game.score(), i * 10);
            expected_speed = (expected_speed - 5).max(70);
            assert_eq!(game.snapshot().speed, expected_speed);
        }
        assert_eq!(game.snapshot().speed, 70);
        assert_eq!(game.tick_period(), Duration::from_millis(70));
    }

    #[test]
    fn paused_game_does_not_move() {
        let mut game = new_game();
        game.apply(Control::TogglePause);
        assert_eq!(game.state(), GameState::Paused);
        assert!(game.snapshot().paused);
        let head = game.head;
        game.update();
        assert_eq!(game.head, head);
        game.change_direction(Direction::Left);
        assert_eq!(game.next_direction, Direction::Left);
        game.apply(Control::TogglePause);
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn random_play() {
        let mut game = new_game();
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let mut prev_len = length(&game);
        for _ in 0..2000 {
            if rng.random_bool(0.3) {
                let d = dirs[rng.random_range(0..dirs.len())];
                game.change_direction(d);
            }
            // Steer into the food now and then so the snake grows.
            if rng.random_bool(0.2) {
                game.food = game.board.step(game.head, game.next_direction);
                if game.body.contains(&game.food) {
                    game.spawn_food();
                }
            }
            game.update();
            let len = length(&game);
            assert!(len >= prev_len, "snake shrank from {prev_len} to {len}");
            prev_len = len;
            assert!(game.board.contains(game.head));
            assert!(game.body.iter().all(|&p| game.board.contains(p)));
            if game.state() == GameState::GameOver {
                game.reset();
                prev_len = length(&game);
            } else {
                assert!(!game.occupies(game.food));
            }
        }
    }

    #[test]
    fn high_score_gate() {
        let mut game = new_game();
        assert!(game.is_high_score());
        for i in 1..=10 {
            game.high_scores.insert_at("old", i * 100, 0);
        }
        assert!(!game.is_high_score());
        assert!(!game.add_high_score("nobody"));
        assert_eq!(game.high_scores().len(), 10);
        game.score = 150;
        assert!(game.is_high_score());
        assert!(game.add_high_score("somebody"));
        let scores = game
            .high_scores()
            .entries()
            .iter()
            .map(|hs| hs.score)
            .collect::<Vec<_>>();
        assert_eq!(
            scores,
            [1000, 900, 800, 700, 600, 500, 400, 300, 200, 150]
        );
    }

    #[test]
    fn reset_keeps_high_scores() {
        let mut game = new_game();
        game.score = 40;
        assert!(game.add_high_score("alice"));
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_scores().len(), 1);
        assert_eq!(game.high_scores().entries()[0].name, "alice");
    }

    #[test]
    fn snapshot_elements() {
        let mut game = new_game();
        game.food = Position::new(1, 2);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.board, Board::new(30, 25, 1));
        assert!(!snapshot.game_over);
        assert!(!snapshot.paused);
        let elements = snapshot.elements().collect::<Vec<_>>();
        assert_eq!(
            elements,
            [
                Element::new(Role::Body, Position::new(15, 13)),
                Element::new(Role::Body, Position::new(15, 14)),
                Element::new(Role::Body, Position::new(15, 15)),
                Element::new(Role::Food, Position::new(1, 2)),
                Element::new(Role::Head, Position::new(15, 12)),
            ]
        );
    }
}
