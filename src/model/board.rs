use super::direction::Direction;
use crate::consts;
use rand::Rng;
use ratatui::layout::Position;

/// Dimensions of the playing field.  `width` and `height` are measured in
/// grid cells; `cell_size` is how many terminal columns each cell occupies
/// when drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) cell_size: u16,
}

impl Board {
    pub(crate) fn new(width: u16, height: u16, cell_size: u16) -> Board {
        Board {
            width,
            height,
            cell_size,
        }
    }

    /// The cell in which the snake's head starts
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    #[cfg(test)]
    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Return the cell one step from `pos` in direction `dir`.  The board is
    /// a torus: stepping off any edge re-enters from the opposite edge.
    pub(crate) fn step(self, pos: Position, dir: Direction) -> Position {
        let Position { mut x, mut y } = pos;
        match dir {
            Direction::Up => y = wrapping_decrement(y, self.height),
            Direction::Down => y = wrapping_increment(y, self.height),
            Direction::Left => x = wrapping_decrement(x, self.width),
            Direction::Right => x = wrapping_increment(x, self.width),
        }
        Position { x, y }
    }

    /// Draw a cell uniformly at random
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }
}

impl Default for Board {
    fn default() -> Board {
        Board {
            width: consts::DEFAULT_BOARD_WIDTH,
            height: consts::DEFAULT_BOARD_HEIGHT,
            cell_size: consts::DEFAULT_CELL_SIZE,
        }
    }
}

fn wrapping_decrement(v: u16, extent: u16) -> u16 {
    match v.checked_sub(1) {
        Some(v2) if v2 < extent => v2,
        _ => extent.saturating_sub(1),
    }
}

fn wrapping_increment(v: u16, extent: u16) -> u16 {
    match v.checked_add(1) {
        Some(v2) if v2 < extent => v2,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Position::new(2, 7), Position::new(2, 6))]
    #[case(Direction::Down, Position::new(2, 7), Position::new(2, 8))]
    #[case(Direction::Left, Position::new(2, 7), Position::new(1, 7))]
    #[case(Direction::Right, Position::new(2, 7), Position::new(3, 7))]
    #[case(Direction::Up, Position::new(2, 0), Position::new(2, 14))]
    #[case(Direction::Down, Position::new(2, 14), Position::new(2, 0))]
    #[case(Direction::Left, Position::new(0, 7), Position::new(9, 7))]
    #[case(Direction::Right, Position::new(9, 7), Position::new(0, 7))]
    #[case(Direction::Left, Position::new(0, 0), Position::new(9, 0))]
    #[case(Direction::Up, Position::new(9, 0), Position::new(9, 14))]
    fn test_step(#[case] dir: Direction, #[case] pos: Position, #[case] r: Position) {
        let board = Board::new(10, 15, 1);
        assert_eq!(board.step(pos, dir), r);
    }

    #[test]
    fn center_of_default_board() {
        assert_eq!(Board::default().center(), Position::new(15, 12));
    }

    #[rstest]
    #[case(Position::new(0, 0), true)]
    #[case(Position::new(3, 2), true)]
    #[case(Position::new(4, 2), false)]
    #[case(Position::new(3, 3), false)]
    fn test_contains(#[case] pos: Position, #[case] r: bool) {
        assert_eq!(Board::new(4, 3, 2).contains(pos), r);
    }

    #[test]
    fn random_cells_in_bounds() {
        let board = Board::new(7, 5, 1);
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        for _ in 0..500 {
            assert!(board.contains(board.random_cell(&mut rng)));
        }
    }
}
