#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Is `self` the opposite of `other`?  A snake may never turn around in
    /// place.
    pub(crate) fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::Up, Direction::Down, true)]
    #[case(Direction::Down, Direction::Up, true)]
    #[case(Direction::Left, Direction::Right, true)]
    #[case(Direction::Right, Direction::Left, true)]
    #[case(Direction::Up, Direction::Up, false)]
    #[case(Direction::Up, Direction::Left, false)]
    #[case(Direction::Down, Direction::Right, false)]
    #[case(Direction::Left, Direction::Up, false)]
    fn test_is_reverse_of(#[case] a: Direction, #[case] b: Direction, #[case] r: bool) {
        assert_eq!(a.is_reverse_of(b), r);
    }
}
