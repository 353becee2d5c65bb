use ratatui::layout::Position;

/// What occupies a cell of the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Role {
    Head,
    Body,
    Food,
}

/// A positioned thing on the board.  Heads, body segments, and food differ
/// only in their [`Role`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Element {
    pub(crate) role: Role,
    pub(crate) pos: Position,
}

impl Element {
    pub(crate) fn new(role: Role, pos: Position) -> Element {
        Element { role, pos }
    }
}
