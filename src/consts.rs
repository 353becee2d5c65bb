//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 30,
};

/// Default board width, in cells
pub(crate) const DEFAULT_BOARD_WIDTH: u16 = 30;

/// Default board height, in cells
pub(crate) const DEFAULT_BOARD_HEIGHT: u16 = 25;

/// Default number of terminal columns used to draw a single cell
pub(crate) const DEFAULT_CELL_SIZE: u16 = 2;

/// Number of body segments trailing the head at the start of a game
pub(crate) const INITIAL_BODY_LENGTH: usize = 3;

/// Points awarded for each food eaten
pub(crate) const FOOD_SCORE: u32 = 10;

/// Milliseconds between movements of the snake at the start of a game
pub(crate) const INITIAL_SPEED: u32 = 150;

/// How many milliseconds the tick period shrinks by upon eating food
pub(crate) const SPEED_STEP: u32 = 5;

/// The shortest tick period, in milliseconds
pub(crate) const MIN_SPEED: u32 = 70;

/// The maximum number of entries in the high score table
pub(crate) const MAX_HIGH_SCORES: usize = 10;

/// Name recorded for a high score when the player declines to give one
pub(crate) const DEFAULT_PLAYER_NAME: &str = "Player";

/// Maximum display width of a player name
pub(crate) const MAX_NAME_WIDTH: usize = 16;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head when it has run into itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the text being typed into the name entry field
pub(crate) const INPUT_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for column headers in the high score table
pub(crate) const TABLE_HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
