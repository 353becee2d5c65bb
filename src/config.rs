use crate::consts;
use crate::model::{Board, HighScores};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Size of the playing field
    #[serde(default)]
    pub(crate) board: BoardConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    pub(crate) fn board(&self) -> Board {
        Board::new(self.board.width, self.board.height, self.board.cell_size)
    }

    /// Return the path at which high scores should be stored: the file given
    /// in the configuration or, if that is not set, the default high scores
    /// file path.  Returns `None` if no path is configured and the default
    /// could not be computed.
    pub(crate) fn high_scores_file(&self) -> Option<PathBuf> {
        self.files
            .high_scores_file
            .clone()
            .or_else(HighScores::default_path)
    }

    /// Return the path to which log messages should be written
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.files.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawBoardConfig")]
pub(crate) struct BoardConfig {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl BoardConfig {
    const MIN_SIDE: u16 = 10;
    const CELL_SIZE_RANGE: RangeInclusive<u16> = 1..=4;

    // The border takes up two columns & two rows of the display; the score
    // bar above the board and the two message lines below it take three more
    // rows.
    const MAX_COLUMNS: u16 = consts::DISPLAY_SIZE.width - 2;
    const HEIGHT_RANGE: RangeInclusive<u16> = Self::MIN_SIDE..=consts::DISPLAY_SIZE.height - 5;

    /// The widths, in cells, at which a board with the given nonzero cell
    /// size still fits within the display
    fn width_range(cell_size: u16) -> RangeInclusive<u16> {
        Self::MIN_SIDE..=Self::MAX_COLUMNS / cell_size
    }
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            width: consts::DEFAULT_BOARD_WIDTH,
            height: consts::DEFAULT_BOARD_HEIGHT,
            cell_size: consts::DEFAULT_CELL_SIZE,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawBoardConfig {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl Default for RawBoardConfig {
    fn default() -> RawBoardConfig {
        let BoardConfig {
            width,
            height,
            cell_size,
        } = BoardConfig::default();
        RawBoardConfig {
            width,
            height,
            cell_size,
        }
    }
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = BoardError;

    fn try_from(value: RawBoardConfig) -> Result<BoardConfig, BoardError> {
        if !BoardConfig::CELL_SIZE_RANGE.contains(&value.cell_size) {
            return Err(BoardError {
                field: "cell-size",
                value: value.cell_size,
                range: BoardConfig::CELL_SIZE_RANGE,
            });
        }
        for (field, v, range) in [
            ("width", value.width, BoardConfig::width_range(value.cell_size)),
            ("height", value.height, BoardConfig::HEIGHT_RANGE),
        ] {
            if !range.contains(&v) {
                return Err(BoardError {
                    field,
                    value: v,
                    range,
                });
            }
        }
        Ok(BoardConfig {
            width: value.width,
            height: value.height,
            cell_size: value.cell_size,
        })
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("board {field} must be between {} and {}, got {value}", .range.start(), .range.end())]
pub(crate) struct BoardError {
    field: &'static str,
    value: u16,
    range: RangeInclusive<u16>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score table is stored
    high_scores_file: Option<PathBuf>,

    /// Path to which log messages are written
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
