use crate::consts;
use crate::util::ErrorChain;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// The ledger of the best scores achieved, best first, holding at most
/// [`MAX_HIGH_SCORES`][consts::MAX_HIGH_SCORES] entries.
///
/// If the ledger was loaded from a file, every insertion is written back to
/// that file.  I/O failures are logged and otherwise ignored; the in-memory
/// ledger stays authoritative for the rest of the process.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HighScores {
    entries: Vec<HighScoreEntry>,
    path: Option<PathBuf>,
}

impl HighScores {
    /// Return the default location of the high scores file
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("highscores.json"))
    }

    /// Create an empty ledger that is never persisted
    pub(crate) fn in_memory() -> HighScores {
        HighScores::default()
    }

    /// Load the ledger stored at `path`, falling back to an empty ledger if
    /// the file does not exist or cannot be read.  Subsequent insertions are
    /// saved to `path`.
    pub(crate) fn load(path: PathBuf) -> HighScores {
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("{}", ErrorChain(&e));
                Vec::new()
            }
        };
        let mut scores = HighScores {
            entries,
            path: Some(path),
        };
        scores.normalize();
        scores
    }

    /// Write the ledger to its backing file, if any
    pub(crate) fn save(&self) {
        if let Some(ref path) = self.path {
            if let Err(e) = write_entries(path, &self.entries) {
                log::error!("{}", ErrorChain(&e));
            }
        }
    }

    pub(crate) fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Would `score` earn a place in the ledger?
    pub(crate) fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < consts::MAX_HIGH_SCORES
            || self.entries.last().is_some_and(|hs| score > hs.score)
    }

    /// Record `score` for `name` with the current time as its timestamp
    pub(crate) fn insert(&mut self, name: &str, score: u32) {
        self.insert_at(name, score, now_millis());
    }

    pub(crate) fn insert_at(&mut self, name: &str, score: u32, timestamp: u64) {
        self.entries.push(HighScoreEntry {
            name: name.to_owned(),
            score,
            timestamp,
        });
        self.normalize();
        log::info!("Recorded high score {score} for {name:?}");
        self.save();
    }

    fn normalize(&mut self) {
        // `sort_by` is stable, so ties keep their insertion order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(consts::MAX_HIGH_SCORES);
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct HighScoreEntry {
    pub(crate) name: String,
    pub(crate) score: u32,
    /// Milliseconds since the Unix epoch at which the score was recorded
    pub(crate) timestamp: u64,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

fn read_entries(path: &Path) -> Result<Vec<HighScoreEntry>, LoadError> {
    let src = match fs_err::read(path) {
        Ok(src) => src,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(LoadError::read(e)),
    };
    serde_json::from_slice(&src).map_err(LoadError::deserialize)
}

fn write_entries(path: &Path, entries: &[HighScoreEntry]) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
    }
    let mut src = serde_json::to_string(entries).map_err(SaveError::serialize)?;
    src.push('\n');
    fs_err::write(path, &src).map_err(SaveError::write)?;
    Ok(())
}

#[derive(Debug, Error)]
#[error("failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}
