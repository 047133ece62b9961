//! Sync watermark persistence
//!
//! [`StateRepository`] stores a small JSON object between runs. The supplier only uses
//! it for the `lastUpdatedAt` watermark (epoch milliseconds of the last successful run).

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// State as persisted: a flat JSON object.
pub type State = Map<String, Value>;

pub const LAST_UPDATED_AT: &str = "lastUpdatedAt";

/// Errors produced by [`StateRepository`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// File-system I/O failure.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file does not hold a JSON object.
    #[error("corrupt state file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage contract for connector state.
pub trait StateRepository {
    /// Read the current state; an empty object when nothing was saved yet.
    fn get_state(&self) -> Result<State, StateError>;

    /// Replace the stored state.
    fn save_state(&mut self, state: &State) -> Result<(), StateError>;

    /// The last successful sync, or 0 when there has been none.
    fn last_updated_at(&self) -> Result<i64, StateError> {
        Ok(self
            .get_state()?
            .get(LAST_UPDATED_AT)
            .and_then(Value::as_i64)
            .unwrap_or(0))
    }

    fn set_last_updated_at(&mut self, timestamp: i64) -> Result<(), StateError> {
        let mut state = State::new();
        state.insert(LAST_UPDATED_AT.to_string(), Value::from(timestamp));
        self.save_state(&state)
    }
}

/// Process-local state, lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateRepository {
    state: State,
}

impl MemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for MemoryStateRepository {
    fn get_state(&self) -> Result<State, StateError> {
        Ok(self.state.clone())
    }

    fn save_state(&mut self, state: &State) -> Result<(), StateError> {
        self.state = state.clone();
        Ok(())
    }
}

/// State kept in a JSON file; the file and its directory are created on first save.
#[derive(Debug, Clone)]
pub struct FileStateRepository {
    path: PathBuf,
}

impl FileStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StateError {
        StateError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateRepository for FileStateRepository {
    fn get_state(&self) -> Result<State, StateError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(State::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        serde_json::from_str(&contents).map_err(|source| StateError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save_state(&mut self, state: &State) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let contents = Value::Object(state.clone()).to_string();
        fs::write(&self.path, contents).map_err(|err| self.io_error(err))
    }
}
