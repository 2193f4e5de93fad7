use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::journal::snapshot_journal::SnapshotJournal;
use crate::pipeline::domain::snapshot::SnapshotRecord;

const CURRENT_FILE: &str = "current.json";
const HISTORY_FILE: &str = "history.json";

/// JSON-file journal rooted at a data directory: `current.json` holds the
/// latest record, `history.json` the full list of records.
pub struct FileJournal {
    data_dir: PathBuf,
}

impl FileJournal {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn current_path(&self) -> PathBuf {
        self.data_dir.join(CURRENT_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    /// Writes through a temp file and renames, so readers never observe a
    /// half-written record.
    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// A missing history file starts an empty list. An unreadable one is
    /// logged and replaced rather than aborting the cycle.
    fn read_history(&self) -> Vec<SnapshotRecord> {
        let path = self.history_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Error reading history file {}: {}", path.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(
                    "History file {} is not valid, starting a fresh list: {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

impl SnapshotJournal for FileJournal {
    fn write_current(&mut self, record: &SnapshotRecord) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(record)?;
        self.write_atomic(&self.current_path(), &bytes)
    }

    fn append_history(&mut self, record: &SnapshotRecord) -> Result<usize, StorageError> {
        let mut history = self.read_history();
        history.push(record.clone());
        let bytes = serde_json::to_vec(&history)?;
        self.write_atomic(&self.history_path(), &bytes)?;
        Ok(history.len())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}
