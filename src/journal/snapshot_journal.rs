use crate::error::StorageError;
use crate::pipeline::domain::snapshot::SnapshotRecord;

/// Storage boundary for finished snapshots: one "current" record that is
/// replaced every cycle, and a growing history list.
pub trait SnapshotJournal: Send + Sync {
    fn write_current(&mut self, record: &SnapshotRecord) -> Result<(), StorageError>;
    /// Returns the history length after the append.
    fn append_history(&mut self, record: &SnapshotRecord) -> Result<usize, StorageError>;
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// In-memory journal (for testing and development)
pub struct InMemoryJournal {
    current: Option<SnapshotRecord>,
    history: Vec<SnapshotRecord>,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self {
            current: None,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Option<&SnapshotRecord> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[SnapshotRecord] {
        &self.history
    }
}

impl Default for InMemoryJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotJournal for InMemoryJournal {
    fn write_current(&mut self, record: &SnapshotRecord) -> Result<(), StorageError> {
        self.current = Some(record.clone());
        Ok(())
    }

    fn append_history(&mut self, record: &SnapshotRecord) -> Result<usize, StorageError> {
        self.history.push(record.clone());
        Ok(self.history.len())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        // In-memory journal doesn't need to flush
        Ok(())
    }
}
