pub mod file_journal;
pub mod snapshot_journal;

pub use file_journal::FileJournal;
pub use snapshot_journal::{InMemoryJournal, SnapshotJournal};
