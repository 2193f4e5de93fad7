pub mod journal_step;
pub mod snapshot_step;

pub use journal_step::JournalStep;
pub use snapshot_step::SnapshotStep;
