use async_trait::async_trait;

use crate::error::AppError;
use crate::journal::snapshot_journal::SnapshotJournal;
use crate::pipeline::orchestration::frame_context::FrameContext;
use crate::pipeline::orchestration::processing_step::ProcessingStep;

/// Persists the snapshot the reduction step produced: replaces the current
/// record and appends to the history.
pub struct JournalStep {
    journal: Box<dyn SnapshotJournal>,
}

impl JournalStep {
    pub fn new(journal: Box<dyn SnapshotJournal>) -> Self {
        Self { journal }
    }
}

#[async_trait]
impl ProcessingStep for JournalStep {
    async fn process(&mut self, context: &mut FrameContext) -> Result<(), AppError> {
        let record = context
            .snapshot()
            .ok_or_else(|| AppError::Pipeline("No snapshot to journal".to_string()))?;
        self.journal.write_current(record)?;
        let history_len = self.journal.append_history(record)?;
        self.journal.flush()?;
        tracing::info!("History updated with {} entries", history_len);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "journal"
    }
}
