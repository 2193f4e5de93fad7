use async_trait::async_trait;

use crate::error::AppError;
use crate::pipeline::domain::reducer::FrameReducer;
use crate::pipeline::orchestration::frame_context::FrameContext;
use crate::pipeline::orchestration::processing_step::ProcessingStep;

/// Runs the frame reduction and attaches the resulting record to the
/// context for downstream steps.
pub struct SnapshotStep {
    reducer: FrameReducer,
}

impl SnapshotStep {
    pub fn new(reducer: FrameReducer) -> Self {
        Self { reducer }
    }
}

#[async_trait]
impl ProcessingStep for SnapshotStep {
    async fn process(&mut self, context: &mut FrameContext) -> Result<(), AppError> {
        let frame = context.frame();
        let record = self.reducer.reduce(frame.image(), frame.captured_at())?;
        tracing::debug!("Reduced frame {} at {}", frame.id(), record.timestamp);
        context.set_snapshot(record);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "snapshot"
    }
}
