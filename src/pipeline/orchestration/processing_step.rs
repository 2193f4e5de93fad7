use crate::error::AppError;
use crate::pipeline::orchestration::frame_context::FrameContext;
use async_trait::async_trait;

/// Chain of Responsibility pattern for the processing pipeline
#[async_trait]
pub trait ProcessingStep: Send + Sync {
    async fn process(&mut self, context: &mut FrameContext) -> Result<(), AppError>;
    fn name(&self) -> &'static str;
}
