use async_trait::async_trait;

use crate::common::frame::Frame;
use crate::error::AppError;

/// Produces one frame per cycle. Camera hardware, synthetic scenes and
/// on-disk stills all sit behind this boundary; whatever the source, the
/// frame it hands over is already RGB.
#[async_trait]
pub trait FrameSource: Send {
    async fn next_frame(&mut self) -> Result<Frame, AppError>;
}
