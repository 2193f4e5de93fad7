use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;

use crate::capture::frame_source::FrameSource;
use crate::common::frame::Frame;
use crate::error::AppError;

/// Re-reads one image file every cycle. Useful for pointing the monitor at
/// a file another process keeps fresh.
pub struct StillSource {
    path: PathBuf,
}

impl StillSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FrameSource for StillSource {
    async fn next_frame(&mut self) -> Result<Frame, AppError> {
        let image = image::open(&self.path).map_err(|e| {
            AppError::Capture(format!(
                "Failed to open image at path '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Frame::new(image, Utc::now()))
    }
}
