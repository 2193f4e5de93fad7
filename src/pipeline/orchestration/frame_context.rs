use std::sync::Arc;
use std::time::Instant;

use crate::common::frame::Frame;
use crate::pipeline::domain::snapshot::SnapshotRecord;

/// Carries one frame through the step chain, accumulating the snapshot the
/// reduction step produces.
pub struct FrameContext {
    frame: Arc<Frame>,
    snapshot: Option<SnapshotRecord>,
    processing_start: Instant,
}

impl FrameContext {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: Arc::new(frame),
            snapshot: None,
            processing_start: Instant::now(),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn snapshot(&self) -> Option<&SnapshotRecord> {
        self.snapshot.as_ref()
    }

    pub fn set_snapshot(&mut self, snapshot: SnapshotRecord) {
        self.snapshot = Some(snapshot);
    }

    pub fn processing_start(&self) -> Instant {
        self.processing_start
    }
}
