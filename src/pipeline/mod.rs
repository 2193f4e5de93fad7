pub mod domain;
pub mod orchestration;

pub use domain::reducer::{FrameReducer, ReducerConfig};
pub use domain::snapshot::{ColorStats, SnapshotRecord};
pub use orchestration::{FrameContext, ProcessingPipeline, ProcessingStep};
