pub mod capture;
pub mod common;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod journal;
pub mod pipeline;

pub use config::Configuration;
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::{AnalysisError, AppError, StorageError};

pub use pipeline::domain::reducer::{FrameReducer, ReducerConfig};
pub use pipeline::domain::snapshot::{ColorStats, SnapshotRecord};
