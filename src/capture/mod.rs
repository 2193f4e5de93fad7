pub mod frame_source;
pub mod still_source;
pub mod synthetic_source;

pub use frame_source::FrameSource;
pub use still_source::StillSource;
pub use synthetic_source::SyntheticSource;
