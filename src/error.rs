use thiserror::Error;

// Main application error type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analysis Error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Storage Error: {0}")]
    Storage(#[from] StorageError),
    #[error("Capture Error: {0}")]
    Capture(String),
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
    #[error("Config Error: {0}")]
    Config(#[from] config::ConfigError),
}

// Errors raised by the reduction pipeline itself. The analyzers never
// substitute defaults for bad input; a failed cycle is the coordinator's
// problem.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Degenerate arithmetic: {0}")]
    ArithmeticDegenerate(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access snapshot data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode snapshot data: {0}")]
    Serde(#[from] serde_json::Error),
}
