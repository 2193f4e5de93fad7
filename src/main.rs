use graubot_rust::config::Configuration;
use graubot_rust::coordinator::CoordinatorBuilder;
use graubot_rust::error::AppError;
use tracing::Level;

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let configuration = Configuration::load()?;
    tracing::info!(
        "Starting scene monitor, one capture every {} seconds",
        configuration.interval_secs
    );
    let coordinator = CoordinatorBuilder::new(configuration).build()?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::Pipeline(format!("Failed to listen for shutdown signal: {}", e)))?;
    tracing::info!("Shutting down");
    coordinator.stop();
    Ok(())
}
