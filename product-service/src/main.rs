use product_service::config::ProductConfig;
use product_service::services::init_metrics;
use product_service::startup::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = ProductConfig::load()?;

    init_tracing(
        "product-service",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    // Must run before any metric is recorded
    init_metrics()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = ?config.store.backend,
        database = %config.mongodb.database,
        "Starting product service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    tracing::info!("Product service stopped");
    Ok(())
}
