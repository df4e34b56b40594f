//! # Library Gateway
//!
//! HTTP gateway in front of the library, rating and reservation services.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Collaborator service clients
//! - HTTP server

use anyhow::Result;
use tracing::info;

use library_gateway::config::Settings;
use library_gateway::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    library_gateway::telemetry::init_tracing();

    info!("Starting Library Gateway...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
