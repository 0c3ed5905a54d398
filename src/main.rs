//! Upload Gateway - authenticated intake for DOD, ETP and TR documents.
//!
//! This binary loads configuration, starts logging and serves the HTTP API.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upload_gateway::{
    config::Config,
    server::{create_router, RouterConfig, UPLOAD_PATH},
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables still apply
    let dotenv_result = dotenv::dotenv();

    let config = Config::parse();
    init_logging(config.verbose);

    if let Ok(path) = dotenv_result {
        info!("Loaded environment from {}", path.display());
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Upload Gateway v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Max body size: {} bytes", config.max_body_size);

    if config.has_configured_credentials() {
        info!("  Auth: Basic, user '{}'", config.username());
    } else {
        warn!("  Auth: USING DEFAULT CREDENTIALS - anyone who knows them can upload");
        warn!("        Set API_USERNAME and API_PASSWORD, or pass --require-credentials");
    }

    let router = create_router(build_router_config(&config));
    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);
    info!("  Upload endpoint: POST http://{}{}", addr, UPLOAD_PATH);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "upload_gateway=debug,tower_http=debug"
    } else {
        "upload_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    RouterConfig::new(config.username(), config.password())
        .with_max_body_size(config.max_body_size)
        .with_tracing(!config.no_tracing)
}
