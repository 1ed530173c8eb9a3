#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use lingo_orq::GenerationService;
use lingo_server::handler::routes;
use lingo_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use lingo_server::service::{ServiceConfig, ServiceState};

use crate::config::{Cli, MiddlewareConfig, create_generation_service};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "lingo_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "lingo_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "lingo_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    if let Some(server_error) = error.downcast_ref::<server::ServerError>() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error_code = server_error.error_code(),
            recoverable = server_error.is_recoverable(),
            suggestion = server_error.suggestion(),
            "Server error details"
        );
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "Starting lingo server"
    );

    cli.log();
    cli.validate()?;

    let generation = create_generation_service(&cli)?;
    let state = create_service_state(&cli.service, generation).await?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;
    Ok(())
}

async fn create_service_state(
    config: &ServiceConfig,
    generation: GenerationService,
) -> anyhow::Result<ServiceState> {
    ServiceState::from_config(config, generation)
        .await
        .context("failed to create service state")
}

/// Creates the router with all middleware layers applied.
///
/// The last layer added is the outermost:
/// 1. Recovery: panics and timeouts
/// 2. Observability: request ids and tracing spans
/// 3. Security: CORS, body limit, compression, headers
/// 4. Routes
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_security(&middleware.cors)
        .with_observability()
        .with_recovery(&middleware.recovery)
}
