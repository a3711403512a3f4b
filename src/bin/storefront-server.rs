// ABOUTME: Main storefront server binary with hostname-based multi-tenant routing
// ABOUTME: Wires config, logging, database, and the HTTP router together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Codeopx

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use storefront_server::config::environment::ServerConfig;
use storefront_server::database_plugins::{factory::Database, DatabaseProvider};
use storefront_server::logging;
use storefront_server::resources::ServerResources;
use storefront_server::routes::build_router;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "storefront-server",
    about = "Multi-tenant storefront platform server",
    version
)]
struct Args {
    /// HTTP port to listen on (overrides HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env().context("failed to initialize logging")?;

    let mut config = ServerConfig::from_env().context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    info!("starting storefront server: {}", config.summary());

    let database = Database::new(&config.database.url)
        .await
        .context("failed to connect to database")?;
    database.migrate().await.context("migration failed")?;
    info!("database ready ({})", database.backend_info());

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config));
    let app = build_router(resources);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    info!("shutdown signal received");
}
