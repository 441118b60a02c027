// ABOUTME: Server binary for the subway route REST API
// ABOUTME: Loads environment configuration, initializes logging, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Subway Route Server Contributors

//! # Subway Route Server Binary
//!
//! Starts the REST API for members, stations, lines, and favorite routes.

use anyhow::Result;
use clap::Parser;
use subway_route_server::{config::environment::ServerConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "subway-server")]
#[command(about = "Subway route server - stations, lines, members, and favorite routes")]
pub struct Args {
    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    config.validate()?;

    info!("Starting Subway Route Server");
    info!("{}", config.summary());
    config.github.warn_if_unconfigured();

    if let Err(e) = server::run(config).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
