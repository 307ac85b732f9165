// ABOUTME: Server binary for the FitSocial API with a token issuing helper
// ABOUTME: Loads configuration, opens the database and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # FitSocial Server Binary
//!
//! `fitsocial-server` serves the API. `fitsocial-server issue-token --user-id <uuid>`
//! prints a session token for local development, since accounts come from an
//! external identity provider.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fitsocial_server::{
    config::ServerConfig, database::Database, logging, resources::ServerResources, server,
};
use tracing::{error, info};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "fitsocial-server")]
#[command(about = "FitSocial API - workouts, schedules and a community feed")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a session token for a user id
    IssueToken {
        /// User the token is issued for
        #[arg(long)]
        user_id: Uuid,
        /// Email embedded in the token
        #[arg(long, default_value = "dev@fitsocial.local")]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    if let Some(Command::IssueToken { user_id, email }) = args.command {
        let auth_manager = ServerResources::auth_manager_from_config(&config);
        let token = auth_manager
            .generate_token(user_id, &email)
            .context("Failed to issue token")?;
        println!("{token}");
        return Ok(());
    }

    logging::init_from_env()?;
    info!("Starting FitSocial server");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    let auth_manager = ServerResources::auth_manager_from_config(&config);
    let resources = Arc::new(ServerResources::new(database, auth_manager, Arc::new(config)));

    if let Err(e) = server::run(resources).await {
        error!(error = %e, "Server exited with an error");
        return Err(e);
    }
    Ok(())
}
