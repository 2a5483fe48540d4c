//! Serve command: MCP server on stdio.

use anyhow::Context;
use clap::Args;
use hotcold_core::{Config, GameOptions};
use rmcp::ServiceExt;
use tracing::{info, instrument};

use super::{load_vocabulary, model_cache};
use crate::server::GameServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio; nothing to configure yet.
}

/// Run the MCP server until the client disconnects.
#[instrument(name = "cmd_serve", skip_all, fields(provider = %config.embedding_provider))]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let vocabulary = load_vocabulary(&config)?;
    let server = GameServer::new(vocabulary, model_cache(&config), GameOptions::from(&config));

    info!("starting MCP server on stdio");
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;
    info!("MCP server stopped");
    Ok(())
}
