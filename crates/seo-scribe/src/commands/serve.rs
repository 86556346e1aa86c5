//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use seo_scribe_core::config::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
///
/// Logs go to stderr, never stdout, so they cannot corrupt the protocol
/// stream.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let policy = config.keyword_policy();
    let limit = config.input_limit();
    info!(?policy, ?limit, "starting MCP server on stdio");

    let service = ProjectServer::with_settings(policy, limit)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server terminated")?;

    info!("MCP server stopped");
    Ok(())
}
