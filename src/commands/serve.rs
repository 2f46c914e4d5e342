//! Serve command handler
//!
//! Builds once, then serves registered artifacts until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use grammar_forge::infrastructure::{ArtifactMiddleware, DevServer, LocalFs, NotFound};
use grammar_forge::presentation::BuildArgs;

use super::context::CommandContext;

pub fn cmd_serve(mut ctx: CommandContext, args: &BuildArgs, addr: Option<SocketAddr>) -> Result<()> {
    ctx.apply(args);
    let addr = match addr {
        Some(addr) => addr,
        None => ctx
            .config
            .server
            .addr
            .parse()
            .with_context(|| format!("invalid server address '{}'", ctx.config.server.addr))?,
    };

    let session = ctx.build();
    ctx.print_report(&session.report);

    let server = DevServer::new(Arc::new(NotFound)).with_middleware(Arc::new(
        ArtifactMiddleware::new(session.registry.clone(), LocalFs::new()),
    ));

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server.listen(addr))?;
    Ok(())
}
