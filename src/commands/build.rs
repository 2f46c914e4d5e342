//! Build command handler

use anyhow::Result;

use grammar_forge::presentation::BuildArgs;

use super::context::CommandContext;

/// Execute the build command
///
/// Per-package failures are reported, not returned: the build is best-effort.
pub fn cmd_build(mut ctx: CommandContext, args: &BuildArgs) -> Result<()> {
    ctx.apply(args);
    let session = ctx.build();
    ctx.print_report(&session.report);
    Ok(())
}
