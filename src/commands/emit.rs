//! Emit command handler

use std::path::PathBuf;

use anyhow::Result;

use grammar_forge::application::EmitOptions;
use grammar_forge::presentation::{create_asset_emitter, render_emit, BuildArgs, OutputFormat};

use super::context::CommandContext;

/// Build, then copy every registered artifact under `<dest>/<assets_dir>`
pub fn cmd_emit(mut ctx: CommandContext, args: &BuildArgs, dest: Option<PathBuf>) -> Result<()> {
    ctx.apply(args);
    if let Some(dest) = dest {
        ctx.config.emit.dest = dest;
    }

    let session = ctx.build();
    if ctx.format == OutputFormat::Text {
        ctx.print_report(&session.report);
    }

    let result = create_asset_emitter().emit(&session.registry, &EmitOptions::from_config(&ctx.config.emit));
    print!("{}", render_emit(&result, ctx.format));
    Ok(())
}
