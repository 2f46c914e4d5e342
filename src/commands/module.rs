//! Module loader command handlers (`resolve`, `load`)

use anyhow::{bail, Context, Result};

use grammar_forge::application::grammar_sources;
use grammar_forge::presentation::{create_module_loader, OutputFormat};

use super::context::CommandContext;

pub fn cmd_resolve(ctx: CommandContext, id: &str) -> Result<()> {
    let sources = grammar_sources(&ctx.config.packages);
    let loader = create_module_loader(&ctx.config.build, &sources);
    let resolved = loader.resolve(id);

    if ctx.format == OutputFormat::Json {
        let out = serde_json::json!({ "id": id, "resolved": resolved });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match resolved {
        Some(resolved) => {
            println!("{}", resolved);
            Ok(())
        }
        None => bail!("'{}' is not a configured local grammar package", id),
    }
}

pub fn cmd_load(ctx: CommandContext, id: &str) -> Result<()> {
    let sources = grammar_sources(&ctx.config.packages);
    let loader = create_module_loader(&ctx.config.build, &sources);

    let Some(code) = loader
        .load(id)
        .with_context(|| format!("failed to load module '{}'", id))?
    else {
        bail!("'{}' is not a resolved grammar module id", id);
    };

    if ctx.format == OutputFormat::Json {
        let out = serde_json::json!({ "id": id, "code": code });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", code);
    }
    Ok(())
}
