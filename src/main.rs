//! grammar-forge CLI - compile tree-sitter grammars to WebAssembly
//!
//! Usage: grammar-forge <COMMAND>
//!
//! Commands:
//!   build    Compile configured grammars
//!   serve    Build, then serve artifacts over HTTP
//!   emit     Build, then copy artifacts into the distribution directory
//!   resolve  Resolve a module id against the local grammar packages
//!   load     Print the glue module for a resolved id
//!   names    Show the names derived for a package

mod commands;

use anyhow::Result;
use clap::Parser;

use grammar_forge::presentation::{Cli, Commands};

use commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = CommandContext::load(cli.config.as_deref(), cli.json, cli.verbose)?;

    match cli.command {
        Commands::Build { build } => commands::cmd_build(ctx, &build),
        Commands::Serve { build, addr } => commands::cmd_serve(ctx, &build, addr),
        Commands::Emit { build, dest } => commands::cmd_emit(ctx, &build, dest),
        Commands::Resolve { id } => commands::cmd_resolve(ctx, &id),
        Commands::Load { id } => commands::cmd_load(ctx, &id),
        Commands::Names { package } => commands::cmd_names(ctx, &package),
    }
}
