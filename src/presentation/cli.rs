//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --config) are inherited by all subcommands
//! - Positional packages replace the configured package list

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// grammar-forge - compile tree-sitter grammars to WebAssembly
#[derive(Parser, Debug)]
#[command(name = "grammar-forge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./grammar-forge.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that runs a build
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Grammar packages (dependency names or ./, ../, / paths)
    pub packages: Vec<String>,

    /// Invoke the compiler even when the output exists
    #[arg(long)]
    pub always_rebuild: bool,

    /// Output directory for compiled artifacts
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Compiler cache directory (passed as --cache)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile configured grammars to WebAssembly
    Build {
        #[command(flatten)]
        build: BuildArgs,
    },

    /// Build, then serve artifacts over HTTP until Ctrl+C
    Serve {
        #[command(flatten)]
        build: BuildArgs,

        /// Listen address
        #[arg(long, value_name = "ADDR")]
        addr: Option<SocketAddr>,
    },

    /// Build, then copy artifacts into the distribution directory
    Emit {
        #[command(flatten)]
        build: BuildArgs,

        /// Distribution directory
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Resolve a module id against the local grammar packages
    Resolve {
        /// Module id (base name of a local package)
        id: String,
    },

    /// Print the glue module for a resolved id
    Load {
        /// Resolved module id
        id: String,
    },

    /// Show the names derived for a package
    Names {
        /// Package identifier
        package: String,
    },
}
