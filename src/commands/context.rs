//! Shared command setup
//!
//! Loads configuration, installs logging and applies CLI overrides.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use grammar_forge::application::build::BuildOptions;
use grammar_forge::application::{BuildReport, BuildSession};
use grammar_forge::config::{self, Config};
use grammar_forge::logging;
use grammar_forge::presentation::{create_renderer, run_local_build, BuildArgs, OutputFormat};

pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub verbose: u8,
}

impl CommandContext {
    pub fn load(config_path: Option<&Path>, json: bool, verbose: u8) -> Result<Self> {
        let project_root = std::env::current_dir().context("cannot determine current directory")?;
        let loaded = config::resolve(config_path, &project_root)
            .context("failed to load configuration")?;

        logging::init(loaded.config.output.verbosity.bumped(verbose));

        match &loaded.source {
            Some(source) => debug!(config = %source.display(), "loaded configuration"),
            None => debug!("no configuration file found, using defaults"),
        }
        for warning in &loaded.warnings {
            let location = match warning.line {
                Some(line) => format!("{}:{}", warning.file.display(), line),
                None => warning.file.display().to_string(),
            };
            match &warning.suggestion {
                Some(suggestion) => warn!(
                    "unknown configuration key '{}' in {} (did you mean '{}'?)",
                    warning.key, location, suggestion
                ),
                None => warn!("unknown configuration key '{}' in {}", warning.key, location),
            }
        }

        Ok(Self {
            config: loaded.config,
            format: OutputFormat::from_json_flag(json),
            verbose,
        })
    }

    /// Apply build flags on top of the loaded configuration
    pub fn apply(&mut self, args: &BuildArgs) {
        if !args.packages.is_empty() {
            self.config.packages = args.packages.clone();
        }
        if args.always_rebuild {
            self.config.build.always_rebuild = true;
        }
        if let Some(out_dir) = &args.out_dir {
            self.config.build.out_dir = out_dir.clone();
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.config.build.cache_dir = Some(cache_dir.clone());
        }
    }

    pub fn build(&self) -> BuildSession {
        run_local_build(
            &self.config.build,
            BuildOptions::from_config(&self.config.build),
            &self.config.packages,
        )
    }

    pub fn print_report(&self, report: &BuildReport) {
        let renderer = create_renderer(self.format, true, self.verbose);
        print!("{}", renderer.render(report));
    }
}
