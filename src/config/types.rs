//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::{DEFAULT_ARTIFACT_SUFFIX, DEFAULT_DEPENDENCY_ROOT};
use crate::error::ForgeResult;

use super::loader::{self, ConfigWarning};

/// When a compiled artifact counts as up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Skip compilation whenever the output file exists
    #[default]
    Exists,
    /// Also rebuild when the compile inputs' SHA-256 changed since the last build
    Fingerprint,
}

impl CachePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "exists" | "existence" => Some(CachePolicy::Exists),
            "fingerprint" | "hash" => Some(CachePolicy::Fingerprint),
            _ => None,
        }
    }
}

/// Build configuration (`[build]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Bypass the output cache and always invoke the compiler
    #[serde(default)]
    pub always_rebuild: bool,

    /// Output directory for compiled artifacts
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Passed through to the compiler's `--cache` flag
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    #[serde(default)]
    pub cache_policy: CachePolicy,

    /// Installed-packages directory used to locate and stage grammars
    #[serde(default = "default_dependency_root")]
    pub dependency_root: PathBuf,

    /// Tag appended to derived artifact names
    #[serde(default = "default_artifact_suffix")]
    pub artifact_suffix: String,

    /// Compiler program name or path
    #[serde(default = "default_compiler")]
    pub compiler: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            always_rebuild: false,
            out_dir: default_out_dir(),
            cache_dir: None,
            cache_policy: CachePolicy::default(),
            dependency_root: default_dependency_root(),
            artifact_suffix: default_artifact_suffix(),
            compiler: default_compiler(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist/assets")
}

fn default_dependency_root() -> PathBuf {
    PathBuf::from(DEFAULT_DEPENDENCY_ROOT)
}

fn default_artifact_suffix() -> String {
    DEFAULT_ARTIFACT_SUFFIX.to_string()
}

fn default_compiler() -> String {
    "emcc".to_string()
}

/// Dev server configuration (`[server]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:5173".to_string()
}

/// Asset emission configuration (`[emit]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitConfig {
    #[serde(default = "default_dest")]
    pub dest: PathBuf,

    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            dest: default_dest(),
            assets_dir: default_assets_dir(),
        }
    }
}

fn default_dest() -> PathBuf {
    PathBuf::from("dist")
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        }
    }

    /// Raise verbosity by the number of `-v` flags
    pub fn bumped(self, count: u8) -> Self {
        match (self, count) {
            (v, 0) => v,
            (Verbosity::Quiet | Verbosity::Normal, 1) => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Output configuration (`[output]`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Full configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Grammar packages: dependency names or `./`, `../`, `/` paths
    #[serde(default)]
    pub packages: Vec<String>,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub emit: EmitConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str, origin: &Path) -> ForgeResult<(Self, Vec<ConfigWarning>)> {
        loader::parse_with_warnings(content, origin)
    }
}
