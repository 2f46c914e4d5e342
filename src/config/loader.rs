//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ForgeError, ForgeResult};

use super::types::{CachePolicy, Config, Verbosity};

/// Project configuration file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "grammar-forge.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// File the configuration was read from, `None` for built-in defaults
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ForgeResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ForgeResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ForgeError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration by precedence
///
/// 1. `explicit` file (must exist and parse)
/// 2. `<project_root>/grammar-forge.toml`
/// 3. `<user config dir>/grammar-forge/config.toml`
/// 4. Built-in defaults
///
/// Environment overrides (`GRAMMAR_FORGE_*`) are applied on top.
pub fn resolve(explicit: Option<&Path>, project_root: &Path) -> ForgeResult<LoadedConfig> {
    let candidates: Vec<PathBuf> = match explicit {
        Some(path) => {
            let (config, warnings) = load_with_warnings(path)?;
            return Ok(LoadedConfig {
                config: with_env_overrides(config),
                warnings,
                source: Some(path.to_path_buf()),
            });
        }
        None => std::iter::once(project_root.join(PROJECT_CONFIG_FILE))
            .chain(user_config_path())
            .collect(),
    };

    for candidate in candidates {
        if candidate.is_file() {
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok(LoadedConfig {
                config: with_env_overrides(config),
                warnings,
                source: Some(candidate),
            });
        }
    }

    Ok(LoadedConfig {
        config: with_env_overrides(Config::default()),
        warnings: Vec::new(),
        source: None,
    })
}

/// Apply environment variable overrides (GRAMMAR_FORGE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn with_overrides_from(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(val) = lookup("GRAMMAR_FORGE_ALWAYS_REBUILD") {
        config.build.always_rebuild = is_truthy(&val);
    }

    if let Some(dir) = lookup("GRAMMAR_FORGE_OUT_DIR").filter(|v| !v.is_empty()) {
        config.build.out_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup("GRAMMAR_FORGE_CACHE_DIR") {
        config.build.cache_dir = if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        };
    }

    if let Some(policy) = lookup("GRAMMAR_FORGE_CACHE_POLICY").and_then(|v| CachePolicy::parse(&v))
    {
        config.build.cache_policy = policy;
    }

    if let Some(compiler) = lookup("GRAMMAR_FORGE_COMPILER").filter(|v| !v.is_empty()) {
        config.build.compiler = compiler;
    }

    if let Some(verbosity) = lookup("GRAMMAR_FORGE_VERBOSITY") {
        config.output.verbosity = Verbosity::parse(&verbosity);
    }

    config
}

fn is_truthy(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    !(val.is_empty() || val == "false" || val == "0" || val == "no")
}

/// `<config dir>/grammar-forge/config.toml`
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("grammar-forge").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "packages",
        "build",
        "always_rebuild",
        "out_dir",
        "cache_dir",
        "cache_policy",
        "dependency_root",
        "artifact_suffix",
        "compiler",
        "server",
        "addr",
        "emit",
        "dest",
        "assets_dir",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
