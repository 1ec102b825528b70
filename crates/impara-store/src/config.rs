//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use impara_core::progress::DEFAULT_LEXICAL_GATE;
use impara_core::scheduler::DEFAULT_BATCH_SIZE;
use impara_core::session::{GatePolicy, SessionSettings};

/// Name of the per-directory config file.
pub const CONFIG_FILE: &str = "impara.toml";

/// Top-level impara configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImparaConfig {
    /// Directory holding `themes.json` and the datasets it names.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Progress document location.
    #[serde(default = "default_progress_path")]
    pub progress_path: PathBuf,
    /// Items per drill batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Correct answers needed in each translation direction.
    #[serde(default = "default_lexical_gate")]
    pub lexical_gate: u32,
    /// Refuse to leave the warm-up until the whole batch passed the gate.
    #[serde(default)]
    pub enforce_lexical_gate: bool,
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_progress_path() -> PathBuf {
    PathBuf::from("progress.json")
}
fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}
fn default_lexical_gate() -> u32 {
    DEFAULT_LEXICAL_GATE
}
fn default_true() -> bool {
    true
}

impl Default for ImparaConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            progress_path: default_progress_path(),
            batch_size: default_batch_size(),
            lexical_gate: default_lexical_gate(),
            enforce_lexical_gate: false,
            clear_screen: true,
        }
    }
}

impl ImparaConfig {
    /// Session knobs derived from this config.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            lexical_gate: self.lexical_gate,
            gate_policy: if self.enforce_lexical_gate {
                GatePolicy::Enforced
            } else {
                GatePolicy::Advisory
            },
            batch_size: self.batch_size.max(1),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    resolve_with(s, |name| std::env::var(name).ok())
}

fn resolve_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&lookup(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Apply `IMPARA_DATA_DIR` / `IMPARA_PROGRESS` style overrides from `lookup`.
fn apply_overrides(config: &mut ImparaConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = lookup("IMPARA_DATA_DIR").filter(|v| !v.is_empty()) {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(path) = lookup("IMPARA_PROGRESS").filter(|v| !v.is_empty()) {
        config.progress_path = PathBuf::from(path);
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `impara.toml` in the current directory
/// 2. `~/.config/impara/config.toml`
///
/// Environment variable overrides: `IMPARA_DATA_DIR`, `IMPARA_PROGRESS`.
pub fn load_config_from(path: Option<&Path>) -> Result<ImparaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config_file(&path)?
        }
        None => ImparaConfig::default(),
    };

    apply_overrides(&mut config, |name| std::env::var(name).ok());
    config.data_dir = resolve_path(&config.data_dir);
    config.progress_path = resolve_path(&config.progress_path);

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<ImparaConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<ImparaConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("impara"))
}
