use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub smartctl: SmartctlConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartctlConfig {
    /// Explicit smartctl executable. Empty = look it up on PATH.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON unless told otherwise.
    #[serde(default)]
    pub json: bool,
    /// Embed the full smartctl text under "raw" in JSON output.
    #[serde(default)]
    pub include_raw: bool,
}

// ── Load ──────────────────────────────────────────────────────────────

impl Config {
    /// Load from `explicit` or the default location. Never fails: a missing
    /// file means defaults, a broken one means defaults plus a warning.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit.map(Path::to_path_buf).or_else(Config::config_path) {
            Some(p) => p,
            None    => return Config::default(),
        };
        match try_load(&path) {
            Ok(Some(c)) => c,
            Ok(None)    => Config::default(),
            Err(e)      => {
                eprintln!("warning: ignoring config {}: {:#}", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("smart-info").join("smart-info.toml"))
    }

    /// The configured smartctl path, if any.
    pub fn smartctl_path(&self) -> Option<&str> {
        Some(self.smartctl.path.trim()).filter(|p| !p.is_empty())
    }
}

fn try_load(path: &Path) -> Result<Option<Config>> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("read failed"),
    };
    let cfg: Config = toml::from_str(&text).context("invalid TOML")?;
    Ok(Some(cfg))
}
