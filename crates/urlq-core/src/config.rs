use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::url_model::{ParseOptions, Syntax, DEFAULT_CHARSET};

/// Global configuration loaded from `~/.config/urlq/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlqConfig {
    /// Charset label used to encode and decode parameter values.
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Store and print values untouched, ignoring `charset`.
    #[serde(default)]
    pub raw: bool,
    /// URL grammar: "scheme" (default, keeps fragments) or "protocol".
    #[serde(default)]
    pub syntax: Syntax,
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

impl Default for UrlqConfig {
    fn default() -> Self {
        Self {
            charset: default_charset(),
            raw: false,
            syntax: Syntax::Scheme,
        }
    }
}

impl UrlqConfig {
    /// Parse options derived from this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            syntax: self.syntax,
            charset: (!self.raw).then(|| self.charset.clone()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlqConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UrlqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Result<UrlqConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UrlqConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
