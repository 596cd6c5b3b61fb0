//! User config: built-in defaults + optional TOML file.
//!
//! - `Config::default()` → reference division, plot limit 10
//! - `Config::from_toml_file(path)` → parse a user file
//! - `Config::load(path)` → explicit path, else ~/.cplane/config.toml if present

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::complex_number::DivisionMode;
use crate::core::plane::DEFAULT_LIMIT;
use crate::debug_log;

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.cplane/config.toml (Windows: %USERPROFILE%\.cplane\config.toml)
    dirs_next::home_dir().map(|h| h.join(".cplane").join("config.toml"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub division: DivisionMode,
    pub plot_limit: f64,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            division: DivisionMode::Reference,
            plot_limit: DEFAULT_LIMIT,
            debug: false,
        }
    }
}

// ----- Config TOML -----

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    division: Option<String>,
    debug: Option<bool>,
    #[serde(default)]
    plot: PlotSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlotSection {
    limit: Option<f64>,
}

impl Config {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(txt)?;
        let mut cfg = Config::default();
        if let Some(d) = file.division {
            cfg.division = d.parse()?;
        }
        if let Some(limit) = file.plot.limit {
            if !(limit.is_finite() && limit > 0.0) {
                anyhow::bail!("plot.limit must be a positive number (got {limit})");
            }
            cfg.plot_limit = limit;
        }
        cfg.debug = file.debug.unwrap_or(false);
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }

    /// Explicit path must exist; the default path is optional.
    pub fn load(cli_path: &Option<PathBuf>) -> Result<Self> {
        match cli_path {
            Some(p) => Self::from_toml_file(p),
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_toml_file(&p),
                _ => {
                    debug_log!("config: no user file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }
}
