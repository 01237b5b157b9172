use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::InstrumentType;
use crate::sort::SortSpec;

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

/// Where snapshots are loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// JSON files under the data directory.
    #[default]
    File,
    /// The REST backend at `base_url`.
    Http,
}

/// Display/output formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Money values are rendered with exactly this many decimal places.
    ///
    /// This is purely a presentation setting and does not affect calculations.
    pub currency_decimals: u32,

    /// When true, render money with thousands separators.
    pub currency_grouping: bool,

    /// Separator placed between digit groups.
    pub group_separator: String,

    /// Currency symbol appended after the amount (e.g. "₽").
    pub currency_symbol: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_decimals: 2,
            currency_grouping: true,
            group_separator: " ".to_string(),
            currency_symbol: Some("₽".to_string()),
        }
    }
}

/// Positions table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Instrument types listed in the positions table. Empty lists all.
    ///
    /// Totals always cover every position.
    pub instrument_types: Vec<InstrumentType>,

    pub default_sort: SortSpec,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            instrument_types: vec![InstrumentType::Share],
            default_sort: SortSpec::descending("totalValue"),
        }
    }
}

/// Dividend calendar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub default_sort: SortSpec,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_sort: SortSpec::ascending("title"),
        }
    }
}

/// Stock history configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    pub default_sort: SortSpec,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            default_sort: SortSpec::descending("date"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to data directory. If relative, resolved from config file location.
    /// If not specified, defaults to the config file's directory.
    pub data_dir: Option<PathBuf>,

    pub source: SourceKind,

    /// Backend root used when `source = "http"`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub display: DisplayConfig,

    pub portfolio: PortfolioConfig,

    pub calendar: CalendarConfig,

    pub stock: StockConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            source: SourceKind::default(),
            base_url: default_base_url(),
            display: DisplayConfig::default(),
            portfolio: PortfolioConfig::default(),
            calendar: CalendarConfig::default(),
            stock: StockConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the data directory path.
    ///
    /// If `data_dir` is set and relative, it's resolved relative to `config_dir`.
    /// If `data_dir` is not set, returns `config_dir`.
    pub fn resolve_data_dir(&self, config_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(data_dir) if data_dir.is_absolute() => data_dir.clone(),
            Some(data_dir) => config_dir.join(data_dir),
            None => config_dir.to_path_buf(),
        }
    }

    fn resolve(self, config_dir: &Path) -> ResolvedConfig {
        ResolvedConfig {
            data_dir: self.resolve_data_dir(config_dir),
            source: self.source,
            base_url: self.base_url,
            display: self.display,
            portfolio: self.portfolio,
            calendar: self.calendar,
            stock: self.stock,
        }
    }
}

/// Loaded configuration with resolved paths.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// The resolved data directory path.
    pub data_dir: PathBuf,
    pub source: SourceKind,
    pub base_url: String,
    pub display: DisplayConfig,
    pub portfolio: PortfolioConfig,
    pub calendar: CalendarConfig,
    pub stock: StockConfig,
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./divbook.toml` if it exists in current directory
/// 2. `~/.local/share/divbook/divbook.toml` (XDG data directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("divbook.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(data_dir) = dirs::data_dir() {
        return data_dir.join("divbook").join("divbook.toml");
    }

    local_config
}

impl ResolvedConfig {
    /// Load and resolve config from a file path.
    ///
    /// The data directory is resolved relative to the config file's parent directory.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_path = config_path
            .canonicalize()
            .with_context(|| format!("Config file not found: {}", config_path.display()))?;

        let config_dir = config_path
            .parent()
            .context("Config file has no parent directory")?;

        Ok(Config::load(&config_path)?.resolve(config_dir))
    }

    /// Load config, falling back to defaults if the file doesn't exist.
    ///
    /// Without a file, the intended parent directory is the data directory.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load(config_path);
        }

        let config_path = if config_path.is_relative() {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(config_path)
        } else {
            config_path.to_path_buf()
        };
        let config_dir = config_path
            .parent()
            .context("Config path has no parent directory")?;

        Ok(Config::default().resolve(config_dir))
    }
}
