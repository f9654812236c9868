use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What a binning call reports for each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// 1-based ordinal of the bin, ascending by age.
    #[default]
    Index,
    /// Midpoint age of the bin.
    Age,
}

/// `[binning]` section. Exactly one of `width` / `count` must be set once the
/// section is turned into a scheme; a missing section falls back to 5 Myr bins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinningConfig {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub label: LabelMode,
    #[serde(default = "default_label_suffix")]
    pub label_suffix: String,
}

fn default_width() -> Option<f64> {
    Some(5.0)
}
fn default_label_suffix() -> String {
    "_bin".into()
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            count: None,
            label: LabelMode::default(),
            label_suffix: default_label_suffix(),
        }
    }
}

/// `[columns]` section: names of the occurrence table columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_age")]
    pub age: String,
    #[serde(default = "default_max_age")]
    pub max_age: String,
    #[serde(default = "default_min_age")]
    pub min_age: String,
    #[serde(default = "default_taxon")]
    pub taxon: String,
}

fn default_age() -> String {
    "mid_ma".into()
}
fn default_max_age() -> String {
    "max_ma".into()
}
fn default_min_age() -> String {
    "min_ma".into()
}
fn default_taxon() -> String {
    "genus".into()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            age: default_age(),
            max_age: default_max_age(),
            min_age: default_min_age(),
            taxon: default_taxon(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub binning: BinningConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paleo-bins")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("PALEO_BINS_CONFIG") {
            PathBuf::from(env_path) // $PALEO_BINS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    /// Missing file yields the defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::PaleoBinsError::Other(e.to_string()))?;
        Ok(cfg)
    }

    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::PaleoBinsError::Other(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Label column name for a given age column, e.g. `mid_ma` -> `mid_ma_bin`.
    pub fn label_column_for(&self, age_column: &str) -> String {
        format!("{age_column}{}", self.binning.label_suffix)
    }
}
