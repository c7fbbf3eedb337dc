use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stitch_pattern::{KMeansOptions, Palette, PatternConfig, DEFAULT_PALETTE};

use crate::error::AppError;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "STITCHGRID_CONFIG";

/// Config file looked up in the working directory as a last resort.
pub const DEFAULT_CONFIG_FILE: &str = "stitchgrid.yaml";

/// Application configuration loaded from stitchgrid.yaml
///
/// Every field has a default, so an empty file is a valid config. Keys are
/// camelCase throughout, matching the nested `pattern` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Palette to quantize against: a built-in name or a key of `palettes`
    pub palette: String,

    /// Longer side of the grid when no explicit size is requested
    pub grid_size: usize,

    /// Pipeline options passed through to the pattern builder
    pub pattern: PatternConfig,

    /// Custom palettes, by name
    pub palettes: BTreeMap<String, Vec<ThreadConfig>>,

    /// Derive the palette from the image instead of using `palette`
    pub kmeans: Option<KMeansOptions>,

    /// Snap derived k-means colours onto `palette`
    pub snap_kmeans: bool,
}

/// One thread of a custom palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadConfig {
    pub name: String,
    /// `#rrggbb` or `#rgb`
    pub hex: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_string(),
            grid_size: 80,
            pattern: PatternConfig::default(),
            palettes: BTreeMap::new(),
            kmeans: None,
            snap_kmeans: false,
        }
    }
}

impl AppConfig {
    /// Config path: explicit argument, then `STITCHGRID_CONFIG`, then
    /// `stitchgrid.yaml` in the working directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            palette = %config.palette,
            custom_palettes = config.palettes.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Resolve a palette by name, custom palettes first.
    ///
    /// `None` means the configured `palette`.
    pub fn resolve_palette(&self, name: Option<&str>) -> Result<Palette, AppError> {
        let name = name.unwrap_or(&self.palette);
        if let Some(threads) = self.palettes.get(name) {
            let entries: Vec<(&str, &str)> = threads
                .iter()
                .map(|t| (t.name.as_str(), t.hex.as_str()))
                .collect();
            return Ok(Palette::from_hex(&entries)?);
        }
        Ok(Palette::builtin(name)?)
    }
}
