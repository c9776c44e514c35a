use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Tool settings kept in `.vaultren/config.toml`, separate from the
/// selection settings document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "table", "diff", "summary" or "json"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            use_color: None,
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

impl Config {
    /// Load the config of a vault, falling back to defaults when absent
    pub fn load(vaultren_dir: &Path) -> Result<Self> {
        let path = vaultren_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.preview_format, "table");
        assert_eq!(config.defaults.use_color, None);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.defaults.preview_format, "table");
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[defaults]\npreview_format = \"diff\"\nuse_color = false\n",
        )
        .unwrap();

        let loaded = Config::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.defaults.preview_format, "diff");
        assert_eq!(loaded.defaults.use_color, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[defaults]\nuse_color = true\n").unwrap();
        assert_eq!(config.defaults.preview_format, "table");
        assert_eq!(config.defaults.use_color, Some(true));
    }
}
