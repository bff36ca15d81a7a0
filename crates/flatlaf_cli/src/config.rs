//! flatlaf.toml handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "flatlaf.toml";

/// Top-level configuration (flatlaf.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct FlatLafConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub scale: ScaleConfig,
    /// Added on top of every theme load; `@name` keys are variables
    #[serde(default)]
    pub extra_defaults: BTreeMap<String, String>,
}

/// Theme files and context
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ThemeConfig {
    /// Properties files, loaded in order; relative paths are relative to
    /// the config file
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub dark: bool,
    /// `windows`, `macos`, `linux` or `other`; the current platform if unset
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ScaleConfig {
    #[serde(default = "default_factor")]
    pub factor: f32,
}

fn default_factor() -> f32 {
    1.0
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            factor: default_factor(),
        }
    }
}

impl FlatLafConfig {
    /// Load `path`, or `flatlaf.toml` in the current directory if it exists.
    ///
    /// An explicitly given file must exist; a missing default file gives
    /// the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

        let mut config: FlatLafConfig =
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(dir) = path.parent() {
            config.theme.files = config
                .theme
                .files
                .into_iter()
                .map(|file| if file.is_relative() { dir.join(file) } else { file })
                .collect();
        }
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r##"
[theme]
files = ["FlatLightLaf.properties", "/abs/custom.properties"]
dark = true
platform = "linux"

[scale]
factor = 1.5

[extra_defaults]
"@accentColor" = "#f00"
"Button.arc" = "12"
"##,
        )
        .unwrap();

        let config = FlatLafConfig::load(Some(&path)).unwrap();
        assert_eq!(
            config.theme.files,
            vec![
                dir.path().join("FlatLightLaf.properties"),
                PathBuf::from("/abs/custom.properties")
            ]
        );
        assert!(config.theme.dark);
        assert_eq!(config.theme.platform.as_deref(), Some("linux"));
        assert_eq!(config.scale.factor, 1.5);
        assert_eq!(config.extra_defaults.get("@accentColor").map(String::as_str), Some("#f00"));
    }

    #[test]
    fn test_sections_are_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[theme]\ndark = true\n").unwrap();

        let config = FlatLafConfig::load(Some(&path)).unwrap();
        assert!(config.theme.dark);
        assert_eq!(config.scale, ScaleConfig::default());
        assert!(config.extra_defaults.is_empty());
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FlatLafConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = FlatLafConfig::default();
        config.theme.dark = true;
        config.extra_defaults.insert("@accentColor".to_string(), "#0f0".to_string());

        let text = config.to_toml().unwrap();
        assert_eq!(toml::from_str::<FlatLafConfig>(&text).unwrap(), config);
    }
}
