//! Subcommand implementations
//!
//! Each command renders its output into a `String` so `main` only has to
//! print it.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use flatlaf_core::UiScale;
use flatlaf_style::{parse, Platform, StyleValue, UiDefaults};
use flatlaf_ui::{create_ui, Component, Decorations, UI_TYPES};
use tracing::{debug, info, warn};

use crate::config::FlatLafConfig;

/// Theme context after merging flatlaf.toml with command-line flags
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub dark: bool,
    pub platform: Platform,
    pub scale: f32,
    pub extra_defaults: BTreeMap<String, String>,
}

/// Command-line values that override flatlaf.toml
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub files: Vec<PathBuf>,
    pub dark: bool,
    pub platform: Option<String>,
    pub scale: Option<f32>,
}

impl Settings {
    pub fn new(config: FlatLafConfig, overrides: Overrides) -> Result<Self> {
        let files = if overrides.files.is_empty() {
            config.theme.files
        } else {
            overrides.files
        };

        let platform = match overrides.platform.or(config.theme.platform) {
            Some(name) => match Platform::from_name(&name) {
                Some(platform) => platform,
                None => bail!("Unknown platform '{}' (expected windows, macos, linux or other)", name),
            },
            None => Platform::current(),
        };

        Ok(Self {
            files,
            dark: overrides.dark || config.theme.dark,
            platform,
            scale: overrides.scale.unwrap_or(config.scale.factor),
            extra_defaults: config.extra_defaults,
        })
    }

    /// Load the theme files into a new defaults table
    pub fn build_defaults(&self) -> Result<UiDefaults> {
        let mut defaults = UiDefaults::new()
            .with_dark(self.dark)
            .with_platform(self.platform)
            .with_scale(UiScale::new(self.scale));

        let report = defaults.set_global_extra_defaults(self.extra_defaults.clone());
        debug!(loaded = report.loaded, "loaded extra defaults");

        let mut sources = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let text = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
            sources.push(text);
        }
        if sources.is_empty() {
            return Ok(defaults);
        }

        let sources: Vec<&str> = sources.iter().map(String::as_str).collect();
        let report = defaults
            .load_sources(&sources)
            .context("Failed to load theme properties")?;
        for (key, message) in &report.errors {
            warn!(key = %key, "{}", message);
        }
        info!(files = self.files.len(), loaded = report.loaded, "loaded theme");
        Ok(defaults)
    }
}

fn describe(value: &StyleValue) -> String {
    let text = value.to_literal().unwrap_or_else(|| value.to_string());
    format!("{} ({})", text, value.value_type())
}

/// Parse style text and list its typed values
pub fn eval(style: &str, defaults: &UiDefaults) -> Result<String> {
    let mut out = String::new();
    let Some(map) = parse(style, defaults)? else {
        return Ok(out);
    };
    for (key, value) in &map {
        let _ = writeln!(out, "{} = {}", key, describe(value));
    }
    Ok(out)
}

/// Resolve references in `value`, then parse it as a value for `key`
pub fn resolve(value: &str, key: &str, defaults: &UiDefaults) -> Result<String> {
    let resolved = defaults.resolve(value)?;
    let parsed = defaults.parse_value(key, value, None)?;

    let mut out = String::new();
    let _ = writeln!(out, "resolved: {}", resolved);
    let _ = writeln!(out, "value:    {}", describe(&parsed));
    Ok(out)
}

/// Sorted `key = value` lines of all defaults starting with `filter`
pub fn dump(defaults: &UiDefaults, filter: Option<&str>, variables: bool) -> String {
    let mut entries: Vec<_> = defaults
        .iter()
        .filter(|(key, _)| filter.map_or(true, |prefix| key.starts_with(prefix)))
        .collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    if variables {
        for (name, value) in defaults.variables() {
            let _ = writeln!(out, "{} = {}", name, value);
        }
    }
    for (key, value) in entries {
        let _ = writeln!(out, "{} = {}", key, describe(value));
    }
    out
}

/// Styleable keys of a component type with their value types
pub fn infos(type_name: &str, defaults: &UiDefaults) -> Result<String> {
    let decorations = Decorations::from_defaults(defaults);
    let Some(mut ui) = create_ui(type_name, &decorations) else {
        bail!("Unknown component type '{}' (expected one of {})", type_name, UI_TYPES.join(", "));
    };

    let mut c = Component::new();
    ui.install_ui(&mut c, defaults);

    let mut out = String::new();
    for (key, value_type) in ui.styleable_infos_for(&c)?.iter() {
        let _ = writeln!(out, "{}: {}", key, value_type);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn defaults() -> UiDefaults {
        let mut defaults = UiDefaults::new();
        defaults
            .load_properties(
                "@accentColor = #2675bf\n\
                 Component.focusColor = $Component.accentColor\n\
                 Component.accentColor = @accentColor\n\
                 Button.arc = 6\n",
            )
            .unwrap();
        defaults
    }

    #[test]
    fn test_eval() {
        let out = eval("arc: 12; foreground: darken(#f00, 20%)", &defaults()).unwrap();
        assert_eq!(out, "arc = 12 (Integer)\nforeground = #990000 (Color)\n");
        assert_eq!(eval(" ; ", &defaults()).unwrap(), "");
    }

    #[test]
    fn test_resolve() {
        let out = resolve("@accentColor", "Button.background", &defaults()).unwrap();
        assert_eq!(out, "resolved: #2675bf\nvalue:    #2675bf (Color)\n");
        assert!(resolve("$Nope.color", "Button.background", &defaults()).is_err());
    }

    #[test]
    fn test_dump_filter() {
        let out = dump(&defaults(), Some("Button."), false);
        assert_eq!(out, "Button.arc = 6 (Integer)\n");

        let out = dump(&defaults(), Some("Button."), true);
        assert!(out.starts_with("@accentColor = #2675bf\n"));
    }

    #[test]
    fn test_infos() {
        let out = infos("Button", &defaults()).unwrap();
        assert!(out.lines().any(|line| line == "hoverBackground: Color"));
        assert!(out.lines().any(|line| line == "arc: Integer"));

        let err = infos("Slider", &defaults()).unwrap_err();
        assert!(err.to_string().starts_with("Unknown component type 'Slider'"));
    }

    #[test]
    fn test_settings_flags_win() {
        let mut config = FlatLafConfig::default();
        config.theme.files = vec![PathBuf::from("a.properties")];
        config.theme.platform = Some("linux".to_string());
        config.scale.factor = 2.0;

        let overrides = Overrides {
            files: vec![PathBuf::from("b.properties")],
            dark: true,
            platform: Some("mac".to_string()),
            scale: None,
        };
        let settings = Settings::new(config, overrides).unwrap();
        assert_eq!(settings.files, vec![PathBuf::from("b.properties")]);
        assert!(settings.dark);
        assert_eq!(settings.platform, Platform::MacOs);
        assert_eq!(settings.scale, 2.0);
    }

    #[test]
    fn test_settings_unknown_platform() {
        let overrides = Overrides {
            platform: Some("amiga".to_string()),
            ..Overrides::default()
        };
        assert!(Settings::new(FlatLafConfig::default(), overrides).is_err());
    }

    #[test]
    fn test_build_defaults_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.properties");
        let custom = dir.path().join("custom.properties");
        fs::write(&base, "Button.arc = 6\n[dark]Button.arc = 8\n").unwrap();
        fs::write(&custom, "Button.focusedBackground = #f00\n").unwrap();

        let mut config = FlatLafConfig::default();
        config.theme.files = vec![base, custom];
        config.theme.dark = true;
        config.extra_defaults.insert("Button.minimumWidth".to_string(), "80".to_string());

        let defaults = Settings::new(config, Overrides::default())
            .unwrap()
            .build_defaults()
            .unwrap();
        assert_eq!(defaults.get_int("Button.arc"), Some(8));
        assert_eq!(defaults.get_int("Button.minimumWidth"), Some(80));
        assert!(defaults.get_color("Button.focusedBackground").is_some());
    }

    #[test]
    fn test_build_defaults_missing_file() {
        let mut config = FlatLafConfig::default();
        config.theme.files = vec![PathBuf::from("/nonexistent/theme.properties")];
        let err = Settings::new(config, Overrides::default())
            .unwrap()
            .build_defaults()
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
